use alloc::{format, sync::Arc, vec::Vec};
use core::ops::Index;

use num_traits::Float;

use crate::SeriesError;

/// Immutable, cheaply clonable container of series values.
///
/// Implementations keep their elements behind an [`Arc`], so cloning an array (or a
/// series holding it) shares the storage instead of copying it. New arrays are only
/// ever produced from a transform, never by mutating an existing one.
pub trait Array: Clone {
    /// Element type
    type Item;

    /// Elements as a slice
    fn as_slice(&self) -> &[Self::Item];

    /// Builds a container of the same kind holding `values`
    fn from_vec(values: Vec<Self::Item>) -> Self;

    /// Number of elements
    #[inline]
    fn len(&self) -> usize {
        self.as_slice().len()
    }

    /// Returns `true` if the array holds no element
    #[inline]
    fn is_empty(&self) -> bool {
        self.as_slice().is_empty()
    }

    /// Element at `index`, `None` when out of bounds
    #[inline]
    fn get(&self, index: usize) -> Option<&Self::Item> {
        self.as_slice().get(index)
    }

    /// First element
    #[inline]
    fn first(&self) -> Option<&Self::Item> {
        self.as_slice().first()
    }

    /// Last element
    #[inline]
    fn last(&self) -> Option<&Self::Item> {
        self.as_slice().last()
    }

    /// Copies the elements into a `Vec`
    fn to_vec(&self) -> Vec<Self::Item>
    where
        Self::Item: Clone,
    {
        self.as_slice().to_vec()
    }

    /// Transforms every element into a new array of the same kind
    ///
    /// The mapper is called once per element, in index order.
    fn map<F>(&self, mapper: F) -> Self
    where
        F: FnMut(&Self::Item) -> Self::Item,
    {
        Self::from_vec(self.as_slice().iter().map(mapper).collect())
    }

    /// Transforms every element into an array of another kind
    ///
    /// The mapper is called once per element, in index order.
    fn map_into<B, F>(&self, mapper: F) -> B
    where
        B: Array,
        F: FnMut(&Self::Item) -> B::Item,
    {
        B::from_vec(self.as_slice().iter().map(mapper).collect())
    }
}

/// Dense storage of floating point values.
///
/// # Examples
///
/// ```
/// # use ta_series::{Array, NumericArray};
/// let a = NumericArray::from(vec![1.0, 2.0, 3.0]);
/// let doubled = a.map(|x| x * 2.0);
///
/// assert_eq!(doubled.as_slice(), &[2.0, 4.0, 6.0]);
/// assert_eq!(a.get(2), Some(&3.0));
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct NumericArray<T> {
    values: Arc<[T]>,
}

impl<T: Float> NumericArray<T> {
    /// Creates an array from a copy of `values`
    pub fn of(values: &[T]) -> Self {
        Self {
            values: Arc::from(values),
        }
    }

    /// Creates an empty array
    pub fn empty() -> Self {
        Self::of(&[])
    }

    /// Creates evenly spaced values `start, start + step, ...` up to `end_excl`
    ///
    /// The number of values is `ceil((end_excl - start) / step)` for a non-negative
    /// range and `floor` of the same ratio for a negative one, so a negative step walks
    /// downwards from `start`.
    ///
    /// # Arguments
    ///
    /// * `start` - First value
    /// * `end_excl` - Exclusive bound
    /// * `step` - Distance between consecutive values
    ///
    /// # Returns
    ///
    /// * `Result<Self, SeriesError>` - The array, or `InvalidLinspace` if the parameters
    ///   describe a negative or unbounded number of values
    ///
    /// # Examples
    ///
    /// ```
    /// # use ta_series::{Array, NumericArray};
    /// let a = NumericArray::linspace(0.0, 1.0, 0.25).unwrap();
    /// assert_eq!(a.as_slice(), &[0.0, 0.25, 0.5, 0.75]);
    ///
    /// let down = NumericArray::linspace(1.0, 0.0, -0.5).unwrap();
    /// assert_eq!(down.as_slice(), &[1.0, 0.5]);
    /// ```
    pub fn linspace(start: T, end_excl: T, step: T) -> Result<Self, SeriesError>
    where
        T: core::fmt::Display,
    {
        let invalid = || {
            SeriesError::InvalidLinspace(format!("start {start}, end {end_excl}, step {step}"))
        };

        let range = end_excl - start;
        let ratio = range / step;
        let size = if range < T::zero() {
            ratio.floor()
        } else {
            ratio.ceil()
        };
        if !size.is_finite() || size < T::zero() {
            return Err(invalid());
        }
        let size = size.to_usize().ok_or_else(invalid)?;

        let mut values = Vec::with_capacity(size);
        let mut x = start;
        for _ in 0..size {
            values.push(x);
            x = x + step;
        }
        Ok(Self::from(values))
    }

    /// Iterates over copies of the values
    pub fn iter(&self) -> impl Iterator<Item = T> + '_ {
        self.values.iter().copied()
    }

    /// Returns `true` if both arrays share the same storage
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.values, &other.values)
    }
}

impl<T: Float> Array for NumericArray<T> {
    type Item = T;

    #[inline]
    fn as_slice(&self) -> &[T] {
        &self.values
    }

    fn from_vec(values: Vec<T>) -> Self {
        Self::from(values)
    }
}

impl<T> From<Vec<T>> for NumericArray<T> {
    fn from(values: Vec<T>) -> Self {
        Self {
            values: Arc::from(values),
        }
    }
}

impl<T> Index<usize> for NumericArray<T> {
    type Output = T;

    fn index(&self, index: usize) -> &T {
        &self.values[index]
    }
}

/// Storage for values of any type, e.g. labels or flags derived from a numeric series.
#[derive(Debug, Clone, PartialEq)]
pub struct GenericArray<T> {
    values: Arc<[T]>,
}

impl<T> GenericArray<T> {
    /// Creates an empty array
    pub fn empty() -> Self {
        Self::from(Vec::new())
    }

    /// Returns `true` if both arrays share the same storage
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.values, &other.values)
    }
}

impl<T: Clone> GenericArray<T> {
    /// Creates an array from a copy of `values`
    pub fn of(values: &[T]) -> Self {
        Self {
            values: Arc::from(values),
        }
    }
}

impl<T: Clone> Array for GenericArray<T> {
    type Item = T;

    #[inline]
    fn as_slice(&self) -> &[T] {
        &self.values
    }

    fn from_vec(values: Vec<T>) -> Self {
        Self::from(values)
    }
}

impl<T> From<Vec<T>> for GenericArray<T> {
    fn from(values: Vec<T>) -> Self {
        Self {
            values: Arc::from(values),
        }
    }
}

impl<T> Index<usize> for GenericArray<T> {
    type Output = T;

    fn index(&self, index: usize) -> &T {
        &self.values[index]
    }
}
