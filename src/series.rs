use alloc::{string::String, sync::Arc};
use core::fmt;

use crate::{Array, NumericArray, OrderedIndex, SeriesError};

/// A named mapping from an ordered domain of keys to values.
///
/// Position `i` of the values belongs to key `i` of the domain. The domain is held
/// behind an [`Arc`] and shared with every series derived from this one, and the
/// values are an immutable [`Array`], so clones and renames are cheap. Lookups by
/// key return the value at the nearest key at or before the requested one, or the
/// series' default value when the requested key precedes every key.
///
/// # Type Parameters
///
/// * `K` - Key type, ordered
/// * `A` - Value container
///
/// # Examples
///
/// ```
/// # use ta_series::{NumericArray, NumericSeries, OrderedIndex};
/// let domain = OrderedIndex::new(vec![1, 5, 10]).unwrap();
/// let s = NumericSeries::new("s", domain, NumericArray::of(&[1.0, 2.0, 3.0]), -1.0).unwrap();
///
/// assert_eq!(*s.value_at(&0), -1.0);
/// assert_eq!(*s.value_at(&7), 2.0);
/// assert_eq!(*s.value_at(&10), 3.0);
/// assert_eq!(s.to_string(), "s");
/// ```
#[derive(Debug, Clone)]
pub struct Series<K, A: Array> {
    name: String,
    domain: Arc<OrderedIndex<K>>,
    values: A,
    default_value: A::Item,
}

/// Series of floating point values, `f64` unless specified
pub type NumericSeries<K, T = f64> = Series<K, NumericArray<T>>;

impl<K: Ord, A: Array> Series<K, A> {
    /// Creates a series
    ///
    /// # Arguments
    ///
    /// * `name` - Label of the series
    /// * `domain` - Keys, either owned or already shared through an `Arc`
    /// * `values` - One value per key
    /// * `default_value` - Returned by lookups preceding every key
    ///
    /// # Returns
    ///
    /// * `Result<Self, SeriesError>` - The series, or `DomainMismatch` if the domain and
    ///   the values differ in length
    pub fn new(
        name: impl Into<String>,
        domain: impl Into<Arc<OrderedIndex<K>>>,
        values: A,
        default_value: A::Item,
    ) -> Result<Self, SeriesError> {
        let name = name.into();
        let domain = domain.into();
        if domain.len() != values.len() {
            log::debug!(
                "rejecting series {name}: {} keys for {} values",
                domain.len(),
                values.len()
            );
            return Err(SeriesError::DomainMismatch {
                domain: domain.len(),
                values: values.len(),
            });
        }
        Ok(Self {
            name,
            domain,
            values,
            default_value,
        })
    }

    /// Builds a series on this series' domain, lengths are known to agree
    fn derive<B: Array>(
        &self,
        name: impl Into<String>,
        values: B,
        default_value: B::Item,
    ) -> Series<K, B> {
        Series {
            name: name.into(),
            domain: Arc::clone(&self.domain),
            values,
            default_value,
        }
    }

    /// Label of the series
    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Same domain and values under another name, nothing is copied
    pub fn with_name(&self, name: impl Into<String>) -> Self
    where
        A::Item: Clone,
    {
        self.derive(name, self.values.clone(), self.default_value.clone())
    }

    /// Shared domain
    #[inline]
    pub fn domain(&self) -> &Arc<OrderedIndex<K>> {
        &self.domain
    }

    /// Key at `position`
    #[inline]
    pub fn key(&self, position: usize) -> Option<&K> {
        self.domain.get(position)
    }

    /// Values container
    #[inline]
    pub fn values(&self) -> &A {
        &self.values
    }

    /// Value at `position`
    #[inline]
    pub fn value(&self, position: usize) -> Option<&A::Item> {
        self.values.get(position)
    }

    /// Value at the last key `<= key`, or the default value if there is none
    ///
    /// # Arguments
    ///
    /// * `key` - The key to look up
    ///
    /// # Returns
    ///
    /// * `&A::Item` - The value in effect at `key`
    pub fn value_at(&self, key: &K) -> &A::Item {
        let position = self.domain.find_le(key);
        if position < 0 {
            return &self.default_value;
        }
        self.values
            .get(position as usize)
            .unwrap_or(&self.default_value)
    }

    /// Value returned by lookups preceding the domain
    #[inline]
    pub fn default_value(&self) -> &A::Item {
        &self.default_value
    }

    /// Number of keys
    #[inline]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Returns `true` if the series has no key
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// See [`OrderedIndex::find`]
    #[inline]
    pub fn find(&self, key: &K) -> isize {
        self.domain.find(key)
    }

    /// See [`OrderedIndex::find_ge`]
    #[inline]
    pub fn find_ge(&self, key: &K) -> isize {
        self.domain.find_ge(key)
    }

    /// See [`OrderedIndex::find_gt`]
    #[inline]
    pub fn find_gt(&self, key: &K) -> isize {
        self.domain.find_gt(key)
    }

    /// See [`OrderedIndex::find_le`]
    #[inline]
    pub fn find_le(&self, key: &K) -> isize {
        self.domain.find_le(key)
    }

    /// See [`OrderedIndex::find_lt`]
    #[inline]
    pub fn find_lt(&self, key: &K) -> isize {
        self.domain.find_lt(key)
    }

    /// Transforms every value, keeping the domain and the default value
    pub fn map_values<F>(&self, name: impl Into<String>, mapper: F) -> Self
    where
        A::Item: Clone,
        F: FnMut(&A::Item) -> A::Item,
    {
        self.derive(name, self.values.map(mapper), self.default_value.clone())
    }

    /// Transforms every value into another container kind
    ///
    /// # Arguments
    ///
    /// * `name` - Label of the new series
    /// * `default_value` - Default of the new series
    /// * `mapper` - Called once per value, in key order
    ///
    /// # Returns
    ///
    /// * `Series<K, B>` - A series on the same domain
    pub fn map_values_into<B, F>(
        &self,
        name: impl Into<String>,
        default_value: B::Item,
        mapper: F,
    ) -> Series<K, B>
    where
        B: Array,
        F: FnMut(&A::Item) -> B::Item,
    {
        self.derive(name, self.values.map_into(mapper), default_value)
    }

    /// Combines every value with the output of `rhs` for its key
    ///
    /// # Arguments
    ///
    /// * `name` - Label of the new series
    /// * `rhs` - Produces the right operand from a key
    /// * `op` - Combines the value and the right operand
    ///
    /// # Returns
    ///
    /// * `Self` - A series on the same domain with the same default value
    pub fn zip_with<R, F, G>(&self, name: impl Into<String>, mut rhs: F, mut op: G) -> Self
    where
        A::Item: Clone,
        F: FnMut(&K) -> R,
        G: FnMut(&A::Item, R) -> A::Item,
    {
        let values = self
            .domain
            .iter()
            .zip(self.values.as_slice())
            .map(|(key, x)| op(x, rhs(key)))
            .collect();
        self.derive(name, A::from_vec(values), self.default_value.clone())
    }

    /// Combines every value with the value `other` holds at the same key
    ///
    /// The right operand is looked up with [`Series::value_at`], so keys `other` does not
    /// contain take the value of its nearest earlier key, or its default.
    pub fn zip_with_series<B, G>(
        &self,
        name: impl Into<String>,
        other: &Series<K, B>,
        mut op: G,
    ) -> Self
    where
        A::Item: Clone,
        B: Array,
        G: FnMut(&A::Item, &B::Item) -> A::Item,
    {
        self.zip_with(name, |key| other.value_at(key), |x, y| op(x, y))
    }

    /// Combines values position by position with `other`
    ///
    /// # Arguments
    ///
    /// * `name` - Label of the new series
    /// * `other` - One right operand per key
    /// * `op` - Combines the value and the right operand
    ///
    /// # Returns
    ///
    /// * `Result<Self, SeriesError>` - The new series, or `SizeMismatch` if `other` has
    ///   another length than the series
    pub fn zip_with_array<R, G>(
        &self,
        name: impl Into<String>,
        other: &[R],
        mut op: G,
    ) -> Result<Self, SeriesError>
    where
        A::Item: Clone,
        G: FnMut(&A::Item, &R) -> A::Item,
    {
        if other.len() != self.len() {
            log::debug!(
                "rejecting positional operand for {}: {} values for {} keys",
                self.name,
                other.len(),
                self.len()
            );
            return Err(SeriesError::SizeMismatch {
                expected: self.len(),
                got: other.len(),
            });
        }
        let values = self
            .values
            .as_slice()
            .iter()
            .zip(other)
            .map(|(x, y)| op(x, y))
            .collect();
        Ok(self.derive(name, A::from_vec(values), self.default_value.clone()))
    }

    /// Returns `true` if both series hold the very same domain
    pub fn shares_domain<B: Array>(&self, other: &Series<K, B>) -> bool {
        Arc::ptr_eq(&self.domain, &other.domain)
    }

    /// Iterates over `(key, value)` pairs in key order
    pub fn iter(&self) -> impl Iterator<Item = (&K, &A::Item)> + '_ {
        self.domain.iter().zip(self.values.as_slice())
    }
}

impl<K, A: Array> fmt::Display for Series<K, A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}
