use alloc::{format, vec::Vec};
use core::ops::Index;

use crate::{
    GenericArray, SeriesError,
    utils::search::{find, find_ge, find_gt, find_le, find_lt},
};

/// An immutable ascending sequence of keys forming the domain of a series.
///
/// Keys are non-descending (duplicates are allowed) and can only be supplied through
/// a validating constructor, so every `OrderedIndex` upholds
/// `key[i - 1] <= key[i]` for its whole lifetime. No mutable view of the keys is
/// ever handed out.
///
/// The five searches share one underlying binary search and run in `O(log n)`,
/// plus a walk over the duplicates of the searched key where noted.
///
/// # Examples
///
/// ```
/// # use ta_series::OrderedIndex;
/// let index = OrderedIndex::new(vec![2, 5, 5, 8]).unwrap();
///
/// assert_eq!(index.find(&5), 1);
/// assert_eq!(index.find(&6), -4);
/// assert_eq!(index.find_ge(&6), 3);
/// assert_eq!(index.find_gt(&5), 3);
/// assert_eq!(index.find_le(&4), 0);
/// assert_eq!(index.find_lt(&5), 0);
///
/// assert!(OrderedIndex::new(vec![3, 1]).is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderedIndex<K> {
    /// Ascending keys
    keys: Vec<K>,
}

impl<K: Ord> OrderedIndex<K> {
    /// Creates an index adopting `keys` without copying them
    ///
    /// # Arguments
    ///
    /// * `keys` - Keys in non-descending order
    ///
    /// # Returns
    ///
    /// * `Result<Self, SeriesError>` - The index, or `NotAscending` naming the first out-of-order position
    pub fn new(keys: Vec<K>) -> Result<Self, SeriesError> {
        check_order(&keys)?;
        Ok(Self { keys })
    }

    /// Creates an index from a copy of `keys`
    pub fn from_slice(keys: &[K]) -> Result<Self, SeriesError>
    where
        K: Clone,
    {
        check_order(keys)?;
        Ok(Self {
            keys: keys.to_vec(),
        })
    }

    /// Creates an empty index
    pub fn empty() -> Self {
        Self { keys: Vec::new() }
    }

    /// Starts an append-only builder, validated when built
    ///
    /// # Arguments
    ///
    /// * `size_hint` - Expected number of keys
    pub fn builder(size_hint: usize) -> IndexBuilder<K> {
        IndexBuilder {
            keys: Vec::with_capacity(size_hint),
        }
    }

    /// Number of keys
    #[inline]
    pub fn len(&self) -> usize {
        self.keys.len()
    }

    /// Returns `true` if the index holds no key
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    /// Key at `position`, `None` when out of bounds
    #[inline]
    pub fn get(&self, position: usize) -> Option<&K> {
        self.keys.get(position)
    }

    /// Smallest key
    #[inline]
    pub fn first(&self) -> Option<&K> {
        self.keys.first()
    }

    /// Largest key
    #[inline]
    pub fn last(&self) -> Option<&K> {
        self.keys.last()
    }

    /// Keys as an ascending slice
    #[inline]
    pub fn as_slice(&self) -> &[K] {
        &self.keys
    }

    /// Iterates over the keys in ascending order
    pub fn iter(&self) -> core::slice::Iter<'_, K> {
        self.keys.iter()
    }

    /// Position of a key equal to `x`, otherwise `-(insertion_point) - 1`
    ///
    /// The insertion point is the number of keys strictly smaller than `x`; an empty
    /// index therefore answers `-1` for any key. With duplicate keys the first
    /// occurrence is reported.
    #[inline]
    pub fn find(&self, x: &K) -> isize {
        find(&self.keys, x)
    }

    /// First position with a key `>= x`, `len()` if none
    #[inline]
    pub fn find_ge(&self, x: &K) -> isize {
        find_ge(&self.keys, x)
    }

    /// First position with a key `> x`, skipping every duplicate of `x`; `len()` if none
    #[inline]
    pub fn find_gt(&self, x: &K) -> isize {
        find_gt(&self.keys, x)
    }

    /// Last position with a key `<= x`, skipping forward over duplicates of `x`; `-1` if none
    #[inline]
    pub fn find_le(&self, x: &K) -> isize {
        find_le(&self.keys, x)
    }

    /// Last position with a key `< x`, retreating past every duplicate of `x`; `-1` if none
    #[inline]
    pub fn find_lt(&self, x: &K) -> isize {
        find_lt(&self.keys, x)
    }

    /// Transforms every key and re-validates the ascending order of the result
    ///
    /// The mapper must preserve order; nothing is sorted here.
    ///
    /// # Arguments
    ///
    /// * `mapper` - Order-preserving key transform
    ///
    /// # Returns
    ///
    /// * `Result<OrderedIndex<R>, SeriesError>` - The mapped index, or `NotAscending`
    ///   when the mapper broke the order
    pub fn map_sorted<R, F>(&self, mapper: F) -> Result<OrderedIndex<R>, SeriesError>
    where
        R: Ord,
        F: FnMut(&K) -> R,
    {
        OrderedIndex::new(self.keys.iter().map(mapper).collect())
    }

    /// Transforms every key into a plain, unordered array
    pub fn map<R, F>(&self, mapper: F) -> GenericArray<R>
    where
        F: FnMut(&K) -> R,
    {
        GenericArray::from(self.keys.iter().map(mapper).collect::<Vec<_>>())
    }
}

impl OrderedIndex<i64> {
    /// Creates evenly spaced keys `start, start + step, ...` below `end_excl`
    ///
    /// Convenient for epoch-millisecond domains.
    ///
    /// # Arguments
    ///
    /// * `start` - First key
    /// * `end_excl` - Exclusive upper bound
    /// * `step` - Positive distance between consecutive keys
    ///
    /// # Returns
    ///
    /// * `Result<Self, SeriesError>` - The index, or `InvalidLinspace` for a non-positive
    ///   step or an upper bound below `start`
    ///
    /// # Examples
    ///
    /// ```
    /// # use ta_series::OrderedIndex;
    /// let index = OrderedIndex::linspace(1_000, 1_250, 100).unwrap();
    /// assert_eq!(index.as_slice(), &[1_000, 1_100, 1_200]);
    /// ```
    pub fn linspace(start: i64, end_excl: i64, step: i64) -> Result<Self, SeriesError> {
        if step <= 0 || end_excl < start {
            return Err(SeriesError::InvalidLinspace(format!(
                "start {start}, end {end_excl}, step {step}"
            )));
        }
        let range = (end_excl as i128) - (start as i128);
        let step_wide = step as i128;
        let size = (range + step_wide - 1) / step_wide;
        let size = usize::try_from(size).map_err(|_| {
            SeriesError::InvalidLinspace(format!("{size} keys do not fit in memory"))
        })?;

        // Every key lies in [start, end_excl), only the product needs the wider type
        let keys = (0..size)
            .map(|i| (start as i128 + i as i128 * step_wide) as i64)
            .collect();
        Ok(Self { keys })
    }
}

impl<K> Index<usize> for OrderedIndex<K> {
    type Output = K;

    fn index(&self, position: usize) -> &K {
        &self.keys[position]
    }
}

impl<'a, K> IntoIterator for &'a OrderedIndex<K> {
    type Item = &'a K;
    type IntoIter = core::slice::Iter<'a, K>;

    fn into_iter(self) -> Self::IntoIter {
        self.keys.iter()
    }
}

/// Append-only builder for an [`OrderedIndex`]
///
/// Keys are collected as given; the order is checked once by [`IndexBuilder::build`].
#[derive(Debug, Clone)]
pub struct IndexBuilder<K> {
    keys: Vec<K>,
}

impl<K: Ord> IndexBuilder<K> {
    /// Appends a key
    pub fn push(&mut self, key: K) -> &mut Self {
        self.keys.push(key);
        self
    }

    /// Number of keys appended so far
    pub fn len(&self) -> usize {
        self.keys.len()
    }

    /// Returns `true` if nothing was appended yet
    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    /// Materializes the index, failing with `NotAscending` if the keys are out of order
    pub fn build(self) -> Result<OrderedIndex<K>, SeriesError> {
        OrderedIndex::new(self.keys)
    }
}

impl<K: Ord> Extend<K> for IndexBuilder<K> {
    fn extend<I: IntoIterator<Item = K>>(&mut self, iter: I) {
        self.keys.extend(iter);
    }
}

/// Checks that `keys` are in non-descending order
fn check_order<K: Ord>(keys: &[K]) -> Result<(), SeriesError> {
    match keys.windows(2).position(|pair| pair[0] > pair[1]) {
        Some(i) => {
            log::debug!("rejecting {} keys: out of order at position {}", keys.len(), i + 1);
            Err(SeriesError::NotAscending { position: i + 1 })
        }
        None => Ok(()),
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::OrderedIndex;
    use crate::{Array, SeriesError};

    #[test]
    fn test_rejects_descending_keys() {
        assert_eq!(
            OrderedIndex::new(vec![1, 2, 4, 3]).unwrap_err(),
            SeriesError::NotAscending { position: 3 }
        );
        assert_eq!(
            OrderedIndex::from_slice(&["b", "a"]).unwrap_err(),
            SeriesError::NotAscending { position: 1 }
        );
    }

    #[test]
    fn test_accepts_duplicates_and_empty() {
        let index = OrderedIndex::new(vec![1, 1, 2, 2, 2]).unwrap();
        assert_eq!(index.len(), 5);
        assert_eq!(index.first(), Some(&1));
        assert_eq!(index.last(), Some(&2));

        let empty = OrderedIndex::<i64>::empty();
        assert!(empty.is_empty());
        assert_eq!(empty.find(&3), -1);
        assert_eq!(empty.find_ge(&3), 0);
        assert_eq!(empty.find_gt(&3), 0);
        assert_eq!(empty.find_le(&3), -1);
        assert_eq!(empty.find_lt(&3), -1);
    }

    #[test]
    fn test_string_keys() {
        let index = OrderedIndex::from_slice(&["a", "b", "e", "f"]).unwrap();
        assert_eq!(index[2], "e");
        assert_eq!(index.find_le(&"c"), 1);
        assert_eq!(index.find_ge(&"c"), 2);
        assert_eq!(index.find(&"c"), -3);
    }

    #[test]
    fn test_builder() {
        let mut builder = OrderedIndex::builder(3);
        builder.push(1).push(3);
        builder.extend([5, 7]);
        assert_eq!(builder.len(), 4);
        let index = builder.build().unwrap();
        assert_eq!(index.as_slice(), &[1, 3, 5, 7]);

        let mut builder = OrderedIndex::builder(2);
        builder.push(2).push(1);
        assert!(builder.build().is_err());
    }

    #[test]
    fn test_map_sorted() {
        let index = OrderedIndex::new(vec![1, 2, 3]).unwrap();

        let shifted = index.map_sorted(|k| k * 10).unwrap();
        assert_eq!(shifted.as_slice(), &[10, 20, 30]);

        let reversed = index.map_sorted(|k| -k);
        assert_eq!(reversed, Err(SeriesError::NotAscending { position: 1 }));

        let labels = index.map(|k| k % 2 == 0);
        assert_eq!(labels.as_slice(), &[false, true, false]);
    }

    #[test]
    fn test_linspace() {
        let index = OrderedIndex::linspace(0, 10, 3).unwrap();
        assert_eq!(index.as_slice(), &[0, 3, 6, 9]);

        let index = OrderedIndex::linspace(0, 9, 3).unwrap();
        assert_eq!(index.as_slice(), &[0, 3, 6]);

        assert!(OrderedIndex::linspace(5, 5, 1).unwrap().is_empty());
        assert!(OrderedIndex::linspace(0, 10, 0).is_err());
        assert!(OrderedIndex::linspace(10, 0, 1).is_err());
    }

    #[test]
    fn test_linspace_at_i64_extremes() {
        let index = OrderedIndex::linspace(i64::MIN, i64::MAX, 1 << 62).unwrap();
        assert_eq!(index.as_slice(), &[i64::MIN, -(1 << 62), 0, 1 << 62]);

        let index = OrderedIndex::linspace(i64::MAX - 5, i64::MAX, 4).unwrap();
        assert_eq!(index.as_slice(), &[i64::MAX - 5, i64::MAX - 1]);
    }

    #[test]
    fn test_iteration() {
        let index = OrderedIndex::new(vec![4, 8, 15]).unwrap();
        let collected: Vec<_> = (&index).into_iter().copied().collect();
        assert_eq!(collected, vec![4, 8, 15]);
        assert_eq!(index.iter().count(), 3);
    }
}
