use ahash::RandomState;
use hashbrown::HashMap;
use num_traits::Float;
use ordered_float::{OrderedFloat, PrimitiveFloat};

use alloc::collections::BinaryHeap;
use core::{
    cmp::Ordering,
    hash::{Hash, Hasher},
    marker::PhantomData,
};

/// Slack tolerated between stored and live entries before stale entries are purged.
const COMPACT_SLACK: usize = 16;

/// Trait for defining which element sits at the apex of a [`LazyHeap`]
pub trait OrderPolicy {
    /// Compares two keys; the greatest key under this ordering is the apex
    fn rank<K: Ord>(a: &K, b: &K) -> Ordering;
}

/// Order policy for minimum at the apex
#[derive(Debug, Clone, Copy)]
pub struct Min;

/// Order policy for maximum at the apex
#[derive(Debug, Clone, Copy)]
pub struct Max;

impl OrderPolicy for Min {
    #[inline]
    fn rank<K: Ord>(a: &K, b: &K) -> Ordering {
        b.cmp(a)
    }
}

impl OrderPolicy for Max {
    #[inline]
    fn rank<K: Ord>(a: &K, b: &K) -> Ordering {
        a.cmp(b)
    }
}

/// Stored value, ordered like [`OrderedFloat`] except that `-0.0` sits below `0.0`
#[derive(Debug, Clone, Copy)]
struct Key<T>(OrderedFloat<T>);

impl<T: Float + PrimitiveFloat> Key<T> {
    #[inline]
    fn new(value: T) -> Self {
        Self(OrderedFloat(value))
    }

    #[inline]
    fn get(self) -> T {
        self.0.0
    }
}

impl<T: Float + PrimitiveFloat> PartialEq for Key<T> {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl<T: Float + PrimitiveFloat> Eq for Key<T> {}

impl<T: Float + PrimitiveFloat> PartialOrd for Key<T> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<T: Float + PrimitiveFloat> Ord for Key<T> {
    fn cmp(&self, other: &Self) -> Ordering {
        match self.0.cmp(&other.0) {
            Ordering::Equal if self.get() == T::zero() => {
                let (a, b) = (self.get(), other.get());
                Float::is_sign_negative(b).cmp(&Float::is_sign_negative(a))
            }
            ordering => ordering,
        }
    }
}

impl<T: Float + PrimitiveFloat> Hash for Key<T> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.0.hash(state);
    }
}

/// Heap entry ordered by the policy `O`
#[derive(Debug, Clone, Copy)]
struct Ranked<T, O>(Key<T>, PhantomData<O>);

impl<T: Float + PrimitiveFloat, O: OrderPolicy> PartialEq for Ranked<T, O> {
    fn eq(&self, other: &Self) -> bool {
        self.0 == other.0
    }
}

impl<T: Float + PrimitiveFloat, O: OrderPolicy> Eq for Ranked<T, O> {}

impl<T: Float + PrimitiveFloat, O: OrderPolicy> PartialOrd for Ranked<T, O> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<T: Float + PrimitiveFloat, O: OrderPolicy> Ord for Ranked<T, O> {
    fn cmp(&self, other: &Self) -> Ordering {
        O::rank(&self.0, &other.0)
    }
}

/// A binary heap supporting removal of an arbitrary element by value.
///
/// Removal is lazy: the value is recorded in a tracker of pending deletions and
/// the stored entry is discarded once it surfaces at the apex, or during a
/// periodic purge when stale entries outnumber the live ones. The apex is kept
/// free of pending entries after every mutation, so `peek` never needs to skip.
///
/// Push, pop and remove run in O(log n) amortized.
///
/// # Type Parameters
///
/// * `T` - A floating point type; NaN is ordered above every other value and `-0.0`
///   below `0.0`, removal matches that same distinction
/// * `O` - The order policy, [`Min`] or [`Max`]
#[derive(Debug, Clone)]
pub struct LazyHeap<T, O> {
    /// Stored entries, including the ones pending deletion
    heap: BinaryHeap<Ranked<T, O>>,
    /// Multiplicity of every value currently in the heap
    live: HashMap<Key<T>, usize, RandomState>,
    /// Values removed from `live` whose stored entries are still in `heap`
    pending: HashMap<Key<T>, usize, RandomState>,
    /// Number of live elements
    len: usize,
}

impl<T, O> LazyHeap<T, O>
where
    T: Float + PrimitiveFloat,
    O: OrderPolicy,
{
    /// Creates an empty heap with room for `capacity` live elements
    ///
    /// # Arguments
    ///
    /// * `capacity` - Expected number of live elements
    ///
    /// # Returns
    ///
    /// * `Self` - The empty heap
    pub fn new(capacity: usize) -> Self {
        Self {
            heap: BinaryHeap::with_capacity(capacity),
            live: HashMap::with_capacity_and_hasher(capacity, RandomState::default()),
            pending: HashMap::with_hasher(RandomState::default()),
            len: 0,
        }
    }

    /// Number of live elements
    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns `true` if the heap holds no live element
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Adds a value
    pub fn push(&mut self, value: T) {
        let key = Key::new(value);
        *self.live.entry(key).or_insert(0) += 1;
        self.heap.push(Ranked(key, PhantomData));
        self.len += 1;
    }

    /// Returns the apex without removing it
    #[inline]
    pub fn peek(&self) -> Option<T> {
        self.heap.peek().map(|Ranked(key, _)| key.get())
    }

    /// Removes and returns the apex
    pub fn pop(&mut self) -> Option<T> {
        let Ranked(key, _) = self.heap.pop()?;
        self.forget(key);
        self.len -= 1;
        self.prune();
        Some(key.get())
    }

    /// Removes one occurrence of `value`
    ///
    /// # Arguments
    ///
    /// * `value` - The value to remove
    ///
    /// # Returns
    ///
    /// * `bool` - `true` if the value was present and has been removed
    pub fn remove(&mut self, value: T) -> bool {
        let key = Key::new(value);
        if !self.forget(key) {
            return false;
        }
        *self.pending.entry(key).or_insert(0) += 1;
        self.len -= 1;
        self.prune();
        self.compact();
        true
    }

    /// Decrements the live multiplicity of `key`, returns `false` if it was not live
    #[inline]
    fn forget(&mut self, key: Key<T>) -> bool {
        let Some(count) = self.live.get_mut(&key) else {
            return false;
        };
        *count -= 1;
        if *count == 0 {
            self.live.remove(&key);
        }
        true
    }

    /// Discards pending entries sitting at the apex
    fn prune(&mut self) {
        while let Some(Ranked(top, _)) = self.heap.peek() {
            let top = *top;
            let Some(count) = self.pending.get_mut(&top) else {
                break;
            };
            *count -= 1;
            if *count == 0 {
                self.pending.remove(&top);
            }
            self.heap.pop();
        }
    }

    /// Purges buried pending entries once they dominate the stored ones
    fn compact(&mut self) {
        if self.heap.len() <= 2 * self.len + COMPACT_SLACK {
            return;
        }

        let pending = &mut self.pending;
        self.heap.retain(|Ranked(key, _)| match pending.get_mut(key) {
            Some(count) if *count > 0 => {
                *count -= 1;
                false
            }
            _ => true,
        });
        pending.clear();

        if self.heap.capacity() > self.heap.len() * 2 {
            self.heap.shrink_to_fit();
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::{LazyHeap, Max, Min};

    #[test]
    fn test_empty_heap() {
        let mut heap = LazyHeap::<f64, Max>::new(4);
        assert!(heap.is_empty());
        assert_eq!(heap.peek(), None);
        assert_eq!(heap.pop(), None);
        assert!(!heap.remove(1.0));
    }

    #[test]
    fn test_apex_follows_policy() {
        let mut max = LazyHeap::<f64, Max>::new(4);
        let mut min = LazyHeap::<f64, Min>::new(4);
        for v in [3.0, 1.0, 4.0, 1.5] {
            max.push(v);
            min.push(v);
        }
        assert_eq!(max.peek(), Some(4.0));
        assert_eq!(min.peek(), Some(1.0));
        assert_eq!(max.pop(), Some(4.0));
        assert_eq!(max.pop(), Some(3.0));
        assert_eq!(min.pop(), Some(1.0));
        assert_eq!(min.pop(), Some(1.5));
        assert_eq!(max.len(), 2);
        assert_eq!(min.len(), 2);
    }

    #[test]
    fn test_remove_apex_and_buried() {
        let mut heap = LazyHeap::<f64, Max>::new(4);
        for v in [5.0, 2.0, 8.0, 3.0] {
            heap.push(v);
        }
        assert!(heap.remove(8.0));
        assert_eq!(heap.peek(), Some(5.0));
        assert!(heap.remove(2.0));
        assert_eq!(heap.len(), 2);
        assert_eq!(heap.pop(), Some(5.0));
        assert_eq!(heap.pop(), Some(3.0));
        assert_eq!(heap.pop(), None);
    }

    #[test]
    fn test_remove_missing_value() {
        let mut heap = LazyHeap::<f64, Min>::new(4);
        heap.push(1.0);
        assert!(!heap.remove(2.0));
        assert!(heap.remove(1.0));
        assert!(!heap.remove(1.0));
        assert!(heap.is_empty());
    }

    #[test]
    fn test_duplicates_removed_one_at_a_time() {
        let mut heap = LazyHeap::<f64, Max>::new(4);
        heap.push(7.0);
        heap.push(7.0);
        heap.push(1.0);
        assert!(heap.remove(7.0));
        assert_eq!(heap.peek(), Some(7.0));
        assert!(heap.remove(7.0));
        assert_eq!(heap.peek(), Some(1.0));
        assert_eq!(heap.len(), 1);
    }

    #[test]
    fn test_reinsert_after_pending_removal() {
        let mut heap = LazyHeap::<f64, Max>::new(4);
        heap.push(9.0);
        heap.push(2.0);
        assert!(heap.remove(2.0));
        heap.push(2.0);
        assert!(heap.remove(9.0));
        assert_eq!(heap.peek(), Some(2.0));
        assert_eq!(heap.len(), 1);
    }

    #[test]
    fn test_signed_zeros_are_distinct() {
        let mut max = LazyHeap::<f64, Max>::new(4);
        max.push(-0.0);
        max.push(0.0);
        assert!(max.peek().unwrap().is_sign_positive());

        assert!(max.remove(0.0));
        assert!(max.peek().unwrap().is_sign_negative());
        assert!(!max.remove(0.0));
        assert!(max.remove(-0.0));
        assert!(max.is_empty());

        let mut min = LazyHeap::<f64, Min>::new(4);
        min.push(0.0);
        min.push(-0.0);
        assert!(min.pop().unwrap().is_sign_negative());
        assert!(min.pop().unwrap().is_sign_positive());
    }

    #[test]
    fn test_buried_removals_are_purged() {
        // Increasing stream: evicted values stay buried under a max apex
        let mut heap = LazyHeap::<f64, Max>::new(8);
        for i in 0..1_000 {
            heap.push(i as f64);
            if i >= 8 {
                assert!(heap.remove((i - 8) as f64));
            }
            assert_eq!(heap.peek(), Some(i as f64));
        }
        assert_eq!(heap.len(), 8);
        assert!(heap.heap.len() <= 2 * heap.len() + super::COMPACT_SLACK);

        let mut drained = vec![];
        while let Some(v) = heap.pop() {
            drained.push(v);
        }
        assert_eq!(
            drained,
            vec![999.0, 998.0, 997.0, 996.0, 995.0, 994.0, 993.0, 992.0]
        );
    }
}
