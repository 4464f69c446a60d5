use core::fmt;

use crate::{
    Sample, SeriesError,
    utils::{LazyHeap, Max, Min, OrderPolicy, RingBuffer},
    window::WindowFunction,
};

/// Moving extremum over the last `period` values.
///
/// The window contents live in a ring buffer; a lazy-deletion heap ordered by `O`
/// holds the same multiset, so the value evicted from the buffer is removed from
/// the heap before the new one is inserted. Each step runs in O(log period)
/// amortized.
///
/// Use the [`MovingMin`] and [`MovingMax`] aliases.
pub struct MovingExtremum<T, O> {
    buf: RingBuffer<T>,
    heap: LazyHeap<T, O>,
}

/// Moving minimum over the last `period` values
///
/// # Examples
///
/// ```
/// # use ta_series::{MovingMin, WindowFunction};
/// let mut min = MovingMin::new(3).unwrap();
/// assert_eq!(
///     min.apply_all(&[1.0, 3.0, 2.0, 3.0, 3.0, 3.0]),
///     vec![1.0, 1.0, 1.0, 2.0, 2.0, 3.0]
/// );
/// ```
pub type MovingMin<T> = MovingExtremum<T, Min>;

/// Moving maximum over the last `period` values
pub type MovingMax<T> = MovingExtremum<T, Max>;

impl<T: Sample, O: OrderPolicy> MovingExtremum<T, O> {
    /// Creates a moving extremum over `period` values
    ///
    /// # Arguments
    ///
    /// * `period` - Window length, at least 1
    ///
    /// # Returns
    ///
    /// * `Result<Self, SeriesError>` - The function, or `InvalidPeriod` for a zero period
    pub fn new(period: usize) -> Result<Self, SeriesError> {
        if period == 0 {
            return Err(SeriesError::InvalidPeriod(period));
        }
        Ok(Self {
            buf: RingBuffer::new(period)?,
            heap: LazyHeap::new(period),
        })
    }

    /// Window length
    pub fn period(&self) -> usize {
        self.buf.capacity()
    }
}

impl<T: Sample, O: OrderPolicy> WindowFunction<T> for MovingExtremum<T, O> {
    fn apply(&mut self, value: T) -> T {
        if let Some(evicted) = self.buf.push(value) {
            self.heap.remove(evicted);
        }
        self.heap.push(value);
        self.heap.peek().unwrap_or(value)
    }
}

impl<T: fmt::Debug + Default + Copy, O> fmt::Debug for MovingExtremum<T, O> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MovingExtremum")
            .field("window", &self.buf.to_vec())
            .finish()
    }
}
