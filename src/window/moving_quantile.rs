use num_traits::Float;

use crate::{
    Sample, SeriesError,
    utils::{LazyHeap, Max, Min, RingBuffer},
    window::WindowFunction,
};

/// Moving quantile over the last `period` values, maintained with two heaps.
///
/// The window is split into a lower half, kept in a max-heap, and an upper half,
/// kept in a min-heap. After every step the lower half holds exactly
/// `round(quantile * window_len)` values, so its apex is the requested quantile.
/// When the lower half is empty (quantile 0) the apex of the upper half is
/// returned instead, which makes quantile 0 a moving minimum and quantile 1 a
/// moving maximum.
///
/// Values leaving the window are removed lazily from whichever half holds them.
///
/// # Examples
///
/// ```
/// # use ta_series::{MovingQuantile, WindowFunction};
/// let mut median = MovingQuantile::new(3, 0.5).unwrap();
/// assert_eq!(
///     median.apply_all(&[1.0, 2.0, 3.0, 4.0, 5.0, 4.0, 3.0]),
///     vec![1.0, 1.0, 2.0, 3.0, 4.0, 4.0, 4.0]
/// );
/// ```
pub struct MovingQuantile<T> {
    quantile: f64,
    /// Last `period + 1` values, the oldest one leaves the window on a full buffer
    history: RingBuffer<T>,
    low: LazyHeap<T, Max>,
    high: LazyHeap<T, Min>,
}

impl<T: Sample> MovingQuantile<T> {
    /// Creates a moving quantile
    ///
    /// # Arguments
    ///
    /// * `period` - Window length, at least 1
    /// * `quantile` - Requested quantile in `[0, 1]`
    ///
    /// # Returns
    ///
    /// * `Result<Self, SeriesError>` - The function, `InvalidPeriod` for a zero period or
    ///   `InvalidQuantile` for a fraction outside `[0, 1]`
    pub fn new(period: usize, quantile: f64) -> Result<Self, SeriesError> {
        if period == 0 {
            return Err(SeriesError::InvalidPeriod(period));
        }
        if !(0.0..=1.0).contains(&quantile) {
            return Err(SeriesError::InvalidQuantile(quantile));
        }
        Ok(Self {
            quantile,
            history: RingBuffer::new(period + 1)?,
            low: LazyHeap::new(period),
            high: LazyHeap::new(period),
        })
    }

    /// Window length
    pub fn period(&self) -> usize {
        self.history.capacity() - 1
    }

    /// Requested quantile
    pub fn quantile(&self) -> f64 {
        self.quantile
    }

    /// Number of values currently in the window
    fn window_len(&self) -> usize {
        self.low.len() + self.high.len()
    }

    fn peek(&self) -> Option<T> {
        self.low.peek().or_else(|| self.high.peek())
    }

    fn rebalance(&mut self) {
        let expected = Float::round(self.quantile * self.window_len() as f64) as usize;
        while self.low.len() > expected {
            let Some(v) = self.low.pop() else { break };
            self.high.push(v);
        }
        while self.low.len() < expected {
            let Some(v) = self.high.pop() else { break };
            self.low.push(v);
        }
    }
}

impl<T: Sample> WindowFunction<T> for MovingQuantile<T> {
    fn apply(&mut self, value: T) -> T {
        // Anything not at or below the apex, NaN included, goes to the upper half
        if self.peek().is_none_or(|apex| value <= apex) {
            self.low.push(value);
        } else {
            self.high.push(value);
        }

        self.history.push(value);
        let leaving = if self.history.is_full() {
            self.history.first().ok()
        } else {
            None
        };
        if let Some(oldest) = leaving {
            let found = self.low.remove(oldest) || self.high.remove(oldest);
            debug_assert!(found, "value leaving the window is missing from both halves");
        }

        self.rebalance();
        self.peek().unwrap_or(value)
    }
}

impl<T: core::fmt::Debug + Default + Copy> core::fmt::Debug for MovingQuantile<T> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("MovingQuantile")
            .field("quantile", &self.quantile)
            .field("history", &self.history.to_vec())
            .finish()
    }
}
