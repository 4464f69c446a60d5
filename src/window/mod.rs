//! Stateful streaming window functions.
//!
//! Every function consumes one value at a time through [`WindowFunction::apply`]
//! and answers with a statistic over the trailing window, updating its state
//! incrementally instead of rescanning the window. Invalid parameters are rejected
//! when a function is constructed; `apply` itself never fails.
//!
//! Instances hold strictly sequential state (ring buffer cursor, heaps, previous
//! result). They are not safe for concurrent invocation and do no internal
//! locking: feed each instance from a single stream, in order.

mod exponential;
mod extremum;
mod moving_average;
mod moving_quantile;
mod moving_sum;
mod shift;
mod spec;

pub use exponential::ExponentialMovingAverage;
pub use extremum::{MovingExtremum, MovingMax, MovingMin};
pub use moving_average::MovingAverage;
pub use moving_quantile::MovingQuantile;
pub use moving_sum::MovingSum;
pub use shift::Shift;
pub use spec::WindowSpec;

use alloc::{boxed::Box, vec::Vec};

use crate::{Sample, SeriesError};

/// A stateful transform of a value stream: one input in, one output out.
///
/// Callers can drive any variant through this trait without knowing which
/// statistic it computes, typically as a `Box<dyn WindowFunction<T>>` obtained from
/// [`WindowSpec::build`].
pub trait WindowFunction<T> {
    /// Feeds the next value of the stream and returns the statistic for the window
    /// ending at it.
    fn apply(&mut self, value: T) -> T;

    /// Feeds every value of `values` in order and collects the outputs
    fn apply_all(&mut self, values: &[T]) -> Vec<T>
    where
        T: Copy,
    {
        values.iter().map(|&value| self.apply(value)).collect()
    }
}

impl<T, W> WindowFunction<T> for Box<W>
where
    W: WindowFunction<T> + ?Sized,
{
    #[inline]
    fn apply(&mut self, value: T) -> T {
        (**self).apply(value)
    }
}

/// Pass-through function returned for windows of length one.
#[derive(Debug, Clone, Copy, Default)]
pub struct Identity;

impl<T> WindowFunction<T> for Identity {
    #[inline]
    fn apply(&mut self, value: T) -> T {
        value
    }
}

/// Moving average over `period` values, identity for a period of 1
pub fn moving_avg<T: Sample>(period: usize) -> Result<Box<dyn WindowFunction<T>>, SeriesError> {
    WindowSpec::Average { period }.build()
}

/// Exponential moving average with smoothing `2 / (period + 1)`, identity for a period of 1
pub fn moving_avg_exp<T: Sample>(
    period: usize,
) -> Result<Box<dyn WindowFunction<T>>, SeriesError> {
    WindowSpec::Exponential { period }.build()
}

/// Moving sum over `period` values, identity for a period of 1
pub fn moving_sum<T: Sample>(period: usize) -> Result<Box<dyn WindowFunction<T>>, SeriesError> {
    WindowSpec::Sum { period }.build()
}

/// Moving minimum over `period` values, identity for a period of 1
pub fn moving_min<T: Sample>(period: usize) -> Result<Box<dyn WindowFunction<T>>, SeriesError> {
    WindowSpec::Min { period }.build()
}

/// Moving maximum over `period` values, identity for a period of 1
pub fn moving_max<T: Sample>(period: usize) -> Result<Box<dyn WindowFunction<T>>, SeriesError> {
    WindowSpec::Max { period }.build()
}

/// Lag by `lag` values, identity for a lag of 0
pub fn shift<T: Sample>(lag: usize) -> Result<Box<dyn WindowFunction<T>>, SeriesError> {
    WindowSpec::Shift { lag }.build()
}

/// Two-heap moving quantile, identity for a period of 1
pub fn moving_quantile<T: Sample>(
    period: usize,
    quantile: f64,
) -> Result<Box<dyn WindowFunction<T>>, SeriesError> {
    WindowSpec::Quantile { period, quantile }.build()
}
