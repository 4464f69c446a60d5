use crate::{Sample, SeriesError, window::WindowFunction};

/// Exponential moving average with smoothing factor `alpha = 2 / (period + 1)`.
///
/// The first value seeds the average; every later value `x` produces
/// `x * alpha + prev * (1 - alpha)`.
#[derive(Debug, Clone)]
pub struct ExponentialMovingAverage<T> {
    alpha: T,
    retain: T,
    prev: Option<T>,
}

impl<T: Sample> ExponentialMovingAverage<T> {
    /// Creates an exponential moving average for the given `period`
    ///
    /// # Arguments
    ///
    /// * `period` - Nominal window length, at least 1
    ///
    /// # Returns
    ///
    /// * `Result<Self, SeriesError>` - The function, or `InvalidPeriod` for a zero period
    pub fn new(period: usize) -> Result<Self, SeriesError> {
        if period == 0 {
            return Err(SeriesError::InvalidPeriod(period));
        }
        let period_t = T::from(period).ok_or(SeriesError::InvalidPeriod(period))?;
        let alpha = (T::one() + T::one()) / (period_t + T::one());
        Ok(Self {
            alpha,
            retain: T::one() - alpha,
            prev: None,
        })
    }

    /// Smoothing factor
    pub fn alpha(&self) -> T {
        self.alpha
    }
}

impl<T: Sample> WindowFunction<T> for ExponentialMovingAverage<T> {
    fn apply(&mut self, value: T) -> T {
        let result = match self.prev {
            None => value,
            Some(prev) => value * self.alpha + prev * self.retain,
        };
        self.prev = Some(result);
        result
    }
}
