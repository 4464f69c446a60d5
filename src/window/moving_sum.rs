use crate::{Kbn, Sample, SeriesError, utils::RingBuffer, window::WindowFunction};

/// Moving sum over the last `period` values.
///
/// The running total is kept in a compensated accumulator: the newest value is
/// added and, once the window is saturated, the value sliding out is subtracted.
#[derive(Debug, Clone)]
pub struct MovingSum<T> {
    period: usize,
    buf: RingBuffer<T>,
    sum: Kbn<T>,
}

impl<T: Sample> MovingSum<T> {
    /// Creates a moving sum over `period` values
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
            period,
            buf: RingBuffer::new(period + 1)?,
            sum: Kbn::default(),
        })
    }

    /// Window length
    pub fn period(&self) -> usize {
        self.period
    }
}

impl<T: Sample> WindowFunction<T> for MovingSum<T> {
    fn apply(&mut self, value: T) -> T {
        self.buf.push(value);
        self.sum += value;
        if self.buf.len() > self.period {
            self.sum -= self.buf.first().unwrap_or(T::zero());
        }
        self.sum.total()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use assert_approx_eq::assert_approx_eq;

    #[test]
    fn test_moving_sum() {
        let mut sum = MovingSum::<f64>::new(2).unwrap();
        assert_eq!(sum.apply_all(&[1.0, 2.0, 2.0]), vec![1.0, 3.0, 4.0]);
    }

    #[test]
    fn test_matches_window_totals() {
        let inputs = [0.1, 0.2, 0.3, -0.4, 1e3, 0.5, 0.6, -1e3, 0.7];
        let period = 4;
        let mut sum = MovingSum::<f64>::new(period).unwrap();
        for (i, out) in sum.apply_all(&inputs).into_iter().enumerate() {
            let start = (i + 1).saturating_sub(period);
            let expected: f64 = inputs[start..=i].iter().sum();
            assert_approx_eq!(out, expected, 1e-9);
        }
    }

    #[test]
    fn test_zero_period() {
        assert!(MovingSum::<f64>::new(0).is_err());
    }
}
