use crate::{Kbn, Sample, SeriesError, utils::RingBuffer, window::WindowFunction};

/// Simple moving average over the last `period` values.
///
/// While fewer than `period + 1` values have been seen the output is the plain mean
/// of everything seen so far, computed with compensated summation. Once the window
/// is saturated the previous result is updated incrementally:
///
/// `avg = prev - oldest / period + newest / period`
///
/// where `oldest` is the value that just slid out of the window.
///
/// # Examples
///
/// ```
/// # use ta_series::{MovingAverage, WindowFunction};
/// let mut ma = MovingAverage::new(2).unwrap();
/// assert_eq!(ma.apply_all(&[1.0, 2.0, 2.0]), vec![1.0, 1.5, 2.0]);
/// ```
#[derive(Debug, Clone)]
pub struct MovingAverage<T> {
    period: usize,
    period_t: T,
    buf: RingBuffer<T>,
    prev: T,
}

impl<T: Sample> MovingAverage<T> {
    /// Creates a moving average over `period` values
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
        let period_t = T::from(period).ok_or(SeriesError::InvalidPeriod(period))?;
        Ok(Self {
            period,
            period_t,
            buf: RingBuffer::new(period + 1)?,
            prev: T::zero(),
        })
    }

    /// Window length
    pub fn period(&self) -> usize {
        self.period
    }
}

impl<T: Sample> WindowFunction<T> for MovingAverage<T> {
    fn apply(&mut self, value: T) -> T {
        self.buf.push(value);

        let result = if self.buf.len() <= self.period {
            let (sum, n) = self
                .buf
                .iter()
                .fold((Kbn::default(), T::zero()), |(mut sum, n), x| {
                    sum += *x;
                    (sum, n + T::one())
                });
            sum.total() / n
        } else {
            self.buf.first().map_or(self.prev, |oldest| {
                self.prev - oldest / self.period_t + value / self.period_t
            })
        };

        self.prev = result;
        result
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use assert_approx_eq::assert_approx_eq;

    #[test]
    fn test_warm_up_is_plain_mean() {
        let mut ma = MovingAverage::<f64>::new(4).unwrap();
        let out = ma.apply_all(&[1.0, 2.0, 4.0, 8.0]);
        assert_approx_eq!(out[0], 1.0);
        assert_approx_eq!(out[1], 1.5);
        assert_approx_eq!(out[2], 7.0 / 3.0);
        assert_approx_eq!(out[3], 3.75);
    }

    #[test]
    fn test_steady_state_tracks_window_mean() {
        let inputs = [1.0, 2.0, 4.0, 8.0, 16.0, 3.0, -5.0, 0.5, 11.0];
        let period = 3;
        let mut ma = MovingAverage::<f64>::new(period).unwrap();
        for (i, out) in ma.apply_all(&inputs).into_iter().enumerate() {
            let start = (i + 1).saturating_sub(period);
            let window = &inputs[start..=i];
            let mean = window.iter().sum::<f64>() / window.len() as f64;
            assert_approx_eq!(out, mean, 1e-12);
        }
    }

    #[test]
    fn test_f32_samples() {
        let mut ma = MovingAverage::<f32>::new(2).unwrap();
        assert_eq!(ma.apply_all(&[1.0, 3.0, 5.0]), vec![1.0, 2.0, 4.0]);
    }

    #[test]
    fn test_zero_period() {
        assert_eq!(
            MovingAverage::<f64>::new(0).err(),
            Some(SeriesError::InvalidPeriod(0))
        );
    }
}
