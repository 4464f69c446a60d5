use crate::{Sample, SeriesError, utils::RingBuffer, window::WindowFunction};

/// Lags a stream by `lag` positions.
///
/// The output at step `i` is the input at step `i - lag`. Before `lag` values have
/// been seen the earliest value is repeated, and the very first call returns its
/// own input. A lag of 0 passes values through unchanged.
#[derive(Debug, Clone)]
pub struct Shift<T> {
    history: Option<RingBuffer<T>>,
}

impl<T: Sample> Shift<T> {
    /// Creates a lag of `lag` positions
    ///
    /// # Arguments
    ///
    /// * `lag` - Number of positions to look back
    ///
    /// # Returns
    ///
    /// * `Result<Self, SeriesError>` - The function
    pub fn new(lag: usize) -> Result<Self, SeriesError> {
        let history = match lag {
            0 => None,
            lag => Some(RingBuffer::new(lag)?),
        };
        Ok(Self { history })
    }

    /// Number of positions looked back
    pub fn lag(&self) -> usize {
        self.history.as_ref().map_or(0, RingBuffer::capacity)
    }
}

impl<T: Sample> WindowFunction<T> for Shift<T> {
    fn apply(&mut self, value: T) -> T {
        let Some(history) = self.history.as_mut() else {
            return value;
        };
        let result = history.first().unwrap_or(value);
        history.push(value);
        result
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_shift_three() {
        let mut shift = Shift::<f64>::new(3).unwrap();
        assert_eq!(
            shift.apply_all(&[1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0]),
            vec![1.0, 1.0, 1.0, 1.0, 2.0, 3.0, 4.0]
        );
    }

    #[test]
    fn test_shift_one_returns_previous() {
        let mut shift = Shift::<f64>::new(1).unwrap();
        assert_eq!(
            shift.apply_all(&[5.0, 6.0, 7.0, 8.0]),
            vec![5.0, 5.0, 6.0, 7.0]
        );
    }

    #[test]
    fn test_shift_zero_is_identity() {
        let mut shift = Shift::<f64>::new(0).unwrap();
        assert_eq!(shift.lag(), 0);
        assert_eq!(shift.apply_all(&[5.0, 6.0]), vec![5.0, 6.0]);
    }

    #[test]
    fn test_lag() {
        assert_eq!(Shift::<f64>::new(4).unwrap().lag(), 4);
    }
}
