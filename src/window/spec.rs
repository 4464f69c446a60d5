use alloc::{boxed::Box, string::String};

use crate::{
    Sample, SeriesError,
    window::{
        ExponentialMovingAverage, Identity, MovingAverage, MovingMax, MovingMin,
        MovingQuantile, MovingSum, Shift, WindowFunction,
    },
};

/// Plain-data description of a window function.
///
/// A spec can be validated, stored, compared and (with the `serde` feature)
/// serialized, then turned into a fresh stateful instance with [`WindowSpec::build`]
/// as many times as needed.
///
/// # Examples
///
/// ```
/// # use ta_series::{WindowFunction, WindowSpec};
/// let spec = WindowSpec::Quantile { period: 3, quantile: 0.5 };
/// assert_eq!(spec.label("close"), "Qtl(close,3,0.5)");
///
/// let mut median = spec.build::<f64>().unwrap();
/// assert_eq!(median.apply_all(&[1.0, 2.0, 3.0, 4.0]), vec![1.0, 1.0, 2.0, 3.0]);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(tag = "kind", rename_all = "snake_case"))]
pub enum WindowSpec {
    /// Simple moving average
    Average {
        /// Window length
        period: usize,
    },
    /// Exponential moving average
    Exponential {
        /// Nominal window length, sets the smoothing factor
        period: usize,
    },
    /// Moving sum
    Sum {
        /// Window length
        period: usize,
    },
    /// Moving minimum
    Min {
        /// Window length
        period: usize,
    },
    /// Moving maximum
    Max {
        /// Window length
        period: usize,
    },
    /// Lag
    Shift {
        /// Number of positions to look back
        lag: usize,
    },
    /// Moving quantile
    Quantile {
        /// Window length
        period: usize,
        /// Requested quantile in `[0, 1]`
        quantile: f64,
    },
}

impl WindowSpec {
    /// Checks the parameters without building anything
    ///
    /// # Returns
    ///
    /// * `Result<(), SeriesError>` - `InvalidPeriod` for a zero period, `InvalidQuantile`
    ///   for a quantile outside `[0, 1]`
    pub fn validate(&self) -> Result<(), SeriesError> {
        match *self {
            Self::Shift { .. } => Ok(()),
            Self::Quantile { period, quantile } => {
                if period == 0 {
                    Err(SeriesError::InvalidPeriod(period))
                } else if !(0.0..=1.0).contains(&quantile) {
                    Err(SeriesError::InvalidQuantile(quantile))
                } else {
                    Ok(())
                }
            }
            Self::Average { period }
            | Self::Exponential { period }
            | Self::Sum { period }
            | Self::Min { period }
            | Self::Max { period } => {
                if period == 0 {
                    Err(SeriesError::InvalidPeriod(period))
                } else {
                    Ok(())
                }
            }
        }
    }

    /// Returns `true` if the described function passes values through unchanged
    ///
    /// That is a window of length 1, or a lag of 0.
    pub fn is_identity(&self) -> bool {
        match *self {
            Self::Shift { lag } => lag == 0,
            Self::Average { period }
            | Self::Exponential { period }
            | Self::Sum { period }
            | Self::Min { period }
            | Self::Max { period }
            | Self::Quantile { period, .. } => period == 1,
        }
    }

    /// Builds a fresh window function
    ///
    /// Specs describing the identity build an [`Identity`].
    ///
    /// # Returns
    ///
    /// * `Result<Box<dyn WindowFunction<T>>, SeriesError>` - The function, or the
    ///   validation error
    pub fn build<T: Sample>(&self) -> Result<Box<dyn WindowFunction<T>>, SeriesError> {
        self.validate()?;
        log::trace!("building window function {self:?}");

        if self.is_identity() {
            return Ok(Box::new(Identity));
        }
        let function: Box<dyn WindowFunction<T>> = match *self {
            Self::Average { period } => Box::new(MovingAverage::<T>::new(period)?),
            Self::Exponential { period } => Box::new(ExponentialMovingAverage::<T>::new(period)?),
            Self::Sum { period } => Box::new(MovingSum::<T>::new(period)?),
            Self::Min { period } => Box::new(MovingMin::<T>::new(period)?),
            Self::Max { period } => Box::new(MovingMax::<T>::new(period)?),
            Self::Shift { lag } => Box::new(Shift::<T>::new(lag)?),
            Self::Quantile { period, quantile } => {
                Box::new(MovingQuantile::<T>::new(period, quantile)?)
            }
        };
        Ok(function)
    }

    /// Name of a series derived from `source` with this function, e.g. `MA(close,5)`
    pub fn label(&self, source: &str) -> String {
        match *self {
            Self::Average { period } => format!("MA({source},{period})"),
            Self::Exponential { period } => format!("EMA({source},{period})"),
            Self::Sum { period } => format!("Sum({source},{period})"),
            Self::Min { period } => format!("Min({source},{period})"),
            Self::Max { period } => format!("Max({source},{period})"),
            Self::Shift { lag } => format!("Shift({source},{lag})"),
            Self::Quantile { period, quantile } => format!("Qtl({source},{period},{quantile})"),
        }
    }
}
