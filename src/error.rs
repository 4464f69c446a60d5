//! Error type shared by every fallible operation of the crate.
//!
//! All errors are raised synchronously where the offending value is supplied:
//! window periods and quantile fractions when a window function is built,
//! key order when an index is built, lengths when a series is assembled or
//! zipped. Nothing here is retryable; the variants carry enough context to
//! tell the caller which argument was wrong.

use alloc::string::String;

use core::fmt::{Display, Formatter, Result};

/// Error type for index, buffer, window and series operations.
#[derive(Debug, Clone, PartialEq)]
pub enum SeriesError {
    /// Window period must be at least 1.
    InvalidPeriod(usize),

    /// Quantile fraction must lie in `[0, 1]`.
    InvalidQuantile(f64),

    /// Ring buffer capacity must be at least 1.
    InvalidCapacity(usize),

    /// Domain and values of a series must have the same length.
    DomainMismatch {
        /// Number of keys in the domain.
        domain: usize,
        /// Number of values supplied.
        values: usize,
    },

    /// A positional operand must have the same length as the series.
    SizeMismatch {
        /// Length of the series.
        expected: usize,
        /// Length of the operand.
        got: usize,
    },

    /// Keys are not in ascending order.
    NotAscending {
        /// Position of the first key smaller than its predecessor.
        position: usize,
    },

    /// A relative index fell outside the currently held elements.
    OutOfRange {
        /// The requested index.
        index: usize,
        /// Number of elements held.
        len: usize,
    },

    /// Evenly spaced sequence parameters describe no valid sequence.
    InvalidLinspace(String),
}

impl Display for SeriesError {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        match self {
            Self::InvalidPeriod(period) => {
                write!(f, "Invalid period: {period} (must be at least 1)")
            }
            Self::InvalidQuantile(q) => write!(f, "Invalid quantile: {q} (must be in [0, 1])"),
            Self::InvalidCapacity(capacity) => {
                write!(f, "Invalid capacity: {capacity} (must be at least 1)")
            }
            Self::DomainMismatch { domain, values } => write!(
                f,
                "Domain and values must have the same size: {domain} keys, {values} values"
            ),
            Self::SizeMismatch { expected, got } => {
                write!(f, "Size mismatch: series has {expected} values, operand has {got}")
            }
            Self::NotAscending { position } => {
                write!(f, "Keys are not in ascending order at position {position}")
            }
            Self::OutOfRange { index, len } => {
                write!(f, "Index out of range: {index} >= {len}")
            }
            Self::InvalidLinspace(msg) => write!(f, "Invalid linspace: {msg}"),
        }
    }
}

impl core::error::Error for SeriesError {}

#[cfg(test)]
mod tests {
    use super::SeriesError;
    use alloc::string::ToString;

    #[test]
    fn test_display_messages() {
        assert_eq!(
            SeriesError::InvalidPeriod(0).to_string(),
            "Invalid period: 0 (must be at least 1)"
        );
        assert_eq!(
            SeriesError::DomainMismatch {
                domain: 2,
                values: 3
            }
            .to_string(),
            "Domain and values must have the same size: 2 keys, 3 values"
        );
        assert_eq!(
            SeriesError::OutOfRange { index: 2, len: 2 }.to_string(),
            "Index out of range: 2 >= 2"
        );
    }
}
