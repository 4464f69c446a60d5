//! Binary operations between a numeric series and a scalar, a series or an array.

use alloc::format;
use core::fmt;

use num_traits::Float;

use crate::{Array, NumericArray, NumericSeries, Sample, SeriesError};

/// Right operand of a binary operation.
///
/// * `Scalar` - applied to every value
/// * `Series` - looked up by key with [`Series::value_at`](crate::Series::value_at), so
///   keys the other series lacks use its nearest earlier key or its default value
/// * `Array` - combined position by position, its length must match the series
#[derive(Debug, Clone, Copy)]
pub enum Operand<'a, K, T: Float> {
    /// A constant
    Scalar(T),
    /// Another series over the same key type
    Series(&'a NumericSeries<K, T>),
    /// One value per key of the left operand
    Array(&'a [T]),
}

macro_rules! impl_scalar_operand {
    ($($t:ty),*) => {
        $(
            impl<K> From<$t> for Operand<'_, K, $t> {
                fn from(value: $t) -> Self {
                    Self::Scalar(value)
                }
            }
        )*
    };
}

impl_scalar_operand!(f32, f64);

impl<'a, K, T: Float> From<&'a NumericSeries<K, T>> for Operand<'a, K, T> {
    fn from(series: &'a NumericSeries<K, T>) -> Self {
        Self::Series(series)
    }
}

impl<'a, K, T: Float> From<&'a NumericArray<T>> for Operand<'a, K, T> {
    fn from(array: &'a NumericArray<T>) -> Self {
        Self::Array(array.as_slice())
    }
}

impl<'a, K, T: Float> From<&'a [T]> for Operand<'a, K, T> {
    fn from(values: &'a [T]) -> Self {
        Self::Array(values)
    }
}

impl<'a, K, T: Float, const N: usize> From<&'a [T; N]> for Operand<'a, K, T> {
    fn from(values: &'a [T; N]) -> Self {
        Self::Array(values)
    }
}

impl<K: Ord, T: Float + fmt::Display> fmt::Display for Operand<'_, K, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Scalar(value) => write!(f, "{value}"),
            Self::Series(series) => f.write_str(series.name()),
            Self::Array(values) => write!(f, "array[{}]", values.len()),
        }
    }
}

/// Applies `op` to every value of `lhs` and the matching right operand
fn combine<'a, K, T, F>(
    label: &str,
    lhs: &NumericSeries<K, T>,
    rhs: Operand<'a, K, T>,
    op: F,
) -> Result<NumericSeries<K, T>, SeriesError>
where
    K: Ord,
    T: Sample,
    F: Fn(T, T) -> T,
{
    let name = format!("{label}({},{rhs})", lhs.name());
    match rhs {
        Operand::Scalar(y) => Ok(lhs.map_values(name, |&x| op(x, y))),
        Operand::Series(other) => Ok(lhs.zip_with_series(name, other, |&x, &y| op(x, y))),
        Operand::Array(values) => lhs.zip_with_array(name, values, |&x, &y| op(x, y)),
    }
}

fn nan_min<T: Float>(x: T, y: T) -> T {
    if x.is_nan() || y.is_nan() { T::nan() } else { x.min(y) }
}

fn nan_max<T: Float>(x: T, y: T) -> T {
    if x.is_nan() || y.is_nan() { T::nan() } else { x.max(y) }
}

/// Elementwise `lhs + rhs`, named `Add(lhs,rhs)`
///
/// # Arguments
///
/// * `lhs` - Left operand, its domain and default value carry over to the result
/// * `rhs` - Scalar, series, array or slice
///
/// # Returns
///
/// * `Result<NumericSeries<K, T>, SeriesError>` - The sum, or `SizeMismatch` for an array
///   operand of the wrong length
///
/// # Examples
///
/// ```
/// # use ta_series::{Array, NumericArray, NumericSeries, OrderedIndex, algebra::binary};
/// let domain = OrderedIndex::new(vec![1, 2, 3]).unwrap();
/// let s = NumericSeries::new("s", domain, NumericArray::of(&[1.0, 2.0, 3.0]), 0.0).unwrap();
///
/// let shifted = binary::add(&s, 10.0).unwrap();
/// assert_eq!(shifted.name(), "Add(s,10)");
/// assert_eq!(shifted.values().as_slice(), &[11.0, 12.0, 13.0]);
/// ```
pub fn add<'a, K: Ord, T: Sample>(
    lhs: &NumericSeries<K, T>,
    rhs: impl Into<Operand<'a, K, T>>,
) -> Result<NumericSeries<K, T>, SeriesError>
where
    K: 'a,
    T: 'a,
{
    combine("Add", lhs, rhs.into(), |x, y| x + y)
}

/// Elementwise `lhs - rhs`, named `Sub(lhs,rhs)`
pub fn sub<'a, K: Ord, T: Sample>(
    lhs: &NumericSeries<K, T>,
    rhs: impl Into<Operand<'a, K, T>>,
) -> Result<NumericSeries<K, T>, SeriesError>
where
    K: 'a,
    T: 'a,
{
    combine("Sub", lhs, rhs.into(), |x, y| x - y)
}

/// Elementwise `lhs * rhs`, named `Mul(lhs,rhs)`
pub fn mul<'a, K: Ord, T: Sample>(
    lhs: &NumericSeries<K, T>,
    rhs: impl Into<Operand<'a, K, T>>,
) -> Result<NumericSeries<K, T>, SeriesError>
where
    K: 'a,
    T: 'a,
{
    combine("Mul", lhs, rhs.into(), |x, y| x * y)
}

/// Elementwise `lhs / rhs` with IEEE semantics, named `Div(lhs,rhs)`
pub fn div<'a, K: Ord, T: Sample>(
    lhs: &NumericSeries<K, T>,
    rhs: impl Into<Operand<'a, K, T>>,
) -> Result<NumericSeries<K, T>, SeriesError>
where
    K: 'a,
    T: 'a,
{
    combine("Div", lhs, rhs.into(), |x, y| x / y)
}

/// Elementwise `lhs / rhs` yielding 0 wherever the divisor is 0, named `Div0(lhs,rhs)`
pub fn div0<'a, K: Ord, T: Sample>(
    lhs: &NumericSeries<K, T>,
    rhs: impl Into<Operand<'a, K, T>>,
) -> Result<NumericSeries<K, T>, SeriesError>
where
    K: 'a,
    T: 'a,
{
    combine("Div0", lhs, rhs.into(), |x, y| {
        if y == T::zero() { T::zero() } else { x / y }
    })
}

/// Elementwise minimum, named `Min(lhs,rhs)`
///
/// NaN on either side yields NaN.
pub fn min<'a, K: Ord, T: Sample>(
    lhs: &NumericSeries<K, T>,
    rhs: impl Into<Operand<'a, K, T>>,
) -> Result<NumericSeries<K, T>, SeriesError>
where
    K: 'a,
    T: 'a,
{
    combine("Min", lhs, rhs.into(), nan_min)
}

/// Elementwise maximum, named `Max(lhs,rhs)`
///
/// NaN on either side yields NaN.
pub fn max<'a, K: Ord, T: Sample>(
    lhs: &NumericSeries<K, T>,
    rhs: impl Into<Operand<'a, K, T>>,
) -> Result<NumericSeries<K, T>, SeriesError>
where
    K: 'a,
    T: 'a,
{
    combine("Max", lhs, rhs.into(), nan_max)
}
