//! Moving statistics of a numeric series.
//!
//! Each helper builds a fresh window function, feeds it the values of the source
//! in key order and returns the outputs as a series on the same domain, named
//! after the statistic (see [`WindowSpec::label`]).

use crate::{NumericSeries, Sample, SeriesError, WindowSpec};

/// Runs the window function described by `spec` over the values of `src`
///
/// # Arguments
///
/// * `src` - Source series, its domain and default value carry over to the result
/// * `spec` - The window function
///
/// # Returns
///
/// * `Result<NumericSeries<K, T>, SeriesError>` - The output series, or the validation
///   error of `spec`
///
/// # Examples
///
/// ```
/// # use ta_series::{Array, NumericArray, NumericSeries, OrderedIndex, WindowSpec, algebra::moving};
/// let domain = OrderedIndex::linspace(0, 4, 1).unwrap();
/// let src = NumericSeries::new("px", domain, NumericArray::of(&[1.0, 2.0, 3.0, 4.0]), 0.0).unwrap();
///
/// let lagged = moving::apply(&src, &WindowSpec::Shift { lag: 2 }).unwrap();
/// assert_eq!(lagged.name(), "Shift(px,2)");
/// assert_eq!(lagged.values().as_slice(), &[1.0, 1.0, 1.0, 2.0]);
/// ```
pub fn apply<K: Ord, T: Sample>(
    src: &NumericSeries<K, T>,
    spec: &WindowSpec,
) -> Result<NumericSeries<K, T>, SeriesError> {
    let mut function = spec.build::<T>()?;
    Ok(src.map_values(spec.label(src.name()), |&x| function.apply(x)))
}

/// Moving average, named `MA(src,period)`
pub fn avg<K: Ord, T: Sample>(
    src: &NumericSeries<K, T>,
    period: usize,
) -> Result<NumericSeries<K, T>, SeriesError> {
    apply(src, &WindowSpec::Average { period })
}

/// Exponential moving average, named `EMA(src,period)`
pub fn avg_exp<K: Ord, T: Sample>(
    src: &NumericSeries<K, T>,
    period: usize,
) -> Result<NumericSeries<K, T>, SeriesError> {
    apply(src, &WindowSpec::Exponential { period })
}

/// Moving sum, named `Sum(src,period)`
pub fn sum<K: Ord, T: Sample>(
    src: &NumericSeries<K, T>,
    period: usize,
) -> Result<NumericSeries<K, T>, SeriesError> {
    apply(src, &WindowSpec::Sum { period })
}

/// Moving minimum, named `Min(src,period)`
pub fn min<K: Ord, T: Sample>(
    src: &NumericSeries<K, T>,
    period: usize,
) -> Result<NumericSeries<K, T>, SeriesError> {
    apply(src, &WindowSpec::Min { period })
}

/// Moving maximum, named `Max(src,period)`
pub fn max<K: Ord, T: Sample>(
    src: &NumericSeries<K, T>,
    period: usize,
) -> Result<NumericSeries<K, T>, SeriesError> {
    apply(src, &WindowSpec::Max { period })
}

/// Values lagged by `lag` keys, named `Shift(src,lag)`
pub fn shift<K: Ord, T: Sample>(
    src: &NumericSeries<K, T>,
    lag: usize,
) -> Result<NumericSeries<K, T>, SeriesError> {
    apply(src, &WindowSpec::Shift { lag })
}

/// Moving quantile, named `Qtl(src,period,quantile)`
pub fn quantile<K: Ord, T: Sample>(
    src: &NumericSeries<K, T>,
    period: usize,
    quantile: f64,
) -> Result<NumericSeries<K, T>, SeriesError> {
    apply(src, &WindowSpec::Quantile { period, quantile })
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::{Array, NumericArray, OrderedIndex, Series};
    use assert_approx_eq::assert_approx_eq;

    fn foo(values: &[f64]) -> NumericSeries<i64> {
        let domain = OrderedIndex::linspace(1, values.len() as i64 + 1, 1).unwrap();
        Series::new("foo", domain, NumericArray::of(values), -1.0).unwrap()
    }

    fn check(src: &NumericSeries<i64>, result: &NumericSeries<i64>, name: &str, expected: &[f64]) {
        assert!(result.shares_domain(src));
        assert_eq!(*result.default_value(), *src.default_value());
        assert_eq!(result.to_string(), name);
        assert_eq!(result.len(), expected.len());
        for (got, want) in result.values().iter().zip(expected) {
            assert_approx_eq!(got, *want);
        }
    }

    #[test]
    fn test_avg() {
        let src = foo(&[1.0, 2.0, 2.0]);
        check(&src, &avg(&src, 2).unwrap(), "MA(foo,2)", &[1.0, 1.5, 2.0]);
    }

    #[test]
    fn test_avg_exp() {
        let src = foo(&[1.0, 2.0]);
        check(&src, &avg_exp(&src, 2).unwrap(), "EMA(foo,2)", &[1.0, 1.6666666666666665]);
    }

    #[test]
    fn test_sum() {
        let src = foo(&[1.0, 2.0, 2.0]);
        check(&src, &sum(&src, 2).unwrap(), "Sum(foo,2)", &[1.0, 3.0, 4.0]);
    }

    #[test]
    fn test_max() {
        let src = foo(&[1.0, 2.0, 1.0]);
        check(&src, &max(&src, 2).unwrap(), "Max(foo,2)", &[1.0, 2.0, 2.0]);
    }

    #[test]
    fn test_min() {
        let src = foo(&[2.0, 1.0, 2.0]);
        check(&src, &min(&src, 2).unwrap(), "Min(foo,2)", &[2.0, 1.0, 1.0]);
    }

    #[test]
    fn test_shift() {
        let src = foo(&[1.0, 2.0, 3.0, 4.0]);
        check(&src, &shift(&src, 2).unwrap(), "Shift(foo,2)", &[1.0, 1.0, 1.0, 2.0]);
    }

    #[test]
    fn test_quantile() {
        let src = foo(&[1.0, 2.0, 3.0, 4.0]);
        check(
            &src,
            &quantile(&src, 3, 0.5).unwrap(),
            "Qtl(foo,3,0.5)",
            &[1.0, 1.0, 2.0, 3.0],
        );
    }

    #[test]
    fn test_invalid_parameters() {
        let src = foo(&[1.0, 2.0]);
        assert_eq!(avg(&src, 0).err(), Some(SeriesError::InvalidPeriod(0)));
        assert_eq!(
            quantile(&src, 2, 7.0).err(),
            Some(SeriesError::InvalidQuantile(7.0))
        );
    }

    #[test]
    fn test_each_call_starts_fresh() {
        let src = foo(&[5.0, 1.0, 3.0]);
        let a = sum(&src, 3).unwrap();
        let b = sum(&src, 3).unwrap();
        assert_eq!(a.values(), b.values());
        assert_eq!(a.values().as_slice(), &[5.0, 6.0, 9.0]);
    }
}
