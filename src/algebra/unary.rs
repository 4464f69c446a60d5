//! Elementwise functions of a single numeric series.

use alloc::format;

use num_traits::Float;

use crate::{NumericSeries, Sample};

/// Applies `op` to every value and names the result `label(src)`
fn apply<K: Ord, T: Sample>(
    label: &str,
    src: &NumericSeries<K, T>,
    op: impl Fn(T) -> T,
) -> NumericSeries<K, T> {
    src.map_values(format!("{label}({})", src.name()), |&x| op(x))
}

/// Negation, named `Minus(src)`
pub fn neg<K: Ord, T: Sample>(src: &NumericSeries<K, T>) -> NumericSeries<K, T> {
    apply("Minus", src, |x| -x)
}

/// Absolute value, named `Abs(src)`
pub fn abs<K: Ord, T: Sample>(src: &NumericSeries<K, T>) -> NumericSeries<K, T> {
    apply("Abs", src, Float::abs)
}

/// Square, named `Sqr(src)`
pub fn sqr<K: Ord, T: Sample>(src: &NumericSeries<K, T>) -> NumericSeries<K, T> {
    apply("Sqr", src, |x| x * x)
}

/// Square root, named `Sqrt(src)`
///
/// Negative values yield NaN.
pub fn sqrt<K: Ord, T: Sample>(src: &NumericSeries<K, T>) -> NumericSeries<K, T> {
    apply("Sqrt", src, Float::sqrt)
}

/// Sign, named `Sgn(src)`
///
/// `-1` for negative values and `1` for positive ones. Zeros (of either sign) and NaN
/// are returned unchanged.
pub fn sgn<K: Ord, T: Sample>(src: &NumericSeries<K, T>) -> NumericSeries<K, T> {
    apply("Sgn", src, |x| {
        if x == T::zero() || Float::is_nan(x) {
            x
        } else {
            Float::signum(x)
        }
    })
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::{Array, NumericArray, OrderedIndex, Series};

    fn foo() -> NumericSeries<i64> {
        let domain = OrderedIndex::new(vec![1, 2, 3, 4]).unwrap();
        Series::new("foo", domain, NumericArray::of(&[-4.0, 0.0, 2.25, 9.0]), 1.0).unwrap()
    }

    #[test]
    fn test_names_and_values() {
        let s = foo();

        let r = neg(&s);
        assert_eq!(r.name(), "Minus(foo)");
        assert_eq!(r.values().as_slice(), &[4.0, 0.0, -2.25, -9.0]);

        let r = abs(&s);
        assert_eq!(r.name(), "Abs(foo)");
        assert_eq!(r.values().as_slice(), &[4.0, 0.0, 2.25, 9.0]);

        let r = sqr(&s);
        assert_eq!(r.name(), "Sqr(foo)");
        assert_eq!(r.values().as_slice(), &[16.0, 0.0, 5.0625, 81.0]);

        let r = sgn(&s);
        assert_eq!(r.name(), "Sgn(foo)");
        assert_eq!(r.values().as_slice(), &[-1.0, 0.0, 1.0, 1.0]);
    }

    #[test]
    fn test_sqrt() {
        let r = sqrt(&foo());
        assert_eq!(r.name(), "Sqrt(foo)");
        assert!(r.values()[0].is_nan());
        assert_eq!(&r.values().as_slice()[1..], &[0.0, 1.5, 3.0]);
    }

    #[test]
    fn test_keeps_domain_and_default() {
        let s = foo();
        let r = sqr(&neg(&s));
        assert_eq!(r.name(), "Sqr(Minus(foo))");
        assert!(r.shares_domain(&s));
        assert_eq!(*r.default_value(), 1.0);
    }

    #[test]
    fn test_sgn_of_signed_zero_and_nan() {
        let domain = OrderedIndex::new(vec![1, 2]).unwrap();
        let s = NumericSeries::new("z", domain, NumericArray::of(&[-0.0, f64::NAN]), 0.0).unwrap();
        let r = sgn(&s);
        assert!(r.values()[0] == 0.0 && r.values()[0].is_sign_negative());
        assert!(r.values()[1].is_nan());
    }
}
