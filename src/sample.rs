use core::fmt::{Debug, Display};

use num_traits::Float;
use ordered_float::PrimitiveFloat;

/// Floating point sample type accepted by window functions and series algebra.
///
/// Blanket-implemented for every type meeting the bounds, which in practice
/// means `f32` and `f64`.
pub trait Sample: Float + PrimitiveFloat + Default + Debug + Display + 'static {}

impl<T> Sample for T where T: Float + PrimitiveFloat + Default + Debug + Display + 'static {}
