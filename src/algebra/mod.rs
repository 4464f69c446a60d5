//! Elementwise algebra and moving statistics over numeric series.
//!
//! Every operation returns a new series named after the operation and its
//! operands, e.g. `Add(close,2)` or `MA(close,20)`. The result keeps the domain
//! (shared, not copied) and the default value of its left operand.

pub mod binary;
pub mod moving;
pub mod unary;

pub use binary::Operand;
