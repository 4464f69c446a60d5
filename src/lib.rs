#![doc = include_str!("../README.md")]
#![cfg_attr(not(test), no_std)]
#![deny(
    unsafe_code,
    unused_imports,
    unused_variables,
    unused_must_use,
    missing_docs,
    clippy::all,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::dbg_macro,
    clippy::todo,
    clippy::unimplemented
)]
#![allow(clippy::len_without_is_empty)]

#[macro_use]
extern crate alloc;

pub(crate) type Kbn<T> = compensated_summation::KahanBabuskaNeumaier<T>;

mod error;
pub use error::SeriesError;

mod sample;
pub use sample::Sample;

pub mod utils;
pub use utils::{LazyHeap, RingBuffer};

mod index;
pub use index::{IndexBuilder, OrderedIndex};

mod array;
pub use array::{Array, GenericArray, NumericArray};

mod series;
pub use series::{NumericSeries, Series};

pub mod window;
pub use window::{
    ExponentialMovingAverage, Identity, MovingAverage, MovingExtremum, MovingMax, MovingMin,
    MovingQuantile, MovingSum, Shift, WindowFunction, WindowSpec,
};

pub mod algebra;
