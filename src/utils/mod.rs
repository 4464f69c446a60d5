//! Building blocks shared by the window functions and the ordered index.

mod lazy_heap;
pub use lazy_heap::{LazyHeap, Max, Min, OrderPolicy};

mod ring_buffer;
pub use ring_buffer::RingBuffer;

pub mod search;
