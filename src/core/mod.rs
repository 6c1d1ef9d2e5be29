//! Storage, capability traits and their per-type implementations.

pub mod buffer;
pub mod traits;
pub mod wrappers;

pub use buffer::Buffer;
pub use traits::*;
