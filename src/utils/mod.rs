pub mod tolerance;

pub use tolerance::{is_approximately_equal, norm};
