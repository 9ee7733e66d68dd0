//! Cross-cutting support code

pub mod shutdown;

pub use shutdown::*;
