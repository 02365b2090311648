//! Utility functions and helpers.

pub mod format;
pub mod fs;

pub use format::*;
pub use fs::*;
