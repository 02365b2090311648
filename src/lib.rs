//! skillsmith - skill toolchain and PDF page helpers.
//!
//! Two independent toolsets share one binary:
//!
//! - [`skill`] and [`lint`]: scaffold, validate, smoke-test and package
//!   skill directories (`SKILL.md` + `scripts/`, `references/`, `assets/`).
//! - [`pdf`]: compress, merge, rotate and split PDF files.

pub mod app;
pub mod cli;
pub mod config;
pub mod error;
pub mod lint;
pub mod pdf;
pub mod skill;
pub mod test_utils;
pub mod utils;

pub use error::{Result, SmithError};
