//! Filesystem helpers for the Extension Manager
//!
//! Provides package member path normalization, host platform rules and
//! safe I/O operations shared by the other extman crates.

pub mod error;
pub mod io;
pub mod path;
pub mod platform;

pub use error::{Error, Result};
pub use path::NormalizedPath;
pub use platform::{HostFamily, PathLimit};
