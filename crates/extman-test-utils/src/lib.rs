//! Shared test fixtures for the Extension Manager workspace.
//!
//! Dev-dependency only, never published.
//!
//! # Modules
//!
//! - [`package`]: [`PackageBuilder`] for gzip tar extension packages
//! - [`library`]: [`TestLibrary`], a temporary root holding tier directories

pub mod library;
pub mod package;

pub use library::TestLibrary;
pub use package::PackageBuilder;
