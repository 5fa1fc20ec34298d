//! The validate command

use std::path::Path;

use colored::Colorize;
use extman_package::{ConfigKey, ConfigValidator, PackageArchive};

use crate::error::{CliError, Result};

/// Check the manifest of the package at `path` against the host rules.
pub fn run_validate(path: &Path) -> Result<()> {
    let archive = PackageArchive::open(path)?;
    let manifest = archive.read_manifest()?;
    let mut validator = ConfigValidator::with_archive(&manifest, archive);
    let ok = validator.validate_all();

    let name = if manifest.has_name() {
        manifest.name.as_str()
    } else {
        "<unnamed>"
    };
    println!("{} ({})", name.cyan().bold(), validator.host());
    for key in ConfigKey::MANIFEST {
        let mark = if validator.errors().contains(&key) {
            "FAIL".red().bold()
        } else {
            "ok".green()
        };
        println!("  {:<12} {}", key.as_str(), mark);
    }

    if ok {
        println!("{}", "Package is valid.".green());
        return Ok(());
    }

    let failed: Vec<&str> = validator.errors().iter().map(ConfigKey::as_str).collect();
    Err(CliError::user(format!(
        "validation failed for: {}",
        failed.join(", ")
    )))
}
