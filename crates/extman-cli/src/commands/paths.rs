//! The paths command

use colored::Colorize;
use extman_core::LibraryTier;

use crate::context::Context;
use crate::error::Result;

/// Print every library binding and the settings file.
pub fn run_paths(context: &Context) -> Result<()> {
    let libraries = context.config.libraries();

    for tier in LibraryTier::ALL {
        match libraries.get(tier) {
            Some(path) => {
                let state = if path.is_dir() {
                    "present".green()
                } else {
                    "missing".yellow()
                };
                println!("{:<9} {} ({})", tier.as_str().cyan().bold(), path.display(), state);
            }
            None => println!("{:<9} {}", tier.as_str().cyan().bold(), "not configured".dimmed()),
        }
    }

    match context.settings_path() {
        Some(path) => println!("{:<9} {}", "settings".cyan().bold(), path.display()),
        None => println!("{:<9} {}", "settings".cyan().bold(), "not configured".dimmed()),
    }
    Ok(())
}
