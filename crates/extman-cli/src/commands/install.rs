//! Commands changing installed state

use colored::Colorize;
use extman_core::LibraryTier;

use super::init::print_installed;
use crate::context::Context;
use crate::error::{CliError, Result};

/// Install new extensions from `tier`, or from user then global.
pub fn run_install(context: &Context, tier: Option<&str>) -> Result<()> {
    let tier = tier.map(str::parse::<LibraryTier>).transpose()?;
    let mut manager = context.manager()?;
    manager.init_extension_config(tier);
    let installed = manager.install_loaded(tier)?;
    print_installed(&installed);
    Ok(())
}

pub fn run_set_enabled(context: &Context, name: &str, enabled: bool) -> Result<()> {
    let mut manager = context.manager()?;
    manager.set_initialized(name, enabled)?;
    let state = if enabled {
        "Enabled".green()
    } else {
        "Disabled".yellow()
    };
    println!("{} {}", state.bold(), name);
    Ok(())
}

pub fn run_remove(context: &Context, name: &str) -> Result<()> {
    let mut manager = context.manager()?;
    if !manager.remove_extension_settings(name)? {
        return Err(CliError::user(format!("extension '{name}' is not installed")));
    }
    println!("{} {}", "Removed".green().bold(), name);
    Ok(())
}
