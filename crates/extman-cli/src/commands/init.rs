//! The init command

use colored::Colorize;

use crate::context::Context;
use crate::error::Result;

/// Run the full start-up sequence.
pub fn run_init(context: &Context) -> Result<()> {
    let mut manager = context.manager()?;
    let installed = manager.bootstrap()?;
    print_installed(&installed);
    Ok(())
}

pub(crate) fn print_installed(installed: &[String]) {
    if installed.is_empty() {
        println!("{}", "No new extensions.".dimmed());
        return;
    }
    println!(
        "{} {} extension(s)",
        "Installed".green().bold(),
        installed.len()
    );
    for name in installed {
        println!("  {}", name.green());
    }
}
