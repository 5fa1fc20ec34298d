//! Extension Manager CLI
//!
//! Inspect and manage the extensions installed for the current user.

mod cli;
mod commands;
mod context;
mod error;

use clap::Parser;
use colored::Colorize;
use tracing_subscriber::EnvFilter;

use cli::{Cli, Commands};
use context::Context;
use error::Result;

fn main() {
    if let Err(e) = run() {
        eprintln!("{}: {}", "error".red().bold(), e);
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let context = Context::load(cli.config.as_deref())?;
    execute_command(cli.command, &context)
}

fn init_tracing(verbose: bool) {
    let fallback = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(fallback));
    // A subscriber may already be installed when embedded; keep it.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(verbose)
        .try_init();
    tracing::debug!("Verbose mode enabled");
}

fn execute_command(cmd: Commands, context: &Context) -> Result<()> {
    match cmd {
        Commands::Paths => commands::run_paths(context),
        Commands::Init => commands::run_init(context),
        Commands::List { json } => commands::run_list(context, json),
        Commands::Show { name, json } => commands::run_show(context, &name, json),
        Commands::Get { name, key } => commands::run_get(context, &name, &key),
        Commands::Find { key, value } => commands::run_find(context, &key, &value),
        Commands::Install { tier } => commands::run_install(context, tier.as_deref()),
        Commands::Enable { name } => commands::run_set_enabled(context, &name, true),
        Commands::Disable { name } => commands::run_set_enabled(context, &name, false),
        Commands::Remove { name } => commands::run_remove(context, &name),
        Commands::Validate { package } => commands::run_validate(&package),
    }
}
