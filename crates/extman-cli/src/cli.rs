//! CLI argument parsing using clap derive

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Extension Manager - discover, install and inspect client extensions
#[derive(Parser, Debug)]
#[command(name = "extman")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Manager configuration file
    #[arg(short, long, global = true, env = "EXTMAN_CONFIG")]
    pub config: Option<PathBuf>,

    /// The command to run
    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Commands {
    /// Show library directories and the settings file
    Paths,

    /// Create libraries, seed the global library and install everything new
    Init,

    /// List installed extensions
    List {
        /// Output as JSON for scripting
        #[arg(long)]
        json: bool,
    },

    /// Show the installed record of one extension
    Show {
        name: String,

        /// Output as JSON for scripting
        #[arg(long)]
        json: bool,
    },

    /// Print one field of an installed extension
    Get { name: String, key: String },

    /// Find the installed extension whose field matches a value
    Find { key: String, value: String },

    /// Install newly discovered extensions
    ///
    /// Examples:
    ///   extman install              # user library, then global
    ///   extman install --tier user  # user library only
    Install {
        /// Library to install from (user or global)
        #[arg(short, long)]
        tier: Option<String>,
    },

    /// Enable an installed extension
    Enable { name: String },

    /// Disable an installed extension
    Disable { name: String },

    /// Forget an installed extension (its package is kept)
    Remove { name: String },

    /// Check a package and its manifest
    Validate { package: PathBuf },
}
