//! CLI interface for Flick N Roll

pub mod commands;
mod output;

pub use output::*;

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "flicknroll")]
#[command(version)]
#[command(about = "Flick N Roll dashboard session tool", long_about = None)]
pub struct Cli {
    /// Path to flicknroll.toml (searched upward from the current directory by default)
    #[arg(short, long, global = true, env = "FLICKNROLL_CONFIG")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Initialize a new flicknroll.toml configuration file
    Init,

    /// Sign in and persist the session
    Login {
        /// Account email
        #[arg(short, long)]
        email: String,

        /// Account password (prompted when omitted)
        #[arg(short, long, env = "FLICKNROLL_PASSWORD", hide_env_values = true)]
        password: Option<String>,
    },

    /// Sign out and remove the stored session
    Logout,

    /// Show the signed-in principal
    Whoami {
        /// Output format
        #[arg(short, long, default_value = "table")]
        format: OutputFormat,
    },

    /// Resolve a dashboard path for the current session
    Open {
        /// Path to open, e.g. /dashboard or /reports
        #[arg(default_value = "/")]
        path: String,

        /// Output format
        #[arg(short, long, default_value = "table")]
        format: OutputFormat,
    },

    /// List the accounts that can sign in
    Accounts {
        /// Output format
        #[arg(short, long, default_value = "table")]
        format: OutputFormat,
    },
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum OutputFormat {
    Table,
    Json,
}
