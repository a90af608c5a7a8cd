//! Command-line interface for tonerdesk.

mod commands;

use clap::{Parser, Subcommand};

/// tonerdesk - toner cartridge inventory tracker
#[derive(Parser)]
#[command(name = "tonerdesk")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Start the web server (default)
    #[command(alias = "web")]
    Serve,

    /// Create default config file
    Init,

    /// Manage login accounts
    User {
        #[command(subcommand)]
        command: UserCommands,
    },

    /// Inspect or adjust the toner ledger
    Stock {
        #[command(subcommand)]
        command: StockCommands,
    },

    /// Show recent movement history
    #[command(alias = "h")]
    History {
        /// Number of entries to show
        #[arg(default_value = "20")]
        limit: u64,
    },
}

#[derive(Subcommand)]
pub enum UserCommands {
    /// Create an account
    Add {
        username: String,
        /// Name shown in the UI and in history entries
        display_name: String,
        #[arg(long)]
        password: String,
        /// Grant access to user management and history clearing
        #[arg(long)]
        admin: bool,
    },
    /// List accounts
    #[command(alias = "ls")]
    List,
}

#[derive(Subcommand)]
pub enum StockCommands {
    /// List every record with its derived status
    #[command(alias = "ls")]
    List,
    /// Book a delivery: one more unit, awaiting flag cleared
    Receive {
        /// Record ID
        id: i32,
    },
}

pub use commands::*;
