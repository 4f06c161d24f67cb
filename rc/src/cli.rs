//! CLI command definitions and subcommands

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// RoutineChat - product catalog and recommendation chat
#[derive(Parser, Debug)]
#[command(name = "rc")]
#[command(author, version, about = "Browse a product catalog and build routines with an AI assistant", long_about = None)]
pub struct Cli {
    /// Path to config file
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Log level (TRACE, DEBUG, INFO, WARN, ERROR)
    #[arg(short = 'l', long = "log-level", global = true)]
    pub log_level: Option<String>,

    /// Subcommand to execute (defaults to the interactive chat)
    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Start the interactive catalog and chat session
    Chat {
        /// Message to send as soon as the session starts
        message: Option<String>,
    },

    /// Show product cards, optionally filtered by category
    Products {
        /// Exact, case-sensitive category name
        #[arg(short = 'C', long)]
        category: Option<String>,
    },

    /// List product categories
    Categories,

    /// Send one message and print the reply
    Ask {
        /// Message for the assistant
        #[arg(required = true)]
        message: String,

        /// Product ids to treat as selected
        #[arg(short, long = "select", value_name = "ID")]
        select: Vec<String>,
    },

    /// Print a routine built from the given products
    Routine {
        /// Product ids, in routine order
        #[arg(short, long = "select", value_name = "ID")]
        select: Vec<String>,
    },
}
