//! Command-line interface definition for Urdu Notebook
//!
//! This module defines the CLI structure using clap's derive API,
//! providing the interactive chat, one-shot turns and history management.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Urdu Notebook - Urdu text assistant prototype
///
/// Chat, summarize pasted Urdu text and ask questions about it. Chats are
/// kept in a local JSON file.
#[derive(Parser, Debug, Clone)]
#[command(name = "urdu-notebook")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Path to configuration file
    #[arg(short, long, default_value = "config/config.yaml")]
    pub config: Option<String>,

    /// Override the chat store file
    #[arg(long, env = "URDU_NOTEBOOK_STORE")]
    pub store: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,

    /// Command to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands for Urdu Notebook
#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Start the interactive chat
    Chat {
        /// Continue a stored chat instead of starting a new one
        #[arg(short, long)]
        resume: Option<String>,
    },

    /// Send one chat message and print the reply
    Send {
        /// Message text
        message: String,

        /// Chat to send into (defaults to a new chat)
        #[arg(short, long)]
        session: Option<String>,
    },

    /// Summarize Urdu text
    Summarize {
        /// Text to summarize
        text: String,

        /// Chat to record the exchange in (defaults to a new chat)
        #[arg(short, long)]
        session: Option<String>,
    },

    /// Ask a question about Urdu text
    Ask {
        /// The question
        question: String,

        /// Text the question is about
        #[arg(short, long)]
        text: String,

        /// Chat to record the exchange in (defaults to a new chat)
        #[arg(short, long)]
        session: Option<String>,
    },

    /// Manage stored chats
    History {
        /// History subcommand
        #[command(subcommand)]
        command: HistoryCommand,
    },
}

/// History management subcommands
#[derive(Subcommand, Debug, Clone)]
pub enum HistoryCommand {
    /// List stored chats, newest first
    List,

    /// Print every message of a chat
    Show {
        /// Chat id
        id: String,
    },

    /// Delete a chat
    Delete {
        /// Chat id
        id: String,
    },

    /// Delete every chat
    Clear {
        /// Confirm deleting all chats
        #[arg(long)]
        yes: bool,
    },
}

impl Cli {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Self::parse()
    }
}

impl Default for Cli {
    fn default() -> Self {
        Self {
            config: Some("config/config.yaml".to_string()),
            store: None,
            verbose: false,
            command: Commands::Chat { resume: None },
        }
    }
}
