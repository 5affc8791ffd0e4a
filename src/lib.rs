//! Urdu Notebook - Urdu text assistant prototype library
//!
//! This library provides the chat-session persistence and turn handling
//! behind the `urdu-notebook` command-line tool.
//!
//! # Architecture
//!
//! The library is organized into the following modules:
//!
//! - `storage`: JSON-file chat store and its record types
//! - `session`: The explicit active-session object
//! - `assistant`: Canned chat, summary and answer replies
//! - `notebook`: Turn-level operations over the store and session
//! - `config`: Configuration management and validation
//! - `error`: Error types and result aliases
//! - `cli`: Command-line interface definition
//! - `commands`: Interactive chat and history command handlers
//!
//! # Example
//!
//! ```no_run
//! use urdu_notebook::{ChatStore, Notebook};
//!
//! fn main() -> anyhow::Result<()> {
//!     let mut notebook = Notebook::new(ChatStore::new("chats_v02.json"));
//!     let turn = notebook.send_message("السلام علیکم")?;
//!     println!("{}", turn.reply);
//!     Ok(())
//! }
//! ```

pub mod assistant;
pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod notebook;
pub mod session;
pub mod storage;

// Re-export commonly used types
pub use config::Config;
pub use error::{LoadError, NotebookError, Result, SaveError};
pub use notebook::{Notebook, Turn};
pub use session::ActiveSession;
pub use storage::{ChatMap, ChatRecord, ChatStore, ChatSummary, Message, Role};
