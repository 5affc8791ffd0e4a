//! Urdu Notebook - Urdu text assistant prototype
//!
#![doc = "Main entry point for the Urdu Notebook application."]

use anyhow::Result;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use urdu_notebook::cli::{Cli, Commands};
use urdu_notebook::commands;
use urdu_notebook::config::Config;
use urdu_notebook::storage::ChatStore;

fn main() -> Result<()> {
    // Parse command line arguments
    let cli = Cli::parse_args();

    init_tracing(cli.verbose);

    // Load configuration
    let config_path = cli.config.as_deref().unwrap_or("config/config.yaml");
    let config = Config::load(config_path, &cli)?;

    // Validate configuration
    config.validate()?;
    tracing::debug!(store = %config.storage.path.display(), "Configuration loaded");

    match cli.command {
        Commands::Chat { resume } => {
            if let Some(r) = &resume {
                tracing::debug!("Resuming chat: {}", r);
            }
            commands::chat::run_chat(config, resume)
        }
        Commands::Send { message, session } => {
            commands::turn::send(&config, &message, session.as_deref())
        }
        Commands::Summarize { text, session } => {
            commands::turn::summarize(&config, &text, session.as_deref())
        }
        Commands::Ask {
            question,
            text,
            session,
        } => commands::turn::ask(&config, &text, &question, session.as_deref()),
        Commands::History { command } => {
            tracing::info!("Starting history command");
            let store = ChatStore::new(&config.storage.path)
                .with_titles(config.chat.title_max_chars, &config.chat.default_title);
            commands::history::handle_history(&store, command)
        }
    }
}

/// Initialize tracing subscriber with environment filter
///
/// Logs go to stderr so they never interleave with chat output.
fn init_tracing(verbose: bool) {
    let default_directive = if verbose {
        "urdu_notebook=debug"
    } else {
        "urdu_notebook=warn"
    };
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_directive));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}
