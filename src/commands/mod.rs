/*!
Command handlers for the CLI

This module provides command handlers invoked by the CLI entrypoint:

- `chat`    — Interactive chat with special `/` commands
- `turn`    — One-shot send, summarize and ask
- `history` — List, show and delete stored chats

The handlers are thin wrappers over [`Notebook`](crate::notebook::Notebook)
and [`ChatStore`](crate::storage::ChatStore).
*/

use crate::config::Config;
use crate::error::Result;
use crate::notebook::{Notebook, Turn};
use colored::Colorize;

// History management commands
pub mod history;

// Special commands parser for the interactive chat
pub mod special_commands;

/// Print both sides of a turn
fn print_turn(turn: &Turn) {
    println!("{} {}", "👤".blue(), turn.user);
    println!("{}\n", turn.reply.green());
    if !turn.persisted {
        println!("{}", "Warning: chat could not be saved".yellow());
    }
}

/// Open a notebook, resuming `session` when given
fn open_notebook(config: &Config, session: Option<&str>) -> Result<Notebook> {
    let mut notebook = Notebook::from_config(config);
    if let Some(id) = session {
        let id = history::resolve(notebook.store(), id)?;
        notebook.switch_chat(&id)?;
    }
    Ok(notebook)
}

// Interactive chat handler
pub mod chat {
    //! Interactive chat handler.
    //!
    //! Runs a readline loop over one [`Notebook`]. Plain lines are chat
    //! messages; `/` lines are special commands.

    use super::special_commands::{parse_special_command, print_help, SpecialCommand};
    use super::*;
    use crate::error::NotebookError;
    use crate::storage::Role;
    use rustyline::error::ReadlineError;
    use rustyline::DefaultEditor;

    /// Start the interactive chat
    ///
    /// # Arguments
    ///
    /// * `config` - Global configuration
    /// * `resume` - Optional id (or unique prefix) of a stored chat to continue
    pub fn run_chat(config: Config, resume: Option<String>) -> Result<()> {
        tracing::info!("Starting interactive chat");

        let mut notebook = open_notebook(&config, resume.as_deref())?;
        let mut rl = DefaultEditor::new().map_err(NotebookError::Readline)?;
        let mut analysis_text: Option<String> = None;

        print_welcome_banner(&notebook);

        loop {
            let prompt = format!("[{}] >> ", short_id(notebook.session().id()));
            match rl.readline(&prompt) {
                Ok(line) => {
                    let trimmed = line.trim();
                    if trimmed.is_empty() {
                        continue;
                    }
                    rl.add_history_entry(trimmed)
                        .map_err(NotebookError::Readline)?;

                    let command = match parse_special_command(trimmed) {
                        Ok(command) => command,
                        Err(e) => {
                            println!("{}", e.to_string().red());
                            continue;
                        }
                    };

                    match command {
                        SpecialCommand::Exit => break,
                        SpecialCommand::None => match notebook.send_message(trimmed) {
                            Ok(turn) => print_turn(&turn),
                            Err(e) => println!("{}", e.to_string().red()),
                        },
                        SpecialCommand::DeleteAll
                            if !confirm(&mut rl, "Delete every saved chat? [y/N] ")? =>
                        {
                            println!("{}", "Kept all chats".yellow());
                        }
                        other => {
                            if let Err(e) = handle_special(&mut notebook, &mut analysis_text, other)
                            {
                                println!("{}", e.to_string().red());
                            }
                        }
                    }
                }
                Err(ReadlineError::Interrupted) => {
                    println!("^C");
                    continue;
                }
                Err(ReadlineError::Eof) => break,
                Err(e) => {
                    tracing::error!("Readline error: {}", e);
                    return Err(NotebookError::Readline(e).into());
                }
            }
        }

        println!("خدا حافظ!");
        Ok(())
    }

    fn handle_special(
        notebook: &mut Notebook,
        analysis_text: &mut Option<String>,
        command: SpecialCommand,
    ) -> Result<()> {
        match command {
            SpecialCommand::NewChat => {
                let id = notebook.new_chat();
                println!("{}", format!("Started chat {}", short_id(&id)).green());
            }
            SpecialCommand::ListChats => {
                let chats = notebook.chats();
                if chats.is_empty() {
                    println!("{}", "ابھی کوئی چیٹ محفوظ نہیں".yellow());
                } else {
                    history::print_chat_table(&chats);
                }
            }
            SpecialCommand::SwitchChat(id) => {
                let id = history::resolve(notebook.store(), &id)?;
                notebook.switch_chat(&id)?;
                println!("{}", format!("Switched to chat {}", short_id(&id)).green());
                print_session(notebook);
            }
            SpecialCommand::DeleteChat(id) => {
                let id = history::resolve(notebook.store(), &id)?;
                let was_active = notebook.session().id() == id;
                notebook.delete_chat(&id)?;
                println!("{}", format!("Deleted chat {}", short_id(&id)).green());
                if was_active {
                    println!(
                        "{}",
                        format!("Started chat {}", short_id(notebook.session().id())).green()
                    );
                }
            }
            SpecialCommand::DeleteAll => {
                if notebook.delete_all_chats() {
                    println!("{}", "Deleted all chats".green());
                } else {
                    println!("{}", "Warning: chats could not be cleared".yellow());
                }
            }
            SpecialCommand::SetText(text) => {
                println!(
                    "{}",
                    format!("Remembered {} characters of text", text.chars().count()).green()
                );
                *analysis_text = Some(text);
            }
            SpecialCommand::Summarize(text) => {
                if let Some(text) = text {
                    *analysis_text = Some(text);
                }
                let text = analysis_text.as_deref().unwrap_or_default();
                let turn = notebook.summarize(text)?;
                print_turn(&turn);
            }
            SpecialCommand::Ask(question) => {
                let text = analysis_text.as_deref().unwrap_or_default();
                let turn = notebook.ask(text, &question)?;
                print_turn(&turn);
            }
            SpecialCommand::ShowChat => print_session(notebook),
            SpecialCommand::ShowStatus => {
                println!("Chat:     {}", notebook.session().id().cyan());
                println!("Messages: {}", notebook.session().messages().len());
                println!("Store:    {}", notebook.store().path().display());
                println!("Saved:    {}", notebook.chats().len());
            }
            SpecialCommand::Help => print_help(),
            SpecialCommand::Exit | SpecialCommand::None => {}
        }
        Ok(())
    }

    /// Ask a yes/no question on the chat prompt. Ctrl-C and EOF count as no.
    fn confirm(rl: &mut DefaultEditor, prompt: &str) -> Result<bool> {
        match rl.readline(prompt) {
            Ok(answer) => Ok(is_confirmation(&answer)),
            Err(ReadlineError::Interrupted | ReadlineError::Eof) => Ok(false),
            Err(e) => Err(NotebookError::Readline(e).into()),
        }
    }

    pub(super) fn is_confirmation(answer: &str) -> bool {
        matches!(answer.trim().to_lowercase().as_str(), "y" | "yes")
    }

    fn print_session(notebook: &Notebook) {
        for message in notebook.session().messages() {
            match message.role {
                Role::User => println!("{} {}", "👤".blue(), message.content),
                Role::Assistant => println!("{}\n", message.content.green()),
            }
        }
    }

    fn print_welcome_banner(notebook: &Notebook) {
        println!("{}", "🗨️  Urdu Notebook".bold());
        println!("🌟 خوش آمدید! یہاں اردو متن پیسٹ کریں، خلاصہ حاصل کریں یا سوالات پوچھیں");
        println!(
            "Store: {}  |  Type {} for commands\n",
            notebook.store().path().display(),
            "/help".cyan()
        );
        if !notebook.session().is_empty() {
            print_session(notebook);
        }
    }

    fn short_id(id: &str) -> String {
        id.chars().take(8).collect()
    }
}

// One-shot turn handlers
pub mod turn {
    //! Non-interactive turns: each call performs one exchange and exits.

    use super::*;

    /// Send one chat message
    pub fn send(config: &Config, message: &str, session: Option<&str>) -> Result<()> {
        let mut notebook = open_notebook(config, session)?;
        let turn = notebook.send_message(message)?;
        print_turn(&turn);
        println!("Chat: {}", notebook.session().id().cyan());
        Ok(())
    }

    /// Summarize text
    pub fn summarize(config: &Config, text: &str, session: Option<&str>) -> Result<()> {
        let mut notebook = open_notebook(config, session)?;
        let turn = notebook.summarize(text)?;
        print_turn(&turn);
        println!("Chat: {}", notebook.session().id().cyan());
        Ok(())
    }

    /// Ask a question about text
    pub fn ask(config: &Config, text: &str, question: &str, session: Option<&str>) -> Result<()> {
        let mut notebook = open_notebook(config, session)?;
        let turn = notebook.ask(text, question)?;
        print_turn(&turn);
        println!("Chat: {}", notebook.session().id().cyan());
        Ok(())
    }
}
