//! Special commands parser for the interactive chat
//!
//! Lines starting with `/` manage chats or analyse text instead of being
//! sent as a chat message. The command word is case-insensitive; its
//! argument is kept verbatim so Urdu text and chat ids pass through intact.

use thiserror::Error;

/// Errors that can occur when parsing special commands
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CommandError {
    /// Unknown command was entered
    #[error("Unknown command: {0}\n\nType '/help' to see available commands")]
    UnknownCommand(String),

    /// Command takes no argument but one was given
    #[error("Unsupported argument for {command}: {arg}\n\nType '/help' to see valid usage")]
    UnsupportedArgument { command: String, arg: String },

    /// Command requires an argument but none was provided
    #[error("Command {command} requires an argument\n\nUsage: {usage}")]
    MissingArgument { command: String, usage: String },
}

/// Special commands that can be executed during the interactive chat
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SpecialCommand {
    /// Start a new chat
    NewChat,

    /// List stored chats
    ListChats,

    /// Switch to a stored chat by id or id prefix
    SwitchChat(String),

    /// Delete a stored chat by id or id prefix
    DeleteChat(String),

    /// Delete every stored chat
    DeleteAll,

    /// Remember text for later summaries and questions
    SetText(String),

    /// Summarize the given text, or the remembered text if none is given
    Summarize(Option<String>),

    /// Ask a question about the remembered text
    Ask(String),

    /// Print the messages of the active chat
    ShowChat,

    /// Show the active chat id, message count and store path
    ShowStatus,

    /// Display help information
    Help,

    /// Exit the interactive session
    Exit,

    /// Not a special command; send the line as a chat message
    None,
}

/// Parse a user input line into a special command
///
/// # Errors
///
/// Returns `CommandError::UnknownCommand` if input starts with "/" but is not a valid command.
/// Returns `CommandError::UnsupportedArgument` if a command receives an argument it does not take.
/// Returns `CommandError::MissingArgument` if a command requires an argument but none was provided.
///
/// # Examples
///
/// ```
/// use urdu_notebook::commands::special_commands::{parse_special_command, SpecialCommand};
///
/// let cmd = parse_special_command("/switch 1a2b3c4d").unwrap();
/// assert_eq!(cmd, SpecialCommand::SwitchChat("1a2b3c4d".to_string()));
///
/// let cmd = parse_special_command("سلام").unwrap();
/// assert_eq!(cmd, SpecialCommand::None);
///
/// assert!(parse_special_command("/foo").is_err());
/// ```
pub fn parse_special_command(input: &str) -> Result<SpecialCommand, CommandError> {
    let trimmed = input.trim();
    let lower = trimmed.to_lowercase();

    if lower == "exit" || lower == "quit" {
        return Ok(SpecialCommand::Exit);
    }
    if !trimmed.starts_with('/') {
        return Ok(SpecialCommand::None);
    }

    let (word, arg) = match trimmed.split_once(char::is_whitespace) {
        Some((word, rest)) => (word.to_lowercase(), rest.trim()),
        None => (lower, ""),
    };

    let required = |usage: &str| -> Result<String, CommandError> {
        if arg.is_empty() {
            Err(CommandError::MissingArgument {
                command: word.clone(),
                usage: usage.to_string(),
            })
        } else {
            Ok(arg.to_string())
        }
    };
    let bare = |cmd: SpecialCommand| -> Result<SpecialCommand, CommandError> {
        if arg.is_empty() {
            Ok(cmd)
        } else {
            Err(CommandError::UnsupportedArgument {
                command: word.clone(),
                arg: arg.to_string(),
            })
        }
    };

    match word.as_str() {
        "/new" => bare(SpecialCommand::NewChat),
        "/list" | "/chats" => bare(SpecialCommand::ListChats),
        "/switch" | "/open" => required("/switch <id>").map(SpecialCommand::SwitchChat),
        "/delete" => required("/delete <id>").map(SpecialCommand::DeleteChat),
        "/delete-all" => bare(SpecialCommand::DeleteAll),
        "/text" => required("/text <urdu text>").map(SpecialCommand::SetText),
        "/summarize" | "/summary" => Ok(SpecialCommand::Summarize(
            (!arg.is_empty()).then(|| arg.to_string()),
        )),
        "/ask" => required("/ask <question>").map(SpecialCommand::Ask),
        "/show" => bare(SpecialCommand::ShowChat),
        "/status" => bare(SpecialCommand::ShowStatus),
        "/help" | "/?" => bare(SpecialCommand::Help),
        "/exit" | "/quit" => bare(SpecialCommand::Exit),
        _ => Err(CommandError::UnknownCommand(trimmed.to_string())),
    }
}

/// Print help text for the interactive chat
pub fn print_help() {
    println!(
        r#"
Special Commands for the Interactive Chat
=========================================

CHATS:
  /new              - Start a new chat
  /list             - List stored chats (alias: /chats)
  /switch <id>      - Open a stored chat; an unambiguous id prefix is enough
  /delete <id>      - Delete a stored chat
  /delete-all       - Delete every stored chat
  /show             - Print the messages of the current chat
  /status           - Show the current chat and store

TEXT ANALYSIS:
  /text <text>      - Remember Urdu text for summaries and questions
  /summarize [text] - Summarize the given or remembered text
  /ask <question>   - Ask a question about the remembered text

OTHER:
  /help             - Show this help message (alias: /?)
  exit, quit        - Leave the chat

Any other line is sent as a chat message. Sending again replaces the
previous message and its reply.
"#
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_text_is_not_a_command() {
        assert_eq!(parse_special_command("سلام دنیا").unwrap(), SpecialCommand::None);
    }

    #[test]
    fn test_parse_exit_and_quit() {
        assert_eq!(parse_special_command("exit").unwrap(), SpecialCommand::Exit);
        assert_eq!(parse_special_command("QUIT").unwrap(), SpecialCommand::Exit);
        assert_eq!(parse_special_command("/exit").unwrap(), SpecialCommand::Exit);
    }

    #[test]
    fn test_parse_new_is_case_insensitive() {
        assert_eq!(parse_special_command("/NEW").unwrap(), SpecialCommand::NewChat);
    }

    #[test]
    fn test_parse_list_alias() {
        assert_eq!(parse_special_command("/chats").unwrap(), SpecialCommand::ListChats);
    }

    #[test]
    fn test_parse_switch_keeps_argument_case() {
        assert_eq!(
            parse_special_command("/Switch AbC123").unwrap(),
            SpecialCommand::SwitchChat("AbC123".to_string())
        );
    }

    #[test]
    fn test_parse_switch_without_id() {
        let err = parse_special_command("/switch").unwrap_err();
        assert!(matches!(err, CommandError::MissingArgument { .. }));
    }

    #[test]
    fn test_parse_delete_and_delete_all() {
        assert_eq!(
            parse_special_command("/delete abc").unwrap(),
            SpecialCommand::DeleteChat("abc".to_string())
        );
        assert_eq!(parse_special_command("/delete-all").unwrap(), SpecialCommand::DeleteAll);
    }

    #[test]
    fn test_parse_delete_all_rejects_argument() {
        let err = parse_special_command("/delete-all now").unwrap_err();
        assert_eq!(
            err,
            CommandError::UnsupportedArgument {
                command: "/delete-all".to_string(),
                arg: "now".to_string(),
            }
        );
    }

    #[test]
    fn test_parse_text_keeps_urdu_verbatim() {
        assert_eq!(
            parse_special_command("/text  پہلا جملہ۔ دوسرا جملہ۔ ").unwrap(),
            SpecialCommand::SetText("پہلا جملہ۔ دوسرا جملہ۔".to_string())
        );
    }

    #[test]
    fn test_parse_summarize_with_and_without_text() {
        assert_eq!(
            parse_special_command("/summarize").unwrap(),
            SpecialCommand::Summarize(None)
        );
        assert_eq!(
            parse_special_command("/summary متن۔").unwrap(),
            SpecialCommand::Summarize(Some("متن۔".to_string()))
        );
    }

    #[test]
    fn test_parse_ask_requires_question() {
        assert!(parse_special_command("/ask").is_err());
        assert_eq!(
            parse_special_command("/ask اہم کردار کون ہے؟").unwrap(),
            SpecialCommand::Ask("اہم کردار کون ہے؟".to_string())
        );
    }

    #[test]
    fn test_parse_help_shorthand() {
        assert_eq!(parse_special_command("/?").unwrap(), SpecialCommand::Help);
    }

    #[test]
    fn test_parse_unknown_command() {
        let err = parse_special_command("/foo").unwrap_err();
        assert_eq!(err, CommandError::UnknownCommand("/foo".to_string()));
        assert!(err.to_string().contains("/help"));
    }
}
