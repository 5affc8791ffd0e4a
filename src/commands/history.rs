use crate::cli::HistoryCommand;
use crate::error::{NotebookError, Result};
use crate::session::ActiveSession;
use crate::storage::{truncate_with_ellipsis, ChatRecord, ChatStore, ChatSummary, Role};
use colored::Colorize;
use prettytable::{format, Table};

/// Handle history commands
pub fn handle_history(store: &ChatStore, command: HistoryCommand) -> Result<()> {
    match command {
        HistoryCommand::List => {
            let chats = store.list();
            if chats.is_empty() {
                println!("{}", "No saved chats found.".yellow());
                return Ok(());
            }

            println!("\nSaved Chats:");
            print_chat_table(&chats);
            println!();
            println!(
                "Use {} to continue a chat.",
                "urdu-notebook chat --resume <ID>".cyan()
            );
            println!();
        }
        HistoryCommand::Show { id } => {
            let id = resolve(store, &id)?;
            let record = store
                .get(&id)
                .ok_or_else(|| NotebookError::UnknownSession(id.clone()))?;
            print_chat(&id, &record);
        }
        HistoryCommand::Delete { id } => {
            let id = resolve(store, &id)?;
            // The CLI has no live session; a throwaway one satisfies the store API.
            let mut session = ActiveSession::new();
            store
                .delete_session(&mut session, &id)
                .map_err(|e| NotebookError::Storage(e.to_string()))?;
            println!("{}", format!("Deleted chat {}", id).green());
        }
        HistoryCommand::Clear { yes } => {
            if !yes {
                println!(
                    "{}",
                    "Refusing to delete all chats without --yes.".yellow()
                );
                return Ok(());
            }
            let mut session = ActiveSession::new();
            if !store.delete_all(&mut session) {
                return Err(NotebookError::Storage(format!(
                    "failed to clear {}",
                    store.path().display()
                ))
                .into());
            }
            println!("{}", "Deleted all chats".green());
        }
    }

    Ok(())
}

/// Resolve a full id or unique prefix, failing for unknown ids
pub fn resolve(store: &ChatStore, id: &str) -> Result<String> {
    store
        .resolve_id(id)
        .ok_or_else(|| NotebookError::UnknownSession(id.to_string()).into())
}

/// Print chats as a table, newest first
pub fn print_chat_table(chats: &[ChatSummary]) {
    let mut table = Table::new();
    table.set_format(*format::consts::FORMAT_BORDERS_ONLY);

    table.add_row(prettytable::row![
        "ID".bold(),
        "Title".bold(),
        "Messages".bold(),
        "Last Updated".bold()
    ]);

    for chat in chats {
        let id_short: String = chat.id.chars().take(8).collect();
        let updated = chat
            .timestamp
            .with_timezone(&chrono::Local)
            .format("%m/%d %H:%M")
            .to_string();

        table.add_row(prettytable::row![
            id_short.cyan(),
            truncate_with_ellipsis(&chat.title, 40),
            chat.message_count,
            updated
        ]);
    }

    table.printstd();
}

/// Print every message of a chat
pub fn print_chat(id: &str, record: &ChatRecord) {
    println!("\n{} {}", "Chat".bold(), id.cyan());
    println!("{}\n", record.title.bold());
    for message in &record.messages {
        let label = match message.role {
            Role::User => "👤 آپ:".blue().bold(),
            Role::Assistant => "🤖 اسسٹنٹ:".green().bold(),
        };
        println!("{}", label);
        println!("{}\n", message.content);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn store_with_chat() -> (ChatStore, String, tempfile::TempDir) {
        let dir = tempdir().unwrap();
        let store = ChatStore::new(dir.path().join("chats.json"));
        let mut session = ActiveSession::new();
        store.append_message(&mut session, Role::User, "hello");
        (store, session.id().to_string(), dir)
    }

    #[test]
    fn test_delete_by_prefix_removes_chat() {
        let (store, id, _dir) = store_with_chat();

        handle_history(
            &store,
            HistoryCommand::Delete {
                id: id[..8].to_string(),
            },
        )
        .unwrap();

        assert!(store.load().is_empty());
    }

    #[cfg(unix)]
    #[test]
    fn test_delete_fails_when_store_cannot_be_written() {
        use std::os::unix::fs::PermissionsExt;

        let dir = tempdir().unwrap();
        let locked = dir.path().join("locked");
        std::fs::create_dir(&locked).unwrap();
        let store = ChatStore::new(locked.join("chats.json"));
        let mut session = ActiveSession::new();
        store.append_message(&mut session, Role::User, "hello");
        let id = session.id().to_string();

        std::fs::set_permissions(&locked, std::fs::Permissions::from_mode(0o500)).unwrap();
        let writable = tempfile::NamedTempFile::new_in(&locked).is_ok();
        let result = handle_history(&store, HistoryCommand::Delete { id: id.clone() });
        std::fs::set_permissions(&locked, std::fs::Permissions::from_mode(0o700)).unwrap();

        // Privileged users can write regardless of mode bits.
        if !writable {
            assert!(result.unwrap_err().to_string().contains("Storage error"));
            assert!(store.load().contains_key(&id));
        }
    }

    #[test]
    fn test_show_unknown_chat_errors() {
        let (store, _id, _dir) = store_with_chat();
        let err = handle_history(
            &store,
            HistoryCommand::Show {
                id: "missing".to_string(),
            },
        )
        .unwrap_err();
        assert!(err.to_string().contains("Unknown chat session"));
    }

    #[test]
    fn test_clear_without_confirmation_keeps_chats() {
        let (store, id, _dir) = store_with_chat();
        handle_history(&store, HistoryCommand::Clear { yes: false }).unwrap();
        assert!(store.load().contains_key(&id));
    }

    #[test]
    fn test_clear_with_confirmation_removes_everything() {
        let (store, _id, _dir) = store_with_chat();
        handle_history(&store, HistoryCommand::Clear { yes: true }).unwrap();
        assert!(store.load().is_empty());
    }

    #[test]
    fn test_list_on_empty_store_succeeds() {
        let dir = tempdir().unwrap();
        let store = ChatStore::new(dir.path().join("chats.json"));
        assert!(handle_history(&store, HistoryCommand::List).is_ok());
    }
}
