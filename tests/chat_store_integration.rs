//! Integration tests for chat persistence
//!
//! Exercises the chat store and notebook through the public API the way the
//! interactive chat drives them: create, append, switch, delete, and two
//! independent sessions sharing one file.

use urdu_notebook::{ActiveSession, ChatMap, Notebook, Role};
mod common;

#[test]
fn test_create_then_append_persists_single_record() {
    let (store, _tmp) = common::create_temp_store();
    let mut session = ActiveSession::new();

    store.create_session(&mut session);
    assert!(store.append_message(&mut session, Role::User, "hello"));

    let chats = store.load();
    assert_eq!(chats.len(), 1);
    let record = chats.get(session.id()).expect("active chat stored");
    assert_eq!(record.messages.len(), 1);
    assert_eq!(record.title, "hello");
}

#[test]
fn test_document_shape_matches_chat_file_format() {
    let (store, _tmp) = common::create_temp_store();
    let mut session = ActiveSession::new();
    store.append_message(&mut session, Role::User, "سوال");
    store.append_message(&mut session, Role::Assistant, "جواب");

    let raw = std::fs::read_to_string(store.path()).unwrap();
    let doc: serde_json::Value = serde_json::from_str(&raw).unwrap();
    let chat = &doc[session.id()];

    assert_eq!(chat["title"], "سوال");
    assert!(chat["timestamp"].is_string());
    assert_eq!(chat["messages"][0]["role"], "user");
    assert_eq!(chat["messages"][1]["role"], "assistant");
    assert_eq!(chat["messages"][1]["content"], "جواب");
    assert!(chat["messages"][0]["timestamp"].is_string());
    assert!(chat.get("id").is_none());
}

#[test]
fn test_reads_document_written_with_naive_timestamps() {
    let (store, _tmp) = common::create_temp_store();
    let legacy = r#"{
  "3f1c2a9e-0000-4000-8000-000000000001": {
    "title": "پرانی چیٹ",
    "timestamp": "2024-05-01T10:20:30.123456",
    "messages": [
      {"role": "user", "content": "پرانی چیٹ", "timestamp": "2024-05-01T10:20:29.000001"}
    ]
  }
}"#;
    std::fs::write(store.path(), legacy).unwrap();

    let list = store.list();
    assert_eq!(list.len(), 1);
    assert_eq!(list[0].title, "پرانی چیٹ");
    assert_eq!(list[0].message_count, 1);
}

#[test]
fn test_save_of_load_roundtrips_records() {
    let (store, _tmp) = common::create_temp_store();
    let mut a = ActiveSession::new();
    let mut b = ActiveSession::new();
    store.append_message(&mut a, Role::User, "a");
    store.append_message(&mut b, Role::User, "b");

    let loaded: ChatMap = store.load();
    assert!(store.save(&loaded));

    assert_eq!(store.load(), loaded);
}

#[test]
fn test_repeated_sends_keep_one_exchange() {
    let (store, _tmp) = common::create_temp_store();
    let mut notebook = Notebook::new(store.clone());

    for text in ["one", "two", "three"] {
        notebook.send_message(text).unwrap();
    }

    let record = store.get(notebook.session().id()).unwrap();
    let users = record.messages.iter().filter(|m| m.role == Role::User).count();
    let replies = record
        .messages
        .iter()
        .filter(|m| m.role == Role::Assistant)
        .count();
    assert_eq!(users, 1);
    assert_eq!(replies, 1);
    assert_eq!(record.messages[0].content, "three");
}

#[test]
fn test_delete_active_then_continue_in_new_chat() {
    let (store, _tmp) = common::create_temp_store();
    let mut notebook = Notebook::new(store.clone());
    notebook.send_message("old").unwrap();
    let old = notebook.session().id().to_string();

    assert!(notebook.delete_chat(&old).unwrap());
    notebook.send_message("new").unwrap();

    let chats = store.load();
    assert!(!chats.contains_key(&old));
    assert_eq!(chats.len(), 1);
    assert_ne!(notebook.session().id(), old);
}

#[test]
fn test_switch_unknown_leaves_active_session() {
    let (store, _tmp) = common::create_temp_store();
    let mut session = ActiveSession::new();
    store.append_message(&mut session, Role::User, "x");
    let id = session.id().to_string();

    assert!(!store.switch_session(&mut session, "not-a-chat"));
    assert_eq!(session.id(), id);
    assert_eq!(session.messages().len(), 1);
}

#[test]
fn test_interleaved_sessions_share_one_file() {
    let (store, _tmp) = common::create_temp_store();
    let mut tab_one = Notebook::new(store.clone());
    let mut tab_two = Notebook::new(store.clone());

    tab_one.send_message("from tab one").unwrap();
    tab_two.send_message("from tab two").unwrap();
    tab_one.send_message("tab one again").unwrap();

    let chats = store.try_load().expect("document parses after interleaving");
    assert_eq!(chats.len(), 2);
    assert_eq!(chats[tab_one.session().id()].title, "tab one again");
    assert_eq!(chats[tab_two.session().id()].title, "from tab two");
}

#[test]
fn test_corrupt_store_is_overwritten_by_next_append() {
    let (store, _tmp) = common::create_temp_store();
    std::fs::write(store.path(), "[not a chat map]").unwrap();
    let mut session = ActiveSession::new();

    assert!(store.append_message(&mut session, Role::User, "fresh"));

    let chats = store.try_load().expect("store rewritten");
    assert_eq!(chats.len(), 1);
}

#[test]
fn test_incomplete_record_does_not_hide_other_chats() {
    let (store, _tmp) = common::create_temp_store();
    let doc = r#"{
  "keep-me": {
    "title": "محفوظ",
    "timestamp": "2024-05-01T10:20:30.000000Z",
    "messages": [
      {"role": "user", "content": "محفوظ", "timestamp": "2024-05-01T10:20:29.000000Z"}
    ]
  },
  "no-title": {
    "messages": [
      {"role": "user", "content": "بغیر عنوان", "timestamp": "2024-05-01T09:00:00"}
    ]
  }
}"#;
    std::fs::write(store.path(), doc).unwrap();

    let list = store.list();
    assert_eq!(list.len(), 2);
    assert_eq!(list[0].id, "keep-me");
    assert_eq!(list[1].title, urdu_notebook::storage::UNNAMED_TITLE);

    let mut session = ActiveSession::new();
    assert!(store.append_message(&mut session, Role::User, "new"));

    let chats = store.try_load().expect("store still parses");
    assert_eq!(chats.len(), 3);
    assert_eq!(chats["keep-me"].messages.len(), 1);
    assert!(chats.contains_key("no-title"));
}
