//! Turn-level notebook operations
//!
//! A [`Notebook`] ties a [`ChatStore`] to the [`ActiveSession`] and the
//! canned responders. Each turn writes the user message and then the reply,
//! persisting after each one.
//!
//! Plain chat messages follow a single-exchange model: the chat keeps at most
//! one live user message. Sending again overwrites the latest user message and
//! replaces every assistant reply with a fresh one, so the transcript never
//! grows into a multi-turn history. Summaries and questions append instead.

use crate::assistant;
use crate::config::Config;
use crate::error::{NotebookError, Result};
use crate::session::ActiveSession;
use crate::storage::{ChatStore, ChatSummary, Role};

/// Outcome of one user submission
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Turn {
    /// Content recorded for the user
    pub user: String,
    /// Content of the generated reply
    pub reply: String,
    /// Whether every write reached the chat file
    pub persisted: bool,
}

/// The chat store together with the session being edited
#[derive(Debug)]
pub struct Notebook {
    store: ChatStore,
    session: ActiveSession,
    reply_echo_chars: usize,
    summary_sentences: usize,
    preview_chars: usize,
}

impl Notebook {
    /// Open a notebook on `store` with default reply settings and a fresh session
    pub fn new(store: ChatStore) -> Self {
        let defaults = Config::default();
        Self {
            store,
            session: ActiveSession::new(),
            reply_echo_chars: defaults.chat.reply_echo_chars,
            summary_sentences: defaults.analysis.summary_sentences,
            preview_chars: defaults.analysis.preview_chars,
        }
    }

    /// Open a notebook as described by `config`
    pub fn from_config(config: &Config) -> Self {
        let store = ChatStore::new(&config.storage.path)
            .with_titles(config.chat.title_max_chars, &config.chat.default_title);
        Self {
            store,
            session: ActiveSession::new(),
            reply_echo_chars: config.chat.reply_echo_chars,
            summary_sentences: config.analysis.summary_sentences,
            preview_chars: config.analysis.preview_chars,
        }
    }

    /// The backing store
    pub fn store(&self) -> &ChatStore {
        &self.store
    }

    /// The active session
    pub fn session(&self) -> &ActiveSession {
        &self.session
    }

    /// Send a chat message.
    ///
    /// Overwrites the latest user message if there is one, otherwise appends
    /// a new one. All assistant replies are then discarded and a single fresh
    /// acknowledgement is appended.
    ///
    /// # Errors
    ///
    /// Returns `NotebookError::EmptyInput` for blank input.
    pub fn send_message(&mut self, input: &str) -> Result<Turn> {
        if input.trim().is_empty() {
            return Err(NotebookError::EmptyInput("message".to_string()).into());
        }

        let user_saved = if self.session.replace_last_user_content(input) {
            tracing::debug!(chat_id = %self.session.id(), "Replaced latest user message");
            true
        } else {
            self.store
                .append_message(&mut self.session, Role::User, input)
        };

        self.session.drop_assistant_messages();

        let reply = assistant::chat_reply(input, self.reply_echo_chars);
        let reply_saved = self
            .store
            .append_message(&mut self.session, Role::Assistant, reply.clone());

        Ok(Turn {
            user: input.to_string(),
            reply,
            persisted: user_saved && reply_saved,
        })
    }

    /// Record `text` for analysis and reply with its summary.
    ///
    /// # Errors
    ///
    /// Returns `NotebookError::EmptyInput` for blank text.
    pub fn summarize(&mut self, text: &str) -> Result<Turn> {
        if text.trim().is_empty() {
            return Err(NotebookError::EmptyInput("text".to_string()).into());
        }

        let prompt = assistant::analysis_prompt(text, self.preview_chars);
        let reply = assistant::summarize(text, self.summary_sentences);
        Ok(self.exchange(prompt, reply))
    }

    /// Ask `question` about `text` and reply with the templated answer.
    ///
    /// # Errors
    ///
    /// Returns `NotebookError::EmptyInput` if the text or the question is blank.
    pub fn ask(&mut self, text: &str, question: &str) -> Result<Turn> {
        if text.trim().is_empty() {
            return Err(NotebookError::EmptyInput("text".to_string()).into());
        }
        if question.trim().is_empty() {
            return Err(NotebookError::EmptyInput("question".to_string()).into());
        }

        let prompt = assistant::question_prompt(question);
        let reply = assistant::answer(text, question);
        Ok(self.exchange(prompt, reply))
    }

    fn exchange(&mut self, prompt: String, reply: String) -> Turn {
        let user_saved = self
            .store
            .append_message(&mut self.session, Role::User, prompt.clone());
        let reply_saved = self
            .store
            .append_message(&mut self.session, Role::Assistant, reply.clone());
        Turn {
            user: prompt,
            reply,
            persisted: user_saved && reply_saved,
        }
    }

    /// Start a new in-memory chat, returning its id
    pub fn new_chat(&mut self) -> String {
        self.store.create_session(&mut self.session)
    }

    /// Make a stored chat active.
    ///
    /// # Errors
    ///
    /// Returns `NotebookError::UnknownSession` if `id` is not stored; the
    /// active session is left unchanged.
    pub fn switch_chat(&mut self, id: &str) -> Result<()> {
        if self.store.switch_session(&mut self.session, id) {
            Ok(())
        } else {
            Err(NotebookError::UnknownSession(id.to_string()).into())
        }
    }

    /// Delete a stored chat. Returns whether it existed.
    ///
    /// # Errors
    ///
    /// Returns an error if the chat file could not be rewritten.
    pub fn delete_chat(&mut self, id: &str) -> Result<bool> {
        Ok(self.store.delete_session(&mut self.session, id)?)
    }

    /// Delete every stored chat and start over
    pub fn delete_all_chats(&mut self) -> bool {
        self.store.delete_all(&mut self.session)
    }

    /// Stored chats, most recent first
    pub fn chats(&self) -> Vec<ChatSummary> {
        self.store.list()
    }
}
