use crate::error::{LoadError, SaveError};
use crate::session::ActiveSession;
use chrono::Utc;
use std::collections::BTreeMap;
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

pub mod types;
pub use types::{
    derive_title, truncate_with_ellipsis, ChatMap, ChatRecord, ChatSummary, Message, Role,
    UNNAMED_TITLE,
};

/// Default location of the chat document, relative to the working directory
pub const DEFAULT_STORE_PATH: &str = "chats_v02.json";

/// Default maximum title length in characters
pub const DEFAULT_TITLE_MAX_CHARS: usize = 50;

/// Title used before a chat has any user message
pub const DEFAULT_TITLE: &str = "New Chat";

/// JSON-file backed store of chat sessions.
///
/// Every mutation is a read-modify-write of the whole document. There is no
/// locking: two writers sharing one file race and the last save wins. The
/// document itself is replaced atomically, so it always parses.
#[derive(Debug, Clone)]
pub struct ChatStore {
    path: PathBuf,
    title_max_chars: usize,
    default_title: String,
}

impl ChatStore {
    /// Create a store backed by `path`. Nothing is read or written yet.
    pub fn new<P: Into<PathBuf>>(path: P) -> Self {
        Self {
            path: path.into(),
            title_max_chars: DEFAULT_TITLE_MAX_CHARS,
            default_title: DEFAULT_TITLE.to_string(),
        }
    }

    /// Override how titles are derived from the first user message
    pub fn with_titles(mut self, max_chars: usize, default_title: impl Into<String>) -> Self {
        self.title_max_chars = max_chars;
        self.default_title = default_title.into();
        self
    }

    /// Location of the chat document
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read the chat document, distinguishing why it could not be read.
    ///
    /// Only a document that is not a JSON object is corrupt. Individual
    /// records that do not parse are skipped with a warning so the rest of
    /// the store stays reachable.
    pub fn try_load(&self) -> Result<ChatMap, LoadError> {
        let contents = match std::fs::read_to_string(&self.path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Err(LoadError::Absent {
                    path: self.path.clone(),
                })
            }
            Err(source) => {
                return Err(LoadError::Io {
                    path: self.path.clone(),
                    source,
                })
            }
        };

        let raw: BTreeMap<String, serde_json::Value> =
            serde_json::from_str(&contents).map_err(|source| LoadError::Corrupt {
                path: self.path.clone(),
                source,
            })?;

        let mut chats = ChatMap::new();
        for (id, value) in raw {
            match serde_json::from_value::<ChatRecord>(value) {
                Ok(record) => {
                    chats.insert(id, record);
                }
                Err(e) => {
                    tracing::warn!(chat_id = %id, "Skipping unreadable chat record: {}", e);
                }
            }
        }

        tracing::debug!(path = %self.path.display(), chats = chats.len(), "Loaded chat store");
        Ok(chats)
    }

    /// Read the chat document, treating any failure as an empty store.
    pub fn load(&self) -> ChatMap {
        match self.try_load() {
            Ok(chats) => chats,
            Err(e) if e.is_absent() => ChatMap::new(),
            Err(e) => {
                tracing::warn!("{}; continuing with an empty store", e);
                ChatMap::new()
            }
        }
    }

    /// Replace the chat document with `chats`.
    ///
    /// The JSON is written to a temporary file next to the target and then
    /// renamed over it.
    pub fn try_save(&self, chats: &ChatMap) -> Result<(), SaveError> {
        let json = serde_json::to_string_pretty(chats)?;

        let dir = match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
            _ => PathBuf::from("."),
        };
        let io_error = |source: std::io::Error| SaveError::Io {
            path: self.path.clone(),
            source,
        };

        std::fs::create_dir_all(&dir).map_err(io_error)?;
        let mut tmp = NamedTempFile::new_in(&dir).map_err(io_error)?;
        tmp.write_all(json.as_bytes()).map_err(io_error)?;
        tmp.flush().map_err(io_error)?;
        #[cfg(unix)]
        tmp.as_file()
            .set_permissions(document_permissions(&self.path))
            .map_err(io_error)?;
        tmp.persist(&self.path).map_err(|e| SaveError::Persist {
            path: self.path.clone(),
            source: e.error,
        })?;

        tracing::debug!(path = %self.path.display(), chats = chats.len(), "Saved chat store");
        Ok(())
    }

    /// Replace the chat document, reporting failure as `false`.
    pub fn save(&self, chats: &ChatMap) -> bool {
        match self.try_save(chats) {
            Ok(()) => true,
            Err(e) => {
                tracing::warn!("{}", e);
                false
            }
        }
    }

    /// Start a new in-memory chat. Nothing is written until a message is appended.
    pub fn create_session(&self, session: &mut ActiveSession) -> String {
        let id = session.reset().to_string();
        tracing::info!(chat_id = %id, "Started new chat");
        id
    }

    /// Make a stored chat the active one. Unknown ids leave `session` untouched.
    pub fn switch_session(&self, session: &mut ActiveSession, id: &str) -> bool {
        let mut chats = self.load();
        match chats.remove(id) {
            Some(record) => {
                session.replace(id.to_string(), record.messages);
                tracing::info!(chat_id = %id, "Switched chat");
                true
            }
            None => {
                tracing::debug!(chat_id = %id, "Cannot switch to unknown chat");
                false
            }
        }
    }

    /// Remove a chat from the store.
    ///
    /// When the removed chat was active, a fresh session takes its place.
    /// Returns whether the chat existed.
    ///
    /// # Errors
    ///
    /// Returns the write failure if the shortened document could not be
    /// saved; the active session is then left as it was.
    pub fn delete_session(
        &self,
        session: &mut ActiveSession,
        id: &str,
    ) -> Result<bool, SaveError> {
        let mut chats = self.load();
        if chats.remove(id).is_none() {
            tracing::debug!(chat_id = %id, "Nothing to delete");
            return Ok(false);
        }

        self.try_save(&chats)?;
        tracing::info!(chat_id = %id, "Deleted chat");

        if session.id() == id {
            self.create_session(session);
        }
        Ok(true)
    }

    /// Remove every chat and start a fresh session
    pub fn delete_all(&self, session: &mut ActiveSession) -> bool {
        let saved = self.save(&ChatMap::new());
        tracing::info!("Deleted all chats");
        self.create_session(session);
        saved
    }

    /// Append a freshly stamped message to the active chat and persist it.
    pub fn append_message(
        &self,
        session: &mut ActiveSession,
        role: Role,
        content: impl Into<String>,
    ) -> bool {
        session.push(Message::new(role, content));
        self.persist_active(session)
    }

    /// Write the active chat into the store with a recomputed title and timestamp.
    ///
    /// Empty chats are never written; that case reports `true`.
    pub fn persist_active(&self, session: &ActiveSession) -> bool {
        if session.is_empty() {
            return true;
        }

        let mut chats = self.load();
        let record = ChatRecord {
            title: derive_title(
                session.messages(),
                self.title_max_chars,
                &self.default_title,
            ),
            timestamp: Utc::now(),
            messages: session.messages().to_vec(),
        };
        chats.insert(session.id().to_string(), record);
        self.save(&chats)
    }

    /// Fetch one stored chat
    pub fn get(&self, id: &str) -> Option<ChatRecord> {
        self.load().remove(id)
    }

    /// Resolve a full chat id or a unique id prefix to the stored id.
    ///
    /// Ambiguous or unknown prefixes resolve to `None`.
    pub fn resolve_id(&self, id_or_prefix: &str) -> Option<String> {
        if id_or_prefix.is_empty() {
            return None;
        }
        let chats = self.load();
        if chats.contains_key(id_or_prefix) {
            return Some(id_or_prefix.to_string());
        }

        let mut matches = chats.keys().filter(|id| id.starts_with(id_or_prefix));
        match (matches.next(), matches.next()) {
            (Some(id), None) => Some(id.clone()),
            _ => None,
        }
    }

    /// All stored chats, most recently written first
    pub fn list(&self) -> Vec<ChatSummary> {
        let mut summaries: Vec<ChatSummary> = self
            .load()
            .into_iter()
            .map(|(id, record)| ChatSummary {
                id,
                title: record.title,
                timestamp: record.timestamp,
                message_count: record.messages.len(),
            })
            .collect();
        summaries.sort_by(|a, b| b.timestamp.cmp(&a.timestamp).then_with(|| a.id.cmp(&b.id)));
        summaries
    }
}

/// Mode for a freshly written document: keep the existing file's mode, or
/// use the usual 0644 for a new one. Temporary files start out as 0600.
#[cfg(unix)]
fn document_permissions(target: &Path) -> std::fs::Permissions {
    use std::os::unix::fs::PermissionsExt;

    std::fs::metadata(target)
        .map(|meta| meta.permissions())
        .unwrap_or_else(|_| std::fs::Permissions::from_mode(0o644))
}
