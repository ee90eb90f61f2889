use std::fmt;
use std::path::PathBuf;

use chat_logging::chat_debug;

use crate::view_model::{AppViewModel, HistoryRowView, MessageView, UploadRowView};

/// Assistant text used when a reply carries no `answer`.
pub const NO_ANSWER_FALLBACK: &str = "I could not generate a response.";
/// Assistant text used when the chat request fails for any reason.
pub const SERVER_ERROR_FALLBACK: &str = "There was a problem contacting the server.";
/// Greeting shown at the top of a fresh session.
pub const WELCOME_MESSAGE: &str =
    "Welcome! Upload documents and ask anything. I leverage RAG and multi-agent reasoning to help you.";

const WELCOME_ID: &str = "sys-1";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SessionState {
    #[default]
    Idle,
    Sending,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    User,
    Assistant,
    System,
}

/// Session-unique message identifier.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct MessageId(String);

impl MessageId {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for MessageId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatMessage {
    pub id: MessageId,
    pub role: Role,
    pub content: String,
}

/// One role/content pair from a stored conversation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Turn {
    pub role: Role,
    pub content: String,
}

impl Turn {
    pub fn new(role: Role, content: impl Into<String>) -> Self {
        Self {
            role,
            content: content.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadRecord {
    pub name: String,
    pub size: Option<u64>,
}

/// A file the user picked for upload. The path is only read by the effect runner.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectedFile {
    pub name: String,
    pub size: Option<u64>,
    pub path: PathBuf,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HistoryEntry {
    pub id: String,
    pub title: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppState {
    session: SessionState,
    input: String,
    messages: Vec<ChatMessage>,
    uploads: Vec<UploadRecord>,
    history: Vec<HistoryEntry>,
    active_conversation: Option<String>,
    next_seq: u64,
    dirty: bool,
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}

impl AppState {
    /// Fresh session seeded with the welcome message.
    pub fn new() -> Self {
        Self::with_messages(vec![ChatMessage {
            id: MessageId::new(WELCOME_ID),
            role: Role::Assistant,
            content: WELCOME_MESSAGE.to_string(),
        }])
    }

    /// Session starting from an explicit message list.
    pub fn with_messages(messages: Vec<ChatMessage>) -> Self {
        Self {
            session: SessionState::Idle,
            input: String::new(),
            messages,
            uploads: Vec::new(),
            history: Vec::new(),
            active_conversation: None,
            next_seq: 1,
            dirty: false,
        }
    }

    pub fn session(&self) -> SessionState {
        self.session
    }

    pub fn input(&self) -> &str {
        &self.input
    }

    pub fn messages(&self) -> &[ChatMessage] {
        &self.messages
    }

    pub fn view(&self) -> AppViewModel {
        AppViewModel {
            session: self.session,
            input: self.input.clone(),
            can_send: self.session == SessionState::Idle,
            thinking: self.session == SessionState::Sending,
            messages: self
                .messages
                .iter()
                .map(|message| MessageView {
                    id: message.id.to_string(),
                    role: message.role,
                    content: message.content.clone(),
                })
                .collect(),
            uploads: self.uploads.iter().map(UploadRowView::from_record).collect(),
            history: self
                .history
                .iter()
                .map(HistoryRowView::from_entry)
                .collect(),
            active_conversation: self.active_conversation.clone(),
            dirty: self.dirty,
        }
    }

    /// Returns whether the state changed since the last call, clearing the flag.
    pub fn consume_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }

    pub(crate) fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    pub(crate) fn set_input(&mut self, text: String) {
        if self.input != text {
            self.input = text;
            self.mark_dirty();
        }
    }

    /// Moves the trimmed input into a new user message and enters `Sending`.
    ///
    /// Returns the submitted text, or `None` when the input is blank or a
    /// send is already in flight.
    pub(crate) fn begin_send(&mut self) -> Option<String> {
        if self.session == SessionState::Sending {
            chat_debug!("submit rejected: a message is already being sent");
            return None;
        }
        let text = self.input.trim().to_string();
        if text.is_empty() {
            return None;
        }
        self.input.clear();
        self.push_local(Role::User, "u", text.clone());
        self.session = SessionState::Sending;
        Some(text)
    }

    /// Settles the in-flight send. Returns `false` when nothing was in flight.
    pub(crate) fn finish_send(&mut self, outcome: Result<Option<String>, ()>) -> bool {
        if self.session != SessionState::Sending {
            chat_debug!("reply ignored: no message in flight");
            return false;
        }
        self.session = SessionState::Idle;
        match outcome {
            Ok(answer) => {
                let content = answer.unwrap_or_else(|| NO_ANSWER_FALLBACK.to_string());
                self.push_local(Role::Assistant, "a", content);
            }
            Err(()) => {
                self.push_local(Role::Assistant, "e", SERVER_ERROR_FALLBACK.to_string());
            }
        }
        true
    }

    pub(crate) fn set_active_conversation(&mut self, conversation_id: String) {
        self.active_conversation = Some(conversation_id);
        self.mark_dirty();
    }

    pub(crate) fn add_uploads(&mut self, files: &[SelectedFile]) {
        self.uploads.extend(files.iter().map(|file| UploadRecord {
            name: file.name.clone(),
            size: file.size,
        }));
        self.mark_dirty();
    }

    pub(crate) fn set_history(&mut self, entries: Vec<HistoryEntry>) {
        self.history = entries;
        self.mark_dirty();
    }

    /// Replaces the whole message list with a loaded conversation.
    pub(crate) fn replace_with_conversation(&mut self, conversation_id: &str, turns: Vec<Turn>) {
        self.messages = turns
            .into_iter()
            .enumerate()
            .map(|(index, turn)| ChatMessage {
                id: MessageId::new(format!("{conversation_id}-{index}")),
                role: turn.role,
                content: turn.content,
            })
            .collect();
        self.active_conversation = Some(conversation_id.to_string());
        self.mark_dirty();
    }

    /// Appends a locally created message. Ids loaded from history share the
    /// namespace, so taken candidates are skipped.
    fn push_local(&mut self, role: Role, prefix: &str, content: String) {
        let id = loop {
            let candidate = MessageId::new(format!("{prefix}-{}", self.next_seq));
            self.next_seq += 1;
            if !self.messages.iter().any(|message| message.id == candidate) {
                break candidate;
            }
        };
        self.messages.push(ChatMessage { id, role, content });
        self.mark_dirty();
    }
}
