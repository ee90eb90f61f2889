use crate::{HistoryEntry, Role, SessionState, UploadRecord};

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AppViewModel {
    pub session: SessionState,
    pub input: String,
    pub can_send: bool,
    /// True while a chat reply is pending.
    pub thinking: bool,
    pub messages: Vec<MessageView>,
    pub uploads: Vec<UploadRowView>,
    pub history: Vec<HistoryRowView>,
    pub active_conversation: Option<String>,
    pub dirty: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MessageView {
    pub id: String,
    pub role: Role,
    pub content: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadRowView {
    pub name: String,
    pub size_label: Option<String>,
}

impl UploadRowView {
    pub(crate) fn from_record(record: &UploadRecord) -> Self {
        Self {
            name: record.name.clone(),
            size_label: record.size.map(|bytes| format!("{} KB", bytes.div_ceil(1024))),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HistoryRowView {
    pub id: String,
    pub label: String,
}

impl HistoryRowView {
    pub(crate) fn from_entry(entry: &HistoryEntry) -> Self {
        let label = match entry.title.as_deref() {
            Some(title) if !title.is_empty() => title.to_string(),
            _ => format!(
                "Conversation {}",
                entry.id.chars().take(6).collect::<String>()
            ),
        };
        Self {
            id: entry.id.clone(),
            label,
        }
    }
}
