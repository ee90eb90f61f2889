use serde::{Deserialize, Serialize};

use crate::ClientError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Assistant,
    System,
}

/// Body of a successful `/chat` call.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ChatReply {
    #[serde(default)]
    pub answer: Option<String>,
    #[serde(default, rename = "conversationId")]
    pub conversation_id: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConversationSummary {
    pub id: String,
    #[serde(default)]
    pub title: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConversationTurn {
    pub role: Role,
    pub content: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConversationDetail {
    #[serde(default)]
    pub id: String,
    /// `None` when the backend omitted the field entirely.
    #[serde(default)]
    pub messages: Option<Vec<ConversationTurn>>,
}

/// One file ready to be sent in a multipart upload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentUpload {
    pub file_name: String,
    pub bytes: Vec<u8>,
}

impl DocumentUpload {
    pub fn new(file_name: impl Into<String>, bytes: impl Into<Vec<u8>>) -> Self {
        Self {
            file_name: file_name.into(),
            bytes: bytes.into(),
        }
    }
}

/// Settled outcome of a background call.
#[derive(Debug, Clone, PartialEq)]
pub enum ClientEvent {
    ChatReplied(Result<ChatReply, ClientError>),
    DocumentsUploaded(Result<serde_json::Value, ClientError>),
    HistoryLoaded(Vec<ConversationSummary>),
    ConversationLoaded {
        conversation_id: String,
        result: Result<ConversationDetail, ClientError>,
    },
}
