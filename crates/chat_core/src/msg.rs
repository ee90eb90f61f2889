#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Msg {
    /// UI finished its initial setup.
    Started,
    /// User edited the message input box.
    InputChanged(String),
    /// User submitted the current message input.
    SendClicked,
    /// Backend answered a chat message.
    ReplyReceived {
        answer: Option<String>,
        conversation_id: Option<String>,
    },
    /// Chat request failed (timeout, transport or status).
    ReplyFailed,
    /// User picked documents to upload.
    FilesSelected(Vec<crate::SelectedFile>),
    /// User asked for the conversation list again.
    RefreshHistoryClicked,
    /// Conversation list arrived (possibly empty).
    HistoryLoaded(Vec<crate::HistoryEntry>),
    /// User selected a conversation from the history list.
    HistorySelected { conversation_id: String },
    /// A previously selected conversation arrived.
    ConversationLoaded {
        conversation_id: String,
        turns: Vec<crate::Turn>,
    },
}
