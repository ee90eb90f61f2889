use crate::SelectedFile;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    SendMessage { text: String },
    UploadDocuments { files: Vec<SelectedFile> },
    LoadHistory,
    FetchConversation { conversation_id: String },
}
