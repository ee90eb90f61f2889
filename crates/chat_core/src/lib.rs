//! Chat core: pure session state machine and view-model helpers.
mod effect;
mod msg;
mod state;
mod update;
mod view_model;

pub use effect::Effect;
pub use msg::Msg;
pub use state::{
    AppState, ChatMessage, HistoryEntry, MessageId, Role, SelectedFile, SessionState, Turn,
    UploadRecord, NO_ANSWER_FALLBACK, SERVER_ERROR_FALLBACK, WELCOME_MESSAGE,
};
pub use update::update;
pub use view_model::{AppViewModel, HistoryRowView, MessageView, UploadRowView};
