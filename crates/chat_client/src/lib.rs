//! Chat client: HTTP access to the chat backend and background execution.
mod error;
mod handle;
mod http;
mod service;
mod settings;
mod types;

pub use error::ClientError;
pub use handle::{ClientHandle, EventSink};
pub use http::{HttpClient, HttpRequest, HttpResponse, RequestBody};
pub use service::{ChatService, HttpChatService};
pub use settings::{resolve_base_url, ClientSettings, BACKEND_URL_ENV, DEFAULT_ORIGIN};
pub use types::{
    ChatReply, ClientEvent, ConversationDetail, ConversationSummary, ConversationTurn,
    DocumentUpload, Role,
};
