use std::time::Duration;

use chat_logging::{chat_debug, chat_error, chat_warn};
use url::Url;

use crate::{
    ChatReply, ClientError, ClientSettings, ConversationDetail, ConversationSummary,
    DocumentUpload, HttpClient, HttpRequest, RequestBody,
};

const UPLOAD_FIELD: &str = "files";

#[async_trait::async_trait]
pub trait ChatService: Send + Sync {
    async fn send_message(&self, text: &str) -> Result<ChatReply, ClientError>;

    async fn upload_documents(
        &self,
        files: Vec<DocumentUpload>,
    ) -> Result<serde_json::Value, ClientError>;

    /// Best-effort: every failure yields an empty list.
    async fn get_conversations(&self) -> Vec<ConversationSummary>;

    async fn get_conversation(&self, id: &str) -> Result<ConversationDetail, ClientError>;
}

#[derive(Debug, Clone)]
pub struct HttpChatService {
    http: HttpClient,
    base_url: Url,
    timeout: Duration,
}

impl HttpChatService {
    pub fn new(settings: &ClientSettings) -> Result<Self, ClientError> {
        let base_url = Url::parse(&settings.base_url)
            .map_err(|err| ClientError::InvalidUrl(format!("{}: {err}", settings.base_url)))?;
        if base_url.cannot_be_a_base() {
            return Err(ClientError::InvalidUrl(settings.base_url.clone()));
        }
        Ok(Self {
            http: HttpClient::new(settings)?,
            base_url,
            timeout: settings.request_timeout,
        })
    }

    pub fn base_url(&self) -> &str {
        self.base_url.as_str()
    }

    /// Appends path segments to the base URL, percent-encoding each one.
    fn endpoint(&self, segments: &[&str]) -> Url {
        let mut url = self.base_url.clone();
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url
    }

    async fn send_message_inner(&self, text: &str) -> Result<ChatReply, ClientError> {
        let payload = serde_json::json!({ "message": text }).to_string().into_bytes();
        let request = HttpRequest::post(self.endpoint(&["chat"]), RequestBody::Json(payload));
        let response = self.http.call(request, self.timeout).await?;
        response.error_for_status()?.json()
    }

    async fn upload_documents_inner(
        &self,
        files: Vec<DocumentUpload>,
    ) -> Result<serde_json::Value, ClientError> {
        let body = RequestBody::Multipart {
            field: UPLOAD_FIELD,
            documents: files,
        };
        let request = HttpRequest::post(self.endpoint(&["documents", "upload"]), body);
        let response = self.http.call(request, self.timeout).await?;
        response.error_for_status()?.json()
    }

    async fn get_conversations_inner(&self) -> Result<Vec<ConversationSummary>, ClientError> {
        let request = HttpRequest::get(self.endpoint(&["conversations"]));
        let response = self.http.call(request, self.timeout).await?;
        response.error_for_status()?.json()
    }

    async fn get_conversation_inner(&self, id: &str) -> Result<ConversationDetail, ClientError> {
        let request = HttpRequest::get(self.endpoint(&["conversations", id]));
        let response = self.http.call(request, self.timeout).await?;
        response.error_for_status()?.json()
    }
}

#[async_trait::async_trait]
impl ChatService for HttpChatService {
    async fn send_message(&self, text: &str) -> Result<ChatReply, ClientError> {
        self.send_message_inner(text).await.inspect_err(|err| {
            chat_error!("send_message failed base_url={} error={}", self.base_url, err);
        })
    }

    async fn upload_documents(
        &self,
        files: Vec<DocumentUpload>,
    ) -> Result<serde_json::Value, ClientError> {
        let count = files.len();
        self.upload_documents_inner(files)
            .await
            .inspect(|_| chat_debug!("uploaded {} document(s)", count))
            .inspect_err(|err| {
                chat_error!(
                    "upload_documents failed base_url={} files={} error={}",
                    self.base_url,
                    count,
                    err
                );
            })
    }

    async fn get_conversations(&self) -> Vec<ConversationSummary> {
        match self.get_conversations_inner().await {
            Ok(list) => list,
            Err(err) => {
                chat_warn!(
                    "get_conversations failed base_url={} error={}",
                    self.base_url,
                    err
                );
                Vec::new()
            }
        }
    }

    async fn get_conversation(&self, id: &str) -> Result<ConversationDetail, ClientError> {
        self.get_conversation_inner(id).await.inspect_err(|err| {
            chat_error!(
                "get_conversation failed base_url={} id={} error={}",
                self.base_url,
                id,
                err
            );
        })
    }
}
