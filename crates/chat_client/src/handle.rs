use std::sync::{mpsc, Arc};
use std::thread;

use chat_logging::{chat_debug, chat_info};
use tokio_util::sync::CancellationToken;

use crate::{ChatService, ClientEvent, DocumentUpload};

pub trait EventSink: Send + Sync {
    fn emit(&self, event: ClientEvent);
}

enum ClientCommand {
    SendMessage { text: String },
    UploadDocuments { files: Vec<DocumentUpload> },
    LoadHistory,
    FetchConversation { conversation_id: String },
}

/// Runs service calls on a background runtime and reports each settled call
/// to the sink. Calls are independent; results arrive in completion order.
pub struct ClientHandle {
    cmd_tx: mpsc::Sender<ClientCommand>,
    shutdown: CancellationToken,
}

impl ClientHandle {
    pub fn new(service: Arc<dyn ChatService>, sink: Arc<dyn EventSink>) -> std::io::Result<Self> {
        let (cmd_tx, cmd_rx) = mpsc::channel();
        let runtime = tokio::runtime::Runtime::new()?;
        let shutdown = CancellationToken::new();
        let token = shutdown.clone();

        thread::spawn(move || {
            while let Ok(command) = cmd_rx.recv() {
                let service = service.clone();
                let sink = sink.clone();
                let token = token.clone();
                runtime.spawn(async move {
                    tokio::select! {
                        biased;
                        _ = token.cancelled() => {
                            chat_debug!("client call abandoned on shutdown");
                        }
                        event = handle_command(service.as_ref(), command) => {
                            sink.emit(event);
                        }
                    }
                });
            }
            chat_info!("client handle stopped");
        });

        Ok(Self { cmd_tx, shutdown })
    }

    pub fn send_message(&self, text: impl Into<String>) {
        self.submit(ClientCommand::SendMessage { text: text.into() });
    }

    pub fn upload_documents(&self, files: Vec<DocumentUpload>) {
        self.submit(ClientCommand::UploadDocuments { files });
    }

    pub fn load_history(&self) {
        self.submit(ClientCommand::LoadHistory);
    }

    pub fn fetch_conversation(&self, conversation_id: impl Into<String>) {
        self.submit(ClientCommand::FetchConversation {
            conversation_id: conversation_id.into(),
        });
    }

    /// Abandons in-flight calls; no events are emitted for them.
    pub fn shutdown(&self) {
        self.shutdown.cancel();
    }

    fn submit(&self, command: ClientCommand) {
        let _ = self.cmd_tx.send(command);
    }
}

impl Drop for ClientHandle {
    fn drop(&mut self) {
        self.shutdown.cancel();
    }
}

async fn handle_command(service: &dyn ChatService, command: ClientCommand) -> ClientEvent {
    match command {
        ClientCommand::SendMessage { text } => {
            ClientEvent::ChatReplied(service.send_message(&text).await)
        }
        ClientCommand::UploadDocuments { files } => {
            ClientEvent::DocumentsUploaded(service.upload_documents(files).await)
        }
        ClientCommand::LoadHistory => ClientEvent::HistoryLoaded(service.get_conversations().await),
        ClientCommand::FetchConversation { conversation_id } => {
            let result = service.get_conversation(&conversation_id).await;
            ClientEvent::ConversationLoaded {
                conversation_id,
                result,
            }
        }
    }
}
