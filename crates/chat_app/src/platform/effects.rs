use std::fs;
use std::sync::{mpsc, Arc};

use anyhow::Context;
use chat_client::{
    ChatService, ClientEvent, ClientHandle, ClientSettings, DocumentUpload, EventSink,
    HttpChatService,
};
use chat_core::{Effect, HistoryEntry, Msg, Role, SelectedFile, Turn};
use chat_logging::{chat_debug, chat_info, chat_warn};

use super::app::Inbound;

pub struct EffectRunner {
    client: ClientHandle,
}

impl EffectRunner {
    pub fn new(settings: &ClientSettings, inbox: mpsc::Sender<Inbound>) -> anyhow::Result<Self> {
        let service = HttpChatService::new(settings)
            .with_context(|| format!("invalid backend url {:?}", settings.base_url))?;
        chat_info!("Backend base_url={}", service.base_url());
        let service: Arc<dyn ChatService> = Arc::new(service);
        let sink = Arc::new(InboxSink { tx: inbox });
        let client =
            ClientHandle::new(service, sink).context("failed to start the network runtime")?;
        Ok(Self { client })
    }

    pub fn run(&self, effects: Vec<Effect>) {
        for effect in effects {
            match effect {
                Effect::SendMessage { text } => {
                    chat_info!("SendMessage text_len={}", text.len());
                    self.client.send_message(text);
                }
                Effect::UploadDocuments { files } => {
                    let documents = read_documents(&files);
                    if documents.is_empty() {
                        chat_warn!("UploadDocuments skipped: no readable files");
                        continue;
                    }
                    chat_info!("UploadDocuments count={}", documents.len());
                    self.client.upload_documents(documents);
                }
                Effect::LoadHistory => {
                    chat_debug!("LoadHistory");
                    self.client.load_history();
                }
                Effect::FetchConversation { conversation_id } => {
                    chat_info!("FetchConversation id={}", conversation_id);
                    self.client.fetch_conversation(conversation_id);
                }
            }
        }
    }

    pub fn shutdown(&self) {
        self.client.shutdown();
    }
}

struct InboxSink {
    tx: mpsc::Sender<Inbound>,
}

impl EventSink for InboxSink {
    fn emit(&self, event: ClientEvent) {
        if let Some(msg) = map_event(event) {
            let _ = self.tx.send(Inbound::Msg(msg));
        }
    }
}

/// Translates a settled client call into a core message.
///
/// Upload results and failed conversation fetches produce nothing: the
/// session state does not change for them.
pub(crate) fn map_event(event: ClientEvent) -> Option<Msg> {
    match event {
        ClientEvent::ChatReplied(Ok(reply)) => Some(Msg::ReplyReceived {
            answer: reply.answer,
            conversation_id: reply.conversation_id,
        }),
        ClientEvent::ChatReplied(Err(_)) => Some(Msg::ReplyFailed),
        ClientEvent::DocumentsUploaded(result) => {
            if let Err(err) = result {
                chat_warn!("Upload failed: {}", err);
            }
            None
        }
        ClientEvent::HistoryLoaded(list) => Some(Msg::HistoryLoaded(
            list.into_iter()
                .map(|summary| HistoryEntry {
                    id: summary.id,
                    title: summary.title,
                })
                .collect(),
        )),
        ClientEvent::ConversationLoaded {
            conversation_id,
            result,
        } => match result {
            Ok(detail) => {
                let messages = detail.messages?;
                Some(Msg::ConversationLoaded {
                    conversation_id,
                    turns: messages
                        .into_iter()
                        .map(|turn| Turn::new(map_role(turn.role), turn.content))
                        .collect(),
                })
            }
            Err(err) => {
                chat_warn!("Conversation {} not loaded: {}", conversation_id, err);
                None
            }
        },
    }
}

fn map_role(role: chat_client::Role) -> Role {
    match role {
        chat_client::Role::User => Role::User,
        chat_client::Role::Assistant => Role::Assistant,
        chat_client::Role::System => Role::System,
    }
}

fn read_documents(files: &[SelectedFile]) -> Vec<DocumentUpload> {
    files
        .iter()
        .filter_map(|file| match fs::read(&file.path) {
            Ok(bytes) => Some(DocumentUpload::new(file.name.clone(), bytes)),
            Err(err) => {
                chat_warn!("Could not read {:?}: {}", file.path, err);
                None
            }
        })
        .collect()
}
