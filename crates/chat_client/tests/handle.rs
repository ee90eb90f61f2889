use std::sync::{mpsc, Arc, Mutex};
use std::time::Duration;

use chat_client::{
    ChatReply, ChatService, ClientError, ClientEvent, ClientHandle, ConversationDetail,
    ConversationSummary, DocumentUpload, EventSink,
};

const WAIT: Duration = Duration::from_secs(5);

struct ChannelEventSink {
    tx: Mutex<mpsc::Sender<ClientEvent>>,
}

impl ChannelEventSink {
    fn new(tx: mpsc::Sender<ClientEvent>) -> Self {
        Self { tx: Mutex::new(tx) }
    }
}

impl EventSink for ChannelEventSink {
    fn emit(&self, event: ClientEvent) {
        let _ = self.tx.lock().unwrap().send(event);
    }
}

#[derive(Default)]
struct FakeService {
    uploads: Mutex<Vec<String>>,
}

#[async_trait::async_trait]
impl ChatService for FakeService {
    async fn send_message(&self, text: &str) -> Result<ChatReply, ClientError> {
        if text == "fail" {
            return Err(ClientError::RequestFailed {
                status: 500,
                body: String::new(),
            });
        }
        Ok(ChatReply {
            answer: Some(format!("echo: {text}")),
            conversation_id: None,
        })
    }

    async fn upload_documents(
        &self,
        files: Vec<DocumentUpload>,
    ) -> Result<serde_json::Value, ClientError> {
        let mut uploads = self.uploads.lock().unwrap();
        uploads.extend(files.into_iter().map(|f| f.file_name));
        Ok(serde_json::json!({ "ok": true }))
    }

    async fn get_conversations(&self) -> Vec<ConversationSummary> {
        vec![ConversationSummary {
            id: "conv-1".to_string(),
            title: None,
        }]
    }

    async fn get_conversation(&self, id: &str) -> Result<ConversationDetail, ClientError> {
        if id == "slow" {
            tokio::time::sleep(Duration::from_secs(30)).await;
        }
        Ok(ConversationDetail {
            id: id.to_string(),
            messages: Some(Vec::new()),
        })
    }
}

fn start() -> (ClientHandle, mpsc::Receiver<ClientEvent>, Arc<FakeService>) {
    let (tx, rx) = mpsc::channel();
    let service = Arc::new(FakeService::default());
    let handle = ClientHandle::new(service.clone(), Arc::new(ChannelEventSink::new(tx)))
        .expect("handle");
    (handle, rx, service)
}

#[test]
fn send_message_reports_reply() {
    let (handle, rx, _) = start();
    handle.send_message("hello");

    let event = rx.recv_timeout(WAIT).expect("event");
    assert_eq!(
        event,
        ClientEvent::ChatReplied(Ok(ChatReply {
            answer: Some("echo: hello".to_string()),
            conversation_id: None,
        }))
    );
}

#[test]
fn send_message_reports_failure() {
    let (handle, rx, _) = start();
    handle.send_message("fail");

    let event = rx.recv_timeout(WAIT).expect("event");
    assert!(matches!(
        event,
        ClientEvent::ChatReplied(Err(ClientError::RequestFailed { status: 500, .. }))
    ));
}

#[test]
fn history_and_conversation_events_carry_ids() {
    let (handle, rx, _) = start();
    handle.load_history();
    let event = rx.recv_timeout(WAIT).expect("history event");
    assert!(matches!(event, ClientEvent::HistoryLoaded(ref list) if list.len() == 1));

    handle.fetch_conversation("conv-1");
    let event = rx.recv_timeout(WAIT).expect("conversation event");
    match event {
        ClientEvent::ConversationLoaded {
            conversation_id,
            result,
        } => {
            assert_eq!(conversation_id, "conv-1");
            assert_eq!(result.expect("detail").id, "conv-1");
        }
        other => panic!("unexpected event {other:?}"),
    }
}

#[test]
fn uploads_reach_the_service() {
    let (handle, rx, service) = start();
    handle.upload_documents(vec![
        DocumentUpload::new("a.txt", b"a".to_vec()),
        DocumentUpload::new("b.txt", b"b".to_vec()),
    ]);

    let event = rx.recv_timeout(WAIT).expect("event");
    assert!(matches!(event, ClientEvent::DocumentsUploaded(Ok(_))));
    assert_eq!(*service.uploads.lock().unwrap(), vec!["a.txt", "b.txt"]);
}

#[test]
fn shutdown_abandons_in_flight_calls() {
    let (handle, rx, _) = start();
    handle.fetch_conversation("slow");
    std::thread::sleep(Duration::from_millis(50));
    handle.shutdown();

    assert!(rx.recv_timeout(Duration::from_millis(300)).is_err());
}
