use chat_logging::chat_debug;

use crate::{AppState, Effect, Msg};

/// Pure update function: applies a message to state and returns any effects.
pub fn update(mut state: AppState, msg: Msg) -> (AppState, Vec<Effect>) {
    let effects = match msg {
        Msg::Started | Msg::RefreshHistoryClicked => vec![Effect::LoadHistory],
        Msg::InputChanged(text) => {
            state.set_input(text);
            Vec::new()
        }
        Msg::SendClicked => match state.begin_send() {
            Some(text) => vec![Effect::SendMessage { text }],
            None => Vec::new(),
        },
        Msg::ReplyReceived {
            answer,
            conversation_id,
        } => {
            if state.finish_send(Ok(answer)) {
                if let Some(conversation_id) = conversation_id {
                    state.set_active_conversation(conversation_id);
                }
            }
            Vec::new()
        }
        Msg::ReplyFailed => {
            state.finish_send(Err(()));
            Vec::new()
        }
        Msg::FilesSelected(files) => {
            if files.is_empty() {
                return (state, Vec::new());
            }
            // Optimistic: records stay whatever the upload outcome.
            state.add_uploads(&files);
            vec![Effect::UploadDocuments { files }]
        }
        Msg::HistoryLoaded(entries) => {
            chat_debug!("history loaded with {} entries", entries.len());
            state.set_history(entries);
            Vec::new()
        }
        Msg::HistorySelected { conversation_id } => {
            vec![Effect::FetchConversation { conversation_id }]
        }
        Msg::ConversationLoaded {
            conversation_id,
            turns,
        } => {
            state.replace_with_conversation(&conversation_id, turns);
            Vec::new()
        }
    };

    (state, effects)
}
