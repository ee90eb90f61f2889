use chat_core::{AppViewModel, MessageView, Role, SessionState};

use super::constants::*;

/// Renders the whole snapshot as terminal lines.
pub fn render(view: &AppViewModel) -> Vec<String> {
    let mut lines = Vec::new();

    lines.push(match &view.active_conversation {
        Some(id) => format!("== {APP_TITLE} | conversation {id} =="),
        None => format!("== {APP_TITLE} =="),
    });

    lines.push("Documents:".to_string());
    if view.uploads.is_empty() {
        lines.push(format!("  ({LABEL_NO_UPLOADS})"));
    }
    for upload in &view.uploads {
        match &upload.size_label {
            Some(size) => lines.push(format!("  - {} ({size})", upload.name)),
            None => lines.push(format!("  - {}", upload.name)),
        }
    }

    lines.push("History:".to_string());
    if view.history.is_empty() {
        lines.push(format!("  ({LABEL_NO_HISTORY})"));
    }
    for (index, row) in view.history.iter().enumerate() {
        lines.push(format!("  {}. {}", index + 1, row.label));
    }

    lines.push("Chat:".to_string());
    lines.extend(view.messages.iter().map(format_message));
    if view.thinking {
        lines.push(format!("  {} > {LABEL_THINKING}", role_label(Role::Assistant)));
    }

    let status = match view.session {
        SessionState::Idle => LABEL_READY,
        SessionState::Sending => LABEL_SENDING,
    };
    lines.push(format!("[{status}]"));
    lines
}

fn format_message(message: &MessageView) -> String {
    format!("  {} > {}", role_label(message.role), message.content)
}

fn role_label(role: Role) -> &'static str {
    match role {
        Role::User => "you",
        Role::Assistant => "assistant",
        Role::System => "system",
    }
}
