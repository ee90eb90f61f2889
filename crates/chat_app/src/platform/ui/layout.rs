use super::constants::*;

pub fn banner() -> Vec<String> {
    vec![
        format!("== {APP_TITLE} =="),
        format!("Type a message and press Enter. {CMD_HELP} lists commands."),
    ]
}

pub fn help_lines() -> Vec<String> {
    vec![
        "Commands:".to_string(),
        format!("  {CMD_UPLOAD} <path>...   upload documents"),
        format!("  {CMD_HISTORY}             reload conversation history"),
        format!("  {CMD_OPEN} <n|id>         open a conversation from history"),
        format!("  {CMD_HELP}                show this help"),
        format!("  {CMD_QUIT}                exit"),
    ]
}
