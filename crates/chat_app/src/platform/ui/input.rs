use std::path::PathBuf;

use super::constants::*;

/// One line of user input, classified.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Send(String),
    Upload(Vec<PathBuf>),
    RefreshHistory,
    Open(String),
    Help,
    Quit,
    Unknown(String),
    Empty,
}

pub fn parse_command(line: &str) -> Command {
    let trimmed = line.trim();
    if trimmed.is_empty() {
        return Command::Empty;
    }
    if !trimmed.starts_with('/') {
        return Command::Send(trimmed.to_string());
    }

    let mut parts = trimmed.split_whitespace();
    let name = parts.next().unwrap_or_default();
    match name {
        CMD_UPLOAD => Command::Upload(parts.map(PathBuf::from).collect()),
        CMD_HISTORY => Command::RefreshHistory,
        CMD_OPEN => match parts.next() {
            Some(selector) => Command::Open(selector.to_string()),
            None => Command::Unknown(trimmed.to_string()),
        },
        CMD_HELP => Command::Help,
        CMD_QUIT => Command::Quit,
        _ => Command::Unknown(trimmed.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_text_is_sent_trimmed() {
        assert_eq!(
            parse_command("  Hello world \n"),
            Command::Send("Hello world".to_string())
        );
        assert_eq!(parse_command("   "), Command::Empty);
    }

    #[test]
    fn upload_collects_paths() {
        assert_eq!(
            parse_command("/upload docA.txt  notes/docB.md"),
            Command::Upload(vec![PathBuf::from("docA.txt"), PathBuf::from("notes/docB.md")])
        );
        assert_eq!(parse_command("/upload"), Command::Upload(Vec::new()));
    }

    #[test]
    fn open_requires_selector() {
        assert_eq!(parse_command("/open 2"), Command::Open("2".to_string()));
        assert_eq!(parse_command("/open"), Command::Unknown("/open".to_string()));
    }

    #[test]
    fn other_commands() {
        assert_eq!(parse_command("/history"), Command::RefreshHistory);
        assert_eq!(parse_command("/help"), Command::Help);
        assert_eq!(parse_command("/quit"), Command::Quit);
        assert_eq!(
            parse_command("/theme dark"),
            Command::Unknown("/theme dark".to_string())
        );
    }
}
