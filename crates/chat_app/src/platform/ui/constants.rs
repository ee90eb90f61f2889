pub const APP_TITLE: &str = "Document Chat";

pub const CMD_UPLOAD: &str = "/upload";
pub const CMD_HISTORY: &str = "/history";
pub const CMD_OPEN: &str = "/open";
pub const CMD_HELP: &str = "/help";
pub const CMD_QUIT: &str = "/quit";

pub const LABEL_READY: &str = "Ready";
pub const LABEL_SENDING: &str = "Sending…";
pub const LABEL_THINKING: &str = "Thinking…";
pub const LABEL_NO_HISTORY: &str = "No conversations yet";
pub const LABEL_NO_UPLOADS: &str = "No documents yet; PDF, TXT, MD";
