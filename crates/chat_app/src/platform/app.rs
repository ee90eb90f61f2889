use std::env;
use std::fs;
use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::sync::mpsc;
use std::thread;

use anyhow::Context;
use chat_client::BACKEND_URL_ENV;
use chat_core::{update, AppState, AppViewModel, Msg, SelectedFile};
use chat_logging::{chat_info, chat_warn};

use super::config::{self, AppConfig, CONFIG_FILENAME};
use super::effects::EffectRunner;
use super::logging;
use super::ui::input::{parse_command, Command};
use super::ui::{layout, render};

/// Everything the controller loop reacts to, in arrival order.
pub enum Inbound {
    Command(Command),
    Msg(Msg),
    InputClosed,
}

pub fn run_app() -> anyhow::Result<()> {
    let cwd = env::current_dir().context("cannot determine working directory")?;
    let loaded = config::load_config(&cwd);
    let config = match &loaded {
        Ok(Some(config)) => config.clone(),
        _ => AppConfig::default(),
    };
    logging::initialize(
        config.log_destination,
        chat_logging::parse_level(&config.log_level),
    );
    match loaded {
        Ok(Some(_)) => chat_info!("Loaded {}", CONFIG_FILENAME),
        Ok(None) => chat_info!("No {} found, using defaults", CONFIG_FILENAME),
        Err(err) => chat_warn!("Ignoring {}: {}", CONFIG_FILENAME, err),
    }

    let env_override = env::var(BACKEND_URL_ENV).ok();
    let settings = config.client_settings(env_override.as_deref());
    chat_info!("Request timeout_ms={}", settings.request_timeout.as_millis());

    let (inbox_tx, inbox_rx) = mpsc::channel::<Inbound>();
    let effects = EffectRunner::new(&settings, inbox_tx.clone())?;
    spawn_input_reader(inbox_tx.clone());

    let mut controller = Controller::new(effects);
    controller.print(&layout::banner())?;
    controller.dispatch(Msg::Started)?;

    while let Ok(inbound) = inbox_rx.recv() {
        let keep_going = match inbound {
            Inbound::Msg(msg) => {
                controller.dispatch(msg)?;
                true
            }
            Inbound::Command(command) => controller.handle_command(command)?,
            Inbound::InputClosed => false,
        };
        if !keep_going {
            break;
        }
    }

    controller.shutdown();
    chat_info!("Session ended");
    Ok(())
}

/// Reads stdin on its own thread so network results keep flowing while the
/// user types.
fn spawn_input_reader(tx: mpsc::Sender<Inbound>) {
    thread::spawn(move || {
        for line in io::stdin().lock().lines() {
            match line {
                Ok(line) => {
                    if tx.send(Inbound::Command(parse_command(&line))).is_err() {
                        return;
                    }
                }
                Err(err) => {
                    chat_warn!("stdin read failed: {}", err);
                    break;
                }
            }
        }
        let _ = tx.send(Inbound::InputClosed);
    });
}

/// Owns the session state; the only place `update` is applied.
struct Controller {
    state: AppState,
    effects: EffectRunner,
}

impl Controller {
    fn new(effects: EffectRunner) -> Self {
        Self {
            state: AppState::new(),
            effects,
        }
    }

    fn dispatch(&mut self, msg: Msg) -> io::Result<()> {
        let state = std::mem::take(&mut self.state);
        let (mut state, effects) = update(state, msg);
        let was_dirty = state.consume_dirty();
        let view = state.view();
        self.state = state;
        self.effects.run(effects);
        if was_dirty {
            self.print(&render::render(&view))?;
        }
        Ok(())
    }

    /// Returns `false` when the user asked to quit.
    fn handle_command(&mut self, command: Command) -> io::Result<bool> {
        let plan = plan_command(command, &self.state.view());
        self.print(&plan.notices)?;
        for msg in plan.msgs {
            self.dispatch(msg)?;
        }
        Ok(!plan.quit)
    }

    fn print(&self, lines: &[String]) -> io::Result<()> {
        let mut out = io::stdout().lock();
        for line in lines {
            writeln!(out, "{line}")?;
        }
        out.flush()
    }

    fn shutdown(&self) {
        self.effects.shutdown();
    }
}

#[derive(Debug, Default, PartialEq, Eq)]
struct CommandPlan {
    msgs: Vec<Msg>,
    notices: Vec<String>,
    quit: bool,
}

fn plan_command(command: Command, view: &AppViewModel) -> CommandPlan {
    let mut plan = CommandPlan::default();
    match command {
        Command::Send(text) => {
            plan.msgs = vec![Msg::InputChanged(text), Msg::SendClicked];
        }
        Command::Upload(paths) => {
            if paths.is_empty() {
                plan.notices.push("Usage: /upload <path>...".to_string());
            }
            let mut files = Vec::new();
            for path in paths {
                match select_file(path) {
                    Ok(file) => files.push(file),
                    Err(notice) => plan.notices.push(notice),
                }
            }
            if !files.is_empty() {
                plan.msgs.push(Msg::FilesSelected(files));
            }
        }
        Command::RefreshHistory => plan.msgs.push(Msg::RefreshHistoryClicked),
        Command::Open(selector) => {
            let conversation_id = selector
                .parse::<usize>()
                .ok()
                .and_then(|n| n.checked_sub(1))
                .and_then(|index| view.history.get(index))
                .map(|row| row.id.clone())
                .unwrap_or(selector);
            plan.msgs.push(Msg::HistorySelected { conversation_id });
        }
        Command::Help => plan.notices = layout::help_lines(),
        Command::Quit => plan.quit = true,
        Command::Unknown(text) => plan.notices.push(format!("Unknown command: {text}")),
        Command::Empty => {}
    }
    plan
}

fn select_file(path: PathBuf) -> Result<SelectedFile, String> {
    let metadata = fs::metadata(&path).map_err(|err| format!("Skipping {}: {err}", path.display()))?;
    if !metadata.is_file() {
        return Err(format!("Skipping {}: not a file", path.display()));
    }
    let name = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string());
    Ok(SelectedFile {
        name,
        size: Some(metadata.len()),
        path,
    })
}
