use std::path::PathBuf;
use std::sync::Once;

use chat_core::{update, AppState, Effect, Msg, SelectedFile, SessionState};

fn init_logging() {
    static INIT: Once = Once::new();
    INIT.call_once(chat_logging::initialize_for_tests);
}

fn file(name: &str, size: Option<u64>) -> SelectedFile {
    SelectedFile {
        name: name.to_string(),
        size,
        path: PathBuf::from("/tmp").join(name),
    }
}

#[test]
fn selecting_two_files_adds_two_records_before_upload_resolves() {
    init_logging();
    let files = vec![file("docA.txt", Some(5)), file("docB.md", Some(4096))];
    let (mut state, effects) = update(AppState::new(), Msg::FilesSelected(files.clone()));
    let view = state.view();

    let names: Vec<&str> = view.uploads.iter().map(|u| u.name.as_str()).collect();
    assert_eq!(names, vec!["docA.txt", "docB.md"]);
    assert_eq!(view.uploads[0].size_label.as_deref(), Some("1 KB"));
    assert_eq!(view.uploads[1].size_label.as_deref(), Some("4 KB"));
    assert_eq!(effects, vec![Effect::UploadDocuments { files }]);
    assert!(state.consume_dirty());
}

#[test]
fn empty_selection_is_ignored() {
    init_logging();
    let state = AppState::new();
    let (next, effects) = update(state.clone(), Msg::FilesSelected(Vec::new()));

    assert_eq!(next, state);
    assert!(effects.is_empty());
}

#[test]
fn uploads_accumulate_and_allow_unknown_size() {
    init_logging();
    let (state, _) = update(
        AppState::new(),
        Msg::FilesSelected(vec![file("a.pdf", None)]),
    );
    let (state, _) = update(state, Msg::FilesSelected(vec![file("b.pdf", Some(0))]));
    let view = state.view();

    assert_eq!(view.uploads.len(), 2);
    assert_eq!(view.uploads[0].size_label, None);
    assert_eq!(view.uploads[1].size_label.as_deref(), Some("0 KB"));
}

#[test]
fn uploads_are_allowed_while_sending() {
    init_logging();
    let (state, _) = update(AppState::new(), Msg::InputChanged("Hello".to_string()));
    let (state, _) = update(state, Msg::SendClicked);
    assert_eq!(state.session(), SessionState::Sending);

    let (state, effects) = update(state, Msg::FilesSelected(vec![file("c.txt", Some(1))]));

    assert_eq!(state.session(), SessionState::Sending);
    assert_eq!(state.view().uploads.len(), 1);
    assert_eq!(effects.len(), 1);
}
