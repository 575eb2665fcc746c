//! End-to-end completion flows against the rope-backed buffer.

use popcomp::session::subword;
use popcomp::{
    commit, CandidateKind, CommitError, CompletionCandidate, CompletionSession, RopeBuffer,
    TextBuffer,
};

fn method(label: &str, insertion: &str) -> CompletionCandidate {
    CompletionCandidate::new(CandidateKind::PredefinedMethod, label, insertion)
}

#[test]
fn open_navigate_commit_flow() {
    let mut buffer = RopeBuffer::from_text("size(400, 400);\nba");
    buffer.set_caret(18).unwrap();

    let anchor = subword::resolve_at_caret(&buffer).unwrap();
    assert_eq!(anchor.as_str(), "ba");

    let mut session = CompletionSession::open(
        vec![
            method("background(...)", "background(c)"),
            method("baseline()", "baseline()"),
        ],
        &anchor,
        buffer.caret_offset(),
    )
    .unwrap();

    // Host drains the repaint flag once per event round.
    assert!(session.take_refresh());

    let hint = session.move_down();
    assert!(!hint.wraps());
    assert_eq!(session.highlighted().display_label, "baseline()");
    let hint = session.move_up();
    assert!(!hint.wraps());
    assert_eq!(session.highlighted().display_label, "background(...)");
    assert!(session.take_refresh());

    let outcome = commit(&mut session, &mut buffer).unwrap();
    assert_eq!(buffer.text(), "size(400, 400);\nbackground(c)");
    // Inside the parameter list, right after the open paren.
    assert_eq!(outcome.caret, 27);
    assert_eq!(buffer.caret_offset(), 27);
    assert!(!session.visible());
}

#[test]
fn continued_typing_refreshes_then_commits() {
    let mut buffer = RopeBuffer::from_text("b");
    buffer.set_caret(1).unwrap();

    let mut session = CompletionSession::open(
        vec![
            method("background(...)", "background(c)"),
            method("baseline()", "baseline()"),
            method("bezier(...)", "bezier(a,b)"),
        ],
        "b",
        buffer.caret_offset(),
    )
    .unwrap();
    session.move_down();
    session.move_down();

    // The user types 'e'; the host re-queries and refreshes in place.
    buffer.insert_text(1, "e").unwrap();
    buffer.set_caret(2).unwrap();
    session
        .refresh(
            vec![method("bezier(...)", "bezier(a,b)")],
            subword::resolve_at_caret(&buffer).as_deref().unwrap_or(""),
            buffer.caret_offset(),
        )
        .unwrap();
    assert_eq!(session.selected_index(), 0);
    assert!(session.visible());

    let outcome = commit(&mut session, &mut buffer).unwrap();
    assert_eq!(buffer.text(), "bezier(a,b)");
    assert_eq!(outcome.caret, 7);
}

#[test]
fn dismissal_leaves_buffer_untouched() {
    let mut buffer = RopeBuffer::from_text("foo.ba");
    buffer.set_caret(6).unwrap();

    let mut session = CompletionSession::open(
        vec![method("baz()", "baz()")],
        "ba",
        buffer.caret_offset(),
    )
    .unwrap();
    session.move_down();
    session.move_up();
    session.close();

    assert_eq!(buffer.text(), "foo.ba");
    assert_eq!(buffer.caret_offset(), 6);
    assert!(!session.visible());
}

#[test]
fn read_only_buffer_fails_commit_without_partial_edit() {
    let mut buffer = RopeBuffer::from_text("foo.ba");
    buffer.set_caret(6).unwrap();
    let mut session = CompletionSession::open(
        vec![method("baz()", "baz()")],
        "ba",
        buffer.caret_offset(),
    )
    .unwrap();

    buffer.set_read_only(true);
    let err = commit(&mut session, &mut buffer).unwrap_err();
    assert!(matches!(err, CommitError::BufferMutation(_)));
    assert_eq!(buffer.text(), "foo.ba");
    assert!(!session.visible());
}

#[test]
fn candidate_set_round_trips_from_analyzer_json() {
    // Candidate sets arrive from an external analyzer; JSON is its wire
    // shape.
    let payload = r#"[
        {"kind": "LocalVariable", "display_label": "count", "insertion_text": "count"},
        {"kind": "PredefinedMethod", "display_label": "cos(...)", "insertion_text": "cos(angle)"}
    ]"#;
    let candidates: Vec<CompletionCandidate> = serde_json::from_str(payload).unwrap();

    let mut buffer = RopeBuffer::from_text("co");
    buffer.set_caret(2).unwrap();
    let mut session =
        CompletionSession::open(candidates, "co", buffer.caret_offset()).unwrap();
    session.move_down();

    let outcome = commit(&mut session, &mut buffer).unwrap();
    assert_eq!(buffer.text(), "cos(angle)");
    assert_eq!(outcome.caret, 4);
}

#[test]
fn logging_initializes_into_directory() {
    let dir = tempfile::tempdir().unwrap();
    let guard = popcomp::logging::init_at(dir.path()).expect("first init succeeds");
    tracing::info!("completion flow smoke");
    assert_eq!(guard.log_dir(), dir.path());
    drop(guard);

    let has_log = std::fs::read_dir(dir.path())
        .unwrap()
        .filter_map(|entry| entry.ok())
        .any(|entry| entry.file_name().to_string_lossy().starts_with("popcomp.log"));
    assert!(has_log);
}
