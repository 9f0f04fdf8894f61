use super::model::{OutputLine, OutputStream, SessionState};
use super::table::LiveSessionTable;

fn line(text: &str) -> OutputLine {
    OutputLine {
        timestamp: "2026-01-01T00:00:00Z".to_string(),
        text: text.to_string(),
        stream: OutputStream::Stdout,
    }
}

#[test]
fn test_create_is_idempotent() {
    // applying the same creation twice yields exactly one session
    let mut table = LiveSessionTable::new();
    assert!(table.create("s1", "p1"));
    assert!(!table.create("s1", "p1"));
    assert_eq!(table.len(), 1);
    assert_eq!(table.snapshot(None).len(), 1);
}

#[test]
fn test_create_starts_idle() {
    let mut table = LiveSessionTable::new();
    table.create("s1", "p1");
    assert_eq!(table.get("s1").unwrap().state, SessionState::Idle);
}

#[test]
fn test_remove_clears_selection_of_removed_session() {
    // removing the selected session cascades into a selection clear
    let mut table = LiveSessionTable::new();
    table.create("s1", "p1");
    table.select(Some("s1".to_string()));

    assert!(table.remove("s1"));
    assert_eq!(table.selected_id(), None);
    assert!(table.snapshot(None).is_empty());
}

#[test]
fn test_remove_keeps_unrelated_selection() {
    let mut table = LiveSessionTable::new();
    table.create("s1", "p1");
    table.create("s2", "p1");
    table.select(Some("s2".to_string()));

    table.remove("s1");
    assert_eq!(table.selected_id(), Some("s2"));
}

#[test]
fn test_remove_unknown_is_noop() {
    let mut table = LiveSessionTable::new();
    table.create("s1", "p1");
    assert!(!table.remove("ghost"));
    assert_eq!(table.len(), 1);
}

#[test]
fn test_set_state_allows_any_transition() {
    let mut table = LiveSessionTable::new();
    table.create("s1", "p1");

    for state in [
        SessionState::Working,
        SessionState::Idle,
        SessionState::Waiting,
        SessionState::Idle,
    ] {
        assert!(table.set_state("s1", state));
        assert_eq!(table.get("s1").unwrap().state, state);
    }
}

#[test]
fn test_unknown_id_mutations_leave_table_untouched() {
    // state and output for unknown ids change nothing
    let mut table = LiveSessionTable::new();
    table.create("s1", "p1");
    table.append_output("s1", line("a"));

    assert!(!table.set_state("ghost", SessionState::Working));
    assert!(!table.append_output("ghost", line("b")));

    assert_eq!(table.len(), 1);
    let session = table.get("s1").unwrap();
    assert_eq!(session.state, SessionState::Idle);
    assert_eq!(session.output.len(), 1);
}

#[test]
fn test_output_preserves_order_across_interleaved_sessions() {
    // per-session output order survives interleaved appends
    let mut table = LiveSessionTable::new();
    table.create("s1", "p1");
    table.create("s2", "p1");

    table.append_output("s1", line("a"));
    table.append_output("s2", line("x"));
    table.append_output("s1", line("b"));
    table.append_output("s2", line("y"));
    table.append_output("s1", line("c"));

    let texts: Vec<_> = table
        .get("s1")
        .unwrap()
        .output
        .iter()
        .map(|l| l.text.as_str())
        .collect();
    assert_eq!(texts, ["a", "b", "c"]);
}

#[test]
fn test_clear_output_keeps_state() {
    let mut table = LiveSessionTable::new();
    table.create("s1", "p1");
    table.set_state("s1", SessionState::Working);
    table.append_output("s1", line("a"));

    assert!(table.clear_output("s1"));
    let session = table.get("s1").unwrap();
    assert!(session.output.is_empty());
    assert_eq!(session.state, SessionState::Working);
}

#[test]
fn test_snapshot_filters_by_project_in_insertion_order() {
    let mut table = LiveSessionTable::new();
    table.create("s1", "p1");
    table.create("s2", "p2");
    table.create("s3", "p1");

    let p1_sessions = table.snapshot(Some("p1"));
    let ids: Vec<_> = p1_sessions.iter().map(|s| s.id.as_str()).collect();
    assert_eq!(ids, ["s1", "s3"]);

    assert_eq!(table.snapshot(None).len(), 3);
}

#[test]
fn test_live_count_per_project() {
    let mut table = LiveSessionTable::new();
    for i in 0..3 {
        table.create(format!("s{}", i), "p1");
    }
    table.create("other", "p2");

    assert_eq!(table.live_count("p1"), 3);
    assert_eq!(table.live_count("p2"), 1);
    assert_eq!(table.live_count("p3"), 0);
}
