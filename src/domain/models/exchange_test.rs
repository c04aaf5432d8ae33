use super::Answer;
use super::Transcript;

#[test]
fn it_commits_pending_exchange() {
    let mut transcript = Transcript::default();
    let idx = transcript.begin("What is this about?");
    assert!(transcript.has_pending());

    transcript.commit(idx, "Rust.");

    assert!(!transcript.has_pending());
    assert_eq!(
        transcript.exchanges()[0].answer,
        Answer::Answered("Rust.".to_string())
    );
}

#[test]
fn it_reverts_to_previous_state() {
    let mut transcript = Transcript::default();
    let first = transcript.begin("First?");
    transcript.commit(first, "Yes.");
    let before = transcript.clone();

    let idx = transcript.begin("Second?");
    transcript.revert(idx);

    assert_eq!(transcript, before);
}

#[test]
fn it_does_not_revert_committed_exchanges() {
    let mut transcript = Transcript::default();
    let idx = transcript.begin("First?");
    transcript.commit(idx, "Yes.");
    transcript.revert(idx);

    assert_eq!(transcript.len(), 1);
}

#[test]
fn it_renders_pending_marker() {
    insta::assert_snapshot!(Answer::Pending.to_string(), @"...");
    assert_eq!(format!("A: {}", Answer::Answered("Yes.".to_string())), "A: Yes.");
}
