use std::path::PathBuf;

use anyhow::Result;

use super::build;

#[test]
fn it_builds_a_valid_command() {
    build().debug_assert();
}

#[test]
fn it_rejects_unknown_chat_modes() {
    let res = build().try_get_matches_from(vec!["pdfchat", "--chat-mode", "streaming", "whoami"]);
    assert!(res.is_err());
}

#[test]
fn it_requires_a_file_to_chat() -> Result<()> {
    assert!(build().try_get_matches_from(vec!["pdfchat", "chat"]).is_err());

    let matches = build().try_get_matches_from(vec!["pdfchat", "chat", "--file", "paper.pdf"])?;
    let file = matches
        .subcommand_matches("chat")
        .and_then(|e| return e.get_one::<PathBuf>("file"));
    assert_eq!(file, Some(&PathBuf::from("paper.pdf")));
    return Ok(());
}

#[test]
fn it_parses_upload_path_and_history_flag() -> Result<()> {
    let matches = build().try_get_matches_from(vec!["pdfchat", "upload", "paper.pdf"])?;
    let file = matches
        .subcommand_matches("upload")
        .and_then(|e| return e.get_one::<PathBuf>("file"));
    assert_eq!(file, Some(&PathBuf::from("paper.pdf")));

    let matches = build().try_get_matches_from(vec!["pdfchat", "history", "--messages"])?;
    let show_messages = matches
        .subcommand_matches("history")
        .map(|e| return e.get_flag("messages"));
    assert_eq!(show_messages, Some(true));
    return Ok(());
}
