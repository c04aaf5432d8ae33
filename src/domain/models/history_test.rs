use anyhow::Result;

use super::format_timestamp;
use super::HistoryResponse;

#[test]
fn it_parses_backend_payload() -> Result<()> {
    let payload = r#"{
        "sessions": [
            {
                "_id": "65a1",
                "filename": "report.pdf",
                "messages": [
                    {"question": "Q1", "answer": "A1", "created_at": "2024-01-02T10:00:00.123456"}
                ],
                "last_message": "2024-01-02T10:00:00.123456"
            }
        ]
    }"#;

    let res: HistoryResponse = serde_json::from_str(payload)?;

    assert_eq!(res.sessions.len(), 1);
    assert_eq!(res.sessions[0].id, "65a1");
    assert_eq!(res.sessions[0].messages[0].answer, "A1");

    insta::assert_snapshot!(res.sessions[0].summary(), @"- (ID: 65a1) report.pdf, 1 message, Last message: 2024-01-02 10:00:00");
    return Ok(());
}

#[test]
fn it_defaults_missing_sessions() -> Result<()> {
    let res: HistoryResponse = serde_json::from_str("{}")?;
    assert!(res.sessions.is_empty());
    return Ok(());
}

#[test]
fn it_formats_timestamps() {
    assert_eq!(
        format_timestamp("2024-05-06T07:08:09+00:00"),
        "2024-05-06 07:08:09"
    );
    assert_eq!(format_timestamp("2024-05-06T07:08:09"), "2024-05-06 07:08:09");
    assert_eq!(format_timestamp("yesterday"), "yesterday");
}
