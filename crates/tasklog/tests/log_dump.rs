use std::io::Write;

use tasklog::{log_jsonl_file, LogLevel, LogParseError};

const DUMP: &str = r#"{"timestamp":"2026-03-14 09:00:00","level":"INFO","message":"开始阶段: 连接测试","phase":"connection_test"}
{"time":"2026-03-14 09:00:02","log_level":"warn","msg":"slow metastore response","component":"metastore"}

2026-03-14 09:00:03 raw text carried over from the driver
{"timestamp":"2026-03-14 09:00:05","level":"INFO","message":"阶段完成","phase":"connection_test"}
"#;

#[test]
fn file_backed_dump_round_trips_mixed_shapes() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("merge-42.log");
    let mut file = std::fs::File::create(&path).expect("create dump");
    file.write_all(DUMP.as_bytes()).expect("write dump");
    drop(file);

    let records: Vec<_> = log_jsonl_file(&path).expect("open dump").collect();
    assert_eq!(records.len(), 4);

    let first = records[0].outcome.as_ref().expect("json line");
    assert_eq!(first.phase.as_deref(), Some("connection_test"));
    assert_eq!(records[0].line_number, 1);

    // Aliased field spellings land in the same model.
    let second = records[1].outcome.as_ref().expect("aliased line");
    assert_eq!(second.timestamp.as_deref(), Some("2026-03-14 09:00:02"));
    assert_eq!(
        second.level.as_deref().map(LogLevel::normalize),
        Some(LogLevel::Warn)
    );
    assert_eq!(second.source.as_deref(), Some("metastore"));

    // The blank line is skipped, plain text survives as a message-only record.
    let third = records[2].outcome.as_ref().expect("text line");
    assert_eq!(records[2].line_number, 4);
    assert!(third.message.contains("raw text"));
    assert_eq!(third.timestamp, None);

    let fourth = records[3].outcome.as_ref().expect("json line");
    assert_eq!(fourth.message, "阶段完成");
}

#[test]
fn missing_file_is_an_io_error() {
    let dir = tempfile::tempdir().expect("tempdir");
    let missing = dir.path().join("no-such-dump.log");
    let err = log_jsonl_file(&missing).err().expect("open should fail");
    assert!(matches!(err, LogParseError::Io(_)));
}
