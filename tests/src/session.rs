use std::sync::Arc;

use tagforge_common::error::{SessionError, WriteError};
use tagforge_common::hardware::ScanEvent;
use tagforge_common::tag::record::{InboundRecord, OutboundRecord, UNDECODABLE};
use tagforge_common::tag::state::{SessionState, WriteOutcome};
use tagforge_core::TagSession;
use tokio::time::{sleep, timeout};

use crate::support::{FakeReader, SETTLE, WAIT, WritePlan, callbacks, detected};

fn open(reader: &Arc<FakeReader>) -> TagSession {
    TagSession::open(reader.clone(), true).unwrap()
}

fn text(data: &[u8]) -> InboundRecord {
    InboundRecord {
        record_type: "text".to_string(),
        data: data.to_vec(),
        encoding: Some("utf-8".to_string()),
        lang: Some("en".to_string()),
        ..InboundRecord::default()
    }
}

fn url(data: &str) -> InboundRecord {
    InboundRecord {
        record_type: "url".to_string(),
        data: data.as_bytes().to_vec(),
        ..InboundRecord::default()
    }
}

#[tokio::test]
async fn tap_delivers_one_report_and_returns_to_idle() {
    let reader = FakeReader::new(WritePlan::Ack);
    let session = open(&reader);
    let (on_record, on_error, mut delivered) = callbacks();

    session.start_scan(on_record, on_error).await.unwrap();
    assert_eq!(session.state(), SessionState::Listening);

    let records = vec![text(b"hello"), text(&[0xC3, 0x28]), url("https://example.com")];
    assert!(reader.emit(0, detected(records)).await);

    let report = timeout(WAIT, delivered.recv()).await.unwrap().unwrap().unwrap();
    assert_eq!(report.serial_number.as_deref(), Some("04:a2:3b:91:c2:5e:80"));
    assert_eq!(report.records.len(), 3);
    assert_eq!(report.records[0].content, "hello");
    assert_eq!(report.records[1].content, UNDECODABLE);
    assert!(!report.records[1].decode_ok);
    assert_eq!(report.records[2].content, "https://example.com");
    assert_eq!(session.state(), SessionState::Idle);

    // Both callbacks are gone; nothing else can arrive.
    assert!(timeout(WAIT, delivered.recv()).await.unwrap().is_none());
}

#[tokio::test]
async fn read_error_goes_to_the_error_callback() {
    let reader = FakeReader::new(WritePlan::Ack);
    let session = open(&reader);
    let (on_record, on_error, mut delivered) = callbacks();

    session.start_scan(on_record, on_error).await.unwrap();
    reader
        .emit(0, ScanEvent::ReadError { message: "tag moved away".to_string() })
        .await;

    let err = timeout(WAIT, delivered.recv()).await.unwrap().unwrap().unwrap_err();
    assert_eq!(err.message, "tag moved away");
    assert_eq!(session.state(), SessionState::Idle);
}

#[tokio::test]
async fn event_after_cancel_is_never_delivered() {
    let reader = FakeReader::new(WritePlan::Ack);
    let session = open(&reader);
    let (on_record, on_error, mut delivered) = callbacks();

    session.start_scan(on_record, on_error).await.unwrap();
    assert!(session.cancel());
    assert_eq!(session.state(), SessionState::Idle);
    assert!(reader.scan_tokens()[0].is_cancelled());

    reader.emit(0, detected(vec![text(b"late")])).await;
    sleep(SETTLE).await;

    assert!(delivered.try_recv().is_err());
    assert_eq!(session.state(), SessionState::Idle);
}

#[tokio::test]
async fn second_scan_replaces_the_first() {
    let reader = FakeReader::new(WritePlan::Ack);
    let session = open(&reader);
    let (first_record, first_error, mut first) = callbacks();
    let (second_record, second_error, mut second) = callbacks();

    session.start_scan(first_record, first_error).await.unwrap();
    session.start_scan(second_record, second_error).await.unwrap();

    let tokens = reader.scan_tokens();
    assert!(tokens[0].is_cancelled());
    assert!(!tokens[1].is_cancelled());
    assert!(session.is_listening());

    reader.emit(0, detected(vec![text(b"stale")])).await;
    sleep(SETTLE).await;
    assert!(first.try_recv().is_err());
    assert!(session.is_listening());

    reader.emit(1, detected(vec![text(b"fresh")])).await;
    let report = timeout(WAIT, second.recv()).await.unwrap().unwrap().unwrap();
    assert_eq!(report.records[0].content, "fresh");
    assert_eq!(session.state(), SessionState::Idle);
}

#[tokio::test]
async fn write_while_listening_cancels_the_scan() {
    let reader = FakeReader::new(WritePlan::Ack);
    let session = open(&reader);
    let (on_record, on_error, mut delivered) = callbacks();

    session.start_scan(on_record, on_error).await.unwrap();
    let outcome = session.write(OutboundRecord::text("hello")).await;

    assert_eq!(outcome, Ok(WriteOutcome::Succeeded));
    assert!(reader.scan_tokens()[0].is_cancelled());
    assert_eq!(session.state(), SessionState::Idle);

    reader.emit(0, detected(vec![text(b"late")])).await;
    sleep(SETTLE).await;
    assert!(delivered.try_recv().is_err());
}

#[tokio::test]
async fn write_sends_exactly_one_record() {
    let reader = FakeReader::new(WritePlan::Ack);
    let session = open(&reader);

    let record = OutboundRecord::url("https://github.com/octocat");
    let outcome = session.write(record.clone()).await.unwrap();

    assert!(outcome.is_success());
    assert_eq!(outcome.state(), SessionState::Succeeded);
    assert_eq!(reader.writes(), vec![vec![record]]);
}

#[tokio::test]
async fn rejected_write_settles_as_failed() {
    let reader = FakeReader::new(WritePlan::Reject("tag is read-only"));
    let session = open(&reader);

    let outcome = session.write(OutboundRecord::text("hello")).await.unwrap();

    assert_eq!(outcome, WriteOutcome::Failed(WriteError::new("tag is read-only")));
    assert_eq!(outcome.state(), SessionState::Failed);
    assert_eq!(session.state(), SessionState::Idle);
}

#[tokio::test]
async fn cancelled_write_reports_cancelled() {
    let reader = FakeReader::new(WritePlan::Hang);
    let session = open(&reader);

    let writer = session.clone();
    let pending = tokio::spawn(async move { writer.write(OutboundRecord::text("hello")).await });

    sleep(SETTLE).await;
    assert!(session.is_listening());
    assert!(session.cancel());

    let outcome = timeout(WAIT, pending).await.unwrap().unwrap();
    assert_eq!(outcome, Ok(WriteOutcome::Cancelled));
    assert_eq!(session.state(), SessionState::Idle);
}

#[tokio::test]
async fn abandoned_write_returns_to_idle() {
    let reader = FakeReader::new(WritePlan::Hang);
    let session = open(&reader);

    let abandoned = timeout(SETTLE, session.write(OutboundRecord::text("hello"))).await;

    assert!(abandoned.is_err());
    assert_eq!(session.state(), SessionState::Idle);
}

#[tokio::test]
async fn scan_after_write_is_armed_fresh() {
    let reader = FakeReader::new(WritePlan::Reject("tag was removed"));
    let session = open(&reader);
    let (on_record, on_error, mut delivered) = callbacks();

    session.write(OutboundRecord::text("hello")).await.unwrap();
    session.start_scan(on_record, on_error).await.unwrap();

    reader.emit(0, detected(Vec::new())).await;
    let report = timeout(WAIT, delivered.recv()).await.unwrap().unwrap().unwrap();
    assert!(report.records.is_empty());
}

#[tokio::test]
async fn insecure_context_never_reaches_the_reader() {
    let reader = FakeReader::new(WritePlan::Ack);

    let result = TagSession::open(reader.clone(), false);

    assert!(matches!(result, Err(SessionError::InsecureContext)));
    assert!(reader.scan_tokens().is_empty());
    assert!(reader.writes().is_empty());
}
