use std::path::Path;
use std::time::Duration;

use tagforge_common::config::Config;
use tagforge_common::tag::intent::TargetIntent;
use tagforge_common::tag::platform::Platform;
use tagforge_common::tag::state::WriteOutcome;
use tagforge_core::{TagSession, composer, hardware};
use tagforge_protocols::ndef::{self, NdefRecord, Tnf};
use tokio::time::timeout;

use crate::support::{WAIT, callbacks};

fn config(dir: &Path, capacity: usize) -> Config {
    Config {
        tag: Some(dir.join("tag.ndef")),
        capacity,
        poll_interval: Duration::from_millis(10),
        ..Config::default()
    }
}

async fn read_once(session: &TagSession) -> tagforge_common::tag::record::ScanReport {
    let (on_record, on_error, mut delivered) = callbacks();
    session.start_scan(on_record, on_error).await.unwrap();
    timeout(WAIT, delivered.recv())
        .await
        .unwrap()
        .unwrap()
        .unwrap()
}

#[tokio::test]
async fn social_link_survives_the_trip_through_a_tag() {
    let dir = tempfile::tempdir().unwrap();
    let session = hardware::open_session(&config(dir.path(), 144)).unwrap();

    let intent = TargetIntent::social(Platform::GitHub, " @octocat ", false);
    let record = composer::compose(&intent).unwrap();
    let outcome = session.write(record).await.unwrap();
    assert_eq!(outcome, WriteOutcome::Succeeded);

    let report = read_once(&session).await;
    assert_eq!(report.records.len(), 1);
    assert_eq!(report.records[0].record_type, "url");
    assert_eq!(report.records[0].content, "https://github.com/octocat");
    assert!(report.serial_number.is_some());
}

#[tokio::test]
async fn text_survives_the_trip_through_a_tag() {
    let dir = tempfile::tempdir().unwrap();
    let session = hardware::open_session(&config(dir.path(), 144)).unwrap();

    let record = composer::compose(&TargetIntent::text("Wi-Fi: guest / hunter2")).unwrap();
    session.write(record).await.unwrap();

    let report = read_once(&session).await;
    assert_eq!(report.records[0].record_type, "text");
    assert_eq!(report.records[0].content, "Wi-Fi: guest / hunter2");
    assert!(report.records[0].decode_ok);
}

#[tokio::test]
async fn oversized_write_fails_and_leaves_the_tag_alone() {
    let dir = tempfile::tempdir().unwrap();
    let session = hardware::open_session(&config(dir.path(), 32)).unwrap();

    let record = composer::compose(&TargetIntent::text("x".repeat(100))).unwrap();
    let outcome = session.write(record).await.unwrap();

    let WriteOutcome::Failed(err) = outcome else {
        panic!("expected a failed write, got {outcome:?}");
    };
    assert!(err.message.contains("insufficient capacity"));
    assert!(!dir.path().join("tag.ndef").exists());
}

#[tokio::test]
async fn foreign_tag_is_decoded_record_by_record() {
    let dir = tempfile::tempdir().unwrap();
    let utf16_text = {
        let mut payload = vec![0x80 | 2, b'e', b'n'];
        payload.extend("hi".encode_utf16().flat_map(u16::to_be_bytes));
        payload
    };
    let bad_utf8 = vec![0x02, b'e', b'n', 0xC3, 0x28];
    let message = ndef::create_message(&[
        NdefRecord::new(Tnf::WellKnown, b"T", utf16_text),
        NdefRecord::new(Tnf::WellKnown, b"T", bad_utf8),
        NdefRecord::new(Tnf::Media, b"application/json", b"{\"a\":1}".to_vec()).with_id(b"cfg"),
    ])
    .unwrap();
    std::fs::write(dir.path().join("tag.ndef"), message).unwrap();

    let session = hardware::open_session(&config(dir.path(), 144)).unwrap();
    let report = read_once(&session).await;

    assert_eq!(report.records.len(), 3);
    assert_eq!(report.records[0].content, "hi");
    assert!(!report.records[1].decode_ok);
    assert_eq!(report.records[1].content, "undecodable");
    assert_eq!(report.records[2].record_type, "mime");
    assert_eq!(report.records[2].media_type.as_deref(), Some("application/json"));
    assert_eq!(report.records[2].id.as_deref(), Some("cfg"));
    assert_eq!(report.records[2].content, "{\"a\":1}");
    assert!(report.records[2].best_effort);
}

#[tokio::test]
async fn missing_hardware_is_rejected() {
    let session = hardware::open_session(&Config::default()).unwrap();
    let (on_record, on_error, _delivered) = callbacks();

    assert!(session.start_scan(on_record, on_error).await.is_err());
    assert!(
        session
            .write(tagforge_common::tag::record::OutboundRecord::text("hi"))
            .await
            .is_err()
    );
}

#[tokio::test]
async fn malformed_payloads_do_not_hide_their_siblings() {
    let dir = tempfile::tempdir().unwrap();
    let message = ndef::create_message(&[
        NdefRecord::new(Tnf::WellKnown, b"T", vec![0x02, b'e', b'n', b'h', b'i']),
        NdefRecord::new(Tnf::WellKnown, b"U", vec![0x00, 0xC3, 0x28]),
        NdefRecord::new(Tnf::WellKnown, b"T", vec![0x40 | 0x02, b'e', b'n', b'o', b'k']),
        NdefRecord::new(Tnf::WellKnown, b"U", vec![0x04, b'a', b'.', b'b']),
    ])
    .unwrap();
    std::fs::write(dir.path().join("tag.ndef"), message).unwrap();

    let session = hardware::open_session(&config(dir.path(), 144)).unwrap();
    let report = read_once(&session).await;

    assert_eq!(report.records.len(), 4);
    assert_eq!(report.records[0].content, "hi");
    assert!(report.records[0].decode_ok);

    assert_eq!(report.records[1].record_type, "url");
    assert_eq!(report.records[1].content, "undecodable");
    assert!(!report.records[1].decode_ok);

    assert_eq!(report.records[2].record_type, "text");
    assert_eq!(report.records[2].content, "undecodable");
    assert!(!report.records[2].decode_ok);

    assert_eq!(report.records[3].content, "https://a.b");
    assert!(report.records[3].decode_ok);
}
