use tagforge_common::error::ComposeError;
use tagforge_common::tag::intent::TargetIntent;
use tagforge_common::tag::platform::Platform;
use tagforge_common::tag::record::{InboundRecord, RecordKind};
use tagforge_core::{composer, decoder, registry};

#[test]
fn every_platform_composes_a_web_link_by_default() {
    for (platform, entry) in registry::entries() {
        let record = composer::compose(&TargetIntent::social(platform, "@jane", false)).unwrap();
        assert_eq!(record.kind, RecordKind::Url);
        assert_eq!(record.data, format!("{}jane", entry.web_prefix));
    }
}

#[test]
fn deep_link_falls_back_to_the_web_link() {
    for (platform, entry) in registry::entries() {
        let record = composer::compose(&TargetIntent::social(platform, "jane", true)).unwrap();
        let prefix = entry.native_scheme.unwrap_or(entry.web_prefix);
        assert_eq!(record.data, format!("{prefix}jane"));
    }
}

#[test]
fn platform_names_parse_from_user_input() {
    let platform: Platform = "Instagram".parse().unwrap();
    let record = composer::compose(&TargetIntent::social(platform, "john", true)).unwrap();
    assert_eq!(record.data, "instagram://user?username=john");
}

#[test]
fn blank_inputs_are_refused() {
    assert_eq!(
        composer::compose(&TargetIntent::url("   ")),
        Err(ComposeError::EmptyContent)
    );
    assert_eq!(
        composer::compose(&TargetIntent::social(Platform::TikTok, " @ ", false)),
        Err(ComposeError::EmptyHandle)
    );
}

#[test]
fn composed_records_decode_to_what_was_composed() {
    let intents = [
        TargetIntent::text("Meet at 8 ☕"),
        TargetIntent::url("example.com/menu"),
        TargetIntent::social(Platform::YouTube, "@chan", false),
    ];

    for intent in intents {
        let record = composer::compose(&intent).unwrap();
        let decoded = decoder::decode(&InboundRecord::from(&record));
        assert!(decoded.decode_ok);
        assert_eq!(decoded.content, record.data);
        assert_eq!(decoded.record_type, record.record_type());
    }
}
