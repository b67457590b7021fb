use crate::terminal::colors;
use colored::*;
use tagforge_common::tag::record::{DecodedRecord, OutboundRecord, RecordKind};

pub fn outbound_to_details(record: &OutboundRecord) -> Vec<(String, ColoredString)> {
    let data = match record.kind {
        RecordKind::Url => record.data.color(colors::URL),
        RecordKind::Text => record.data.color(colors::TEXT_DEFAULT),
    };

    vec![
        ("Type".to_string(), record.record_type().color(colors::PRIMARY)),
        ("Data".to_string(), data),
    ]
}

pub fn record_to_details(record: &DecodedRecord) -> Vec<(String, ColoredString)> {
    let mut details = Vec::new();

    if let Some(media_type) = &record.media_type {
        details.push(("Media".to_string(), media_type.color(colors::MEDIA_TYPE)));
    }
    if let Some(id) = &record.id {
        details.push(("Id".to_string(), id.color(colors::TEXT_DEFAULT)));
    }

    let content = if !record.decode_ok {
        record.content.color(colors::UNDECODABLE).italic()
    } else if record.record_type == "url" {
        record.content.color(colors::URL)
    } else {
        record.content.color(colors::TEXT_DEFAULT)
    };
    details.push(("Content".to_string(), content));

    if record.best_effort && record.decode_ok {
        details.push(("Note".to_string(), "decoded as text".dimmed()));
    }

    details
}
