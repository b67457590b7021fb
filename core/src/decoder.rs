//! # Record Decoder
//!
//! Best-effort decode of records reported by a reader. A record that cannot be
//! decoded is marked and replaced by a placeholder; it never affects its siblings.

use tagforge_common::error::DecodeFault;
use tagforge_common::tag::record::{DecodedRecord, InboundRecord, MALFORMED, UNDECODABLE};
use tracing::debug;

const UTF8_BOM: [u8; 3] = [0xEF, 0xBB, 0xBF];

pub fn decode(raw: &InboundRecord) -> DecodedRecord {
    let best_effort = !matches!(raw.record_type.as_str(), "text" | "url");

    let (content, decode_ok) = match decode_text(&raw.data, raw.encoding.as_deref()) {
        Ok(content) => (content, true),
        Err(fault) => {
            debug!(record_type = %raw.record_type, "record left undecoded: {fault}");
            (UNDECODABLE.to_string(), false)
        }
    };

    DecodedRecord {
        record_type: raw.record_type.clone(),
        media_type: raw.media_type.clone(),
        id: raw.id.clone(),
        content,
        decode_ok,
        best_effort,
    }
}

/// Decodes every record of a message, keeping the order the reader reported.
pub fn decode_message(records: &[InboundRecord]) -> Vec<DecodedRecord> {
    records.iter().map(decode).collect()
}

/// Strict decode of `bytes` under an encoding label. UTF-8 when no label is given.
pub fn decode_text(bytes: &[u8], encoding: Option<&str>) -> Result<String, DecodeFault> {
    let label = encoding.unwrap_or("utf-8").trim().to_ascii_lowercase();

    let invalid = || DecodeFault::Invalid {
        encoding: label.clone(),
    };

    match label.as_str() {
        "utf-8" | "utf8" => {
            let bytes = bytes.strip_prefix(&UTF8_BOM[..]).unwrap_or(bytes);
            String::from_utf8(bytes.to_vec()).map_err(|_| invalid())
        }
        "utf-16" => match bytes {
            [0xFE, 0xFF, rest @ ..] => decode_utf16(rest, u16::from_be_bytes).ok_or_else(invalid),
            [0xFF, 0xFE, rest @ ..] => decode_utf16(rest, u16::from_le_bytes).ok_or_else(invalid),
            _ => decode_utf16(bytes, u16::from_be_bytes).ok_or_else(invalid),
        },
        "utf-16be" => decode_utf16(bytes, u16::from_be_bytes).ok_or_else(invalid),
        "utf-16le" => decode_utf16(bytes, u16::from_le_bytes).ok_or_else(invalid),
        MALFORMED => Err(DecodeFault::Malformed),
        _ => Err(DecodeFault::UnknownEncoding(label.clone())),
    }
}

fn decode_utf16(bytes: &[u8], to_unit: fn([u8; 2]) -> u16) -> Option<String> {
    if bytes.len() % 2 != 0 {
        return None;
    }

    let units = bytes.chunks_exact(2).map(|pair| to_unit([pair[0], pair[1]]));
    char::decode_utf16(units).collect::<Result<String, _>>().ok()
}
