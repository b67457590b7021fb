//! Mapping between NDEF records and the tag records the rest of the crate speaks.
//!
//! Inbound records follow the usual reader conventions: well-known `T` becomes
//! `"text"` with its declared encoding, `U` becomes `"url"` with the prefix
//! expanded, MIME records become `"mime"` with a media type, external types keep
//! their own name.

use tagforge_common::tag::record::{InboundRecord, MALFORMED, OutboundRecord, RecordKind};
use tracing::debug;

use crate::ndef::{self, NdefRecord, Tnf};
use crate::{NdefError, text, uri};

const DEFAULT_LANG: &str = "en";

/// Encodes outbound records into a message, in order.
pub fn create_message(records: &[OutboundRecord]) -> Result<Vec<u8>, NdefError> {
    let ndef_records: Vec<NdefRecord> = records
        .iter()
        .map(to_ndef)
        .collect::<Result<Vec<NdefRecord>, NdefError>>()?;
    ndef::create_message(&ndef_records)
}

/// Decodes a message into inbound records, in the order they are stored.
pub fn get_records(bytes: &[u8]) -> Result<Vec<InboundRecord>, NdefError> {
    let records = ndef::get_records(bytes)?;
    debug!("parsed {} NDEF records", records.len());
    records.iter().map(to_inbound).collect()
}

pub fn to_ndef(record: &OutboundRecord) -> Result<NdefRecord, NdefError> {
    Ok(match record.kind {
        RecordKind::Text => NdefRecord::new(
            Tnf::WellKnown,
            b"T",
            text::create_payload(&record.data, DEFAULT_LANG)?,
        ),
        RecordKind::Url => NdefRecord::new(Tnf::WellKnown, b"U", uri::create_payload(&record.data)),
    })
}

pub fn to_inbound(record: &NdefRecord) -> Result<InboundRecord, NdefError> {
    let id = (!record.id.is_empty()).then(|| String::from_utf8_lossy(&record.id).into_owned());
    let type_name = String::from_utf8_lossy(&record.record_type).into_owned();

    let mut inbound = InboundRecord {
        id,
        ..InboundRecord::default()
    };

    match (record.tnf, record.record_type.as_slice()) {
        (Tnf::Empty, _) => {
            inbound.record_type = "empty".to_string();
        }
        (Tnf::WellKnown, b"T") => {
            inbound.record_type = "text".to_string();
            match text::get_payload(&record.payload) {
                Ok(payload) => {
                    inbound.encoding = Some(payload.encoding.label().to_string());
                    inbound.lang = Some(payload.lang);
                    inbound.data = payload.text.to_vec();
                }
                Err(err) => mark_malformed(&mut inbound, record, &err),
            }
        }
        (Tnf::WellKnown, b"U") => {
            inbound.record_type = "url".to_string();
            match uri::get_uri(&record.payload) {
                Ok(uri) => inbound.data = uri.into_bytes(),
                Err(err) => mark_malformed(&mut inbound, record, &err),
            }
        }
        (Tnf::WellKnown, b"Sp") => {
            inbound.record_type = "smart-poster".to_string();
            inbound.data = record.payload.clone();
        }
        (Tnf::WellKnown, _) => {
            inbound.record_type = format!(":{type_name}");
            inbound.data = record.payload.clone();
        }
        (Tnf::Media, _) => {
            inbound.record_type = "mime".to_string();
            inbound.media_type = Some(type_name);
            inbound.data = record.payload.clone();
        }
        (Tnf::AbsoluteUri, _) => {
            // The URI lives in the type field.
            inbound.record_type = "absolute-url".to_string();
            inbound.data = record.record_type.clone();
        }
        (Tnf::External, _) => {
            inbound.record_type = type_name;
            inbound.data = record.payload.clone();
        }
        (Tnf::Unknown, _) => {
            inbound.record_type = "unknown".to_string();
            inbound.data = record.payload.clone();
        }
        (Tnf::Unchanged | Tnf::Reserved, _) => {
            return Err(NdefError::Malformed(format!(
                "type name format {:?} outside a chunk",
                record.tnf
            )));
        }
    }

    Ok(inbound)
}

/// Keeps a record whose payload does not parse, flagged so the decoder rejects
/// it without touching its siblings.
fn mark_malformed(inbound: &mut InboundRecord, record: &NdefRecord, err: &NdefError) {
    debug!(record_type = %inbound.record_type, "keeping malformed payload: {err}");
    inbound.encoding = Some(MALFORMED.to_string());
    inbound.data = record.payload.clone();
}
