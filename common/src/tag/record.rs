//! # Tag Records
//!
//! Outbound records are what the composer produces and the session writes.
//! Inbound records are what the reader reports, still as raw bytes, and
//! decoded records are what gets shown to the user.

use std::fmt;

/// Content placed in a record that could not be decoded.
pub const UNDECODABLE: &str = "undecodable";

/// Encoding label of an inbound record whose payload did not parse. Never decodes.
pub const MALFORMED: &str = "malformed";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RecordKind {
    Text,
    Url,
}

impl RecordKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            RecordKind::Text => "text",
            RecordKind::Url => "url",
        }
    }
}

impl fmt::Display for RecordKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single record ready to be written to a tag.
///
/// For [`RecordKind::Url`] the data always starts with a URI scheme.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutboundRecord {
    pub kind: RecordKind,
    pub data: String,
}

impl OutboundRecord {
    pub fn text(data: impl Into<String>) -> Self {
        Self {
            kind: RecordKind::Text,
            data: data.into(),
        }
    }

    pub fn url(data: impl Into<String>) -> Self {
        Self {
            kind: RecordKind::Url,
            data: data.into(),
        }
    }

    pub fn record_type(&self) -> &'static str {
        self.kind.as_str()
    }
}

/// A record as reported by the reader.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct InboundRecord {
    pub record_type: String,
    pub media_type: Option<String>,
    pub id: Option<String>,
    pub data: Vec<u8>,
    /// Declared text encoding label. `None` for non-text records.
    pub encoding: Option<String>,
    pub lang: Option<String>,
}

impl From<&OutboundRecord> for InboundRecord {
    /// What a reader reports back for a record freshly written by this crate.
    fn from(record: &OutboundRecord) -> Self {
        let (encoding, lang) = match record.kind {
            RecordKind::Text => (Some("utf-8".to_string()), Some("en".to_string())),
            RecordKind::Url => (None, None),
        };

        Self {
            record_type: record.record_type().to_string(),
            media_type: None,
            id: None,
            data: record.data.as_bytes().to_vec(),
            encoding,
            lang,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodedRecord {
    pub record_type: String,
    pub media_type: Option<String>,
    pub id: Option<String>,
    pub content: String,
    pub decode_ok: bool,
    /// Set for record types other than text and url, whose content was decoded
    /// as text without any guarantee that it is meant to be read that way.
    pub best_effort: bool,
}

/// Everything learned from one tap.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScanReport {
    pub serial_number: Option<String>,
    /// Same length and order as the records on the tag.
    pub records: Vec<DecodedRecord>,
}
