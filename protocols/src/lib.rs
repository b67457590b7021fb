//! # NDEF Wire Format
//!
//! Encoding and decoding of NFC Data Exchange Format messages, the container
//! stored on a tag.
//!
//! * **[`ndef`]**: record headers and message framing.
//! * **[`text`]** / **[`uri`]**: payloads of the well-known `T` and `U` record types.
//! * **[`records`]**: conversion between NDEF records and the crate's tag records.

use thiserror::Error;

pub mod ndef;
pub mod records;
pub mod text;
pub mod uri;

pub use records::{create_message, get_records};

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum NdefError {
    #[error("message is empty")]
    Empty,
    #[error("message truncated: needed {needed} more bytes at offset {offset}")]
    Truncated { offset: usize, needed: usize },
    #[error("malformed record: {0}")]
    Malformed(String),
    #[error("unsupported: {0}")]
    Unsupported(String),
}
