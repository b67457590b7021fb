//! # Error Taxonomy
//!
//! Preflight failures ([`SessionError::Capability`], [`SessionError::InsecureContext`])
//! stop an operation before any hardware call. Hardware faults are classified into
//! [`ReadError`] and [`WriteError`] at the session boundary. [`DecodeFault`] never
//! escapes a single record.

use thiserror::Error;

#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum ComposeError {
    #[error("nothing to write: the content is empty")]
    EmptyContent,
    #[error("nothing to write: the handle is empty")]
    EmptyHandle,
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("read failed: {message}")]
pub struct ReadError {
    pub message: String,
}

impl ReadError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("write failed: {message}")]
pub struct WriteError {
    pub message: String,
}

impl WriteError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SessionError {
    #[error("tag hardware is not supported on this device")]
    Capability,
    #[error("tag hardware requires a secure context; serve the app over HTTPS or from localhost")]
    InsecureContext,
    #[error(transparent)]
    Read(#[from] ReadError),
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DecodeFault {
    #[error("unknown text encoding '{0}'")]
    UnknownEncoding(String),
    #[error("data is not valid {encoding}")]
    Invalid { encoding: String },
    #[error("record payload is malformed")]
    Malformed,
}

#[derive(Debug, Error)]
pub enum GenerationError {
    #[error("no API key configured for text generation")]
    MissingApiKey,
    #[error("prompt is empty")]
    EmptyPrompt,
    #[error("generation request failed: {0}")]
    Request(String),
    #[error("generation service answered {status}: {body}")]
    Status { status: u16, body: String },
    #[error("generation service returned no content")]
    EmptyResponse,
}
