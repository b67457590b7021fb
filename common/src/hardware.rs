//! # Hardware Port
//!
//! The contract between the tag session and whatever radio the platform provides.
//! Adapters live in `tagforge-core::hardware`.

use async_trait::async_trait;
use tokio::sync::mpsc;

use crate::tag::record::{InboundRecord, OutboundRecord};
use crate::token::CancelToken;

/// Outcome of one physical tap while scanning. At most one is delivered per tap.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScanEvent {
    TagDetected {
        records: Vec<InboundRecord>,
        serial_number: Option<String>,
    },
    ReadError {
        message: String,
    },
}

#[async_trait]
pub trait TagCapability: Send + Sync {
    fn is_supported(&self) -> bool;

    /// Arms the reader.
    ///
    /// Events are delivered on the returned channel and are bound to `token`:
    /// once it is cancelled the adapter should stop listening.
    async fn scan(&self, token: CancelToken) -> anyhow::Result<mpsc::Receiver<ScanEvent>>;

    /// Writes `records` as one message, waiting for a tag to be tapped.
    ///
    /// The error carries the hardware's own message.
    async fn write(&self, records: &[OutboundRecord], token: CancelToken) -> anyhow::Result<()>;
}
