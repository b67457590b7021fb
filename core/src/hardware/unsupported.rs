use async_trait::async_trait;
use tagforge_common::hardware::{ScanEvent, TagCapability};
use tagforge_common::tag::record::OutboundRecord;
use tagforge_common::token::CancelToken;
use tokio::sync::mpsc;

/// A device without tag hardware.
pub struct Unsupported;

#[async_trait]
impl TagCapability for Unsupported {
    fn is_supported(&self) -> bool {
        false
    }

    async fn scan(&self, _token: CancelToken) -> anyhow::Result<mpsc::Receiver<ScanEvent>> {
        anyhow::bail!("no tag reader on this device")
    }

    async fn write(&self, _records: &[OutboundRecord], _token: CancelToken) -> anyhow::Result<()> {
        anyhow::bail!("no tag reader on this device")
    }
}
