//! A **file-backed tag**.
//!
//! The tag image is a raw NDEF message on disk. A tag counts as "tapped" while
//! its image exists, so scanning polls for the file and writing waits for the
//! directory it lives in.

use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, ensure};
use async_trait::async_trait;
use tagforge_common::config::DEFAULT_POLL_INTERVAL;
use tagforge_common::hardware::{ScanEvent, TagCapability};
use tagforge_common::tag::record::OutboundRecord;
use tagforge_common::token::CancelToken;
use tagforge_protocols as protocol;
use tokio::sync::mpsc;
use tracing::{debug, warn};

pub struct FileTag {
    path: PathBuf,
    capacity: usize,
    poll_interval: Duration,
    serial_number: String,
}

impl FileTag {
    pub fn new(path: PathBuf, capacity: usize) -> Self {
        let serial_number = serial_from_path(&path);
        Self {
            path,
            capacity,
            poll_interval: DEFAULT_POLL_INTERVAL,
            serial_number,
        }
    }

    pub fn with_poll_interval(mut self, poll_interval: Duration) -> Self {
        self.poll_interval = poll_interval;
        self
    }

    pub fn with_serial_number(mut self, serial_number: impl Into<String>) -> Self {
        self.serial_number = serial_number.into();
        self
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn field(&self) -> &Path {
        match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        }
    }
}

#[async_trait]
impl TagCapability for FileTag {
    fn is_supported(&self) -> bool {
        true
    }

    async fn scan(&self, token: CancelToken) -> anyhow::Result<mpsc::Receiver<ScanEvent>> {
        ensure!(
            self.field().is_dir(),
            "reader unavailable: {} does not exist",
            self.field().display()
        );

        let (tx, rx) = mpsc::channel(1);
        let path = self.path.clone();
        let poll_interval = self.poll_interval;
        let serial_number = self.serial_number.clone();

        tokio::spawn(async move {
            let Some(image) = wait_for_image(&path, poll_interval, &token).await else {
                debug!("scan of {} stopped", path.display());
                return;
            };

            let event = match image.map_err(anyhow::Error::from).and_then(|bytes| {
                protocol::get_records(&bytes).context("tag holds no readable NDEF message")
            }) {
                Ok(records) => ScanEvent::TagDetected {
                    records,
                    serial_number: Some(serial_number),
                },
                Err(err) => ScanEvent::ReadError {
                    message: format!("{err:#}"),
                },
            };

            // A closed receiver means the session moved on.
            let _ = tx.send(event).await;
        });

        Ok(rx)
    }

    async fn write(&self, records: &[OutboundRecord], token: CancelToken) -> anyhow::Result<()> {
        let message: Vec<u8> = protocol::create_message(records).context("encoding message")?;
        ensure!(
            message.len() <= self.capacity,
            "insufficient capacity: message needs {} bytes, tag holds {}",
            message.len(),
            self.capacity
        );

        while !self.field().is_dir() {
            tokio::select! {
                _ = token.cancelled() => anyhow::bail!("write aborted before a tag was tapped"),
                _ = tokio::time::sleep(self.poll_interval) => {}
            }
        }
        ensure!(!token.is_cancelled(), "write aborted before a tag was tapped");

        let staging = self.path.with_extension("partial");
        tokio::fs::write(&staging, &message)
            .await
            .with_context(|| format!("writing {}", staging.display()))?;
        if let Err(err) = tokio::fs::rename(&staging, &self.path).await {
            warn!("Tag removed mid-write: {err}");
            let _ = tokio::fs::remove_file(&staging).await;
            return Err(err).context("tag was removed before the write completed");
        }

        debug!("wrote {} bytes to {}", message.len(), self.path.display());
        Ok(())
    }
}

/// Polls until the image exists. `None` once `token` is cancelled.
async fn wait_for_image(
    path: &Path,
    poll_interval: Duration,
    token: &CancelToken,
) -> Option<std::io::Result<Vec<u8>>> {
    loop {
        if token.is_cancelled() {
            return None;
        }

        match tokio::fs::read(path).await {
            Ok(bytes) => return Some(Ok(bytes)),
            Err(err) if err.kind() == ErrorKind::NotFound => {}
            Err(err) => return Some(Err(err)),
        }

        tokio::select! {
            _ = token.cancelled() => return None,
            _ = tokio::time::sleep(poll_interval) => {}
        }
    }
}

/// Seven-byte UID in the usual colon notation, stable per image path.
fn serial_from_path(path: &Path) -> String {
    let mut hasher = DefaultHasher::new();
    path.hash(&mut hasher);
    let digest = hasher.finish().to_be_bytes();

    std::iter::once(0x04)
        .chain(digest.into_iter().take(6))
        .map(|byte| format!("{byte:02x}"))
        .collect::<Vec<String>>()
        .join(":")
}
