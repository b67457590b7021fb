use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use tagforge_common::error::ReadError;
use tagforge_common::hardware::{ScanEvent, TagCapability};
use tagforge_common::tag::record::{InboundRecord, OutboundRecord, ScanReport};
use tagforge_common::token::CancelToken;
use tokio::sync::mpsc;

/// Long enough for spawned listeners to run, short enough to keep the suite fast.
pub const SETTLE: Duration = Duration::from_millis(50);
pub const WAIT: Duration = Duration::from_secs(2);

#[derive(Debug, Clone, Copy)]
pub enum WritePlan {
    Ack,
    Reject(&'static str),
    /// Never completes on its own; only cancellation ends it.
    Hang,
}

/// Scriptable reader. Scans stay armed until the test emits an event.
pub struct FakeReader {
    scans: Mutex<Vec<(CancelToken, mpsc::Sender<ScanEvent>)>>,
    writes: Mutex<Vec<Vec<OutboundRecord>>>,
    plan: WritePlan,
}

impl FakeReader {
    pub fn new(plan: WritePlan) -> Arc<Self> {
        Arc::new(Self {
            scans: Mutex::new(Vec::new()),
            writes: Mutex::new(Vec::new()),
            plan,
        })
    }

    /// Tokens of every scan armed so far, oldest first.
    pub fn scan_tokens(&self) -> Vec<CancelToken> {
        self.scans
            .lock()
            .unwrap()
            .iter()
            .map(|(token, _)| token.clone())
            .collect()
    }

    /// Delivers `event` to the `idx`-th scan. `false` if nobody listens anymore.
    pub async fn emit(&self, idx: usize, event: ScanEvent) -> bool {
        let tx = self.scans.lock().unwrap()[idx].1.clone();
        tx.send(event).await.is_ok()
    }

    pub fn writes(&self) -> Vec<Vec<OutboundRecord>> {
        self.writes.lock().unwrap().clone()
    }
}

#[async_trait]
impl TagCapability for FakeReader {
    fn is_supported(&self) -> bool {
        true
    }

    async fn scan(&self, token: CancelToken) -> anyhow::Result<mpsc::Receiver<ScanEvent>> {
        let (tx, rx) = mpsc::channel(4);
        self.scans.lock().unwrap().push((token, tx));
        Ok(rx)
    }

    async fn write(&self, records: &[OutboundRecord], token: CancelToken) -> anyhow::Result<()> {
        self.writes.lock().unwrap().push(records.to_vec());
        match self.plan {
            WritePlan::Ack => Ok(()),
            WritePlan::Reject(message) => anyhow::bail!(message),
            WritePlan::Hang => {
                token.cancelled().await;
                anyhow::bail!("aborted")
            }
        }
    }
}

pub type Delivery = Result<ScanReport, ReadError>;

/// Scan callbacks that forward whatever they are given to the returned channel.
pub fn callbacks() -> (
    impl FnOnce(ScanReport) + Send + 'static,
    impl FnOnce(ReadError) + Send + 'static,
    mpsc::UnboundedReceiver<Delivery>,
) {
    let (tx, rx) = mpsc::unbounded_channel();
    let err_tx = tx.clone();
    (
        move |report| {
            let _ = tx.send(Ok(report));
        },
        move |err| {
            let _ = err_tx.send(Err(err));
        },
        rx,
    )
}

pub fn detected(records: Vec<InboundRecord>) -> ScanEvent {
    ScanEvent::TagDetected {
        records,
        serial_number: Some("04:a2:3b:91:c2:5e:80".to_string()),
    }
}
