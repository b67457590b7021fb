//! The **tag session**: one scan or write operation at a time against the
//! injected [`TagCapability`].
//!
//! ```text
//! Idle --start_scan--> Listening --tag | read error | cancel--> Idle
//! Idle --write-------> Listening --ack | hardware error | cancel--> Idle
//! ```
//!
//! Each armed operation gets a fresh [`CancelToken`]. Starting a new operation
//! cancels the current token first; there is no queue. Hardware events are
//! delivered asynchronously and may arrive after the token they were armed with
//! has been cancelled. Such events are dropped without invoking any callback.
//!
//! A session handle is cheap to clone. Dropping the last handle cancels whatever
//! is still armed.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError, Weak};

use tagforge_common::error::{ReadError, SessionError, WriteError};
use tagforge_common::hardware::{ScanEvent, TagCapability};
use tagforge_common::tag::record::{OutboundRecord, ScanReport};
use tagforge_common::tag::state::{SessionState, WriteOutcome};
use tagforge_common::token::CancelToken;
use tokio::sync::mpsc;
use tracing::debug;

use crate::decoder;

#[derive(Clone)]
pub struct TagSession {
    inner: Arc<Inner>,
}

struct Inner {
    capability: Arc<dyn TagCapability>,
    shared: Mutex<Shared>,
}

#[derive(Default)]
struct Shared {
    state: SessionState,
    generation: u64,
    token: Option<CancelToken>,
}

impl Shared {
    fn is_current(&self, token: &CancelToken) -> bool {
        !token.is_cancelled()
            && self
                .token
                .as_ref()
                .is_some_and(|current| current.generation() == token.generation())
    }
}

impl TagSession {
    /// Opens a session, refusing outright outside a secure context so no
    /// hardware call can ever be made from one.
    pub fn open(
        capability: Arc<dyn TagCapability>,
        secure_context: bool,
    ) -> Result<Self, SessionError> {
        if !secure_context {
            return Err(SessionError::InsecureContext);
        }

        Ok(Self {
            inner: Arc::new(Inner {
                capability,
                shared: Mutex::new(Shared::default()),
            }),
        })
    }

    pub fn state(&self) -> SessionState {
        self.inner.lock().state
    }

    pub fn is_listening(&self) -> bool {
        self.state() == SessionState::Listening
    }

    /// Arms the reader for one tap.
    ///
    /// Exactly one of `on_record` and `on_error` is invoked, unless the scan is
    /// cancelled or replaced first, in which case neither is. A scan already in
    /// progress is cancelled before the new one is armed.
    pub async fn start_scan<F, E>(&self, on_record: F, on_error: E) -> Result<(), SessionError>
    where
        F: FnOnce(ScanReport) + Send + 'static,
        E: FnOnce(ReadError) + Send + 'static,
    {
        self.ensure_supported()?;

        let token = self.inner.arm();
        let events = match self.inner.capability.scan(token.clone()).await {
            Ok(events) => events,
            Err(err) => {
                self.inner.release(&token);
                debug!("reader refused to arm: {err:#}");
                return Err(ReadError::new(format!("{err:#}")).into());
            }
        };

        debug!(generation = token.generation(), "reader armed");
        let session = Arc::downgrade(&self.inner);
        tokio::spawn(listen(session, token, events, on_record, on_error));
        Ok(())
    }

    /// Cancels the armed operation, if any. Returns whether something was cancelled.
    pub fn cancel(&self) -> bool {
        let mut shared = self.inner.lock();
        let Some(token) = shared.token.take() else {
            return false;
        };

        token.cancel();
        shared.state = SessionState::Idle;
        debug!(generation = token.generation(), "operation cancelled");
        true
    }

    /// Writes `record` as a single-record message, waiting until a tag is tapped.
    ///
    /// Hardware faults settle as [`WriteOutcome::Failed`]; only preflight
    /// problems are errors. The session is back to `Idle` when this returns, and
    /// also if the returned future is dropped before completing.
    pub async fn write(&self, record: OutboundRecord) -> Result<WriteOutcome, SessionError> {
        self.ensure_supported()?;

        let token = self.inner.arm();
        let _armed = Armed {
            inner: &*self.inner,
            token: token.clone(),
        };

        debug!(
            generation = token.generation(),
            record_type = record.record_type(),
            "waiting for a tag to write"
        );
        let records = [record];

        let outcome = tokio::select! {
            biased;
            _ = token.cancelled() => WriteOutcome::Cancelled,
            result = self.inner.capability.write(&records, token.clone()) => match result {
                Ok(()) => WriteOutcome::Succeeded,
                Err(err) => WriteOutcome::Failed(WriteError::new(format!("{err:#}"))),
            },
        };

        match &outcome {
            WriteOutcome::Succeeded => debug!(generation = token.generation(), "write acknowledged"),
            WriteOutcome::Failed(err) => debug!(generation = token.generation(), "write failed: {err}"),
            WriteOutcome::Cancelled => debug!(generation = token.generation(), "write cancelled"),
        }
        Ok(outcome)
    }

    fn ensure_supported(&self) -> Result<(), SessionError> {
        if self.inner.capability.is_supported() {
            Ok(())
        } else {
            Err(SessionError::Capability)
        }
    }
}

impl Inner {
    fn lock(&self) -> MutexGuard<'_, Shared> {
        self.shared.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Cancels the current operation, then mints the token for a new one.
    fn arm(&self) -> CancelToken {
        let mut shared = self.lock();
        if let Some(previous) = shared.token.take() {
            debug!(generation = previous.generation(), "replacing armed operation");
            previous.cancel();
        }

        shared.generation += 1;
        let token = CancelToken::new(shared.generation);
        shared.token = Some(token.clone());
        shared.state = SessionState::Listening;
        token
    }

    /// Settles the operation armed with `token`.
    ///
    /// Returns `false` if it was no longer current, i.e. it was cancelled or
    /// replaced. In that case the session state belongs to someone else and is
    /// left alone.
    fn release(&self, token: &CancelToken) -> bool {
        let mut shared = self.lock();
        let current = shared.is_current(token);
        token.cancel();

        if current {
            shared.token = None;
            shared.state = SessionState::Idle;
        }
        current
    }

    /// Routes one hardware event to the matching callback if `token` is still current.
    fn dispatch<F, E>(&self, token: &CancelToken, event: Option<ScanEvent>, on_record: F, on_error: E) -> bool
    where
        F: FnOnce(ScanReport),
        E: FnOnce(ReadError),
    {
        if !self.release(token) {
            debug!(generation = token.generation(), "dropping event for a stale scan");
            return false;
        }

        match event {
            Some(ScanEvent::TagDetected {
                records,
                serial_number,
            }) => {
                debug!(
                    records = records.len(),
                    serial = serial_number.as_deref().unwrap_or("unknown"),
                    "tag detected"
                );
                on_record(ScanReport {
                    serial_number,
                    records: decoder::decode_message(&records),
                });
            }
            Some(ScanEvent::ReadError { message }) => on_error(ReadError::new(message)),
            None => on_error(ReadError::new("reader stopped before a tag was detected")),
        }
        true
    }
}

impl Drop for Inner {
    fn drop(&mut self) {
        let shared = self.shared.get_mut().unwrap_or_else(PoisonError::into_inner);
        if let Some(token) = shared.token.take() {
            debug!(generation = token.generation(), "session dropped while armed");
            token.cancel();
        }
    }
}

/// Releases a write on every exit path, including when its future is dropped.
struct Armed<'a> {
    inner: &'a Inner,
    token: CancelToken,
}

impl Drop for Armed<'_> {
    fn drop(&mut self) {
        self.inner.release(&self.token);
    }
}

async fn listen<F, E>(
    session: Weak<Inner>,
    token: CancelToken,
    mut events: mpsc::Receiver<ScanEvent>,
    on_record: F,
    on_error: E,
) where
    F: FnOnce(ScanReport) + Send + 'static,
    E: FnOnce(ReadError) + Send + 'static,
{
    let event = tokio::select! {
        biased;
        _ = token.cancelled() => return,
        event = events.recv() => event,
    };

    // The owner is gone; nobody is waiting for the callbacks.
    let Some(session) = session.upgrade() else {
        return;
    };
    session.dispatch(&token, event, on_record, on_error);
}
