//! Transient user notices.
//!
//! Every notice is logged when raised and stays listed until it is dismissed
//! or its time to live runs out. The dismiss timer belongs to the notice, so
//! removing a notice early, or dropping the last [`Notifier`], stops its timer.

use std::collections::BTreeMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use tokio::task::JoinHandle;
use tracing::{debug, error, info};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    Success,
    Error,
    Info,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NoticeId(u64);

struct Notice {
    kind: NoticeKind,
    text: String,
    _timer: DismissTimer,
}

struct DismissTimer(JoinHandle<()>);

impl Drop for DismissTimer {
    fn drop(&mut self) {
        self.0.abort();
    }
}

type Notices = Mutex<BTreeMap<NoticeId, Notice>>;

#[derive(Clone)]
pub struct Notifier {
    notices: Arc<Notices>,
    next_id: Arc<AtomicU64>,
    ttl: Duration,
}

impl Notifier {
    pub fn new(ttl: Duration) -> Self {
        Self {
            notices: Arc::new(Mutex::new(BTreeMap::new())),
            next_id: Arc::new(AtomicU64::new(1)),
            ttl,
        }
    }

    pub fn success(&self, text: impl Into<String>) -> NoticeId {
        self.push(NoticeKind::Success, text.into())
    }

    pub fn error(&self, text: impl Into<String>) -> NoticeId {
        self.push(NoticeKind::Error, text.into())
    }

    pub fn info(&self, text: impl Into<String>) -> NoticeId {
        self.push(NoticeKind::Info, text.into())
    }

    /// Removes a notice before its timer fires. Returns whether it was still shown.
    pub fn dismiss(&self, id: NoticeId) -> bool {
        let Some(notice) = lock(&self.notices).remove(&id) else {
            return false;
        };
        debug!(kind = ?notice.kind, "dismissed: {}", notice.text);
        true
    }

    /// Notices currently shown, oldest first.
    #[cfg(test)]
    pub fn active(&self) -> Vec<(NoticeId, NoticeKind, String)> {
        lock(&self.notices)
            .iter()
            .map(|(id, notice)| (*id, notice.kind, notice.text.clone()))
            .collect()
    }

    fn push(&self, kind: NoticeKind, text: String) -> NoticeId {
        match kind {
            NoticeKind::Error => error!("{text}"),
            NoticeKind::Success | NoticeKind::Info => info!("{text}"),
        }

        let id = NoticeId(self.next_id.fetch_add(1, Ordering::Relaxed));
        let notices = Arc::downgrade(&self.notices);
        let ttl = self.ttl;

        // The timer cannot remove the entry before it is inserted; it needs this lock.
        let mut shown = lock(&self.notices);
        let timer = tokio::spawn(async move {
            tokio::time::sleep(ttl).await;
            if let Some(notices) = notices.upgrade() {
                lock(&notices).remove(&id);
            }
        });
        shown.insert(
            id,
            Notice {
                kind,
                text,
                _timer: DismissTimer(timer),
            },
        );
        id
    }
}

fn lock(notices: &Notices) -> MutexGuard<'_, BTreeMap<NoticeId, Notice>> {
    notices.lock().unwrap_or_else(PoisonError::into_inner)
}

#[cfg(test)]
mod tests {
    use super::*;

    const SHORT: Duration = Duration::from_millis(20);

    #[tokio::test]
    async fn notices_expire_after_their_ttl() {
        let notifier = Notifier::new(SHORT);
        notifier.success("Tag written.");
        assert_eq!(notifier.active().len(), 1);

        tokio::time::sleep(SHORT * 10).await;
        assert!(notifier.active().is_empty());
    }

    #[tokio::test]
    async fn dismissed_notice_is_gone_at_once() {
        let notifier = Notifier::new(Duration::from_secs(60));
        let first = notifier.info("Approach an NFC tag to read it.");
        let second = notifier.error("read failed");

        assert!(notifier.dismiss(first));
        assert!(!notifier.dismiss(first));

        let active = notifier.active();
        assert_eq!(active.len(), 1);
        assert_eq!(active[0].0, second);
        assert_eq!(active[0].1, NoticeKind::Error);
    }

    #[tokio::test]
    async fn notices_are_listed_oldest_first() {
        let notifier = Notifier::new(Duration::from_secs(60));
        notifier.info("one");
        notifier.success("two");

        let texts: Vec<String> = notifier.active().into_iter().map(|(_, _, text)| text).collect();
        assert_eq!(texts, ["one", "two"]);
    }

    #[tokio::test]
    async fn dismissing_stops_the_timer() {
        let notifier = Notifier::new(Duration::from_secs(60));
        let id = notifier.info("hello");

        let timer = {
            let shown = lock(&notifier.notices);
            shown[&id]._timer.0.abort_handle()
        };
        notifier.dismiss(id);

        tokio::task::yield_now().await;
        tokio::time::sleep(SHORT).await;
        assert!(timer.is_finished());
    }
}
