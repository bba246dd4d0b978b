//! Sink fan-out with partial-failure aggregation
//!
//! Every configured sink is driven concurrently. Each branch is wrapped so
//! that a failure or timeout becomes a captured [`SinkOutcome`] instead of
//! an interruption: one sink's latency or error never affects the other's
//! recorded outcome. The caller decides success from the settled results
//! (fail only if every branch failed).

use crate::entry::WaitlistEntry;
use crate::sinks::WaitlistSink;
use qg_common::{SinkOutcome, SinkResults};
use std::fmt;
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info, warn};

/// The two sink slots of the service; `None` means not configured
#[derive(Clone)]
pub struct SinkSet {
    pub google_sheets: Option<Arc<dyn WaitlistSink>>,
    pub formspree: Option<Arc<dyn WaitlistSink>>,
    /// Upper bound on each sink call
    pub timeout: Duration,
}

impl SinkSet {
    /// No sinks configured
    pub fn empty(timeout: Duration) -> Self {
        Self {
            google_sheets: None,
            formspree: None,
            timeout,
        }
    }

    pub fn with_google_sheets(mut self, sink: Arc<dyn WaitlistSink>) -> Self {
        self.google_sheets = Some(sink);
        self
    }

    pub fn with_formspree(mut self, sink: Arc<dyn WaitlistSink>) -> Self {
        self.formspree = Some(sink);
        self
    }

    /// Number of configured sinks
    pub fn configured_count(&self) -> usize {
        usize::from(self.google_sheets.is_some()) + usize::from(self.formspree.is_some())
    }
}

/// Drive one optional operation to a captured outcome
///
/// * `None` - `NotConfigured`, nothing is run
/// * `Ok(())` within `limit` - `Success`
/// * `Err(_)` or timeout - `Error`, logged
pub async fn settle<F, E>(label: &str, operation: Option<F>, limit: Duration) -> SinkOutcome
where
    F: Future<Output = Result<(), E>>,
    E: fmt::Display,
{
    let Some(operation) = operation else {
        debug!(sink = label, "Sink not configured, skipping");
        return SinkOutcome::NotConfigured;
    };

    match tokio::time::timeout(limit, operation).await {
        Ok(Ok(())) => {
            debug!(sink = label, "Sink delivery succeeded");
            SinkOutcome::Success
        }
        Ok(Err(e)) => {
            warn!(sink = label, error = %e, "Sink delivery failed");
            SinkOutcome::Error
        }
        Err(_) => {
            warn!(
                sink = label,
                timeout_ms = limit.as_millis() as u64,
                "Sink delivery timed out"
            );
            SinkOutcome::Error
        }
    }
}

/// Deliver `entry` to every configured sink and collect the outcomes
pub async fn dispatch(sinks: &SinkSet, entry: &WaitlistEntry) -> SinkResults {
    let sheets = sinks.google_sheets.as_deref();
    let webhook = sinks.formspree.as_deref();

    let (google_sheets, formspree) = tokio::join!(
        settle(
            sheets.map_or("google_sheets", |sink| sink.sink_id()),
            sheets.map(|sink| sink.deliver(entry)),
            sinks.timeout,
        ),
        settle(
            webhook.map_or("formspree", |sink| sink.sink_id()),
            webhook.map(|sink| sink.deliver(entry)),
            sinks.timeout,
        ),
    );

    info!(
        position = entry.position,
        google_sheets = ?google_sheets,
        formspree = ?formspree,
        "Fan-out settled"
    );

    SinkResults {
        google_sheets,
        formspree,
        position: entry.position,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sinks::SinkError;
    use async_trait::async_trait;
    use chrono::Utc;
    use qg_common::WaitlistSubmission;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Instant;

    const LIMIT: Duration = Duration::from_millis(200);

    #[tokio::test]
    async fn test_settle_none_is_not_configured() {
        let op: Option<std::future::Ready<Result<(), String>>> = None;
        assert_eq!(settle("x", op, LIMIT).await, SinkOutcome::NotConfigured);
    }

    #[tokio::test]
    async fn test_settle_ok_and_err() {
        let ok = Some(async { Ok::<(), String>(()) });
        assert_eq!(settle("x", ok, LIMIT).await, SinkOutcome::Success);

        let err = Some(async { Err::<(), String>("boom".to_string()) });
        assert_eq!(settle("x", err, LIMIT).await, SinkOutcome::Error);
    }

    #[tokio::test]
    async fn test_settle_timeout_is_error() {
        let slow = Some(async {
            tokio::time::sleep(Duration::from_secs(5)).await;
            Ok::<(), String>(())
        });
        let start = Instant::now();
        assert_eq!(settle("x", slow, LIMIT).await, SinkOutcome::Error);
        assert!(start.elapsed() < Duration::from_secs(2));
    }

    struct LabelledSink {
        id_lookups: AtomicUsize,
        fail: bool,
    }

    #[async_trait]
    impl WaitlistSink for LabelledSink {
        fn sink_id(&self) -> &'static str {
            self.id_lookups.fetch_add(1, Ordering::SeqCst);
            "labelled"
        }

        async fn deliver(&self, _entry: &WaitlistEntry) -> Result<(), SinkError> {
            if self.fail {
                Err(SinkError::Network("unreachable".to_string()))
            } else {
                Ok(())
            }
        }
    }

    #[tokio::test]
    async fn test_dispatch_labels_each_configured_sink_by_its_id() {
        let sheets = Arc::new(LabelledSink {
            id_lookups: AtomicUsize::new(0),
            fail: true,
        });
        let set = SinkSet::empty(LIMIT).with_google_sheets(sheets.clone());
        let entry =
            WaitlistEntry::new("a@b.co".into(), WaitlistSubmission::default(), 4, Utc::now());

        let results = dispatch(&set, &entry).await;

        assert_eq!(results.google_sheets, SinkOutcome::Error);
        assert_eq!(results.formspree, SinkOutcome::NotConfigured);
        assert_eq!(results.position, 4);
        assert_eq!(sheets.id_lookups.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_configured_count() {
        let set = SinkSet::empty(LIMIT);
        assert_eq!(set.configured_count(), 0);
    }
}
