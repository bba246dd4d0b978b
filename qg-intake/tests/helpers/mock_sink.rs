//! In-memory sink with scripted behavior and call recording

use async_trait::async_trait;
use qg_intake::entry::WaitlistEntry;
use qg_intake::sinks::{SinkError, WaitlistSink};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

#[derive(Debug, Clone, Copy)]
pub enum Behavior {
    Succeed,
    Fail,
    /// Never completes within any reasonable timeout
    Hang,
}

pub struct MockSink {
    id: &'static str,
    behavior: Behavior,
    calls: AtomicUsize,
    received: Mutex<Vec<WaitlistEntry>>,
}

impl MockSink {
    pub fn new(id: &'static str, behavior: Behavior) -> Arc<Self> {
        Arc::new(Self {
            id,
            behavior,
            calls: AtomicUsize::new(0),
            received: Mutex::new(Vec::new()),
        })
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn received(&self) -> Vec<WaitlistEntry> {
        self.received.lock().unwrap().clone()
    }
}

#[async_trait]
impl WaitlistSink for MockSink {
    fn sink_id(&self) -> &'static str {
        self.id
    }

    async fn deliver(&self, entry: &WaitlistEntry) -> Result<(), SinkError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.received.lock().unwrap().push(entry.clone());

        match self.behavior {
            Behavior::Succeed => Ok(()),
            Behavior::Fail => Err(SinkError::Api(503, "mock failure".to_string())),
            Behavior::Hang => {
                tokio::time::sleep(Duration::from_secs(3600)).await;
                Ok(())
            }
        }
    }
}
