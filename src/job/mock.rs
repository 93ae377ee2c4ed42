//! Mock job for testing.
//!
//! Allows asserting on ordering, fail-fast skipping, and join semantics
//! without wiring up real tasks.

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use parking_lot::Mutex;
use tokio::sync::oneshot;

use crate::error::{BatchError, Result};
use crate::job::Job;

/// Shared, ordered record of which jobs ran, in completion order.
pub type RunLog = Arc<Mutex<Vec<String>>>;

/// Mock job with a configurable outcome.
///
/// Records how many times it was started and completed, optionally
/// appends its name to a shared [`RunLog`], and can be held mid-run
/// behind a [`oneshot`] trigger to simulate a slow child.
///
/// # Example
/// ```ignore
/// let (slow, release) = MockJob::succeeding("slow").with_trigger();
/// // ... group.run() is now blocked on "slow" ...
/// release.send(()).unwrap();
/// ```
pub struct MockJob {
    name: String,
    error: Option<String>,
    log: Option<RunLog>,
    trigger: Mutex<Option<oneshot::Receiver<()>>>,
    started: Arc<AtomicUsize>,
    completed: Arc<AtomicUsize>,
}

impl MockJob {
    /// Create a mock job whose `run` succeeds.
    pub fn succeeding(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            error: None,
            log: None,
            trigger: Mutex::new(None),
            started: Arc::new(AtomicUsize::new(0)),
            completed: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Create a mock job whose `run` fails with the given message.
    pub fn failing(name: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            error: Some(message.into()),
            ..Self::succeeding(name)
        }
    }

    /// Append this job's name to a shared log each time it completes a run.
    pub fn with_log(mut self, log: RunLog) -> Self {
        self.log = Some(log);
        self
    }

    /// Hold `run` until the returned sender is triggered (or dropped).
    pub fn with_trigger(mut self) -> (Self, oneshot::Sender<()>) {
        let (tx, rx) = oneshot::channel();
        self.trigger = Mutex::new(Some(rx));
        (self, tx)
    }

    /// Number of times `run` has been entered.
    pub fn started_count(&self) -> usize {
        self.started.load(Ordering::SeqCst)
    }

    /// Number of times `run` has returned (successfully or not).
    pub fn completed_count(&self) -> usize {
        self.completed.load(Ordering::SeqCst)
    }

    /// Handle for reading the started count after the job moved into a group.
    pub fn started_handle(&self) -> Arc<AtomicUsize> {
        self.started.clone()
    }

    /// Handle for reading the completed count after the job moved into a group.
    pub fn completed_handle(&self) -> Arc<AtomicUsize> {
        self.completed.clone()
    }
}

#[async_trait]
impl Job for MockJob {
    fn name(&self) -> &str {
        &self.name
    }

    async fn run(&self) -> Result<()> {
        self.started.fetch_add(1, Ordering::SeqCst);

        // Wait for the trigger signal, if one was configured (proceed
        // either way if the sender was dropped).
        let rx = self.trigger.lock().take();
        if let Some(rx) = rx {
            let _ = rx.await;
        }

        if let Some(log) = &self.log {
            log.lock().push(self.name.clone());
        }
        self.completed.fetch_add(1, Ordering::SeqCst);

        match &self.error {
            Some(message) => Err(BatchError::Job {
                job: self.name.clone(),
                source: anyhow::anyhow!("{message}"),
            }),
            None => Ok(()),
        }
    }
}
