//! Parallel job groups.

use std::sync::Arc;

use async_trait::async_trait;

use crate::error::{BatchError, Result};
use crate::job::Job;

/// A composite of jobs run concurrently and joined before completion.
///
/// Every child is spawned onto the runtime without waiting for any other
/// child; `run` returns only after all of them have finished, whether
/// they succeeded or failed. Child failures do not abort siblings: the
/// group runs to completion and then reports every collected failure in
/// a single [`BatchError::Aggregate`].
///
/// No ordering is guaranteed between children, and no synchronization is
/// provided for them: children must not share mutable state. There is no
/// cancellation; a child that hangs blocks the whole group's completion.
pub struct ParallelJobGroup {
    name: String,
    children: Vec<Arc<dyn Job>>,
}

impl ParallelJobGroup {
    /// Create a parallel group over a list of child jobs.
    pub fn new(name: impl Into<String>, children: Vec<Arc<dyn Job>>) -> Self {
        Self {
            name: name.into(),
            children,
        }
    }

    /// Number of child jobs in this group.
    pub fn len(&self) -> usize {
        self.children.len()
    }

    /// Whether the group has no children.
    pub fn is_empty(&self) -> bool {
        self.children.is_empty()
    }
}

#[async_trait]
impl Job for ParallelJobGroup {
    fn name(&self) -> &str {
        &self.name
    }

    #[tracing::instrument(skip(self), fields(group = %self.name, children = self.children.len()))]
    async fn run(&self) -> Result<()> {
        let total = self.children.len();

        // Fan out: start every child without waiting on any other.
        // Named handles (rather than a JoinSet) so a panicked child can be
        // attributed by name when it is harvested.
        let mut handles = Vec::with_capacity(total);
        for child in &self.children {
            let child = Arc::clone(child);
            let child_name = child.name().to_string();
            tracing::debug!(child = %child_name, "spawning child job");
            handles.push((child_name, tokio::spawn(async move { child.run().await })));
        }

        // Join: harvest every child before reporting anything.
        let mut failures = Vec::new();
        for (child_name, handle) in handles {
            match handle.await {
                Ok(Ok(())) => {
                    tracing::debug!(child = %child_name, "child job completed");
                }
                Ok(Err(err)) => {
                    tracing::warn!(child = %child_name, error = %err, "child job failed");
                    failures.push(err);
                }
                Err(join_err) => {
                    tracing::error!(child = %child_name, error = %join_err, "child job terminated");
                    failures.push(BatchError::ChildTerminated {
                        group: self.name.clone(),
                        child: child_name,
                    });
                }
            }
        }

        if failures.is_empty() {
            tracing::debug!("group completed");
            Ok(())
        } else {
            Err(BatchError::Aggregate {
                group: self.name.clone(),
                total,
                failures,
            })
        }
    }
}
