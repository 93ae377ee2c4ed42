//! Sequential job groups.

use std::sync::Arc;

use async_trait::async_trait;

use crate::error::Result;
use crate::job::Job;

/// An ordered composite of jobs, run strictly in declared order.
///
/// The group is a sequential barrier: a child must return before the next
/// one starts, and a failing child stops the group immediately: its
/// error propagates unchanged and the remaining children are never
/// started.
pub struct JobGroup {
    name: String,
    children: Vec<Arc<dyn Job>>,
}

impl JobGroup {
    /// Create a group over an ordered list of child jobs.
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
impl Job for JobGroup {
    fn name(&self) -> &str {
        &self.name
    }

    #[tracing::instrument(skip(self), fields(group = %self.name, children = self.children.len()))]
    async fn run(&self) -> Result<()> {
        for (position, child) in self.children.iter().enumerate() {
            tracing::debug!(position, child = %child.name(), "running child job");
            child.run().await?;
        }

        tracing::debug!("group completed");
        Ok(())
    }
}
