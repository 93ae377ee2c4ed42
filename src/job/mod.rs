//! Jobs: named, runnable units of batch work.
//!
//! A [`Job`] is the one capability everything in a batch tree shares: it
//! has a name and it can be run. The concrete kinds are:
//! - [`SimpleJob`]: applies a task+converter pair across an ordered
//!   parameter list.
//! - [`JobGroup`]: runs children strictly in declared order, fail-fast.
//! - [`ParallelJobGroup`]: runs children concurrently and joins all of
//!   them before reporting.
//!
//! Composites hold `Arc<dyn Job>` children: a job tree is a plain
//! ownership tree rooted at the outermost group, and `Arc` lets a parallel
//! group move children into spawned tasks.

use async_trait::async_trait;

use crate::error::Result;

mod group;
mod mock;
mod parallel;
mod simple;

pub use group::JobGroup;
pub use mock::{MockJob, RunLog};
pub use parallel::ParallelJobGroup;
pub use simple::SimpleJob;

/// A named, runnable unit of batch work.
///
/// `run` executes the unit to completion and reports success or failure;
/// it returns no data. Jobs that produce typed output (like
/// [`SimpleJob`]) expose it through an inherent method instead.
///
/// `run` is not required to be safe to call concurrently on the same
/// instance; each invocation is an independent execution of the same
/// declared work.
#[async_trait]
pub trait Job: Send + Sync {
    /// The job's immutable identity.
    fn name(&self) -> &str;

    /// Execute the unit of work.
    ///
    /// # Errors
    /// Fails with [`BatchError`](crate::BatchError) if any step of the
    /// work fails.
    async fn run(&self) -> Result<()>;
}
