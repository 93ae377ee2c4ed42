//! Error types for the batch framework.

use thiserror::Error;

/// Result type alias using the volley error type.
pub type Result<T> = std::result::Result<T, BatchError>;

/// Main error type for the batch framework.
///
/// Every failure anywhere in a job tree surfaces as a `BatchError`, so
/// callers can match on "a batch step failed" without catching arbitrary
/// runtime faults. Variants carry the job name, the failing parameter
/// index where one exists, and the underlying cause.
#[derive(Error, Debug)]
pub enum BatchError {
    /// A task or converter step failed for one parameter
    #[error("job '{job}' failed at parameter {index}: {source}")]
    Step {
        job: String,
        index: usize,
        #[source]
        source: anyhow::Error,
    },

    /// A job failed as a whole
    #[error("job '{job}' failed: {source}")]
    Job {
        job: String,
        #[source]
        source: anyhow::Error,
    },

    /// A spawned child job panicked or was aborted before completing
    #[error("group '{group}': child '{child}' terminated unexpectedly")]
    ChildTerminated { group: String, child: String },

    /// One or more children of a parallel group failed
    #[error("group '{group}': {failed} of {total} child jobs failed", failed = .failures.len())]
    Aggregate {
        group: String,
        total: usize,
        failures: Vec<BatchError>,
    },

    /// I/O error from a reader/writer adapter
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// General error from anyhow
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl BatchError {
    /// The name of the job this error originated in, if the variant carries one.
    pub fn job_name(&self) -> Option<&str> {
        match self {
            BatchError::Step { job, .. } | BatchError::Job { job, .. } => Some(job),
            BatchError::Aggregate { group, .. } | BatchError::ChildTerminated { group, .. } => {
                Some(group)
            }
            BatchError::Io(_) | BatchError::Serialization(_) | BatchError::Other(_) => None,
        }
    }

    /// Child failures collected by a parallel group, empty for other variants.
    pub fn failures(&self) -> &[BatchError] {
        match self {
            BatchError::Aggregate { failures, .. } => failures,
            _ => &[],
        }
    }
}
