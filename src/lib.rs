//! Batch-execution framework: tasks, converters, and composable jobs.
//!
//! A unit of work is described as "apply a task to each of N parameters,
//! convert each result, and run multiple such units sequentially or in
//! parallel". [`SimpleJob`] drives one [`Task`]+[`Converter`] pair over an
//! ordered parameter list; [`JobGroup`] sequences child jobs fail-fast;
//! [`ParallelJobGroup`] fans children out onto the runtime and joins all
//! of them, aggregating every failure.
//!
//! Any failure anywhere in a job tree fails the top-level `run` with a
//! [`BatchError`]; there is no partial-success return value.

pub mod error;
pub mod fetch;
pub mod io;
pub mod job;
pub mod task;

// Re-export commonly used types
pub use error::{BatchError, Result};
pub use fetch::{FetchConfig, FetchTask};
pub use io::{JsonLinesWriter, LineReader};
pub use job::{Job, JobGroup, MockJob, ParallelJobGroup, RunLog, SimpleJob};
pub use task::{Converter, IdentityConverter, Task};
