//! Simple jobs: one task + one converter applied over a parameter list.

use async_trait::async_trait;

use crate::error::{BatchError, Result};
use crate::job::Job;
use crate::task::{Converter, Task};

/// A job that applies `task.execute` then `converter.convert` to every
/// parameter in its owned list, preserving order.
///
/// The output list is position-for-position: parameter `i` produces
/// output `i`, and the two lists always have the same length. Parameters
/// are processed sequentially; a failure at any position fails the whole
/// run and discards outputs computed so far.
///
/// # Example
/// ```ignore
/// let job = SimpleJob::new("stock-check", urls, FetchTask::new(), StockConverter);
/// let stocks = job.collect().await?;
/// ```
pub struct SimpleJob<T, C>
where
    T: Task,
    C: Converter<Input = T::Output>,
{
    name: String,
    parameters: Vec<T::Param>,
    task: T,
    converter: C,
}

impl<T, C> SimpleJob<T, C>
where
    T: Task,
    C: Converter<Input = T::Output>,
{
    /// Create a new simple job over an ordered parameter list.
    pub fn new(
        name: impl Into<String>,
        parameters: Vec<T::Param>,
        task: T,
        converter: C,
    ) -> Self {
        Self {
            name: name.into(),
            parameters,
            task,
            converter,
        }
    }

    /// Number of parameters this job will process.
    pub fn len(&self) -> usize {
        self.parameters.len()
    }

    /// Whether the parameter list is empty.
    pub fn is_empty(&self) -> bool {
        self.parameters.is_empty()
    }

    /// Run the job and return the ordered outputs.
    ///
    /// An empty parameter list yields an empty, non-error output list.
    ///
    /// # Errors
    /// Fails with [`BatchError::Step`] carrying the index of the first
    /// failing parameter; no partial output list is returned.
    #[tracing::instrument(skip(self), fields(job = %self.name, parameters = self.parameters.len()))]
    pub async fn collect(&self) -> Result<Vec<C::Output>> {
        let mut outputs = Vec::with_capacity(self.parameters.len());

        for (index, param) in self.parameters.iter().enumerate() {
            tracing::debug!(index, "executing task");

            let result = self
                .task
                .execute(param)
                .await
                .map_err(|source| self.step_error(index, source))?;

            let output = self
                .converter
                .convert(result)
                .map_err(|source| self.step_error(index, source))?;

            outputs.push(output);
        }

        tracing::debug!(outputs = outputs.len(), "job completed");
        Ok(outputs)
    }

    fn step_error(&self, index: usize, source: anyhow::Error) -> BatchError {
        tracing::error!(job = %self.name, index, error = %source, "step failed");
        BatchError::Step {
            job: self.name.clone(),
            index,
            source,
        }
    }
}

#[async_trait]
impl<T, C> Job for SimpleJob<T, C>
where
    T: Task,
    C: Converter<Input = T::Output>,
{
    fn name(&self) -> &str {
        &self.name
    }

    async fn run(&self) -> Result<()> {
        self.collect().await.map(|_| ())
    }
}
