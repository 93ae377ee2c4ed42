//! Task and converter abstractions.
//!
//! These are the two strategy seams of the framework: a `Task` turns one
//! parameter into one result, a `Converter` turns one result into one
//! output value. `SimpleJob` drives a task+converter pair across an
//! ordered parameter list.

use async_trait::async_trait;

/// A pure computation: one parameter in, one result out.
///
/// Implementations may hold internal configuration (e.g., a network
/// client) but must not keep mutable run-to-run state the framework would
/// have to know about. Failures are returned as `anyhow::Error`; the
/// framework wraps them into [`BatchError`](crate::BatchError) with the
/// job name and parameter index attached.
///
/// # Example
/// ```ignore
/// struct Double;
///
/// #[async_trait]
/// impl Task for Double {
///     type Param = i64;
///     type Output = i64;
///     async fn execute(&self, param: &i64) -> anyhow::Result<i64> {
///         Ok(param * 2)
///     }
/// }
/// ```
#[async_trait]
pub trait Task: Send + Sync {
    /// The parameter type this task accepts.
    type Param: Send + Sync;
    /// The result type this task produces.
    type Output: Send;

    /// Execute the task for a single parameter.
    ///
    /// # Errors
    /// Any error returned here fails the whole enclosing job run.
    async fn execute(&self, param: &Self::Param) -> anyhow::Result<Self::Output>;
}

/// A pure transformation: one task result in, one output value out.
///
/// Converters are synchronous, they transform data already in memory.
/// Like [`Task`], failures are plain `anyhow::Error`s that the framework
/// wraps with positional context.
pub trait Converter: Send + Sync {
    /// The task result type this converter consumes.
    type Input: Send;
    /// The output type this converter produces.
    type Output: Send;

    /// Convert one task result into one output value.
    ///
    /// # Errors
    /// Any error returned here fails the whole enclosing job run.
    fn convert(&self, input: Self::Input) -> anyhow::Result<Self::Output>;
}

/// Converter that passes the task result through unchanged.
#[derive(Debug, Clone, Copy, Default)]
pub struct IdentityConverter<T>(std::marker::PhantomData<T>);

impl<T> IdentityConverter<T> {
    /// Create a new pass-through converter.
    pub fn new() -> Self {
        IdentityConverter(std::marker::PhantomData)
    }
}

impl<T: Send + Sync> Converter for IdentityConverter<T> {
    type Input = T;
    type Output = T;

    fn convert(&self, input: T) -> anyhow::Result<T> {
        Ok(input)
    }
}
