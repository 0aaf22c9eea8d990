//! Per-call deadline carried into storage operations.

use std::future::Future;
use std::time::Duration;

use tokio::time::Instant;

use crate::error::{StorageError, StorageResult};

/// Execution context for a single storage call.
///
/// The deadline is fixed when the context is created; every backend call made
/// with it must finish before then or fail with `StorageError::Timeout`.
#[derive(Debug, Clone, Copy)]
pub struct OpContext {
    deadline: Instant,
    budget: Duration,
}

impl OpContext {
    /// Create a context whose deadline is `budget` from now.
    #[must_use]
    pub fn with_timeout(budget: Duration) -> Self {
        Self {
            deadline: Instant::now() + budget,
            budget,
        }
    }

    /// Drive `fut` to completion unless the deadline passes first.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::Timeout` naming `operation` if the deadline
    /// passes, or whatever error `fut` itself resolves to.
    pub async fn run<F, T>(&self, operation: &'static str, fut: F) -> StorageResult<T>
    where
        F: Future<Output = StorageResult<T>>,
    {
        tokio::time::timeout_at(self.deadline, fut)
            .await
            .map_err(|_| StorageError::Timeout {
                operation,
                after: self.budget,
            })?
    }
}
