//! Subtask execution
//!
//! How a delegated subtask actually runs is a pluggable capability: the
//! engine only depends on this interface. No agent-invocation protocol
//! exists yet, so the production wiring uses `PlaceholderTaskExecutor`.

use crate::workflow::record::Subtask;
use async_trait::async_trait;
use thiserror::Error;

/// Error from executing one subtask
#[derive(Debug, Error)]
#[error("subtask execution failed: {0}")]
pub struct TaskExecutionError(pub String);

/// Executes one assigned subtask on behalf of its agent
#[async_trait]
pub trait TaskExecutor: Send + Sync {
    /// Run the subtask to completion and return its result text
    async fn execute(&self, subtask: &Subtask) -> Result<String, TaskExecutionError>;
}

/// Executor that completes every subtask with a canned result
///
/// Performs no real per-agent dispatch. TODO: replace with an executor that
/// calls back into the assigned agent once an invocation protocol exists.
#[derive(Debug, Default)]
pub struct PlaceholderTaskExecutor;

#[async_trait]
impl TaskExecutor for PlaceholderTaskExecutor {
    async fn execute(&self, subtask: &Subtask) -> Result<String, TaskExecutionError> {
        Ok(format!("Result of {}", subtask.description))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::workflow::record::SubtaskStatus;

    #[tokio::test]
    async fn test_placeholder_executor_always_succeeds() {
        let executor = PlaceholderTaskExecutor;
        let subtask = Subtask {
            id: "subtask_0".to_string(),
            agent_id: "agent-1".to_string(),
            description: "Subtask 1 for Research Agent".to_string(),
            status: SubtaskStatus::Assigned,
            result: None,
        };

        let result = executor.execute(&subtask).await.unwrap();
        assert_eq!(result, "Result of Subtask 1 for Research Agent");
    }
}
