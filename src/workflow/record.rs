//! Workflow run records
//!
//! Data captured for one orchestration run: identity, step log, typed
//! results, and terminal status. The engine owns a record exclusively for
//! the duration of a run and hands it back as an immutable snapshot.

use crate::gateway::Classification;
use crate::state::AgentDescriptor;
use chrono::{DateTime, Utc};
use serde::Serialize;

/// The workflow kinds the engine knows how to run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum WorkflowKind {
    /// Text, then an image and audio rendering of that text
    MultimodalContent,
    /// Caption an image or classify a text
    ContentAnalysis,
    /// Build and probe a new agent descriptor
    AgentCreation,
    /// Decompose a task and fan subtasks out to agents
    ComplexOrchestration,
}

/// Run status; terminal states are final
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum WorkflowStatus {
    /// The run is in progress
    Running,
    /// Every stage finished
    Completed,
    /// A stage failed and the run stopped
    Failed,
}

/// Status of one orchestration subtask
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SubtaskStatus {
    /// Assigned to an agent, not yet executed
    Assigned,
    /// Execution finished with a result
    Completed,
    /// Execution failed
    Failed,
}

/// One unit of delegated work inside a complex-orchestration run
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Subtask {
    /// Subtask identifier, stable within the run (e.g., "subtask_0")
    pub id: String,
    /// ID of the agent this subtask is assigned to
    pub agent_id: String,
    /// Human-readable description of the subtask
    pub description: String,
    /// Current status
    pub status: SubtaskStatus,
    /// Execution result, once available
    pub result: Option<String>,
}

/// Insight produced by a content-analysis run
#[derive(Debug, Clone, PartialEq)]
pub enum ContentInsight {
    /// Natural-language caption of an image
    Description(String),
    /// Sentiment labels ranked by score
    Sentiment(Vec<Classification>),
}

/// Typed results, one variant per workflow kind
///
/// Each kind carries exactly the outputs its stages can produce, so
/// consumers know at compile time which fields may exist. Fields fill in as
/// stages complete; a failed run keeps whatever the completed stages
/// produced and nothing from the failing stage.
#[derive(Debug, Clone, PartialEq)]
pub enum WorkflowResults {
    /// Outputs of a multimodal-content run
    Multimodal {
        /// Stage 1: generated text
        text: Option<String>,
        /// Stage 2: raw image bytes rendered from the generated text
        image: Option<Vec<u8>>,
        /// Stage 3: raw audio bytes synthesized from the generated text
        audio: Option<Vec<u8>>,
    },
    /// Output of a content-analysis run
    Analysis {
        /// The single insight the selected branch produced
        insight: Option<ContentInsight>,
    },
    /// Outputs of an agent-creation run
    AgentCreation {
        /// Output of the optional text-generation smoke probe
        text_probe: Option<String>,
        /// The descriptor that was built
        agent: Option<AgentDescriptor>,
    },
    /// Outputs of a complex-orchestration run
    Orchestration {
        /// Free-text decomposition of the task; not machine-parsed
        task_breakdown: Option<String>,
        /// Subtasks assigned to agents
        subtasks: Vec<Subtask>,
    },
}

impl WorkflowResults {
    /// Empty results for the given kind
    pub fn empty(kind: WorkflowKind) -> Self {
        match kind {
            WorkflowKind::MultimodalContent => Self::Multimodal {
                text: None,
                image: None,
                audio: None,
            },
            WorkflowKind::ContentAnalysis => Self::Analysis { insight: None },
            WorkflowKind::AgentCreation => Self::AgentCreation {
                text_probe: None,
                agent: None,
            },
            WorkflowKind::ComplexOrchestration => Self::Orchestration {
                task_breakdown: None,
                subtasks: Vec::new(),
            },
        }
    }
}

/// Record of one orchestration run
///
/// `status` and `steps` are only reachable through methods: the step log is
/// append-only and the status can leave `Running` exactly once.
#[derive(Debug, Clone, PartialEq)]
pub struct WorkflowRecord {
    /// Unique identifier, assigned once at construction
    pub id: String,
    /// Which workflow this run executed
    pub kind: WorkflowKind,
    status: WorkflowStatus,
    steps: Vec<String>,
    /// Typed results, populated as stages complete
    pub results: WorkflowResults,
    /// When the run started
    pub created_at: DateTime<Utc>,
}

impl WorkflowRecord {
    /// Create a record in `Running` state with an empty step log
    pub fn new(id: String, kind: WorkflowKind) -> Self {
        Self {
            id,
            kind,
            status: WorkflowStatus::Running,
            steps: Vec::new(),
            results: WorkflowResults::empty(kind),
            created_at: Utc::now(),
        }
    }

    /// Current run status
    pub fn status(&self) -> WorkflowStatus {
        self.status
    }

    /// The step log, in the order steps were announced
    pub fn steps(&self) -> &[String] {
        &self.steps
    }

    /// Append a step description to the log
    pub fn push_step(&mut self, step: impl Into<String>) {
        self.steps.push(step.into());
    }

    /// Mark the run completed. Has no effect once the run is terminal.
    pub fn complete(&mut self) {
        if self.status == WorkflowStatus::Running {
            self.status = WorkflowStatus::Completed;
        }
    }

    /// Mark the run failed. Has no effect once the run is terminal.
    pub fn fail(&mut self) {
        if self.status == WorkflowStatus::Running {
            self.status = WorkflowStatus::Failed;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_record_is_running_and_empty() {
        let record = WorkflowRecord::new("wf-1".to_string(), WorkflowKind::MultimodalContent);
        assert_eq!(record.status(), WorkflowStatus::Running);
        assert!(record.steps().is_empty());
        assert_eq!(
            record.results,
            WorkflowResults::Multimodal {
                text: None,
                image: None,
                audio: None,
            }
        );
    }

    #[test]
    fn test_steps_append_in_order() {
        let mut record = WorkflowRecord::new("wf-1".to_string(), WorkflowKind::ContentAnalysis);
        record.push_step("first");
        record.push_step("second");
        record.push_step("third");
        assert_eq!(record.steps(), &["first", "second", "third"]);
    }

    #[test]
    fn test_complete_is_terminal() {
        let mut record = WorkflowRecord::new("wf-1".to_string(), WorkflowKind::AgentCreation);
        record.complete();
        assert_eq!(record.status(), WorkflowStatus::Completed);

        // A terminal record never changes status again
        record.fail();
        assert_eq!(record.status(), WorkflowStatus::Completed);
    }

    #[test]
    fn test_fail_is_terminal() {
        let mut record =
            WorkflowRecord::new("wf-1".to_string(), WorkflowKind::ComplexOrchestration);
        record.fail();
        assert_eq!(record.status(), WorkflowStatus::Failed);

        record.complete();
        assert_eq!(record.status(), WorkflowStatus::Failed);
    }

    #[test]
    fn test_empty_results_match_kind() {
        assert_eq!(
            WorkflowResults::empty(WorkflowKind::ComplexOrchestration),
            WorkflowResults::Orchestration {
                task_breakdown: None,
                subtasks: Vec::new(),
            }
        );
        assert_eq!(
            WorkflowResults::empty(WorkflowKind::ContentAnalysis),
            WorkflowResults::Analysis { insight: None }
        );
    }

    #[test]
    fn test_subtask_serialization_uses_camel_case() {
        let subtask = Subtask {
            id: "subtask_0".to_string(),
            agent_id: "agent-1".to_string(),
            description: "Subtask 1 for Agent".to_string(),
            status: SubtaskStatus::Assigned,
            result: None,
        };
        let json = serde_json::to_value(&subtask).unwrap();
        assert_eq!(json["agentId"], "agent-1");
        assert_eq!(json["status"], "assigned");
    }
}
