//! Workflow API handlers
//!
//! Contains HTTP request handlers for the four workflow operations and the
//! workflow listing. Engine failures are not HTTP errors here: the handlers
//! answer 200 with `{"success": false, "error": ...}` and include the
//! partial record, so callers can inspect how far a run got.

use crate::api::utils::{data_uri, validate_input};
use crate::api::ServerState;
use crate::error::AppError;
use crate::gateway::Classification;
use crate::state::AgentDescriptor;
use crate::workflow::{
    AgentConfig, AgentRef, ContentInsight, MultimodalOptions, Subtask, WorkflowKind,
    WorkflowRecord, WorkflowResult, WorkflowResults, WorkflowStatus,
};
use axum::{extract::State, response::Json};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Multimodal content workflow request
#[derive(Deserialize)]
pub struct MultimodalWorkflowRequest {
    /// Prompt driving the text stage
    pub prompt: String,
    /// Optional per-capability model overrides
    #[serde(default)]
    pub options: MultimodalOptions,
}

/// Content analysis workflow request
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyzeWorkflowRequest {
    /// The content to analyze (text, or an image reference)
    pub content: String,
    /// Which analysis branch to take ("image" or "text")
    pub content_type: String,
}

/// Agent creation workflow request
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateAgentWorkflowRequest {
    /// Configuration for the agent to create
    pub agent_config: AgentConfig,
}

/// Complex orchestration workflow request
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrchestrateWorkflowRequest {
    /// The high-level task to decompose
    pub task_description: String,
    /// Agents available for subtask assignment
    #[serde(default)]
    pub agents: Vec<AgentRef>,
}

/// Serialized results of a workflow run
///
/// Binary stage outputs cross the boundary as data URIs; unset fields are
/// omitted so a partial record serializes to exactly the keys its completed
/// stages produced.
#[derive(Debug, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResultsView {
    /// Generated text
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    /// Generated image as a data URI
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    /// Synthesized audio as a data URI
    #[serde(skip_serializing_if = "Option::is_none")]
    pub audio: Option<String>,
    /// Image caption
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Sentiment labels ranked by score
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sentiment: Option<Vec<Classification>>,
    /// Output of the agent smoke probe
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text_test: Option<String>,
    /// The created agent descriptor
    #[serde(skip_serializing_if = "Option::is_none")]
    pub agent: Option<AgentDescriptor>,
    /// Free-text task decomposition
    #[serde(skip_serializing_if = "Option::is_none")]
    pub task_breakdown: Option<String>,
}

/// Serialized form of a workflow record
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkflowView {
    /// Workflow identifier
    pub id: String,
    /// Workflow kind
    #[serde(rename = "type")]
    pub kind: WorkflowKind,
    /// Terminal or running status
    pub status: WorkflowStatus,
    /// Step log in announcement order
    pub steps: Vec<String>,
    /// Stage outputs recorded so far
    pub results: ResultsView,
    /// Subtasks, present only for orchestration runs
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subtasks: Option<Vec<Subtask>>,
    /// When the run started
    pub created_at: DateTime<Utc>,
}

impl From<&WorkflowRecord> for WorkflowView {
    fn from(record: &WorkflowRecord) -> Self {
        let mut results = ResultsView::default();
        let mut subtasks = None;

        match &record.results {
            WorkflowResults::Multimodal { text, image, audio } => {
                results.text = text.clone();
                results.image = image.as_deref().map(|b| data_uri("image/png", b));
                results.audio = audio.as_deref().map(|b| data_uri("audio/wav", b));
            }
            WorkflowResults::Analysis { insight } => match insight {
                Some(ContentInsight::Description(description)) => {
                    results.description = Some(description.clone());
                }
                Some(ContentInsight::Sentiment(labels)) => {
                    results.sentiment = Some(labels.clone());
                }
                None => {}
            },
            WorkflowResults::AgentCreation { text_probe, agent } => {
                results.text_test = text_probe.clone();
                results.agent = agent.clone();
            }
            WorkflowResults::Orchestration {
                task_breakdown,
                subtasks: assigned,
            } => {
                results.task_breakdown = task_breakdown.clone();
                subtasks = Some(assigned.clone());
            }
        }

        Self {
            id: record.id.clone(),
            kind: record.kind,
            status: record.status(),
            steps: record.steps().to_vec(),
            results,
            subtasks,
            created_at: record.created_at,
        }
    }
}

/// Response envelope for the workflow operations
#[derive(Debug, Serialize)]
pub struct WorkflowResponse {
    /// Whether the run reached `Completed`
    pub success: bool,
    /// The workflow record, partial when the run failed
    pub workflow: WorkflowView,
    /// Failure message, present when `success` is false
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl WorkflowResponse {
    fn from_outcome(outcome: WorkflowResult) -> Self {
        match outcome {
            Ok(record) => Self {
                success: true,
                workflow: WorkflowView::from(&record),
                error: None,
            },
            Err(failure) => Self {
                success: false,
                workflow: WorkflowView::from(&failure.record),
                error: Some(failure.source.to_string()),
            },
        }
    }
}

/// Workflow listing response
#[derive(Serialize)]
pub struct WorkflowsListResponse {
    /// Always true on the success path
    pub success: bool,
    /// All retained workflow records, oldest first
    pub workflows: Vec<WorkflowView>,
}

/// POST /api/workflows/multimodal - Run the multimodal content workflow
pub async fn multimodal_content(
    State(state): State<ServerState>,
    Json(request): Json<MultimodalWorkflowRequest>,
) -> Result<Json<WorkflowResponse>, AppError> {
    validate_input("prompt", &request.prompt)?;

    let outcome = state
        .engine
        .create_multimodal_content(&request.prompt, &request.options)
        .await;
    Ok(Json(WorkflowResponse::from_outcome(outcome)))
}

/// POST /api/workflows/analyze - Run the content analysis workflow
pub async fn analyze_content(
    State(state): State<ServerState>,
    Json(request): Json<AnalyzeWorkflowRequest>,
) -> Result<Json<WorkflowResponse>, AppError> {
    validate_input("content", &request.content)?;

    let outcome = state
        .engine
        .analyze_content(&request.content, &request.content_type)
        .await;
    Ok(Json(WorkflowResponse::from_outcome(outcome)))
}

/// POST /api/workflows/create-agent - Run the agent creation workflow
pub async fn create_agent(
    State(state): State<ServerState>,
    Json(request): Json<CreateAgentWorkflowRequest>,
) -> Result<Json<WorkflowResponse>, AppError> {
    validate_input("agent name", &request.agent_config.name)?;

    let outcome = state.engine.create_custom_agent(&request.agent_config).await;
    Ok(Json(WorkflowResponse::from_outcome(outcome)))
}

/// POST /api/workflows/orchestrate - Run the complex orchestration workflow
pub async fn orchestrate(
    State(state): State<ServerState>,
    Json(request): Json<OrchestrateWorkflowRequest>,
) -> Result<Json<WorkflowResponse>, AppError> {
    validate_input("taskDescription", &request.task_description)?;

    let outcome = state
        .engine
        .orchestrate_complex_task(&request.task_description, &request.agents)
        .await;
    Ok(Json(WorkflowResponse::from_outcome(outcome)))
}

/// GET /api/workflows - List all retained workflows
pub async fn list_workflows(
    State(state): State<ServerState>,
) -> Result<Json<WorkflowsListResponse>, AppError> {
    let workflows = state
        .store
        .list()
        .await
        .iter()
        .map(WorkflowView::from)
        .collect();

    Ok(Json(WorkflowsListResponse {
        success: true,
        workflows,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::test_support::server_state;

    #[tokio::test]
    async fn test_multimodal_workflow_success_envelope() {
        let state = server_state();
        let request = MultimodalWorkflowRequest {
            prompt: "a red fox".to_string(),
            options: MultimodalOptions::default(),
        };

        let response = multimodal_content(State(state), Json(request))
            .await
            .unwrap();
        assert!(response.success);
        assert!(response.error.is_none());
        assert_eq!(response.workflow.status, WorkflowStatus::Completed);
        assert_eq!(
            response.workflow.results.text.as_deref(),
            Some("generated: a red fox")
        );
        assert!(response
            .workflow
            .results
            .image
            .as_deref()
            .unwrap()
            .starts_with("data:image/png;base64,"));
        assert!(response
            .workflow
            .results
            .audio
            .as_deref()
            .unwrap()
            .starts_with("data:audio/wav;base64,"));
    }

    #[tokio::test]
    async fn test_analyze_workflow_unsupported_type_envelope() {
        let state = server_state();
        let request = AnalyzeWorkflowRequest {
            content: "some clip".to_string(),
            content_type: "video".to_string(),
        };

        let response = analyze_content(State(state), Json(request)).await.unwrap();
        assert!(!response.success);
        assert!(response
            .error
            .as_deref()
            .unwrap()
            .contains("unsupported content type"));
        assert_eq!(response.workflow.status, WorkflowStatus::Failed);
        assert!(response.workflow.steps.is_empty());
    }

    #[tokio::test]
    async fn test_orchestrate_workflow_reports_subtasks() {
        let state = server_state();
        let request = OrchestrateWorkflowRequest {
            task_description: "build a website".to_string(),
            agents: vec![
                AgentRef {
                    id: "agent-0".to_string(),
                    name: "Agent 0".to_string(),
                },
                AgentRef {
                    id: "agent-1".to_string(),
                    name: "Agent 1".to_string(),
                },
            ],
        };

        let response = orchestrate(State(state), Json(request)).await.unwrap();
        assert!(response.success);
        let subtasks = response.workflow.subtasks.as_ref().unwrap();
        assert_eq!(subtasks.len(), 2);
        assert!(response.workflow.results.task_breakdown.is_some());
    }

    #[tokio::test]
    async fn test_create_agent_workflow_serializes_text_test_key() {
        let state = server_state();
        let request = CreateAgentWorkflowRequest {
            agent_config: AgentConfig {
                name: "Writer".to_string(),
                agent_type: "creative".to_string(),
                capabilities: vec!["text_generation".to_string()],
                text_model: None,
                image_model: None,
                audio_model: None,
                configuration: serde_json::Value::Null,
            },
        };

        let response = create_agent(State(state), Json(request)).await.unwrap();
        assert!(response.success);

        let json = serde_json::to_value(&response.0).unwrap();
        assert!(json["workflow"]["results"].get("textTest").is_some());
        assert_eq!(json["workflow"]["type"], "agent_creation");
    }

    #[tokio::test]
    async fn test_list_workflows_returns_retained_runs() {
        let state = server_state();

        let request = MultimodalWorkflowRequest {
            prompt: "alpha".to_string(),
            options: MultimodalOptions::default(),
        };
        multimodal_content(State(state.clone()), Json(request))
            .await
            .unwrap();

        let response = list_workflows(State(state)).await.unwrap();
        assert_eq!(response.workflows.len(), 1);
    }

    #[tokio::test]
    async fn test_multimodal_workflow_rejects_empty_prompt() {
        let state = server_state();
        let request = MultimodalWorkflowRequest {
            prompt: String::new(),
            options: MultimodalOptions::default(),
        };

        let result = multimodal_content(State(state), Json(request)).await;
        assert!(matches!(result, Err(AppError::Validation(_))));
    }
}
