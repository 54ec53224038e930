//! Agent management API handlers
//!
//! Contains HTTP request handlers for registering and listing agents.
//! The registry itself lives in `AppState`; the workflow engine only ever
//! reads agents by reference.

use crate::api::ServerState;
use crate::error::AppError;
use crate::state::AgentDescriptor;
use axum::{extract::State, http::StatusCode, response::Json};
use serde::{Deserialize, Serialize};

/// Create agent request
#[derive(Deserialize)]
pub struct CreateAgentRequest {
    /// Name for the new agent
    pub name: String,
    /// Free-form agent type tag
    #[serde(rename = "type")]
    pub agent_type: String,
    /// Arbitrary configuration to attach to the agent
    #[serde(default)]
    pub configuration: serde_json::Value,
}

/// Create agent response
#[derive(Serialize)]
pub struct CreateAgentResponse {
    /// Always true on the success path
    pub success: bool,
    /// The registered agent
    pub agent: AgentDescriptor,
}

/// Agents list response
#[derive(Serialize)]
pub struct AgentsListResponse {
    /// Always true on the success path
    pub success: bool,
    /// All registered agents, sorted by name
    pub agents: Vec<AgentDescriptor>,
    /// Total number of agents
    pub count: usize,
}

/// GET /api/agents - List all registered agents
pub async fn list_agents(
    State(state): State<ServerState>,
) -> Result<Json<AgentsListResponse>, AppError> {
    let app = state.app.read().await;
    let agents: Vec<AgentDescriptor> = app.agents_list().into_iter().cloned().collect();

    Ok(Json(AgentsListResponse {
        success: true,
        count: agents.len(),
        agents,
    }))
}

/// POST /api/agents/create - Register a new agent
pub async fn create_agent(
    State(state): State<ServerState>,
    Json(request): Json<CreateAgentRequest>,
) -> Result<(StatusCode, Json<CreateAgentResponse>), AppError> {
    let id = AgentDescriptor::generate_id();
    let mut agent = AgentDescriptor::new(id.clone(), request.name, request.agent_type);
    if !request.configuration.is_null() {
        agent.configuration = request.configuration;
    }

    // Validate agent
    agent.validate().map_err(AppError::InvalidAgentConfig)?;

    let mut app = state.app.write().await;
    if !app.add_agent(agent.clone()) {
        return Err(AppError::Internal(anyhow::anyhow!(
            "Failed to add agent (ID already exists)"
        )));
    }

    // Best-effort persistence; the registry stays authoritative in memory
    if let Some(path) = &state.registry_path {
        if let Err(e) = app.save_agents(path) {
            tracing::warn!(path = %path.display(), error = %e, "Failed to persist agent registry");
        }
    }

    Ok((
        StatusCode::CREATED,
        Json(CreateAgentResponse {
            success: true,
            agent,
        }),
    ))
}
