// Application state management
// Contains the agent registry consulted during orchestration

use crate::gateway::{DEFAULT_AUDIO_MODEL, DEFAULT_IMAGE_MODEL, DEFAULT_TEXT_MODEL};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use uuid::Uuid;

/// Unique identifier for an agent
pub type AgentId = String;

/// Agent status enumeration
/// Represents the current lifecycle state of an agent
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AgentStatus {
    /// Agent is available for task assignment
    Active,
    /// Agent has been deactivated
    Inactive,
}

/// Per-capability model identifiers for an agent
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AgentModels {
    /// Model used for text generation
    pub text: String,
    /// Model used for image generation
    pub image: String,
    /// Model used for speech synthesis
    pub audio: String,
}

impl Default for AgentModels {
    fn default() -> Self {
        Self {
            text: DEFAULT_TEXT_MODEL.to_string(),
            image: DEFAULT_IMAGE_MODEL.to_string(),
            audio: DEFAULT_AUDIO_MODEL.to_string(),
        }
    }
}

/// A named configuration bundle: capabilities plus default models
///
/// Created by the agent-creation workflow or registered directly through the
/// API. The workflow engine consumes agents by reference only; it never
/// manages their lifecycle.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AgentDescriptor {
    /// Unique identifier for the agent
    pub id: AgentId,
    /// Display name of the agent
    pub name: String,
    /// Free-form agent type tag (e.g., "text_generation")
    #[serde(rename = "type")]
    pub agent_type: String,
    /// Capability tags this agent claims
    pub capabilities: Vec<String>,
    /// Models the agent uses per capability
    pub models: AgentModels,
    /// Arbitrary caller-supplied configuration
    pub configuration: serde_json::Value,
    /// Current lifecycle status
    pub status: AgentStatus,
    /// When the agent was created
    pub created_at: DateTime<Utc>,
}

impl AgentDescriptor {
    /// Create a new active agent with default models and no capabilities
    pub fn new(id: AgentId, name: String, agent_type: String) -> Self {
        Self {
            id,
            name,
            agent_type,
            capabilities: Vec::new(),
            models: AgentModels::default(),
            configuration: serde_json::json!({}),
            status: AgentStatus::Active,
            created_at: Utc::now(),
        }
    }

    /// Generate a new unique ID for an agent
    /// Uses UUID v4 for uniqueness
    pub fn generate_id() -> AgentId {
        Uuid::new_v4().to_string()
    }

    /// Validate the agent's configuration
    /// Returns Ok(()) if valid, Err with message if invalid
    pub fn validate(&self) -> Result<(), String> {
        if self.name.trim().is_empty() {
            return Err("Agent name cannot be empty".to_string());
        }
        Ok(())
    }
}

/// Main application state
/// Holds the registry of configured agents
#[derive(Debug, Clone, Default)]
pub struct AppState {
    /// Registry of all agents (id -> descriptor)
    pub agents: HashMap<AgentId, AgentDescriptor>,
}

impl AppState {
    /// Create a new application state with an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an agent to the registry
    /// Returns true if the agent was added (false if ID already exists)
    pub fn add_agent(&mut self, agent: AgentDescriptor) -> bool {
        if self.agents.contains_key(&agent.id) {
            false
        } else {
            self.agents.insert(agent.id.clone(), agent);
            true
        }
    }

    /// Remove an agent from the registry
    /// Returns the removed agent if it existed
    pub fn remove_agent(&mut self, id: &AgentId) -> Option<AgentDescriptor> {
        self.agents.remove(id)
    }

    /// Get all agents as a vector, sorted by name
    pub fn agents_list(&self) -> Vec<&AgentDescriptor> {
        let mut agents: Vec<&AgentDescriptor> = self.agents.values().collect();
        agents.sort_by(|a, b| a.name.cmp(&b.name));
        agents
    }

    /// Update an agent's status
    /// Returns true if the agent was found and updated
    pub fn update_agent_status(&mut self, id: &AgentId, status: AgentStatus) -> bool {
        if let Some(agent) = self.agents.get_mut(id) {
            agent.status = status;
            true
        } else {
            false
        }
    }

    /// Get the number of agents in the registry
    pub fn agent_count(&self) -> usize {
        self.agents.len()
    }

    /// Load agents from a file
    /// Replaces all current agents with those loaded from the file
    /// Returns the number of agents loaded, or an error if loading failed
    pub fn load_agents<P: AsRef<std::path::Path>>(
        &mut self,
        path: P,
    ) -> Result<usize, super::persistence::PersistenceError> {
        let loaded_agents = super::persistence::AgentRegistry::load_from_file(path)?;
        let count = loaded_agents.len();
        self.agents = loaded_agents;
        Ok(count)
    }

    /// Save agents to a file
    /// Returns Ok(()) if successful, or an error if saving failed
    pub fn save_agents<P: AsRef<std::path::Path>>(
        &self,
        path: P,
    ) -> Result<(), super::persistence::PersistenceError> {
        super::persistence::AgentRegistry::save_to_file(&self.agents, path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_app_state_creation() {
        let state = AppState::new();
        assert_eq!(state.agent_count(), 0);
    }

    #[test]
    fn test_agent_new_defaults() {
        let agent = AgentDescriptor::new(
            "1".to_string(),
            "Test Agent".to_string(),
            "text_generation".to_string(),
        );
        assert_eq!(agent.id, "1");
        assert_eq!(agent.name, "Test Agent");
        assert_eq!(agent.status, AgentStatus::Active);
        assert_eq!(agent.models.text, DEFAULT_TEXT_MODEL);
        assert_eq!(agent.models.image, DEFAULT_IMAGE_MODEL);
        assert_eq!(agent.models.audio, DEFAULT_AUDIO_MODEL);
        assert!(agent.capabilities.is_empty());
    }

    #[test]
    fn test_agent_generate_id() {
        let id1 = AgentDescriptor::generate_id();
        let id2 = AgentDescriptor::generate_id();
        assert_ne!(id1, id2);
        assert!(!id1.is_empty());
        assert!(!id2.is_empty());
    }

    #[test]
    fn test_agent_validate() {
        let mut agent = AgentDescriptor::new(
            "1".to_string(),
            "Test Agent".to_string(),
            "generic".to_string(),
        );
        assert!(agent.validate().is_ok());

        agent.name = "  ".to_string();
        assert!(agent.validate().is_err());
    }

    #[test]
    fn test_agent_serialization_field_names() {
        let agent = AgentDescriptor::new(
            "1".to_string(),
            "Test Agent".to_string(),
            "generic".to_string(),
        );
        let json = serde_json::to_value(&agent).unwrap();
        assert!(json.get("type").is_some());
        assert!(json.get("createdAt").is_some());
        assert_eq!(json["status"], "active");
    }

    #[test]
    fn test_add_agent() {
        let mut state = AppState::new();
        let agent = AgentDescriptor::new(
            "1".to_string(),
            "Test Agent".to_string(),
            "generic".to_string(),
        );

        assert!(state.add_agent(agent.clone()));
        assert_eq!(state.agent_count(), 1);
        assert!(!state.add_agent(agent)); // Duplicate ID should fail
        assert_eq!(state.agent_count(), 1);
    }

    #[test]
    fn test_remove_agent() {
        let mut state = AppState::new();
        let agent = AgentDescriptor::new(
            "1".to_string(),
            "Test Agent".to_string(),
            "generic".to_string(),
        );
        state.add_agent(agent);

        let removed = state.remove_agent(&"1".to_string());
        assert!(removed.is_some());
        assert_eq!(state.agent_count(), 0);
    }

    #[test]
    fn test_update_agent_status() {
        let mut state = AppState::new();
        let agent = AgentDescriptor::new(
            "1".to_string(),
            "Test Agent".to_string(),
            "generic".to_string(),
        );
        state.add_agent(agent);

        assert!(state.update_agent_status(&"1".to_string(), AgentStatus::Inactive));
        assert_eq!(
            state.agents.get("1").unwrap().status,
            AgentStatus::Inactive
        );

        assert!(!state.update_agent_status(&"999".to_string(), AgentStatus::Active));
    }

    #[test]
    fn test_agents_list_sorted() {
        let mut state = AppState::new();
        state.add_agent(AgentDescriptor::new(
            "2".to_string(),
            "Beta Agent".to_string(),
            "generic".to_string(),
        ));
        state.add_agent(AgentDescriptor::new(
            "1".to_string(),
            "Alpha Agent".to_string(),
            "generic".to_string(),
        ));
        state.add_agent(AgentDescriptor::new(
            "3".to_string(),
            "Gamma Agent".to_string(),
            "generic".to_string(),
        ));

        let agents = state.agents_list();
        assert_eq!(agents.len(), 3);
        assert_eq!(agents[0].name, "Alpha Agent");
        assert_eq!(agents[1].name, "Beta Agent");
        assert_eq!(agents[2].name, "Gamma Agent");
    }
}
