// Agent persistence module
// Handles saving and loading agent descriptors to/from files

use super::app_state::{AgentDescriptor, AgentId};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::path::Path;

/// Error types for persistence operations
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PersistenceError {
    /// File I/O error
    IoError(String),
    /// JSON serialization/deserialization error
    JsonError(String),
    /// Invalid data format
    InvalidData(String),
}

impl std::fmt::Display for PersistenceError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PersistenceError::IoError(msg) => write!(f, "IO Error: {}", msg),
            PersistenceError::JsonError(msg) => write!(f, "JSON Error: {}", msg),
            PersistenceError::InvalidData(msg) => write!(f, "Invalid Data: {}", msg),
        }
    }
}

impl std::error::Error for PersistenceError {}

/// Serializable structure for the agent registry
/// Used for saving/loading agents to/from JSON files
#[derive(Debug, Clone, Serialize, Deserialize)]
struct AgentRegistryData {
    /// Version of the registry format (for future migration support)
    version: u32,
    /// Map of agent ID to agent data
    agents: HashMap<AgentId, AgentDescriptor>,
}

/// Agent registry persistence operations
pub struct AgentRegistry;

impl AgentRegistry {
    /// Save agents to a JSON file
    ///
    /// # Arguments
    /// * `agents` - HashMap of agents to save
    /// * `path` - Path to the JSON file
    ///
    /// # Returns
    /// * `Ok(())` if successful
    /// * `Err(PersistenceError)` if an error occurred
    pub fn save_to_file<P: AsRef<Path>>(
        agents: &HashMap<AgentId, AgentDescriptor>,
        path: P,
    ) -> Result<(), PersistenceError> {
        let data = AgentRegistryData {
            version: 1,
            agents: agents.clone(),
        };

        let json = serde_json::to_string_pretty(&data)
            .map_err(|e| PersistenceError::JsonError(e.to_string()))?;

        fs::write(path.as_ref(), json).map_err(|e| PersistenceError::IoError(e.to_string()))?;

        Ok(())
    }

    /// Load agents from a JSON file
    ///
    /// # Arguments
    /// * `path` - Path to the JSON file
    ///
    /// # Returns
    /// * `Ok(HashMap<AgentId, AgentDescriptor>)` if successful
    /// * `Err(PersistenceError)` if an error occurred
    pub fn load_from_file<P: AsRef<Path>>(
        path: P,
    ) -> Result<HashMap<AgentId, AgentDescriptor>, PersistenceError> {
        if !path.as_ref().exists() {
            return Ok(HashMap::new());
        }

        let json = fs::read_to_string(path.as_ref())
            .map_err(|e| PersistenceError::IoError(e.to_string()))?;

        let data: AgentRegistryData =
            serde_json::from_str(&json).map_err(|e| PersistenceError::JsonError(e.to_string()))?;

        // Validate version (for future migration support)
        if data.version != 1 {
            return Err(PersistenceError::InvalidData(format!(
                "Unsupported registry version: {}",
                data.version
            )));
        }

        Ok(data.agents)
    }

    /// Get the default path for the agent registry file
    /// Returns a path in the user's home directory or current directory
    pub fn default_path() -> std::path::PathBuf {
        if let Some(home) = std::env::var_os("HOME") {
            let mut path = std::path::PathBuf::from(home);
            path.push(".genai-hub");
            path.push("agents.json");
            path
        } else {
            std::path::PathBuf::from("agents.json")
        }
    }
}
