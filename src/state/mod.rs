// State management module
// Handles application state, agent registry, and persistence

pub mod app_state;
pub mod persistence;

pub use app_state::{AgentDescriptor, AgentId, AgentModels, AgentStatus, AppState};
pub use persistence::PersistenceError;
