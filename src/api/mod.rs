//! API module
//!
//! Contains HTTP request handlers for the inference capability, agent
//! management, and workflow endpoints.

pub mod agents;
pub mod inference;
pub mod utils;
pub mod workflows;

use crate::gateway::InferenceGateway;
use crate::state::AppState;
use crate::workflow::{WorkflowEngine, WorkflowStore};
use std::path::PathBuf;
use std::sync::Arc;
use tokio::sync::RwLock;

/// Shared state handed to every request handler
#[derive(Clone)]
pub struct ServerState {
    /// Agent registry
    pub app: Arc<RwLock<AppState>>,
    /// Workflow engine
    pub engine: Arc<WorkflowEngine>,
    /// Inference gateway, used directly by the capability routes
    pub gateway: Arc<dyn InferenceGateway>,
    /// Retained workflow records
    pub store: Arc<WorkflowStore>,
    /// Where the agent registry is persisted; None disables persistence
    pub registry_path: Option<PathBuf>,
}

#[cfg(test)]
pub(crate) mod test_support {
    use super::*;
    use crate::gateway::{Classification, InferenceError, TextGenerationParams};
    use crate::workflow::{PlaceholderTaskExecutor, UuidIdGenerator};
    use async_trait::async_trait;

    /// Gateway stub returning canned values, for handler tests
    pub struct StubGateway;

    #[async_trait]
    impl InferenceGateway for StubGateway {
        async fn generate_text(
            &self,
            prompt: &str,
            _model: Option<&str>,
            _params: TextGenerationParams,
        ) -> Result<String, InferenceError> {
            Ok(format!("generated: {}", prompt))
        }

        async fn generate_image(
            &self,
            _prompt: &str,
            _model: Option<&str>,
        ) -> Result<Vec<u8>, InferenceError> {
            Ok(vec![0x89, 0x50, 0x4e, 0x47])
        }

        async fn synthesize_audio(
            &self,
            _text: &str,
            _model: Option<&str>,
        ) -> Result<Vec<u8>, InferenceError> {
            Ok(vec![0x52, 0x49, 0x46, 0x46])
        }

        async fn describe_image(
            &self,
            _image: &str,
            _model: Option<&str>,
        ) -> Result<String, InferenceError> {
            Ok("a photo of a cat".to_string())
        }

        async fn classify_text(
            &self,
            _text: &str,
            _model: Option<&str>,
        ) -> Result<Vec<Classification>, InferenceError> {
            Ok(vec![Classification {
                label: "positive".to_string(),
                score: 0.9,
            }])
        }
    }

    /// Build a `ServerState` wired to stubs, with registry persistence off
    pub fn server_state() -> ServerState {
        let gateway: Arc<dyn InferenceGateway> = Arc::new(StubGateway);
        let store = Arc::new(WorkflowStore::new());
        let engine = Arc::new(WorkflowEngine::new(
            gateway.clone(),
            store.clone(),
            Arc::new(PlaceholderTaskExecutor),
            Arc::new(UuidIdGenerator),
        ));
        ServerState {
            app: Arc::new(RwLock::new(AppState::new())),
            engine,
            gateway,
            store,
            registry_path: None,
        }
    }
}
