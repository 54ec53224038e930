//! Workflow engine
//!
//! Sequences multi-step workflows against the inference gateway. Each
//! workflow kind runs an ordered list of stages; a stage appends its step
//! description before the gateway call and records its output only on
//! success. The first failure marks the run failed and stops it. Results
//! recorded by earlier stages survive; nothing from the failing stage does.
//!
//! Stages execute strictly sequentially within a run because later stages
//! consume earlier results by value. Independent runs can execute
//! concurrently: each one owns its own record and the engine keeps no
//! per-run state.

use crate::gateway::{InferenceError, InferenceGateway, TextGenerationParams};
use crate::state::{AgentDescriptor, AgentModels, AgentStatus};
use crate::workflow::executor::TaskExecutor;
use crate::workflow::ids::IdGenerator;
use crate::workflow::record::{
    ContentInsight, Subtask, SubtaskStatus, WorkflowKind, WorkflowRecord, WorkflowResults,
};
use crate::workflow::store::WorkflowStore;
use chrono::Utc;
use serde::Deserialize;
use std::sync::Arc;
use thiserror::Error;

/// Maximum number of subtasks assigned during complex orchestration.
/// Fixed policy, not configurable.
pub const MAX_SUBTASKS: usize = 3;

/// Capability tag that triggers the text-generation smoke probe
const TEXT_GENERATION_CAPABILITY: &str = "text_generation";

/// Engine-level failures
#[derive(Debug, Error)]
pub enum EngineError {
    /// Requested content type has no analysis branch
    #[error("unsupported content type: {0}")]
    UnsupportedContentType(String),

    /// A gateway call failed; `step` names the stage that was running
    #[error("inference call failed during {step}: {source}")]
    Inference {
        /// The stage that was running when the call failed
        step: &'static str,
        /// The underlying gateway error
        #[source]
        source: InferenceError,
    },
}

/// A failed run: the error plus the record as far as the run got
///
/// The record is never silently discarded; callers hand its steps and
/// partial results back for diagnostics.
#[derive(Debug, Error)]
#[error("{source}")]
pub struct WorkflowFailure {
    /// Record with the steps and results recorded before the failure
    pub record: WorkflowRecord,
    /// What went wrong
    #[source]
    pub source: EngineError,
}

/// Outcome of running one workflow
pub type WorkflowResult = Result<WorkflowRecord, WorkflowFailure>;

/// Per-capability model overrides for multimodal content generation
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MultimodalOptions {
    /// Override for the text-generation model
    pub text_model: Option<String>,
    /// Override for the image-generation model
    pub image_model: Option<String>,
    /// Override for the speech-synthesis model
    pub audio_model: Option<String>,
}

/// Caller-supplied configuration for a new agent
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AgentConfig {
    /// Display name for the agent
    pub name: String,
    /// Free-form agent type tag
    #[serde(rename = "type")]
    pub agent_type: String,
    /// Capability tags the agent claims
    #[serde(default)]
    pub capabilities: Vec<String>,
    /// Override for the text-generation model
    pub text_model: Option<String>,
    /// Override for the image-generation model
    pub image_model: Option<String>,
    /// Override for the speech-synthesis model
    pub audio_model: Option<String>,
    /// Arbitrary configuration passed through to the descriptor
    #[serde(default)]
    pub configuration: serde_json::Value,
}

/// Reference to an agent used when fanning out subtasks
///
/// Only `id` and `name` are consulted during assignment; the engine never
/// manages the agent itself.
#[derive(Debug, Clone, Deserialize)]
pub struct AgentRef {
    /// Agent identifier
    pub id: String,
    /// Agent display name, used in subtask descriptions
    pub name: String,
}

/// The workflow sequencer
///
/// Holds the capabilities a run needs: the inference gateway, the record
/// store, the subtask executor, and the identifier allocator. All are
/// injected so every seam can be substituted in tests.
pub struct WorkflowEngine {
    gateway: Arc<dyn InferenceGateway>,
    store: Arc<WorkflowStore>,
    executor: Arc<dyn TaskExecutor>,
    ids: Arc<dyn IdGenerator>,
}

impl WorkflowEngine {
    /// Create an engine from its collaborators
    pub fn new(
        gateway: Arc<dyn InferenceGateway>,
        store: Arc<WorkflowStore>,
        executor: Arc<dyn TaskExecutor>,
        ids: Arc<dyn IdGenerator>,
    ) -> Self {
        Self {
            gateway,
            store,
            executor,
            ids,
        }
    }

    /// Run the multimodal-content workflow
    ///
    /// Three dependent stages: generate text from the prompt, then render
    /// that generated text (not the original prompt) as an image and as
    /// speech. Completes only if all three stages succeed.
    pub async fn create_multimodal_content(
        &self,
        prompt: &str,
        options: &MultimodalOptions,
    ) -> WorkflowResult {
        let mut record =
            WorkflowRecord::new(self.ids.next_id(), WorkflowKind::MultimodalContent);
        tracing::info!(workflow_id = %record.id, "Starting multimodal content workflow");

        record.push_step("Generating text...");
        let text = match self
            .gateway
            .generate_text(
                prompt,
                options.text_model.as_deref(),
                TextGenerationParams::default(),
            )
            .await
        {
            Ok(text) => text,
            Err(e) => {
                let results = WorkflowResults::Multimodal {
                    text: None,
                    image: None,
                    audio: None,
                };
                return Err(self.fail(record, results, "text generation", e).await);
            }
        };

        record.push_step("Generating image...");
        let image = match self
            .gateway
            .generate_image(&text, options.image_model.as_deref())
            .await
        {
            Ok(bytes) => bytes,
            Err(e) => {
                let results = WorkflowResults::Multimodal {
                    text: Some(text),
                    image: None,
                    audio: None,
                };
                return Err(self.fail(record, results, "image generation", e).await);
            }
        };

        record.push_step("Synthesizing speech...");
        let audio = match self
            .gateway
            .synthesize_audio(&text, options.audio_model.as_deref())
            .await
        {
            Ok(bytes) => bytes,
            Err(e) => {
                let results = WorkflowResults::Multimodal {
                    text: Some(text),
                    image: Some(image),
                    audio: None,
                };
                return Err(self.fail(record, results, "speech synthesis", e).await);
            }
        };

        let results = WorkflowResults::Multimodal {
            text: Some(text),
            image: Some(image),
            audio: Some(audio),
        };
        Ok(self
            .finish(record, results, "Workflow finished successfully")
            .await)
    }

    /// Run the content-analysis workflow
    ///
    /// Dispatches on `content_type`: `"image"` gets a caption, `"text"`
    /// gets sentiment labels. Any other type fails before a gateway call is
    /// made and before any step is recorded.
    pub async fn analyze_content(&self, content: &str, content_type: &str) -> WorkflowResult {
        let mut record = WorkflowRecord::new(self.ids.next_id(), WorkflowKind::ContentAnalysis);
        tracing::info!(
            workflow_id = %record.id,
            content_type = %content_type,
            "Starting content analysis workflow"
        );

        let insight = match content_type {
            "image" => {
                record.push_step("Analyzing image...");
                match self.gateway.describe_image(content, None).await {
                    Ok(description) => ContentInsight::Description(description),
                    Err(e) => {
                        let results = WorkflowResults::Analysis { insight: None };
                        return Err(self.fail(record, results, "image analysis", e).await);
                    }
                }
            }
            "text" => {
                record.push_step("Analyzing sentiment...");
                match self.gateway.classify_text(content, None).await {
                    Ok(labels) => ContentInsight::Sentiment(labels),
                    Err(e) => {
                        let results = WorkflowResults::Analysis { insight: None };
                        return Err(self.fail(record, results, "sentiment analysis", e).await);
                    }
                }
            }
            other => {
                let error = EngineError::UnsupportedContentType(other.to_string());
                record.fail();
                tracing::warn!(workflow_id = %record.id, error = %error, "Workflow rejected");
                self.store.save(record.clone()).await;
                return Err(WorkflowFailure {
                    record,
                    source: error,
                });
            }
        };

        let results = WorkflowResults::Analysis {
            insight: Some(insight),
        };
        Ok(self.finish(record, results, "Analysis finished").await)
    }

    /// Run the agent-creation workflow
    ///
    /// Builds a descriptor from the supplied configuration, filling unset
    /// model fields with the capability defaults. When the agent claims
    /// text generation, one smoke-probe call is made and its output
    /// recorded. The probe is a liveness check only: the descriptor is
    /// active from construction and the probe result never gates it.
    pub async fn create_custom_agent(&self, config: &AgentConfig) -> WorkflowResult {
        let mut record = WorkflowRecord::new(self.ids.next_id(), WorkflowKind::AgentCreation);
        tracing::info!(
            workflow_id = %record.id,
            agent_name = %config.name,
            "Starting agent creation workflow"
        );

        record.push_step("Configuring agent...");
        let agent = AgentDescriptor {
            id: self.ids.next_id(),
            name: config.name.clone(),
            agent_type: config.agent_type.clone(),
            capabilities: config.capabilities.clone(),
            models: AgentModels {
                text: config
                    .text_model
                    .clone()
                    .unwrap_or_else(|| AgentModels::default().text),
                image: config
                    .image_model
                    .clone()
                    .unwrap_or_else(|| AgentModels::default().image),
                audio: config
                    .audio_model
                    .clone()
                    .unwrap_or_else(|| AgentModels::default().audio),
            },
            configuration: if config.configuration.is_null() {
                serde_json::json!({})
            } else {
                config.configuration.clone()
            },
            status: AgentStatus::Active,
            created_at: Utc::now(),
        };

        record.push_step("Probing agent capabilities...");
        let mut text_probe = None;
        if agent
            .capabilities
            .iter()
            .any(|c| c == TEXT_GENERATION_CAPABILITY)
        {
            match self
                .gateway
                .generate_text(
                    "Text generation smoke test",
                    Some(&agent.models.text),
                    TextGenerationParams::max_tokens(50),
                )
                .await
            {
                Ok(output) => text_probe = Some(output),
                Err(e) => {
                    let results = WorkflowResults::AgentCreation {
                        text_probe: None,
                        agent: None,
                    };
                    return Err(self.fail(record, results, "capability probe", e).await);
                }
            }
        }

        let results = WorkflowResults::AgentCreation {
            text_probe,
            agent: Some(agent),
        };
        Ok(self
            .finish(record, results, "Agent created successfully")
            .await)
    }

    /// Run the complex-orchestration workflow
    ///
    /// One decomposition call, then deterministic assignment of at most
    /// `MAX_SUBTASKS` subtasks to the supplied agents in order, then
    /// per-subtask execution through the configured `TaskExecutor`. Zero
    /// agents is still a successful run with a populated breakdown.
    pub async fn orchestrate_complex_task(
        &self,
        task_description: &str,
        agents: &[AgentRef],
    ) -> WorkflowResult {
        let mut record =
            WorkflowRecord::new(self.ids.next_id(), WorkflowKind::ComplexOrchestration);
        tracing::info!(
            workflow_id = %record.id,
            agent_count = agents.len(),
            "Starting complex orchestration workflow"
        );

        record.push_step("Analyzing complex task...");
        let prompt = format!("Break this task down into steps: {}", task_description);
        let task_breakdown = match self
            .gateway
            .generate_text(&prompt, None, TextGenerationParams::default())
            .await
        {
            Ok(text) => text,
            Err(e) => {
                let results = WorkflowResults::Orchestration {
                    task_breakdown: None,
                    subtasks: Vec::new(),
                };
                return Err(self.fail(record, results, "task decomposition", e).await);
            }
        };

        record.push_step("Assigning subtasks to agents...");
        let mut subtasks: Vec<Subtask> = agents
            .iter()
            .take(MAX_SUBTASKS)
            .enumerate()
            .map(|(i, agent)| Subtask {
                id: format!("subtask_{}", i),
                agent_id: agent.id.clone(),
                description: format!("Subtask {} for {}", i + 1, agent.name),
                status: SubtaskStatus::Assigned,
                result: None,
            })
            .collect();

        record.push_step("Executing subtasks...");
        for subtask in &mut subtasks {
            match self.executor.execute(subtask).await {
                Ok(result) => {
                    subtask.status = SubtaskStatus::Completed;
                    subtask.result = Some(result);
                }
                Err(e) => {
                    // A failed subtask is recorded on the subtask itself;
                    // only the decomposition stage gates the run.
                    tracing::warn!(
                        workflow_id = %record.id,
                        subtask_id = %subtask.id,
                        error = %e,
                        "Subtask execution failed"
                    );
                    subtask.status = SubtaskStatus::Failed;
                    subtask.result = Some(e.to_string());
                }
            }
        }

        let results = WorkflowResults::Orchestration {
            task_breakdown: Some(task_breakdown),
            subtasks,
        };
        Ok(self
            .finish(record, results, "Orchestration finished")
            .await)
    }

    /// Terminal path for a gateway failure: store the partial record and
    /// hand it back with the error
    async fn fail(
        &self,
        mut record: WorkflowRecord,
        results: WorkflowResults,
        step: &'static str,
        source: InferenceError,
    ) -> WorkflowFailure {
        let error = EngineError::Inference { step, source };
        record.results = results;
        record.fail();
        tracing::error!(workflow_id = %record.id, error = %error, "Workflow failed");
        self.store.save(record.clone()).await;
        WorkflowFailure {
            record,
            source: error,
        }
    }

    /// Terminal path for success: store the final record and hand it back
    async fn finish(
        &self,
        mut record: WorkflowRecord,
        results: WorkflowResults,
        final_step: &str,
    ) -> WorkflowRecord {
        record.results = results;
        record.complete();
        record.push_step(final_step);
        tracing::info!(
            workflow_id = %record.id,
            steps = record.steps().len(),
            "Workflow completed"
        );
        self.store.save(record.clone()).await;
        record
    }
}
