//! Inference gateway
//!
//! Abstraction over the external generative-model provider. The
//! `InferenceGateway` trait is the capability interface the workflow engine
//! is written against; `HfInferenceClient` is the production implementation
//! backed by the Hugging Face Inference API.

pub mod client;
pub mod types;

use async_trait::async_trait;
use thiserror::Error;

pub use client::HfInferenceClient;
pub use types::{Classification, TextGenerationParams};

/// Default model for text generation when a caller omits one
pub const DEFAULT_TEXT_MODEL: &str = "microsoft/DialoGPT-medium";

/// Default model for image generation
pub const DEFAULT_IMAGE_MODEL: &str = "stabilityai/stable-diffusion-2-1";

/// Default model for speech synthesis
pub const DEFAULT_AUDIO_MODEL: &str = "microsoft/speecht5_tts";

/// Default model for image captioning
pub const DEFAULT_CAPTION_MODEL: &str = "Salesforce/blip-image-captioning-base";

/// Default model for sentiment classification
pub const DEFAULT_SENTIMENT_MODEL: &str = "cardiffnlp/twitter-roberta-base-sentiment-latest";

/// Errors produced by a single gateway call
///
/// Calls are never retried here: generation requests are neither idempotent
/// nor cheap, so retry policy belongs to the caller, not the gateway.
#[derive(Debug, Error)]
pub enum InferenceError {
    /// The call exceeded the configured per-request timeout
    #[error("request to model endpoint timed out")]
    Timeout,

    /// The request could not be sent or the connection failed mid-flight
    #[error("failed to reach model endpoint: {0}")]
    Transport(String),

    /// The endpoint answered with a non-success HTTP status
    #[error("model endpoint returned HTTP {status}: {body}")]
    Endpoint {
        /// HTTP status code returned by the endpoint
        status: u16,
        /// Response body, as far as it could be read
        body: String,
    },

    /// The response body could not be decoded into the expected shape
    #[error("failed to decode model response: {0}")]
    Decode(String),

    /// The endpoint answered successfully but produced no usable output
    #[error("model returned an empty response")]
    EmptyResponse,
}

/// Capability interface over the remote inference provider
///
/// Each operation wraps exactly one outbound request; no state is retained
/// between calls. Implementations are swappable so the engine can run
/// against test doubles or alternate providers.
#[async_trait]
pub trait InferenceGateway: Send + Sync {
    /// Generate text for a prompt
    async fn generate_text(
        &self,
        prompt: &str,
        model: Option<&str>,
        params: TextGenerationParams,
    ) -> Result<String, InferenceError>;

    /// Generate an image for a prompt, returning the raw encoded bytes
    async fn generate_image(
        &self,
        prompt: &str,
        model: Option<&str>,
    ) -> Result<Vec<u8>, InferenceError>;

    /// Synthesize speech for a text, returning the raw encoded bytes
    async fn synthesize_audio(
        &self,
        text: &str,
        model: Option<&str>,
    ) -> Result<Vec<u8>, InferenceError>;

    /// Produce a natural-language description of an image
    async fn describe_image(
        &self,
        image: &str,
        model: Option<&str>,
    ) -> Result<String, InferenceError>;

    /// Classify a text, returning labels ranked by score
    async fn classify_text(
        &self,
        text: &str,
        model: Option<&str>,
    ) -> Result<Vec<Classification>, InferenceError>;
}
