//! Hugging Face Inference API client
//!
//! Direct HTTP client for the hosted model-serving endpoints. Every
//! operation is a single `POST {base_url}/models/{model}` request with a
//! bearer token; there is no retry and no state between calls.

use crate::config::InferenceConfig;
use crate::gateway::types::{Classification, GeneratedText, InferenceRequest, TextGenerationParams};
use crate::gateway::{InferenceError, InferenceGateway};
use async_trait::async_trait;
use std::time::Duration;

/// HTTP client for the Hugging Face Inference API
///
/// Holds a shared `reqwest::Client` (connection pooling) configured with the
/// per-call timeout from `InferenceConfig`.
pub struct HfInferenceClient {
    client: reqwest::Client,
    api_key: String,
    base_url: String,
}

impl HfInferenceClient {
    /// Create a client from inference configuration
    ///
    /// # Errors
    /// * Returns an error if the underlying HTTP client cannot be built
    ///   (e.g., TLS backend initialization failure).
    pub fn new(config: &InferenceConfig) -> anyhow::Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;
        Ok(Self {
            client,
            api_key: config.api_key.clone(),
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Create a client against a custom base URL (for testing)
    #[allow(dead_code)] // Used in tests
    fn with_base_url(api_key: &str, base_url: &str) -> Self {
        Self {
            client: reqwest::Client::new(),
            api_key: api_key.to_string(),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    fn model_url(&self, model: &str) -> String {
        format!("{}/models/{}", self.base_url, model)
    }

    /// Send one inference request and check the HTTP status
    async fn send(
        &self,
        model: &str,
        request: &InferenceRequest,
    ) -> Result<reqwest::Response, InferenceError> {
        let url = self.model_url(model);
        tracing::debug!(
            url = %url,
            model = %model,
            input_len = request.inputs.len(),
            "Calling inference endpoint"
        );

        let mut call = self.client.post(&url).json(request);
        if !self.api_key.is_empty() {
            call = call.bearer_auth(&self.api_key);
        }

        let response = call.send().await.map_err(map_transport_error)?;

        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "Unable to read error body".to_string());

            tracing::error!(
                status_code = status.as_u16(),
                model = %model,
                error_body = %body,
                "Inference endpoint returned error status"
            );

            return Err(InferenceError::Endpoint {
                status: status.as_u16(),
                body,
            });
        }

        Ok(response)
    }

    /// Read a response expected to be `[{"generated_text": ...}]`
    async fn read_generated_text(response: reqwest::Response) -> Result<String, InferenceError> {
        let body = response.text().await.map_err(map_transport_error)?;
        let candidates: Vec<GeneratedText> = serde_json::from_str(&body).map_err(|e| {
            InferenceError::Decode(format!("{} - response body: {}", e, body))
        })?;

        let first = candidates
            .into_iter()
            .next()
            .ok_or(InferenceError::EmptyResponse)?;
        if first.generated_text.is_empty() {
            return Err(InferenceError::EmptyResponse);
        }
        Ok(first.generated_text)
    }

    /// Read a raw binary response body (image or audio payload)
    async fn read_bytes(response: reqwest::Response) -> Result<Vec<u8>, InferenceError> {
        let bytes = response.bytes().await.map_err(map_transport_error)?;
        if bytes.is_empty() {
            return Err(InferenceError::EmptyResponse);
        }
        Ok(bytes.to_vec())
    }
}

fn map_transport_error(error: reqwest::Error) -> InferenceError {
    if error.is_timeout() {
        InferenceError::Timeout
    } else {
        InferenceError::Transport(error.to_string())
    }
}

#[async_trait]
impl InferenceGateway for HfInferenceClient {
    async fn generate_text(
        &self,
        prompt: &str,
        model: Option<&str>,
        params: TextGenerationParams,
    ) -> Result<String, InferenceError> {
        let model = model.unwrap_or(super::DEFAULT_TEXT_MODEL);
        let request = InferenceRequest {
            inputs: prompt.to_string(),
            parameters: Some(params.into()),
        };
        let response = self.send(model, &request).await?;
        let text = Self::read_generated_text(response).await?;
        tracing::debug!(model = %model, response_len = text.len(), "Text generation succeeded");
        Ok(text)
    }

    async fn generate_image(
        &self,
        prompt: &str,
        model: Option<&str>,
    ) -> Result<Vec<u8>, InferenceError> {
        let model = model.unwrap_or(super::DEFAULT_IMAGE_MODEL);
        let request = InferenceRequest {
            inputs: prompt.to_string(),
            parameters: None,
        };
        let response = self.send(model, &request).await?;
        let bytes = Self::read_bytes(response).await?;
        tracing::debug!(model = %model, payload_len = bytes.len(), "Image generation succeeded");
        Ok(bytes)
    }

    async fn synthesize_audio(
        &self,
        text: &str,
        model: Option<&str>,
    ) -> Result<Vec<u8>, InferenceError> {
        let model = model.unwrap_or(super::DEFAULT_AUDIO_MODEL);
        let request = InferenceRequest {
            inputs: text.to_string(),
            parameters: None,
        };
        let response = self.send(model, &request).await?;
        let bytes = Self::read_bytes(response).await?;
        tracing::debug!(model = %model, payload_len = bytes.len(), "Speech synthesis succeeded");
        Ok(bytes)
    }

    async fn describe_image(
        &self,
        image: &str,
        model: Option<&str>,
    ) -> Result<String, InferenceError> {
        let model = model.unwrap_or(super::DEFAULT_CAPTION_MODEL);
        // The caption endpoint accepts the image reference (URL or data URI)
        // as its input.
        let request = InferenceRequest {
            inputs: image.to_string(),
            parameters: None,
        };
        let response = self.send(model, &request).await?;
        Self::read_generated_text(response).await
    }

    async fn classify_text(
        &self,
        text: &str,
        model: Option<&str>,
    ) -> Result<Vec<Classification>, InferenceError> {
        let model = model.unwrap_or(super::DEFAULT_SENTIMENT_MODEL);
        let request = InferenceRequest {
            inputs: text.to_string(),
            parameters: None,
        };
        let response = self.send(model, &request).await?;

        let body = response.text().await.map_err(map_transport_error)?;
        // Classification responses nest one ranked list per input.
        let ranked: Vec<Vec<Classification>> = serde_json::from_str(&body).map_err(|e| {
            InferenceError::Decode(format!("{} - response body: {}", e, body))
        })?;

        let labels = ranked
            .into_iter()
            .next()
            .ok_or(InferenceError::EmptyResponse)?;
        if labels.is_empty() {
            return Err(InferenceError::EmptyResponse);
        }
        Ok(labels)
    }
}
