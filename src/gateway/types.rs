//! Inference API wire types
//!
//! Structs that mirror the JSON request/response format of the hosted
//! inference endpoints. Used to serialize requests and deserialize responses
//! into typed Rust structs.

use serde::{Deserialize, Serialize};

/// Request body for inference calls that take a text input
#[derive(Serialize, Debug)]
pub struct InferenceRequest {
    /// The input prompt or text
    pub inputs: String,
    /// Optional generation parameters
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parameters: Option<RequestParameters>,
}

/// Generation parameters accepted by text-generation models
#[derive(Serialize, Debug)]
pub struct RequestParameters {
    /// Upper bound on generated tokens
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_new_tokens: Option<u32>,
    /// Sampling temperature
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f32>,
    /// Whether the response should include the prompt text
    #[serde(skip_serializing_if = "Option::is_none")]
    pub return_full_text: Option<bool>,
}

/// A single generated-text candidate in a response
#[derive(Deserialize, Debug)]
pub struct GeneratedText {
    /// The text produced by the model
    pub generated_text: String,
}

/// One classification label with its confidence score
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Classification {
    /// Label name (e.g., "positive")
    pub label: String,
    /// Confidence score in [0, 1]
    pub score: f32,
}

/// Caller-facing knobs for a text generation call
#[derive(Debug, Clone, Copy)]
pub struct TextGenerationParams {
    /// Upper bound on generated tokens
    pub max_new_tokens: u32,
    /// Sampling temperature
    pub temperature: f32,
    /// Whether the response should include the prompt text
    pub return_full_text: Option<bool>,
}

impl Default for TextGenerationParams {
    fn default() -> Self {
        Self {
            max_new_tokens: 200,
            temperature: 0.7,
            return_full_text: None,
        }
    }
}

impl TextGenerationParams {
    /// Parameters with a custom token budget
    pub fn max_tokens(max_new_tokens: u32) -> Self {
        Self {
            max_new_tokens,
            ..Self::default()
        }
    }

    /// Parameters for the direct generation route: shorter output with the
    /// prompt stripped from the response
    pub fn completion() -> Self {
        Self {
            max_new_tokens: 100,
            temperature: 0.7,
            return_full_text: Some(false),
        }
    }
}

impl From<TextGenerationParams> for RequestParameters {
    fn from(params: TextGenerationParams) -> Self {
        Self {
            max_new_tokens: Some(params.max_new_tokens),
            temperature: Some(params.temperature),
            return_full_text: params.return_full_text,
        }
    }
}
