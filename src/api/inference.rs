//! Inference capability API handlers
//!
//! Thin routes over the gateway's four capabilities. Each handler validates
//! its input, issues exactly one gateway call, and encodes binary payloads
//! as data URIs for transport.

use crate::api::utils::{data_uri, validate_input};
use crate::api::ServerState;
use crate::error::AppError;
use crate::gateway::TextGenerationParams;
use axum::{extract::State, response::Json};
use serde::{Deserialize, Serialize};

/// Text generation request
#[derive(Deserialize)]
pub struct GenerateTextRequest {
    /// Prompt to generate from
    pub prompt: String,
    /// Optional model override
    pub model: Option<String>,
}

/// Text generation response
#[derive(Serialize)]
pub struct GenerateTextResponse {
    /// Always true on the success path
    pub success: bool,
    /// The generated text
    pub result: String,
}

/// Image generation request
#[derive(Deserialize)]
pub struct GenerateImageRequest {
    /// Prompt to render
    pub prompt: String,
    /// Optional model override
    pub model: Option<String>,
}

/// Image generation response
#[derive(Serialize)]
pub struct GenerateImageResponse {
    /// Always true on the success path
    pub success: bool,
    /// Generated image as a `data:image/png;base64,...` URI
    pub image: String,
}

/// Speech synthesis request
#[derive(Deserialize)]
pub struct SynthesizeAudioRequest {
    /// Text to speak
    pub text: String,
    /// Optional model override
    pub model: Option<String>,
}

/// Speech synthesis response
#[derive(Serialize)]
pub struct SynthesizeAudioResponse {
    /// Always true on the success path
    pub success: bool,
    /// Synthesized audio as a `data:audio/wav;base64,...` URI
    pub audio: String,
}

/// Image analysis request
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyzeImageRequest {
    /// Reference to the image to caption (URL or data URI)
    pub image_url: String,
    /// Optional model override
    pub model: Option<String>,
}

/// Image analysis response
#[derive(Serialize)]
pub struct AnalyzeImageResponse {
    /// Always true on the success path
    pub success: bool,
    /// Natural-language description of the image
    pub description: String,
}

/// POST /api/text/generate - Generate text from a prompt
pub async fn generate_text(
    State(state): State<ServerState>,
    Json(request): Json<GenerateTextRequest>,
) -> Result<Json<GenerateTextResponse>, AppError> {
    validate_input("prompt", &request.prompt)?;

    let result = state
        .gateway
        .generate_text(
            &request.prompt,
            request.model.as_deref(),
            TextGenerationParams::completion(),
        )
        .await
        .map_err(|source| AppError::Inference {
            step: "text generation",
            source,
        })?;

    Ok(Json(GenerateTextResponse {
        success: true,
        result,
    }))
}

/// POST /api/image/generate - Generate an image from a prompt
pub async fn generate_image(
    State(state): State<ServerState>,
    Json(request): Json<GenerateImageRequest>,
) -> Result<Json<GenerateImageResponse>, AppError> {
    validate_input("prompt", &request.prompt)?;

    let bytes = state
        .gateway
        .generate_image(&request.prompt, request.model.as_deref())
        .await
        .map_err(|source| AppError::Inference {
            step: "image generation",
            source,
        })?;

    Ok(Json(GenerateImageResponse {
        success: true,
        image: data_uri("image/png", &bytes),
    }))
}

/// POST /api/audio/synthesize - Synthesize speech for a text
pub async fn synthesize_audio(
    State(state): State<ServerState>,
    Json(request): Json<SynthesizeAudioRequest>,
) -> Result<Json<SynthesizeAudioResponse>, AppError> {
    validate_input("text", &request.text)?;

    let bytes = state
        .gateway
        .synthesize_audio(&request.text, request.model.as_deref())
        .await
        .map_err(|source| AppError::Inference {
            step: "speech synthesis",
            source,
        })?;

    Ok(Json(SynthesizeAudioResponse {
        success: true,
        audio: data_uri("audio/wav", &bytes),
    }))
}

/// POST /api/image/analyze - Describe an image
pub async fn analyze_image(
    State(state): State<ServerState>,
    Json(request): Json<AnalyzeImageRequest>,
) -> Result<Json<AnalyzeImageResponse>, AppError> {
    validate_input("imageUrl", &request.image_url)?;

    let description = state
        .gateway
        .describe_image(&request.image_url, request.model.as_deref())
        .await
        .map_err(|source| AppError::Inference {
            step: "image analysis",
            source,
        })?;

    Ok(Json(AnalyzeImageResponse {
        success: true,
        description,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::test_support::server_state;

    #[tokio::test]
    async fn test_generate_text_success() {
        let state = server_state();
        let request = GenerateTextRequest {
            prompt: "a story".to_string(),
            model: None,
        };

        let response = generate_text(State(state), Json(request)).await.unwrap();
        assert!(response.success);
        assert_eq!(response.result, "generated: a story");
    }

    #[tokio::test]
    async fn test_generate_text_rejects_empty_prompt() {
        let state = server_state();
        let request = GenerateTextRequest {
            prompt: "  ".to_string(),
            model: None,
        };

        let result = generate_text(State(state), Json(request)).await;
        assert!(matches!(result, Err(AppError::Validation(_))));
    }

    #[tokio::test]
    async fn test_generate_image_encodes_data_uri() {
        let state = server_state();
        let request = GenerateImageRequest {
            prompt: "a red fox".to_string(),
            model: None,
        };

        let response = generate_image(State(state), Json(request)).await.unwrap();
        assert!(response.image.starts_with("data:image/png;base64,"));
    }

    #[tokio::test]
    async fn test_synthesize_audio_encodes_data_uri() {
        let state = server_state();
        let request = SynthesizeAudioRequest {
            text: "hello".to_string(),
            model: None,
        };

        let response = synthesize_audio(State(state), Json(request)).await.unwrap();
        assert!(response.audio.starts_with("data:audio/wav;base64,"));
    }

    #[tokio::test]
    async fn test_analyze_image_returns_description() {
        let state = server_state();
        let request = AnalyzeImageRequest {
            image_url: "https://example.com/cat.png".to_string(),
            model: None,
        };

        let response = analyze_image(State(state), Json(request)).await.unwrap();
        assert_eq!(response.description, "a photo of a cat");
    }
}
