//! Gemini (Google) image generation client.

use crate::error::{parse_retry_after, sanitize_error_message, NanoBananaError, Result};
use crate::provider::ImageProvider;
use crate::types::{GeneratedImage, GenerationOutcome, GenerationRequest, ImageFormat};
use async_trait::async_trait;
use base64::Engine;
use serde::{Deserialize, Serialize};
use std::time::Instant;

/// Gemini image model variants.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum GeminiModel {
    /// Gemini 3 Pro Image (highest quality).
    #[default]
    Gemini3ProImage,
    /// Gemini 2.5 Flash Image (fast, economical).
    Gemini25FlashImage,
    /// Imagen 4.
    Imagen4,
}

impl GeminiModel {
    /// Returns the API model identifier.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Gemini3ProImage => "gemini-3-pro-image-preview",
            Self::Gemini25FlashImage => "gemini-2.5-flash-image",
            Self::Imagen4 => "imagen-4.0-generate-001",
        }
    }
}

/// Builder for GeminiClient.
#[derive(Debug, Clone, Default)]
pub struct GeminiClientBuilder {
    api_key: Option<String>,
    model: GeminiModel,
}

impl GeminiClientBuilder {
    /// Creates a new builder with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the API key.
    pub fn api_key(mut self, key: impl Into<String>) -> Self {
        self.api_key = Some(key.into());
        self
    }

    /// Sets the Gemini model variant.
    pub fn model(mut self, model: GeminiModel) -> Self {
        self.model = model;
        self
    }

    /// Builds the client. The API key comes from the startup configuration;
    /// the builder itself never consults the environment.
    pub fn build(self) -> Result<GeminiClient> {
        let api_key = self
            .api_key
            .ok_or_else(|| NanoBananaError::Auth("no API key provided".into()))?;

        Ok(GeminiClient {
            client: reqwest::Client::new(),
            api_key,
            model: self.model,
        })
    }
}

/// Gemini image generation client.
#[derive(Debug)]
pub struct GeminiClient {
    client: reqwest::Client,
    api_key: String,
    model: GeminiModel,
}

impl GeminiClient {
    /// Creates a new `GeminiClientBuilder`.
    pub fn builder() -> GeminiClientBuilder {
        GeminiClientBuilder::new()
    }

    /// Returns the configured model.
    pub fn model(&self) -> GeminiModel {
        self.model
    }

    async fn generate_impl(&self, request: &GenerationRequest) -> Result<GenerationOutcome> {
        let start = Instant::now();

        let url = format!(
            "https://generativelanguage.googleapis.com/v1beta/models/{}:generateContent",
            self.model.as_str(),
        );

        let body = GeminiRequest::from_generation_request(request);
        tracing::debug!(model = self.model.as_str(), "submitting generation request");

        let response = self
            .client
            .post(&url)
            .header("x-goog-api-key", &self.api_key)
            .header("Content-Type", "application/json")
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let headers = response.headers().clone();
            let text = response.text().await.unwrap_or_default();
            return Err(self.parse_error(status.as_u16(), &text, &headers));
        }

        let gemini_response: GeminiResponse = response.json().await?;
        let outcome = interpret_response(gemini_response)?;

        let duration_ms = start.elapsed().as_millis() as u64;
        match &outcome {
            GenerationOutcome::Image(image) => {
                tracing::debug!(duration_ms, size_bytes = image.size(), "received image");
            }
            GenerationOutcome::Text(_) => {
                tracing::debug!(duration_ms, "received text-only response");
            }
            GenerationOutcome::Empty => {
                tracing::debug!(duration_ms, "received empty response");
            }
        }

        Ok(outcome)
    }

    fn parse_error(
        &self,
        status: u16,
        text: &str,
        headers: &reqwest::header::HeaderMap,
    ) -> NanoBananaError {
        let text = sanitize_error_message(text);
        if status == 404 {
            return NanoBananaError::InvalidRequest(
                "Model not found. Verify the model name is correct.".into(),
            );
        }
        if status == 429 {
            let retry_after = parse_retry_after(headers).map(std::time::Duration::from_secs);
            return NanoBananaError::RateLimited { retry_after };
        }
        if status == 401 || status == 403 {
            return NanoBananaError::Auth(text);
        }
        let lower = text.to_lowercase();
        if lower.contains("safety")
            || lower.contains("blocked")
            || lower.contains("content_policy")
            || lower.contains("prohibited")
        {
            return NanoBananaError::ContentBlocked(text);
        }
        NanoBananaError::Api {
            status,
            message: text,
        }
    }
}

#[async_trait]
impl ImageProvider for GeminiClient {
    async fn generate(&self, request: &GenerationRequest) -> Result<GenerationOutcome> {
        self.generate_impl(request).await
    }
}

/// Interprets a 200 response body.
///
/// Scan order is fixed: the first inline image part wins; only when no part
/// carries image data are the text parts concatenated into a diagnostic.
fn interpret_response(response: GeminiResponse) -> Result<GenerationOutcome> {
    // Blocked prompts come back as HTTP 200 with promptFeedback set
    if let Some(feedback) = response.prompt_feedback {
        if let Some(reason) = feedback.block_reason {
            let msg = feedback
                .block_reason_message
                .unwrap_or_else(|| format!("Prompt blocked: {reason}"));
            return Err(NanoBananaError::ContentBlocked(msg));
        }
    }

    let Some(candidate) = response.candidates.into_iter().next() else {
        return Ok(GenerationOutcome::Empty);
    };

    let content = match candidate.content {
        Some(content) => content,
        None => {
            if let Some(reason) = candidate.finish_reason {
                if is_safety_finish(&reason) {
                    return Err(NanoBananaError::ContentBlocked(format!(
                        "Content blocked by Gemini safety filter: {reason}"
                    )));
                }
            }
            return Ok(GenerationOutcome::Empty);
        }
    };

    for part in &content.parts {
        if let Some(inline) = &part.inline_data {
            let data = base64::engine::general_purpose::STANDARD
                .decode(&inline.data)
                .map_err(|e| NanoBananaError::Decode(e.to_string()))?;

            let format = match inline.mime_type.as_str() {
                "image/jpeg" => ImageFormat::Jpeg,
                "image/webp" => ImageFormat::WebP,
                _ => ImageFormat::Png,
            };

            return Ok(GenerationOutcome::Image(GeneratedImage::new(data, format)));
        }
    }

    let text: String = content
        .parts
        .into_iter()
        .filter_map(|part| part.text)
        .collect();

    if text.is_empty() {
        Ok(GenerationOutcome::Empty)
    } else {
        Ok(GenerationOutcome::Text(text))
    }
}

fn is_safety_finish(reason: &str) -> bool {
    matches!(
        reason,
        "SAFETY"
            | "IMAGE_SAFETY"
            | "IMAGE_PROHIBITED_CONTENT"
            | "IMAGE_RECITATION"
            | "RECITATION"
            | "PROHIBITED_CONTENT"
            | "BLOCKLIST"
    )
}

// Request/Response types
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GeminiRequest {
    contents: Vec<GeminiContent>,
    generation_config: GeminiGenerationConfig,
}

#[derive(Debug, Serialize)]
struct GeminiContent {
    parts: Vec<GeminiRequestPart>,
}

/// A part in a Gemini request - can be text or inline image data.
#[derive(Debug, Serialize)]
#[serde(untagged)]
enum GeminiRequestPart {
    Text { text: String },
    InlineData { inline_data: GeminiInlineData },
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GeminiInlineData {
    mime_type: String,
    data: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GeminiGenerationConfig {
    response_modalities: Vec<String>,
    image_config: GeminiImageConfig,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GeminiImageConfig {
    aspect_ratio: String,
}

impl GeminiRequest {
    fn from_generation_request(req: &GenerationRequest) -> Self {
        let mut parts = Vec::new();

        // Input image goes first, the prompt second
        if let Some(ref image) = req.input_image {
            parts.push(GeminiRequestPart::InlineData {
                inline_data: GeminiInlineData {
                    mime_type: image.mime_type().to_string(),
                    data: base64::engine::general_purpose::STANDARD.encode(&image.data),
                },
            });
        }

        parts.push(GeminiRequestPart::Text {
            text: req.prompt.clone(),
        });

        Self {
            contents: vec![GeminiContent { parts }],
            generation_config: GeminiGenerationConfig {
                response_modalities: vec!["TEXT".to_string(), "IMAGE".to_string()],
                image_config: GeminiImageConfig {
                    aspect_ratio: req.aspect_ratio.as_str().to_string(),
                },
            },
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GeminiResponse {
    #[serde(default)]
    candidates: Vec<GeminiCandidate>,
    #[serde(default)]
    prompt_feedback: Option<PromptFeedback>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GeminiCandidate {
    #[serde(default)]
    content: Option<GeminiContentResponse>,
    #[serde(default)]
    finish_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PromptFeedback {
    #[serde(default)]
    block_reason: Option<String>,
    #[serde(default)]
    block_reason_message: Option<String>,
}

#[derive(Debug, Deserialize)]
struct GeminiContentResponse {
    parts: Vec<GeminiPartResponse>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GeminiPartResponse {
    #[serde(default)]
    inline_data: Option<InlineData>,
    #[serde(default)]
    text: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct InlineData {
    mime_type: String,
    data: String,
}
