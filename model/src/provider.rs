//! Relevance model providers.
//!
//! The session talks to models only through [`RelevanceModel`]; the Gemini
//! REST API is the provider shipped with the CLI.

use async_trait::async_trait;
use serde::Deserialize;
use tracing::{debug, info};

use crate::RelevantFiles;
use crate::error::{ModelError, ModelErrorKind, Result};

/// Trait for models that pick relevant files out of a prompt.
#[async_trait]
pub trait RelevanceModel: Send + Sync {
    /// Get the name of this provider.
    fn name(&self) -> &str;

    /// Model identifier requests are sent to.
    fn model(&self) -> &str;

    /// Ask the model which files are relevant. One attempt, no retries.
    async fn ask(&self, prompt: &str) -> Result<RelevantFiles>;

    /// Check if the provider is usable (API key set, etc.).
    fn is_available(&self) -> bool;
}

/// Google Gemini provider using structured JSON output.
pub struct GeminiProvider {
    /// API key.
    api_key: Option<String>,

    /// API base URL.
    base_url: String,

    /// HTTP client.
    client: reqwest::Client,

    /// Model name, e.g. `gemini-2.0-flash-001`.
    model: String,
}

impl GeminiProvider {
    /// Environment variable holding the API key.
    pub const API_KEY_ENV: &'static str = "GEMINI_API_KEY";

    /// Model used when none is selected.
    pub const DEFAULT_MODEL: &'static str = "gemini-2.0-flash-001";

    /// Create a new provider reading the key from `GEMINI_API_KEY`.
    pub fn new() -> Self {
        Self {
            api_key: std::env::var(Self::API_KEY_ENV)
                .ok()
                .filter(|key| !key.is_empty()),
            base_url: "https://generativelanguage.googleapis.com/v1beta".to_string(),
            client: reqwest::Client::new(),
            model: Self::DEFAULT_MODEL.to_string(),
        }
    }

    /// Set the API key.
    pub fn with_api_key(mut self, key: impl Into<String>) -> Self {
        self.api_key = Some(key.into());
        self
    }

    /// Set the base URL.
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Set the model.
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    fn request_body(prompt: &str) -> serde_json::Value {
        serde_json::json!({
            "contents": [{
                "role": "user",
                "parts": [{ "text": prompt }]
            }],
            "generationConfig": {
                "responseMimeType": "application/json",
                "responseSchema": RelevantFiles::response_schema()
            }
        })
    }
}

impl Default for GeminiProvider {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl RelevanceModel for GeminiProvider {
    fn name(&self) -> &str {
        "gemini"
    }

    fn model(&self) -> &str {
        &self.model
    }

    async fn ask(&self, prompt: &str) -> Result<RelevantFiles> {
        let api_key = self.api_key.as_ref().ok_or_else(|| {
            ModelError::not_configured(format!("{} is not set", Self::API_KEY_ENV))
        })?;

        debug!(
            "Asking {} for relevant files ({} prompt bytes)",
            self.model,
            prompt.len()
        );

        let response = self
            .client
            .post(format!(
                "{}/models/{}:generateContent",
                self.base_url, self.model
            ))
            .header("x-goog-api-key", api_key)
            .header("Content-Type", "application/json")
            .json(&Self::request_body(prompt))
            .send()
            .await?;

        let status = response.status();
        if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
            let error_text = response.text().await.unwrap_or_default();
            return Err(ModelError::new(
                ModelErrorKind::RateLimited,
                format!("rate limit exceeded: {error_text}"),
            ));
        }

        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            return Err(ModelError::new(
                ModelErrorKind::Api,
                format!("status {status}: {error_text}"),
            ));
        }

        let result: GenerateContentResponse = response.json().await?;
        let text = result.text()?;
        let files: RelevantFiles = serde_json::from_str(strip_code_fence(&text))?;

        info!(
            "{} returned {} relevant files",
            self.model,
            files.relevant_files.len()
        );

        Ok(files)
    }

    fn is_available(&self) -> bool {
        self.api_key.is_some()
    }
}

/// Gemini `generateContent` response format.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
    prompt_feedback: Option<PromptFeedback>,
}

impl GenerateContentResponse {
    /// Text of the first candidate, with all parts joined.
    fn text(&self) -> Result<String> {
        let Some(candidate) = self.candidates.first() else {
            let reason = self
                .prompt_feedback
                .as_ref()
                .and_then(|f| f.block_reason.clone())
                .unwrap_or_else(|| "no candidates in response".to_string());
            return Err(ModelError::invalid_response(reason));
        };

        let text: String = candidate
            .content
            .as_ref()
            .map(|content| {
                content
                    .parts
                    .iter()
                    .filter_map(|part| part.text.as_deref())
                    .collect()
            })
            .unwrap_or_default();

        if text.trim().is_empty() {
            let reason = candidate
                .finish_reason
                .clone()
                .unwrap_or_else(|| "unknown".to_string());
            return Err(ModelError::invalid_response(format!(
                "empty answer (finish reason: {reason})"
            )));
        }

        Ok(text)
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Candidate {
    content: Option<Content>,
    finish_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
struct Content {
    #[serde(default)]
    parts: Vec<Part>,
}

#[derive(Debug, Deserialize)]
struct Part {
    text: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PromptFeedback {
    block_reason: Option<String>,
}

/// Remove a surrounding Markdown code fence some models add to JSON output.
fn strip_code_fence(text: &str) -> &str {
    let trimmed = text.trim();
    let Some(rest) = trimmed.strip_prefix("```") else {
        return trimmed;
    };
    let body = rest.split_once('\n').map_or("", |(_, body)| body);
    body.strip_suffix("```").unwrap_or(body).trim()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_builder() {
        let provider = GeminiProvider::new()
            .with_api_key("key")
            .with_model("gemini-2.5-flash-preview-05-20");

        assert_eq!(provider.model(), "gemini-2.5-flash-preview-05-20");
        assert!(provider.is_available());
    }

    #[test]
    fn test_request_body_carries_schema() {
        let body = GeminiProvider::request_body("find files");
        assert_eq!(body["contents"][0]["parts"][0]["text"], "find files");
        assert_eq!(
            body["generationConfig"]["responseMimeType"],
            "application/json"
        );
        assert_eq!(
            body["generationConfig"]["responseSchema"]["required"][0],
            "relevant_files"
        );
    }

    #[test]
    fn test_strip_code_fence() {
        assert_eq!(strip_code_fence("{\"a\":1}"), "{\"a\":1}");
        assert_eq!(strip_code_fence("```json\n{\"a\":1}\n```"), "{\"a\":1}");
        assert_eq!(strip_code_fence("  ```\n[]\n```  "), "[]");
    }

    #[test]
    fn test_blocked_prompt_is_invalid_response() {
        let response: GenerateContentResponse =
            serde_json::from_str(r#"{"promptFeedback":{"blockReason":"SAFETY"}}"#).unwrap();
        let err = response.text().unwrap_err();
        assert_eq!(err.kind, ModelErrorKind::InvalidResponse);
        assert_eq!(err.message, "SAFETY");
    }
}
