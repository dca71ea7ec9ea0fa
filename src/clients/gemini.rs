use std::fmt;
use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::clients::traits::{Completion, CompletionError, CompletionService};

pub const DEFAULT_MODEL: &str = "gemini-2.5-flash";
pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";
pub const DEFAULT_TIMEOUT_MS: u64 = 20_000;
/// Cap on how much of an error body ends up in logs
const ERROR_BODY_CAP: usize = 512;

#[derive(Debug, Serialize)]
struct GenerateRequest<'a> {
    contents: Vec<RequestContent<'a>>,
}

#[derive(Debug, Serialize)]
struct RequestContent<'a> {
    parts: Vec<RequestPart<'a>>,
}

#[derive(Debug, Serialize)]
struct RequestPart<'a> {
    text: &'a str,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
    #[serde(default)]
    model_version: Option<String>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    #[serde(default)]
    content: Option<CandidateContent>,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<CandidatePart>,
}

#[derive(Debug, Deserialize)]
struct CandidatePart {
    #[serde(default)]
    text: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    error: ApiErrorDetail,
}

#[derive(Debug, Deserialize)]
struct ApiErrorDetail {
    message: String,
}

/// Gemini `generateContent` REST client.
///
/// Constructed without a key, every call fails with
/// [`CompletionError::NotConfigured`] instead of reaching the network.
#[derive(Clone)]
pub struct GeminiClient {
    client: reqwest::Client,
    api_key: Option<String>,
    model: String,
    base_url: String,
    timeout: Duration,
}

impl fmt::Debug for GeminiClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GeminiClient")
            .field("api_key", &self.api_key.as_ref().map(|_| "[REDACTED]"))
            .field("model", &self.model)
            .field("base_url", &self.base_url)
            .field("timeout", &self.timeout)
            .finish()
    }
}

impl GeminiClient {
    pub fn new(api_key: Option<String>) -> anyhow::Result<Self> {
        Self::with_options(api_key, DEFAULT_MODEL, DEFAULT_BASE_URL, DEFAULT_TIMEOUT_MS)
    }

    pub fn with_options(
        api_key: Option<String>,
        model: impl Into<String>,
        base_url: impl Into<String>,
        timeout_ms: u64,
    ) -> anyhow::Result<Self> {
        use anyhow::Context;

        let timeout = Duration::from_millis(timeout_ms);
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .context("Failed to build reqwest client with timeout")?;
        // Treat a blank key the same as a missing one
        let api_key = api_key
            .map(|k| k.trim().to_string())
            .filter(|k| !k.is_empty());
        Ok(Self {
            client,
            api_key,
            model: model.into(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
            timeout,
        })
    }

    pub fn has_key(&self) -> bool {
        self.api_key.is_some()
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    fn endpoint(&self) -> String {
        format!("{}/models/{}:generateContent", self.base_url, self.model)
    }

    fn map_send_err(&self, e: reqwest::Error) -> CompletionError {
        if e.is_timeout() {
            CompletionError::Timeout {
                timeout_ms: self.timeout.as_millis() as u64,
            }
        } else {
            CompletionError::Http(e.to_string())
        }
    }
}

/// Join the text parts of the first candidate.
fn extract_text(body: GenerateResponse) -> Result<Completion, CompletionError> {
    let text = body
        .candidates
        .into_iter()
        .next()
        .and_then(|c| c.content)
        .map(|content| {
            content
                .parts
                .into_iter()
                .filter_map(|p| p.text)
                .collect::<Vec<_>>()
                .join("")
        })
        .unwrap_or_default();

    if text.trim().is_empty() {
        return Err(CompletionError::Empty);
    }
    Ok(Completion {
        text,
        model: body.model_version,
    })
}

/// Message for a non-2xx reply: the API's own message, else the raw body,
/// else the status reason when the body is empty or unreadable.
fn api_error_message(status: reqwest::StatusCode, raw: &str) -> String {
    if raw.trim().is_empty() {
        return status.canonical_reason().unwrap_or("unknown error").to_string();
    }
    match serde_json::from_str::<ApiErrorBody>(raw) {
        Ok(body) if !body.error.message.trim().is_empty() => body.error.message,
        _ => truncate(raw, ERROR_BODY_CAP).to_string(),
    }
}

fn truncate(s: &str, cap: usize) -> &str {
    match s.char_indices().nth(cap) {
        Some((idx, _)) => &s[..idx],
        None => s,
    }
}

#[async_trait]
impl CompletionService for GeminiClient {
    async fn complete(&self, prompt: &str) -> Result<Completion, CompletionError> {
        let api_key = self
            .api_key
            .as_deref()
            .ok_or_else(|| CompletionError::NotConfigured("GEMINI_API_KEY is not set".into()))?;

        tracing::debug!(
            "Sending Gemini completion (model={}, chars={})",
            self.model,
            prompt.len()
        );

        let body = GenerateRequest {
            contents: vec![RequestContent {
                parts: vec![RequestPart { text: prompt }],
            }],
        };

        let response = self
            .client
            .post(self.endpoint())
            .header("x-goog-api-key", api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| self.map_send_err(e))?;

        let status = response.status();
        if !status.is_success() {
            let raw = match response.text().await {
                Ok(raw) => raw,
                Err(e) => {
                    tracing::debug!("Failed to read Gemini error body: {}", e);
                    String::new()
                }
            };
            return Err(CompletionError::Api {
                status: status.as_u16(),
                message: api_error_message(status, &raw),
            });
        }

        let parsed: GenerateResponse = response.json().await.map_err(|e| {
            if e.is_timeout() {
                self.map_send_err(e)
            } else {
                CompletionError::Parse(e.to_string())
            }
        })?;
        extract_text(parsed)
    }

    fn name(&self) -> &str {
        "gemini"
    }
}
