//! OpenAI-compatible chat completion client.
//!
//! Every backend in the default chain (OpenRouter, Groq, OpenAI) speaks the
//! same `/chat/completions` shape, so one client covers them all:
//!
//! ```text
//! POST {base_url}/chat/completions
//! Authorization: Bearer {api_key}
//! { "model", "messages": [{role, content}], "temperature", "max_tokens", "stream": false }
//!
//! → { "choices": [{ "message": { "content": "..." } }] }
//! ```

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::instrument;

use super::traits::CompletionProvider;
use crate::types::{CompletionRequest, ProviderSpec};
use crate::{Result, ScholiaError};

/// Client for one model on one OpenAI-compatible endpoint.
#[derive(Clone)]
pub struct OpenAiCompatibleProvider {
    spec: ProviderSpec,
    http: Client,
}

impl OpenAiCompatibleProvider {
    /// Create a provider with its own HTTP client.
    pub fn new(spec: ProviderSpec) -> Self {
        Self::with_http_client(spec, Client::new())
    }

    /// Create a provider on a shared HTTP client.
    ///
    /// Prefer this when several providers hit the same hosts so they share
    /// a connection pool (e.g. from the builder).
    pub fn with_http_client(spec: ProviderSpec, http: Client) -> Self {
        Self { spec, http }
    }

    pub fn spec(&self) -> &ProviderSpec {
        &self.spec
    }

    fn url(&self) -> String {
        format!(
            "{}/chat/completions",
            self.spec.endpoint.base_url.trim_end_matches('/')
        )
    }
}

impl std::fmt::Debug for OpenAiCompatibleProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OpenAiCompatibleProvider")
            .field("spec", &self.spec)
            .finish()
    }
}

#[async_trait]
impl CompletionProvider for OpenAiCompatibleProvider {
    fn name(&self) -> &str {
        &self.spec.name
    }

    fn model(&self) -> &str {
        &self.spec.model_id
    }

    #[instrument(skip(self, request), fields(provider = %self.spec.name, model = %self.spec.model_id))]
    async fn complete(&self, request: &CompletionRequest) -> Result<String> {
        let body = ChatRequest::from_request(&self.spec.model_id, request);

        let response = self
            .http
            .post(self.url())
            .bearer_auth(&self.spec.endpoint.api_key)
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let retry_after = response
                .headers()
                .get(reqwest::header::RETRY_AFTER)
                .and_then(|v| v.to_str().ok())
                .and_then(|s| s.parse::<u64>().ok())
                .map(Duration::from_secs);
            let message = response.text().await.unwrap_or_default();
            return Err(ScholiaError::from_status(
                status.as_u16(),
                message,
                retry_after,
            ));
        }

        // decode separately so a bad body surfaces as a JSON error
        let body = response.text().await?;
        let parsed: ChatResponse = serde_json::from_str(&body)?;

        parsed
            .choices
            .into_iter()
            .next()
            .and_then(|c| c.message.content)
            .ok_or(ScholiaError::EmptyResponse)
    }
}

// ============================================================================
// Wire types
// ============================================================================

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<WireMessage<'a>>,
    temperature: f32,
    max_tokens: u32,
    stream: bool,
}

impl<'a> ChatRequest<'a> {
    fn from_request(model: &'a str, request: &'a CompletionRequest) -> Self {
        let mut messages = Vec::with_capacity(request.prior_turns().len() + 2);
        if !request.system_prompt.is_empty() {
            messages.push(WireMessage {
                role: "system",
                content: &request.system_prompt,
            });
        }
        messages.extend(request.prior_turns().iter().map(|t| WireMessage {
            role: t.role.as_str(),
            content: &t.content,
        }));
        messages.push(WireMessage {
            role: "user",
            content: &request.user_prompt,
        });

        Self {
            model,
            messages,
            temperature: request.temperature,
            max_tokens: request.max_tokens,
            stream: false,
        }
    }
}

#[derive(Debug, Serialize)]
struct WireMessage<'a> {
    role: &'static str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct ChoiceMessage {
    #[serde(default)]
    content: Option<String>,
}
