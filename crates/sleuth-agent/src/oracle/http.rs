//! OpenAI-compatible chat-completions oracle over blocking HTTP.

use serde::{Deserialize, Serialize};
use sleuth_core::errors::OracleError;
use sleuth_core::models::{OracleCompletion, OracleMessage, OracleRequest};
use sleuth_core::traits::IReasoningOracle;
use tracing::debug;

/// Endpoint, model and pricing for [`HttpOracle`].
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct HttpOracleConfig {
    /// Full URL of the chat-completions endpoint.
    pub endpoint: String,
    pub model: String,
    pub api_key: Option<String>,
    pub temperature: f32,
    /// Price per prompt token, in the caller's currency unit.
    pub prompt_token_price: f64,
    /// Price per completion token.
    pub completion_token_price: f64,
}

impl Default for HttpOracleConfig {
    fn default() -> Self {
        Self {
            endpoint: "https://api.openai.com/v1/chat/completions".to_string(),
            model: "gpt-4o-mini".to_string(),
            api_key: None,
            temperature: 0.0,
            prompt_token_price: 0.0,
            completion_token_price: 0.0,
        }
    }
}

#[derive(Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: &'a [OracleMessage],
    temperature: f32,
}

#[derive(Deserialize)]
struct ChatResponse {
    choices: Vec<Choice>,
    #[serde(default)]
    usage: Option<Usage>,
}

#[derive(Deserialize)]
struct Choice {
    message: ChoiceMessage,
}

#[derive(Deserialize)]
struct ChoiceMessage {
    #[serde(default)]
    content: Option<String>,
    #[serde(default)]
    reasoning_content: Option<String>,
}

#[derive(Deserialize, Default)]
struct Usage {
    #[serde(default)]
    prompt_tokens: u64,
    #[serde(default)]
    completion_tokens: u64,
}

/// Oracle backed by an HTTP chat-completions API.
pub struct HttpOracle {
    config: HttpOracleConfig,
    client: reqwest::blocking::Client,
}

impl HttpOracle {
    pub fn new(config: HttpOracleConfig) -> Result<Self, OracleError> {
        let client = reqwest::blocking::Client::builder()
            .gzip(true)
            .build()
            .map_err(|e| OracleError::Transport {
                reason: e.to_string(),
            })?;
        Ok(Self { config, client })
    }

    fn cost(&self, usage: &Usage) -> f64 {
        usage.prompt_tokens as f64 * self.config.prompt_token_price
            + usage.completion_tokens as f64 * self.config.completion_token_price
    }

    fn send(&self, request: &OracleRequest) -> Result<reqwest::blocking::Response, OracleError> {
        let body = ChatRequest {
            model: &self.config.model,
            messages: &request.messages,
            temperature: self.config.temperature,
        };
        let mut builder = self
            .client
            .post(&self.config.endpoint)
            .timeout(request.timeout)
            .json(&body);
        if let Some(key) = &self.config.api_key {
            builder = builder.bearer_auth(key);
        }
        builder.send().map_err(|e| {
            if e.is_timeout() {
                OracleError::Timeout {
                    after_ms: request.timeout.as_millis() as u64,
                }
            } else {
                OracleError::Transport {
                    reason: e.to_string(),
                }
            }
        })
    }
}

/// Seconds from a `Retry-After` header, as milliseconds. HTTP-date values are ignored.
fn retry_after_ms(header: &str) -> Option<u64> {
    header
        .trim()
        .parse::<u64>()
        .ok()
        .map(|secs| secs.saturating_mul(1_000))
}

/// Error for a non-success status. 429 is rate limiting, 408 and 5xx are
/// transient, every other status is a permanent rejection.
fn status_error(status: reqwest::StatusCode, retry_after: Option<&str>, body: String) -> OracleError {
    if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
        return OracleError::RateLimited {
            retry_after_ms: retry_after.and_then(retry_after_ms),
        };
    }
    if status.is_server_error() || status == reqwest::StatusCode::REQUEST_TIMEOUT {
        return OracleError::Transport {
            reason: format!("API returned {status}: {body}"),
        };
    }
    OracleError::Rejected {
        status: status.as_u16(),
        reason: body,
    }
}

impl IReasoningOracle for HttpOracle {
    fn complete(&self, request: &OracleRequest) -> Result<OracleCompletion, OracleError> {
        if request.cancellation.is_cancelled() {
            return Err(OracleError::Cancelled);
        }

        let response = self.send(request)?;
        if request.cancellation.is_cancelled() {
            return Err(OracleError::Cancelled);
        }

        let status = response.status();
        if !status.is_success() {
            let retry_after = response
                .headers()
                .get(reqwest::header::RETRY_AFTER)
                .and_then(|v| v.to_str().ok())
                .map(str::to_string);
            let body = response.text().unwrap_or_default();
            return Err(status_error(status, retry_after.as_deref(), body));
        }

        let parsed: ChatResponse = response.json().map_err(|e| OracleError::MalformedResponse {
            reason: e.to_string(),
        })?;
        let usage = parsed.usage.unwrap_or_default();
        let message = parsed
            .choices
            .into_iter()
            .next()
            .map(|c| c.message)
            .ok_or_else(|| OracleError::MalformedResponse {
                reason: "response has no choices".to_string(),
            })?;

        let cost = self.cost(&usage);
        debug!(
            model = %self.config.model,
            prompt_tokens = usage.prompt_tokens,
            completion_tokens = usage.completion_tokens,
            cost,
            "chat completion received"
        );

        Ok(OracleCompletion {
            content: message.content.unwrap_or_default(),
            reasoning_content: message.reasoning_content,
            cost,
        })
    }

    fn name(&self) -> &str {
        &self.config.model
    }
}
