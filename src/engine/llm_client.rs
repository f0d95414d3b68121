use std::time::Duration;

use reqwest::blocking::Client;
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum OracleError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("HTTP {status}: {body}")]
    Status { status: u16, body: String },

    #[error("API error: {0}")]
    Api(String),

    #[error("Invalid response: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("No content in response")]
    EmptyResponse,
}

/// Anything that turns a prompt into text.
///
/// Calls are blocking; the engine issues them one at a time.
pub trait Oracle {
    fn generate(&self, prompt: &str) -> Result<String, OracleError>;

    /// Human-readable backend name, shown in translation results.
    fn name(&self) -> &str;
}

fn build_http_client(timeout_secs: u64) -> Result<Client, OracleError> {
    Ok(Client::builder()
        .timeout(Duration::from_secs(timeout_secs))
        .build()?)
}

/* =========================
   Gemini
   ========================= */

#[derive(Serialize)]
pub struct GenerateContentRequest {
    pub contents: Vec<Content>,
    #[serde(rename = "generationConfig")]
    pub generation_config: GenerationConfig,
}

#[derive(Serialize, Deserialize)]
pub struct Content {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    #[serde(default)]
    pub parts: Vec<Part>,
}

#[derive(Serialize, Deserialize)]
pub struct Part {
    #[serde(default)]
    pub text: String,
}

#[derive(Serialize)]
pub struct GenerationConfig {
    pub temperature: f32,
}

#[derive(Deserialize)]
pub struct GenerateContentResponse {
    pub candidates: Option<Vec<Candidate>>,
    pub error: Option<ApiErrorDetail>,
}

#[derive(Deserialize)]
pub struct Candidate {
    pub content: Content,
}

#[derive(Deserialize)]
pub struct ApiErrorDetail {
    pub message: String,
}

pub struct GeminiClient {
    http: Client,
    endpoint: String,
    model: String,
    api_key: String,
    temperature: f32,
}

impl GeminiClient {
    pub fn new(
        endpoint: &str,
        model: &str,
        api_key: &str,
        temperature: f32,
        timeout_secs: u64,
    ) -> Result<Self, OracleError> {
        Ok(Self {
            http: build_http_client(timeout_secs)?,
            endpoint: endpoint.trim_end_matches('/').to_string(),
            model: model.to_string(),
            api_key: api_key.to_string(),
            temperature,
        })
    }

    fn url(&self) -> String {
        format!("{}/models/{}:generateContent", self.endpoint, self.model)
    }
}

/// Pull the first candidate's text out of a `generateContent` reply body.
pub fn decode_gemini_reply(body: &str) -> Result<String, OracleError> {
    let parsed: GenerateContentResponse = serde_json::from_str(body)?;

    if let Some(error) = parsed.error {
        return Err(OracleError::Api(error.message));
    }

    let text: String = parsed
        .candidates
        .and_then(|c| c.into_iter().next())
        .map(|c| c.content.parts.into_iter().map(|p| p.text).collect())
        .unwrap_or_default();

    if text.trim().is_empty() {
        return Err(OracleError::EmptyResponse);
    }
    Ok(text)
}

impl Oracle for GeminiClient {
    fn generate(&self, prompt: &str) -> Result<String, OracleError> {
        let req = GenerateContentRequest {
            contents: vec![Content {
                role: Some("user".into()),
                parts: vec![Part {
                    text: prompt.to_string(),
                }],
            }],
            generation_config: GenerationConfig {
                temperature: self.temperature,
            },
        };

        let resp = self
            .http
            .post(self.url())
            .header("x-goog-api-key", &self.api_key)
            .json(&req)
            .send()?;

        let status = resp.status();
        let body = resp.text()?;
        if !status.is_success() {
            return Err(OracleError::Status {
                status: status.as_u16(),
                body,
            });
        }

        decode_gemini_reply(&body)
    }

    fn name(&self) -> &str {
        "Gemini API"
    }
}

/* =========================
   LM Studio (OpenAI-compatible)
   ========================= */

#[derive(Serialize)]
pub struct ChatCompletionRequest {
    pub model: String,
    pub messages: Vec<ChatMessage>,
    pub temperature: f32,
}

#[derive(Serialize)]
pub struct ChatMessage {
    pub role: String,
    pub content: String,
}

#[derive(Deserialize)]
pub struct ChatCompletionResponse {
    pub choices: Vec<Choice>,
}

#[derive(Deserialize)]
pub struct Choice {
    pub message: ChatMessageResponse,
}

#[derive(Deserialize)]
pub struct ChatMessageResponse {
    #[serde(default)]
    pub content: Option<String>,
}

pub struct LmStudioClient {
    http: Client,
    base_url: String,
    model: String,
    temperature: f32,
}

impl LmStudioClient {
    pub fn new(
        base_url: &str,
        model: &str,
        temperature: f32,
        timeout_secs: u64,
    ) -> Result<Self, OracleError> {
        Ok(Self {
            http: build_http_client(timeout_secs)?,
            base_url: base_url.trim_end_matches('/').to_string(),
            model: model.to_string(),
            temperature,
        })
    }

    /// Reports how many models the local server has loaded.
    pub fn test_connection(&self) -> Result<String, OracleError> {
        let resp: serde_json::Value = self
            .http
            .get(format!("{}/models", self.base_url))
            .send()?
            .error_for_status()?
            .json()?;

        Ok(format!(
            "Connected ({} models available)",
            resp["data"].as_array().map(|a| a.len()).unwrap_or(0)
        ))
    }
}

pub fn decode_chat_reply(body: &str) -> Result<String, OracleError> {
    let resp: ChatCompletionResponse = serde_json::from_str(body)?;
    resp.choices
        .into_iter()
        .next()
        .and_then(|c| c.message.content)
        .filter(|c| !c.trim().is_empty())
        .ok_or(OracleError::EmptyResponse)
}

impl Oracle for LmStudioClient {
    fn generate(&self, prompt: &str) -> Result<String, OracleError> {
        let req = ChatCompletionRequest {
            model: self.model.clone(),
            temperature: self.temperature,
            messages: vec![ChatMessage {
                role: "user".into(),
                content: prompt.to_string(),
            }],
        };

        let resp = self
            .http
            .post(format!("{}/chat/completions", self.base_url))
            .json(&req)
            .send()?;

        let status = resp.status();
        let body = resp.text()?;
        if !status.is_success() {
            return Err(OracleError::Status {
                status: status.as_u16(),
                body,
            });
        }

        decode_chat_reply(&body)
    }

    fn name(&self) -> &str {
        "LM Studio"
    }
}

/* =========================
   Test double
   ========================= */
