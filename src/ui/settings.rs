use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::engine::llm_client::{GeminiClient, LmStudioClient, Oracle, OracleError};

pub const API_KEY_VAR: &str = "GEMINI_API_KEY";
pub const MODEL_VAR: &str = "STEPWISE_MODEL";
pub const BACKEND_VAR: &str = "STEPWISE_BACKEND";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("GEMINI_API_KEY environment variable is required for the Gemini backend")]
    MissingApiKey,

    #[error("Unknown backend '{0}' (expected gemini or lm_studio)")]
    UnknownBackend(String),

    #[error("Settings file error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Settings file is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Could not build LLM client: {0}")]
    Client(#[from] OracleError),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum Backend {
    Gemini,
    #[value(name = "lm_studio")]
    LmStudio,
}

impl std::str::FromStr for Backend {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "gemini" => Ok(Backend::Gemini),
            "lm_studio" | "lmstudio" | "lm-studio" => Ok(Backend::LmStudio),
            other => Err(ConfigError::UnknownBackend(other.to_string())),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AgentSettings {
    pub backend: Backend,
    pub model: String,
    pub gemini_endpoint: String,
    pub lm_studio_url: String,
    pub temperature: f32,
    pub timeout_secs: u64,
    pub log_file: String,
    pub color: bool,
}

impl Default for AgentSettings {
    fn default() -> Self {
        Self {
            backend: Backend::Gemini,
            model: "gemini-1.5-flash".into(),
            gemini_endpoint: "https://generativelanguage.googleapis.com/v1beta".into(),
            lm_studio_url: "http://localhost:1234/v1".into(),
            temperature: 0.7,
            timeout_secs: 60,
            log_file: "agent.log".into(),
            color: true,
        }
    }
}

impl AgentSettings {
    /// Apply `STEPWISE_BACKEND` / `STEPWISE_MODEL` overrides.
    pub fn apply_env<F>(&mut self, lookup: F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(backend) = lookup(BACKEND_VAR).filter(|v| !v.trim().is_empty()) {
            self.backend = backend.parse()?;
        }
        if let Some(model) = lookup(MODEL_VAR).filter(|v| !v.trim().is_empty()) {
            self.model = model.trim().to_string();
        }
        Ok(())
    }

    /// Construct the one oracle client the process will use.
    pub fn build_oracle(&self, api_key: Option<String>) -> Result<Box<dyn Oracle>, ConfigError> {
        match self.backend {
            Backend::Gemini => {
                let key = api_key
                    .filter(|k| !k.trim().is_empty())
                    .ok_or(ConfigError::MissingApiKey)?;
                Ok(Box::new(GeminiClient::new(
                    &self.gemini_endpoint,
                    &self.model,
                    key.trim(),
                    self.temperature,
                    self.timeout_secs,
                )?))
            }
            Backend::LmStudio => Ok(Box::new(LmStudioClient::new(
                &self.lm_studio_url,
                &self.model,
                self.temperature,
                self.timeout_secs,
            )?)),
        }
    }
}
