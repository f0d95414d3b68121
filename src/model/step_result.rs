use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::model::step::{Action, Step};

/// What a single executed step produced. Soft failures land in `text` too.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StepResult {
    /// 1-based position in the request.
    pub step_index: usize,
    pub action: Action,
    pub text: String,
}

impl StepResult {
    /// `Step 1 (calculate): Addition result: 8.0`
    pub fn display_line(&self) -> String {
        format!("Step {} ({}): {}", self.step_index, self.action, self.text)
    }
}

/// Everything one call to `Engine::process` returns.
#[derive(Debug, Clone, Default)]
pub struct RequestOutcome {
    pub steps: Vec<Step>,
    pub results: Vec<String>,
    pub oracle_calls: usize,
    pub elapsed: Duration,
}

impl RequestOutcome {
    pub fn failed(message: impl Into<String>) -> Self {
        Self {
            steps: Vec::new(),
            results: vec![message.into()],
            ..Default::default()
        }
    }
}
