use serde::{Deserialize, Serialize};

/// The closed set of things a step can ask for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Action {
    Calculate,
    Translate,
    TranslateTo,
    Answer,
}

impl Action {
    pub const ALL: [Action; 4] = [
        Action::Calculate,
        Action::Translate,
        Action::TranslateTo,
        Action::Answer,
    ];

    /// Label used both in the breakdown prompt and in result lines.
    pub fn label(&self) -> &'static str {
        match self {
            Action::Calculate => "calculate",
            Action::Translate => "translate",
            Action::TranslateTo => "translate_to",
            Action::Answer => "answer",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            Action::Calculate => "For mathematical operations (addition, multiplication)",
            Action::Translate => "For translating English phrases to German",
            Action::TranslateTo => {
                "For translating phrases to a specific language (e.g., \"Hello\" to \"Hola\")"
            }
            Action::Answer => "For direct question answering that doesn't require tools",
        }
    }

    /// Case-insensitive lookup of a label.
    pub fn from_label(label: &str) -> Option<Action> {
        let label = label.to_ascii_lowercase();
        Action::ALL.into_iter().find(|a| a.label() == label)
    }
}

impl std::fmt::Display for Action {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// One unit of work recovered from the breakdown reply.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Step {
    pub action: Action,
    pub content: String,
}

impl Step {
    pub fn new(action: Action, content: impl Into<String>) -> Self {
        Self {
            action,
            content: content.into(),
        }
    }
}
