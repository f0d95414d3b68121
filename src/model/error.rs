use thiserror::Error;

/// Failures while turning a reply or a step into something executable.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum StepError {
    #[error("Could not parse any steps from LLM response")]
    ParseFailure,

    #[error("Could not extract two numbers from '{0}'")]
    Extraction(String),

    #[error("Unsupported calculation operation in '{0}'")]
    NoOperation(String),
}
