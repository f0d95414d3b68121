use crate::model::step_result::RequestOutcome;

/// What the console can ask the engine to do.
pub enum EngineCommand {
    UserInput(String),
    ShowHelp,
}

pub enum EngineResponse {
    Processed(RequestOutcome),
    Help {
        examples: Vec<&'static str>,
        languages: Vec<&'static str>,
    },
}
