use std::cell::Cell;
use std::time::Instant;

use tracing::{debug, error, info};

use crate::engine::apply_step::StepExecutor;
use crate::engine::llm_client::{Oracle, OracleError};
use crate::engine::prompt_builder::{render_steps, PromptBuilder};
use crate::engine::protocol::{EngineCommand, EngineResponse};
use crate::engine::step_parser::parse_plan;
use crate::engine::translator::SUPPORTED_LANGUAGES;
use crate::model::step_result::RequestOutcome;

pub const EXAMPLE_INPUTS: [&str; 5] = [
    "Translate 'Good Morning' into German and then multiply 5 and 6.",
    "Add 10 and 20, then translate 'Have a nice day' into German.",
    "Tell me the capital of Italy, then multiply 12 and 12.",
    "Add 2 and 2 and multiply 3 and 3.",
    "What is the distance between Earth and Mars?",
];

/// Counts calls on their way through to the real oracle.
struct CountingOracle<'a> {
    inner: &'a dyn Oracle,
    calls: Cell<usize>,
}

impl Oracle for CountingOracle<'_> {
    fn generate(&self, prompt: &str) -> Result<String, OracleError> {
        self.calls.set(self.calls.get() + 1);
        self.inner.generate(prompt)
    }

    fn name(&self) -> &str {
        self.inner.name()
    }
}

/// Owns the oracle for the life of the process and handles one request at a time.
pub struct Engine {
    oracle: Box<dyn Oracle>,
    interaction_count: u64,
}

impl Engine {
    pub fn new(oracle: Box<dyn Oracle>) -> Self {
        Self {
            oracle,
            interaction_count: 0,
        }
    }

    pub fn interaction_count(&self) -> u64 {
        self.interaction_count
    }

    pub fn backend_name(&self) -> &str {
        self.oracle.name()
    }

    pub fn handle(&mut self, cmd: EngineCommand) -> EngineResponse {
        match cmd {
            EngineCommand::UserInput(text) => EngineResponse::Processed(self.process(&text)),
            EngineCommand::ShowHelp => EngineResponse::Help {
                examples: EXAMPLE_INPUTS.to_vec(),
                languages: SUPPORTED_LANGUAGES.to_vec(),
            },
        }
    }

    /// Break the request into steps, run them, and return both.
    /// Failures end up in `results`; this never returns an error.
    pub fn process(&mut self, user_input: &str) -> RequestOutcome {
        self.interaction_count += 1;
        let started = Instant::now();
        let oracle = CountingOracle {
            inner: self.oracle.as_ref(),
            calls: Cell::new(0),
        };

        let mut outcome = run_pipeline(&oracle, user_input);
        outcome.oracle_calls = oracle.calls.get();
        outcome.elapsed = started.elapsed();

        info!(
            interaction = self.interaction_count,
            steps = outcome.steps.len(),
            oracle_calls = outcome.oracle_calls,
            elapsed_ms = outcome.elapsed.as_millis() as u64,
            "request finished"
        );
        outcome
    }
}

fn run_pipeline(oracle: &dyn Oracle, user_input: &str) -> RequestOutcome {
    info!(input = user_input, "breaking down user input");

    let prompt = PromptBuilder::build_breakdown(user_input);
    let reply = match oracle.generate(&prompt) {
        Ok(reply) => reply,
        Err(e) => {
            error!(error = %e, "breakdown request failed");
            return RequestOutcome::failed(format!("Error: {}", e));
        }
    };
    let reply = reply.trim();
    info!(reply, "breakdown response");

    let steps = match parse_plan(reply) {
        Ok(steps) => steps,
        Err(e) => {
            error!(error = %e, "no usable steps in breakdown response");
            return RequestOutcome::failed(format!("Error: {}", e));
        }
    };
    info!(parsed = steps.len(), "parsed steps");
    debug!(plan = %render_steps(&steps), "execution plan");

    let results = StepExecutor::new(oracle).execute(&steps);

    RequestOutcome {
        results: results.iter().map(|r| r.display_line()).collect(),
        steps,
        ..Default::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::llm_client::mock::MockOracle;
    use crate::model::step::{Action, Step};

    #[test]
    fn two_calculations_end_to_end() {
        let oracle = MockOracle::new().reply(
            "Step 1: action: calculate, content: add 2 and 2\n\
             Step 2: action: calculate, content: multiply 3 and 3",
        );
        let mut engine = Engine::new(Box::new(oracle));

        let outcome = engine.process("Add 2 and 2 and multiply 3 and 3.");

        assert_eq!(
            outcome.steps,
            vec![
                Step::new(Action::Calculate, "add 2 and 2"),
                Step::new(Action::Calculate, "multiply 3 and 3"),
            ]
        );
        assert_eq!(
            outcome.results,
            vec![
                "Step 1 (calculate): Addition result: 4.0".to_string(),
                "Step 2 (calculate): Multiplication result: 9.0".to_string(),
            ]
        );
        assert_eq!(outcome.oracle_calls, 1);
        assert_eq!(engine.interaction_count(), 1);
    }

    #[test]
    fn unparseable_reply_yields_single_error() {
        let oracle = MockOracle::new().reply("I am not sure what you mean.");
        let mut engine = Engine::new(Box::new(oracle));

        let outcome = engine.process("???");
        assert!(outcome.steps.is_empty());
        assert_eq!(
            outcome.results,
            vec!["Error: Could not parse any steps from LLM response".to_string()]
        );
    }

    #[test]
    fn breakdown_failure_is_caught() {
        let oracle = MockOracle::new().fail("connection refused");
        let mut engine = Engine::new(Box::new(oracle));

        let outcome = engine.process("Add 1 and 1");
        assert!(outcome.steps.is_empty());
        assert_eq!(outcome.results.len(), 1);
        assert!(outcome.results[0].starts_with("Error: "));
        assert!(outcome.results[0].contains("connection refused"));
    }

    #[test]
    fn mixed_plan_counts_every_oracle_call() {
        let oracle = MockOracle::new()
            .reply(
                "Here you go:\n\
                 Step 1: action: translate_to, content: Hello to Spanish\n\
                 Step 2: action: delete, content: files\n\
                 Step 3: action: answer, content: What is the capital of Italy?\n\
                 Step 4: action: calculate, content: multiply 12 and 12",
            )
            .reply("Hola")
            .reply("Rome");
        let mut engine = Engine::new(Box::new(oracle));

        let outcome = engine.process("whatever");
        assert_eq!(
            outcome.results,
            vec![
                "Step 1 (translate_to): Translation (Mock): Hola".to_string(),
                "Step 2 (answer): Answer: Rome".to_string(),
                "Step 3 (calculate): Multiplication result: 144.0".to_string(),
            ]
        );
        assert_eq!(outcome.oracle_calls, 3);
    }

    #[test]
    fn help_lists_examples() {
        let mut engine = Engine::new(Box::new(MockOracle::new()));
        match engine.handle(EngineCommand::ShowHelp) {
            EngineResponse::Help { examples, languages } => {
                assert_eq!(examples.len(), 5);
                assert!(languages.contains(&"Japanese"));
            }
            EngineResponse::Processed(_) => panic!("expected help"),
        }
        assert_eq!(engine.interaction_count(), 0);
    }
}
