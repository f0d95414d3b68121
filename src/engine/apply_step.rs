use std::sync::LazyLock;

use regex::Regex;
use tracing::{info, warn};

use crate::engine::calculator::{self, Operation};
use crate::engine::llm_client::Oracle;
use crate::engine::translator::{self, Translator, DEFAULT_TARGET_LANGUAGE};
use crate::model::error::StepError;
use crate::model::step::{Action, Step};
use crate::model::step_result::StepResult;

static DIGIT_RUN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[0-9]+").expect("digit run pattern"));

/// How a single step went. Both variants carry user-facing text.
#[derive(Debug, Clone, PartialEq)]
pub enum StepOutcome {
    Completed(String),
    Failed(String),
}

impl StepOutcome {
    pub fn text(&self) -> &str {
        match self {
            StepOutcome::Completed(text) | StepOutcome::Failed(text) => text,
        }
    }

    pub fn into_text(self) -> String {
        match self {
            StepOutcome::Completed(text) | StepOutcome::Failed(text) => text,
        }
    }

    pub fn is_failed(&self) -> bool {
        matches!(self, StepOutcome::Failed(_))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TranslationRequest {
    pub text: String,
    pub target_language: String,
}

/// Split `"<text> to <language>"` on the first ` to `, ignoring case.
/// Without a separator the whole content goes to German.
pub fn translation_request(content: &str) -> TranslationRequest {
    let cleaned = translator::strip_quotes(content);
    let lowered = cleaned.to_ascii_lowercase();

    if let Some(idx) = lowered.find(" to ") {
        let text = translator::strip_quotes(&cleaned[..idx]);
        let target = translator::strip_quotes(&cleaned[idx + " to ".len()..]);
        return TranslationRequest {
            text: text.to_string(),
            target_language: if target.is_empty() {
                DEFAULT_TARGET_LANGUAGE.to_string()
            } else {
                target.to_string()
            },
        };
    }

    TranslationRequest {
        text: cleaned.to_string(),
        target_language: DEFAULT_TARGET_LANGUAGE.to_string(),
    }
}

/// Operator keyword and the first two digit runs, in order of appearance.
pub fn extract_calculation(content: &str) -> Result<(Operation, String, String), StepError> {
    let lowered = content.to_lowercase();
    let op = if lowered.contains("add") {
        Operation::Add
    } else if lowered.contains("multiply") || lowered.contains("multiplication") {
        Operation::Multiply
    } else {
        return Err(StepError::NoOperation(content.to_string()));
    };

    let mut numbers = DIGIT_RUN.find_iter(content).map(|m| m.as_str().to_string());
    match (numbers.next(), numbers.next()) {
        (Some(a), Some(b)) => Ok((op, a, b)),
        _ => Err(StepError::Extraction(content.to_string())),
    }
}

/// Runs steps against one oracle. Handlers never abort the plan.
pub struct StepExecutor<'a> {
    oracle: &'a dyn Oracle,
    translator: Translator<'a>,
}

impl<'a> StepExecutor<'a> {
    pub fn new(oracle: &'a dyn Oracle) -> Self {
        Self {
            oracle,
            translator: Translator::new(oracle),
        }
    }

    pub fn execute(&self, steps: &[Step]) -> Vec<StepResult> {
        let mut results = Vec::with_capacity(steps.len());

        for (i, step) in steps.iter().enumerate() {
            let step_index = i + 1;
            info!(step_index, action = %step.action, content = %step.content, "executing step");

            let outcome = self.apply_step(step);
            if outcome.is_failed() {
                warn!(step_index, result = outcome.text(), "step failed");
            } else {
                info!(step_index, result = outcome.text(), "step completed");
            }

            results.push(StepResult {
                step_index,
                action: step.action,
                text: outcome.into_text(),
            });
        }

        results
    }

    pub fn apply_step(&self, step: &Step) -> StepOutcome {
        match step.action {
            Action::Calculate => apply_calculation(&step.content),
            Action::Translate | Action::TranslateTo => self.apply_translation(&step.content),
            Action::Answer => self.apply_answer(&step.content),
        }
    }

    fn apply_translation(&self, content: &str) -> StepOutcome {
        let request = translation_request(content);
        let translated = self
            .translator
            .translate(&request.text, &request.target_language);
        let text = format!("Translation ({}): {}", self.translator.method(), translated);

        if translator::is_failure_marker(&translated) {
            StepOutcome::Failed(text)
        } else {
            StepOutcome::Completed(text)
        }
    }

    fn apply_answer(&self, content: &str) -> StepOutcome {
        match self.oracle.generate(content) {
            Ok(reply) => StepOutcome::Completed(format!("Answer: {}", reply.trim())),
            Err(e) => StepOutcome::Failed(format!(
                "Error getting answer for '{}': {}",
                content, e
            )),
        }
    }
}

pub fn apply_calculation(content: &str) -> StepOutcome {
    let (op, a, b) = match extract_calculation(content) {
        Ok(parts) => parts,
        Err(e) => return StepOutcome::Failed(format!("Error: {}", e)),
    };

    match calculator::evaluate_str(op_keyword(op), &a, &b) {
        Ok(value) => StepOutcome::Completed(format!(
            "{} result: {}",
            op.title(),
            calculator::format_number(value)
        )),
        Err(e) => StepOutcome::Failed(format!(
            "Error executing calculation '{}': {}",
            content, e
        )),
    }
}

fn op_keyword(op: Operation) -> &'static str {
    match op {
        Operation::Add => "add",
        Operation::Multiply => "multiply",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::llm_client::mock::MockOracle;

    #[test]
    fn addition_uses_first_two_numbers() {
        let out = apply_calculation("add 10 and 20");
        assert_eq!(out, StepOutcome::Completed("Addition result: 30.0".into()));
    }

    #[test]
    fn multiplication_result() {
        let out = apply_calculation("multiply 6 and 8");
        assert!(out.text().contains("48"));
        assert!(out.text().starts_with("Multiplication result"));
    }

    #[test]
    fn multiplication_keyword_is_recognised() {
        assert_eq!(
            apply_calculation("multiplication of 6 and 8").text(),
            "Multiplication result: 48.0"
        );
        assert_eq!(apply_calculation("Addition of 4 and 5").text(), "Addition result: 9.0");
    }

    #[test]
    fn extra_numbers_are_ignored() {
        assert_eq!(apply_calculation("Addition of 1, 2 and 3").text(), "Addition result: 3.0");
    }

    #[test]
    fn decimals_split_into_digit_runs() {
        // 2.5 reads as 2 and 5
        assert_eq!(apply_calculation("multiply 2.5 by 4").text(), "Multiplication result: 10.0");
    }

    #[test]
    fn missing_operand_is_soft_failure() {
        let out = apply_calculation("add 7 to something");
        assert_eq!(
            out,
            StepOutcome::Failed("Error: Could not extract two numbers from 'add 7 to something'".into())
        );
    }

    #[test]
    fn missing_keyword_is_soft_failure() {
        let out = apply_calculation("divide 8 by 2");
        assert!(out.is_failed());
        assert!(out.text().contains("Unsupported calculation operation"));
    }

    #[test]
    fn translation_splits_on_to() {
        assert_eq!(
            translation_request("'Good Morning' to Japanese"),
            TranslationRequest {
                text: "Good Morning".into(),
                target_language: "Japanese".into(),
            }
        );
        assert_eq!(
            translation_request("Hello TO Spanish").target_language,
            "Spanish"
        );
    }

    #[test]
    fn translation_defaults_to_german() {
        assert_eq!(
            translation_request("\"Have a nice day\""),
            TranslationRequest {
                text: "Have a nice day".into(),
                target_language: "German".into(),
            }
        );
    }

    #[test]
    fn translate_step_routes_through_oracle() {
        let oracle = MockOracle::new().reply("おはようございます");
        let executor = StepExecutor::new(&oracle);

        let out = executor.apply_step(&Step::new(Action::Translate, "'Good Morning' to Japanese"));
        assert_eq!(out.text(), "Translation (Mock): おはようございます");

        let prompts = oracle.prompts.borrow();
        assert!(prompts[0].contains("to Japanese"));
        assert!(prompts[0].contains("\"Good Morning\""));
    }

    #[test]
    fn translate_to_behaves_like_translate() {
        let oracle = MockOracle::new().reply("Hallo").reply("Hallo");
        let executor = StepExecutor::new(&oracle);

        let a = executor.apply_step(&Step::new(Action::Translate, "hello"));
        let b = executor.apply_step(&Step::new(Action::TranslateTo, "hello"));
        assert_eq!(a, b);
    }

    #[test]
    fn answer_is_trimmed() {
        let oracle = MockOracle::new().reply("  Rome.\n");
        let executor = StepExecutor::new(&oracle);

        let out = executor.apply_step(&Step::new(Action::Answer, "Capital of Italy?"));
        assert_eq!(out.text(), "Answer: Rome.");
        assert_eq!(oracle.prompts.borrow()[0], "Capital of Italy?");
    }

    #[test]
    fn one_failing_step_does_not_stop_the_rest() {
        let oracle = MockOracle::new().fail("network down").reply("Paris");
        let executor = StepExecutor::new(&oracle);

        let steps = vec![
            Step::new(Action::Answer, "first?"),
            Step::new(Action::Calculate, "add 1"),
            Step::new(Action::Answer, "Capital of France?"),
        ];
        let results = executor.execute(&steps);

        assert_eq!(results.len(), 3);
        assert!(results[0].text.starts_with("Error getting answer for 'first?'"));
        assert!(results[1].text.starts_with("Error: Could not extract"));
        assert_eq!(results[2].text, "Answer: Paris");
        assert_eq!(results[2].step_index, 3);
    }

    #[test]
    fn calculation_never_calls_the_oracle() {
        let oracle = MockOracle::new();
        let executor = StepExecutor::new(&oracle);
        executor.execute(&[Step::new(Action::Calculate, "add 1 and 2")]);
        assert_eq!(oracle.calls(), 0);
    }
}
