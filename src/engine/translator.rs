use tracing::{debug, warn};

use crate::engine::llm_client::Oracle;
use crate::engine::prompt_builder::PromptBuilder;

pub const DEFAULT_TARGET_LANGUAGE: &str = "German";

const QUOTES: &[char] = &['"', '\''];

/// Languages we advertise in help text. Any other name still goes to the oracle.
pub const SUPPORTED_LANGUAGES: [&str; 10] = [
    "German",
    "Japanese",
    "Spanish",
    "French",
    "Italian",
    "Portuguese",
    "Russian",
    "Chinese",
    "Korean",
    "Arabic",
];

/// Asks the oracle for translations. Never fails loudly: problems come back
/// as a `Translation failed: ...` string.
pub struct Translator<'a> {
    oracle: &'a dyn Oracle,
}

impl<'a> Translator<'a> {
    pub fn new(oracle: &'a dyn Oracle) -> Self {
        Self { oracle }
    }

    /// Which backend serves translations.
    pub fn method(&self) -> &str {
        self.oracle.name()
    }

    pub fn translate(&self, text: &str, target_language: &str) -> String {
        let text = text.trim();
        if text.is_empty() {
            return String::new();
        }

        let prompt = PromptBuilder::build_translation(text, target_language);
        match self.oracle.generate(&prompt) {
            Ok(reply) => {
                let cleaned = strip_quotes(&reply);
                if cleaned.is_empty() {
                    warn!(target_language, "oracle returned an empty translation");
                    return failure_marker("empty response");
                }
                debug!(target_language, translation = cleaned, "translated");
                cleaned.to_string()
            }
            Err(e) => {
                warn!(target_language, error = %e, "translation request failed");
                failure_marker(&e.to_string())
            }
        }
    }
}

pub fn is_failure_marker(text: &str) -> bool {
    text.starts_with("Translation failed:")
}

fn failure_marker(reason: &str) -> String {
    format!("Translation failed: {}", reason)
}

/// Trim whitespace and any surrounding quote characters.
pub fn strip_quotes(text: &str) -> &str {
    text.trim().trim_matches(QUOTES).trim()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::llm_client::mock::MockOracle;

    #[test]
    fn empty_text_skips_the_oracle() {
        let oracle = MockOracle::new().reply("unused");
        let translator = Translator::new(&oracle);

        assert_eq!(translator.translate("   ", "French"), "");
        assert_eq!(oracle.calls(), 0);
    }

    #[test]
    fn reply_is_unquoted() {
        let oracle = MockOracle::new().reply("  \"Guten Morgen\"\n");
        let translator = Translator::new(&oracle);

        assert_eq!(translator.translate("Good Morning", DEFAULT_TARGET_LANGUAGE), "Guten Morgen");
        let prompts = oracle.prompts.borrow();
        assert!(prompts[0].contains("to German"));
        assert!(prompts[0].contains("\"Good Morning\""));
    }

    #[test]
    fn oracle_error_becomes_marker() {
        let oracle = MockOracle::new().fail("quota exceeded");
        let translator = Translator::new(&oracle);

        let out = translator.translate("Hello", "Japanese");
        assert!(is_failure_marker(&out));
        assert!(out.contains("quota exceeded"));
    }

    #[test]
    fn blank_reply_becomes_marker() {
        let oracle = MockOracle::new().reply(" '' ");
        let translator = Translator::new(&oracle);
        assert_eq!(translator.translate("Hello", "French"), "Translation failed: empty response");
    }

    #[test]
    fn method_names_the_backend() {
        let oracle = MockOracle::new();
        assert_eq!(Translator::new(&oracle).method(), "Mock");
    }
}
