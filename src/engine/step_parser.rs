use std::sync::LazyLock;

use regex::Regex;
use tracing::warn;

use crate::model::error::StepError;
use crate::model::step::{Action, Step};

/// `Step <n>: action: <word>, content: <rest of line>`
static STEP_LINE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^Step \d+: action: (\w+), content: (.+)$").expect("step line pattern")
});

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SkipReason {
    Malformed,
    UnknownAction(String),
}

impl std::fmt::Display for SkipReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SkipReason::Malformed => f.write_str("malformed step line"),
            SkipReason::UnknownAction(action) => write!(f, "unknown action '{}'", action),
        }
    }
}

/// A `Step` line that did not make it into the plan.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedLine {
    pub line: String,
    pub reason: SkipReason,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParseReport {
    pub steps: Vec<Step>,
    pub skipped: Vec<SkippedLine>,
}

/// Recover the ordered step list from a breakdown reply.
///
/// Lines that do not start with `Step` are prose and ignored outright.
/// `Step` lines that are malformed or name an unknown action are listed
/// in `skipped`.
pub fn parse_steps(reply: &str) -> ParseReport {
    let mut report = ParseReport::default();

    for line in reply.lines() {
        let line = line.trim();
        if !line.starts_with("Step") {
            continue;
        }

        let Some(caps) = STEP_LINE.captures(line) else {
            report.skipped.push(SkippedLine {
                line: line.to_string(),
                reason: SkipReason::Malformed,
            });
            continue;
        };

        let label = caps[1].to_lowercase();
        let content = caps[2].trim();

        match Action::from_label(&label) {
            Some(action) => report.steps.push(Step::new(action, content)),
            None => {
                report.skipped.push(SkippedLine {
                    line: line.to_string(),
                    reason: SkipReason::UnknownAction(label),
                });
            }
        }
    }

    report
}

/// Like `parse_steps`, but an empty plan is an error. Skipped lines are
/// logged, never fatal.
pub fn parse_plan(reply: &str) -> Result<Vec<Step>, StepError> {
    let report = parse_steps(reply);
    for skipped in &report.skipped {
        warn!(line = %skipped.line, reason = %skipped.reason, "skipping step line");
    }
    if report.steps.is_empty() {
        return Err(StepError::ParseFailure);
    }
    Ok(report.steps)
}
