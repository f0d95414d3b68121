use thiserror::Error;

pub const ADD_SYNONYMS: [&str; 3] = ["add", "addition", "+"];
pub const MULTIPLY_SYNONYMS: [&str; 3] = ["multiply", "multiplication", "*"];

#[derive(Error, Debug, Clone, PartialEq)]
pub enum CalcError {
    #[error("Unsupported operation: {operation}. Supported operations: {}", .supported.join(", "))]
    UnsupportedOperation {
        operation: String,
        supported: Vec<&'static str>,
    },

    #[error("Invalid operand '{0}': not a real number")]
    InvalidOperand(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    Add,
    Multiply,
}

impl Operation {
    pub fn parse(operation: &str) -> Result<Operation, CalcError> {
        let normalized = operation.trim().to_lowercase();

        if ADD_SYNONYMS.contains(&normalized.as_str()) {
            Ok(Operation::Add)
        } else if MULTIPLY_SYNONYMS.contains(&normalized.as_str()) {
            Ok(Operation::Multiply)
        } else {
            Err(CalcError::UnsupportedOperation {
                operation: normalized,
                supported: ADD_SYNONYMS
                    .iter()
                    .chain(MULTIPLY_SYNONYMS.iter())
                    .copied()
                    .collect(),
            })
        }
    }

    /// `Addition` / `Multiplication`, as shown in result lines.
    pub fn title(&self) -> &'static str {
        match self {
            Operation::Add => "Addition",
            Operation::Multiply => "Multiplication",
        }
    }

    pub fn apply(&self, a: f64, b: f64) -> f64 {
        match self {
            Operation::Add => a + b,
            Operation::Multiply => a * b,
        }
    }
}

pub fn evaluate(operation: &str, a: f64, b: f64) -> Result<f64, CalcError> {
    check_operand(a)?;
    check_operand(b)?;
    Ok(Operation::parse(operation)?.apply(a, b))
}

/// Same as `evaluate`, for operands that are still text.
pub fn evaluate_str(operation: &str, a: &str, b: &str) -> Result<f64, CalcError> {
    evaluate(operation, parse_operand(a)?, parse_operand(b)?)
}

fn parse_operand(raw: &str) -> Result<f64, CalcError> {
    raw.trim()
        .parse::<f64>()
        .map_err(|_| CalcError::InvalidOperand(raw.to_string()))
}

fn check_operand(value: f64) -> Result<(), CalcError> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(CalcError::InvalidOperand(value.to_string()))
    }
}

/// Render like a float always: `8.0`, `2.5`.
pub fn format_number(value: f64) -> String {
    if value.fract() == 0.0 && value.abs() < 1e16 {
        format!("{:.1}", value)
    } else {
        value.to_string()
    }
}
