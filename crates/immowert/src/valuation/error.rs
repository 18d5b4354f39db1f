use super::domain::BuildingKind;

/// Failures raised by validation and the individual calculators.
///
/// All of them are deterministic functions of the input: retrying without
/// correcting the input reproduces the identical error.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum EvaluationError {
    #[error("invalid input at {field}: {message}")]
    Validation {
        field: &'static str,
        message: String,
    },
    #[error("missing data: {0}")]
    MissingData(&'static str),
    #[error("{what} must be positive, got {value}")]
    InvalidRate { what: &'static str, value: f64 },
    #[error("no cost table entry for {kind:?} at standard level {standard}")]
    Lookup { kind: BuildingKind, standard: u8 },
    #[error("reconciliation weights must sum to a positive value, got {sum}")]
    InvalidWeight { sum: f64 },
    #[error("no procedure results available for reconciliation")]
    NoResults,
}

impl EvaluationError {
    pub(crate) fn validation(field: &'static str, message: impl Into<String>) -> Self {
        Self::Validation {
            field,
            message: message.into(),
        }
    }
}
