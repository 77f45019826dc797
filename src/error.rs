use thiserror::Error;

/// Errors raised by the matching engine
///
/// Scoring itself is total over well-formed input; the only failure is an
/// input whose shape cannot be scored.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum MatchError {
    #[error("Invalid input at {field}: {reason}")]
    InvalidInput { field: String, reason: String },
}

impl MatchError {
    pub fn invalid(field: impl Into<String>, reason: impl Into<String>) -> Self {
        MatchError::InvalidInput {
            field: field.into(),
            reason: reason.into(),
        }
    }

    /// Path of the offending field
    pub fn field(&self) -> &str {
        match self {
            MatchError::InvalidInput { field, .. } => field,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display_names_field() {
        let err = MatchError::invalid("job.requirements[0].weight", "must be greater than 0");
        assert_eq!(err.field(), "job.requirements[0].weight");
        assert_eq!(
            err.to_string(),
            "Invalid input at job.requirements[0].weight: must be greater than 0"
        );
    }
}
