//! Validation error types

use std::fmt;

/// Validation error for domain models and request input
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// Field is empty (or whitespace only) when it shouldn't be
    Empty { field: &'static str },

    /// Field exceeds maximum length
    TooLong { field: &'static str, max: usize },

    /// String doesn't match required format
    InvalidFormat { field: &'static str, reason: &'static str },

    /// Identifier is zero or negative
    NonPositive { field: &'static str, value: i64 },

    /// Identifier points at a row that does not exist
    UnknownReference { field: &'static str, id: i64 },

    /// Request body or query string could not be decoded
    Malformed { part: &'static str, detail: String },
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty { field } => write!(f, "{} cannot be empty", field),
            Self::TooLong { field, max } => {
                write!(f, "{} exceeds maximum length of {} characters", field, max)
            }
            Self::InvalidFormat { field, reason } => {
                write!(f, "{}: {}", field, reason)
            }
            Self::NonPositive { field, value } => {
                write!(f, "{} must be a positive integer, got {}", field, value)
            }
            Self::UnknownReference { field, id } => {
                write!(f, "{} {} does not reference an existing record", field, id)
            }
            Self::Malformed { part, detail } => write!(f, "invalid {}: {}", part, detail),
        }
    }
}

impl std::error::Error for ValidationError {}

/// Accept only strictly positive identifiers.
pub fn positive_id(field: &'static str, value: i64) -> Result<i64, ValidationError> {
    if value <= 0 {
        return Err(ValidationError::NonPositive { field, value });
    }
    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display() {
        let err = ValidationError::TooLong {
            field: "name",
            max: 128,
        };
        assert_eq!(err.to_string(), "name exceeds maximum length of 128 characters");

        let err = ValidationError::UnknownReference {
            field: "mythologyId",
            id: 42,
        };
        assert_eq!(
            err.to_string(),
            "mythologyId 42 does not reference an existing record"
        );

        let err = ValidationError::Malformed {
            part: "query",
            detail: "expected a boolean".into(),
        };
        assert_eq!(err.to_string(), "invalid query: expected a boolean");
    }

    #[test]
    fn positive_id_rejects_zero_and_negatives() {
        assert_eq!(positive_id("id", 1), Ok(1));
        assert!(matches!(
            positive_id("id", 0),
            Err(ValidationError::NonPositive { value: 0, .. })
        ));
        assert!(matches!(
            positive_id("id", -7),
            Err(ValidationError::NonPositive { value: -7, .. })
        ));
    }
}
