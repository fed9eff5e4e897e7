//! Domain-level error types.

use thiserror::Error;

/// Domain errors - business rule failures.
///
/// None of these are fatal: every one of them ends up as a destructive
/// toast and leaves the collection that produced it untouched.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DomainError {
    #[error("{entity} {id} not found")]
    NotFound { entity: &'static str, id: u64 },

    #[error("{0}")]
    MissingField(&'static str),

    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("{0}")]
    Forbidden(String),

    #[error("{0}")]
    Conflict(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl DomainError {
    pub fn not_found(entity: &'static str, id: u64) -> Self {
        Self::NotFound { entity, id }
    }
}

/// Shorthand for results of domain operations.
pub type DomainResult<T> = Result<T, DomainError>;

/// Trim `value` and fail with `message` when nothing is left.
pub(crate) fn require(value: &str, message: &'static str) -> DomainResult<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(DomainError::MissingField(message));
    }
    Ok(trimmed.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn require_rejects_whitespace() {
        assert_eq!(
            require("   \n", "Please enter a title."),
            Err(DomainError::MissingField("Please enter a title."))
        );
        assert_eq!(require("  hi ", "x").unwrap(), "hi");
    }

    #[test]
    fn not_found_message_names_entity() {
        let err = DomainError::not_found("Post", 7);
        assert_eq!(err.to_string(), "Post 7 not found");
    }
}
