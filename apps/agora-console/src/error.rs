//! Console error type. Every variant ends up as a destructive toast and, in
//! JSON mode, as an error envelope.

use agora_core::DomainError;
use agora_core::ports::{FixtureError, ProfileError, Toast};
use agora_shared::ResultCode;

/// Page-level errors.
#[derive(Debug, thiserror::Error)]
pub enum UiError {
    #[error(transparent)]
    Domain(#[from] DomainError),

    #[error(transparent)]
    Profile(#[from] ProfileError),

    #[error(transparent)]
    Fixture(#[from] FixtureError),

    /// The command line itself was wrong.
    #[error("{0}")]
    Usage(String),

    #[error("Could not render the response: {0}")]
    Render(#[from] serde_json::Error),
}

impl UiError {
    pub fn result_code(&self) -> ResultCode {
        match self {
            UiError::Domain(err) => ResultCode::from(err),
            UiError::Profile(ProfileError::InvalidUserId(_)) | UiError::Usage(_) => {
                ResultCode::InvalidRequest
            }
            UiError::Profile(ProfileError::NotFound(_)) => ResultCode::NotFound,
            UiError::Profile(ProfileError::Unavailable(_))
            | UiError::Fixture(_)
            | UiError::Render(_) => ResultCode::ServerError,
        }
    }

    pub fn toast(&self) -> Toast {
        Toast::destructive(self.to_string())
    }
}

/// Result type alias for page operations.
pub type UiResult<T> = Result<T, UiError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn domain_errors_keep_their_result_codes() {
        let err = UiError::from(DomainError::MissingField("Please enter a title."));
        assert_eq!(err.result_code(), ResultCode::MissingField);
        assert_eq!(err.toast().description, "Please enter a title.");
        assert!(err.toast().is_destructive());

        let err = UiError::from(DomainError::not_found("Post", 9));
        assert_eq!(err.result_code(), ResultCode::NotFound);
    }

    #[test]
    fn profile_failures_map_to_server_error() {
        let err = UiError::from(ProfileError::Unavailable("timeout".to_string()));
        assert_eq!(err.result_code(), ResultCode::ServerError);
        let err = UiError::from(ProfileError::InvalidUserId("abc".to_string()));
        assert_eq!(err.result_code(), ResultCode::InvalidRequest);
    }
}
