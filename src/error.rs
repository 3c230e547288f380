//! Error types for the fruitforge CLI.
//!
//! Uses thiserror for derive macros and provides user-actionable error messages.
//! Generation failures keep their own taxonomy in [`GenerationError`] and are
//! wrapped here so every command returns a single error type.

use crate::client::GenerationError;
use crate::exit_codes;
use thiserror::Error;

/// Main error type for fruitforge operations.
#[derive(Error, Debug)]
pub enum ForgeError {
    /// User provided invalid arguments or the home directory is in an invalid state.
    #[error("{0}")]
    UserError(String),

    /// A generate or reroll request failed.
    #[error(transparent)]
    Generation(#[from] GenerationError),

    /// A reroll response arrived but gave no usable replacement.
    #[error("Reroll failed: {0}")]
    RerollRejected(String),

    /// The response arrived after a newer request had already been applied.
    #[error("a newer request finished first; this result was discarded")]
    Superseded,

    /// A file the user explicitly asked for could not be written.
    #[error("Storage error: {0}")]
    Storage(String),
}

impl ForgeError {
    /// Returns the appropriate exit code for this error type.
    pub fn exit_code(&self) -> i32 {
        match self {
            ForgeError::UserError(_) => exit_codes::USER_ERROR,
            ForgeError::Generation(GenerationError::InvalidPrompt) => exit_codes::USER_ERROR,
            ForgeError::Generation(GenerationError::Extraction { .. }) => {
                exit_codes::EXTRACTION_FAILURE
            }
            ForgeError::Generation(_) => exit_codes::REQUEST_FAILURE,
            ForgeError::RerollRejected(_) => exit_codes::EXTRACTION_FAILURE,
            ForgeError::Superseded => exit_codes::REQUEST_FAILURE,
            ForgeError::Storage(_) => exit_codes::STORAGE_FAILURE,
        }
    }
}

/// Result type alias for fruitforge operations.
pub type Result<T> = std::result::Result<T, ForgeError>;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extract::ExtractError;

    #[test]
    fn user_error_has_correct_exit_code() {
        let err = ForgeError::UserError("bad argument".to_string());
        assert_eq!(err.exit_code(), exit_codes::USER_ERROR);
    }

    #[test]
    fn invalid_prompt_is_a_user_error() {
        let err = ForgeError::from(GenerationError::InvalidPrompt);
        assert_eq!(err.exit_code(), exit_codes::USER_ERROR);
    }

    #[test]
    fn transport_and_upstream_are_request_failures() {
        let err = ForgeError::from(GenerationError::Transport("connection refused".into()));
        assert_eq!(err.exit_code(), exit_codes::REQUEST_FAILURE);

        let err = ForgeError::from(GenerationError::Upstream {
            status: Some(500),
            message: "boom".into(),
        });
        assert_eq!(err.exit_code(), exit_codes::REQUEST_FAILURE);
    }

    #[test]
    fn extraction_has_its_own_exit_code() {
        let err = ForgeError::from(GenerationError::Extraction {
            source: ExtractError::NoPayload,
            raw: "plain prose".into(),
        });
        assert_eq!(err.exit_code(), exit_codes::EXTRACTION_FAILURE);
    }

    #[test]
    fn rejected_reroll_counts_as_extraction_failure() {
        let err = ForgeError::RerollRejected("reroll returned the same ability".into());
        assert_eq!(err.exit_code(), exit_codes::EXTRACTION_FAILURE);
        assert_eq!(err.to_string(), "Reroll failed: reroll returned the same ability");
    }

    #[test]
    fn superseded_result_is_a_request_failure() {
        assert_eq!(ForgeError::Superseded.exit_code(), exit_codes::REQUEST_FAILURE);
    }

    #[test]
    fn storage_error_has_correct_exit_code() {
        let err = ForgeError::Storage("disk full".to_string());
        assert_eq!(err.exit_code(), exit_codes::STORAGE_FAILURE);
        assert_eq!(err.to_string(), "Storage error: disk full");
    }
}
