//! Error types for stratlify.
//!
//! Uses thiserror for derive macros. The three flow failure kinds are kept
//! apart so callers can tell "fix your input" from "the model gave us
//! nothing" from "the service is unreachable".

use crate::backend::BackendError;
use crate::exit_codes;
use crate::prompt::TemplateError;
use thiserror::Error;

/// Main error type for stratlify operations.
#[derive(Error, Debug)]
pub enum StratlifyError {
    /// Bad arguments, bad configuration, or an unreadable input file.
    #[error("{0}")]
    UserError(String),

    /// Input failed its declared shape or limits. Raised before any backend call.
    #[error("Validation failed: {0}")]
    ValidationError(String),

    /// The backend answered but produced no usable structured output.
    #[error("Generation failed: {0}")]
    GenerationError(String),

    /// Transport-level failure talking to the generative backend.
    #[error("Backend call failed: {0}")]
    BackendError(#[from] BackendError),

    /// The prompt template could not be rendered.
    #[error("Template rendering failed: {0}")]
    TemplateError(#[from] TemplateError),

    /// A flow definition was rejected at construction time.
    #[error("Invalid flow definition: {0}")]
    DefinitionError(String),
}

impl StratlifyError {
    /// Returns the appropriate exit code for this error type.
    pub fn exit_code(&self) -> i32 {
        match self {
            StratlifyError::UserError(_) => exit_codes::USER_ERROR,
            StratlifyError::ValidationError(_) => exit_codes::VALIDATION_FAILURE,
            StratlifyError::GenerationError(_) => exit_codes::GENERATION_FAILURE,
            StratlifyError::BackendError(_) => exit_codes::BACKEND_FAILURE,
            StratlifyError::TemplateError(_) => exit_codes::USER_ERROR,
            StratlifyError::DefinitionError(_) => exit_codes::USER_ERROR,
        }
    }
}

/// Result type alias for stratlify operations.
pub type Result<T> = std::result::Result<T, StratlifyError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn user_error_has_correct_exit_code() {
        let err = StratlifyError::UserError("bad argument".to_string());
        assert_eq!(err.exit_code(), exit_codes::USER_ERROR);
    }

    #[test]
    fn validation_error_has_correct_exit_code() {
        let err = StratlifyError::ValidationError("productDescription: missing".to_string());
        assert_eq!(err.exit_code(), exit_codes::VALIDATION_FAILURE);
    }

    #[test]
    fn generation_error_has_correct_exit_code() {
        let err = StratlifyError::GenerationError("no output".to_string());
        assert_eq!(err.exit_code(), exit_codes::GENERATION_FAILURE);
    }

    #[test]
    fn backend_error_has_correct_exit_code() {
        let err = StratlifyError::from(BackendError::Unavailable("connection refused".into()));
        assert_eq!(err.exit_code(), exit_codes::BACKEND_FAILURE);
    }

    #[test]
    fn template_error_converts_and_maps_to_user_error() {
        let err = StratlifyError::from(TemplateError::UnmatchedBrace { position: 4 });
        assert_eq!(err.exit_code(), exit_codes::USER_ERROR);
        assert!(err.to_string().contains("unmatched '{' at position 4"));
    }

    #[test]
    fn error_messages_are_descriptive() {
        let err = StratlifyError::ValidationError("adConcept: required field is missing".into());
        assert_eq!(
            err.to_string(),
            "Validation failed: adConcept: required field is missing"
        );

        let err = StratlifyError::GenerationError("empty response".into());
        assert_eq!(err.to_string(), "Generation failed: empty response");
    }
}
