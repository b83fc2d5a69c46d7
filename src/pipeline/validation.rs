//! Tagged result shared by the path and URL validators.

use crate::error::AnyparserError;

/// Outcome of validating caller input.
///
/// Both validators report the accepted entries as a list, even the URL
/// validator whose list always has exactly one element, so the orchestrator
/// handles them uniformly.
#[derive(Debug)]
pub enum ValidationResult<T> {
    Valid { files: Vec<T> },
    Invalid { error: AnyparserError },
}

impl<T> ValidationResult<T> {
    pub fn is_valid(&self) -> bool {
        matches!(self, ValidationResult::Valid { .. })
    }

    /// Accepted entries, if valid.
    pub fn files(&self) -> Option<&[T]> {
        match self {
            ValidationResult::Valid { files } => Some(files),
            ValidationResult::Invalid { .. } => None,
        }
    }

    /// Rejection reason, if invalid.
    pub fn error(&self) -> Option<&AnyparserError> {
        match self {
            ValidationResult::Valid { .. } => None,
            ValidationResult::Invalid { error } => Some(error),
        }
    }

    pub fn into_result(self) -> Result<Vec<T>, AnyparserError> {
        match self {
            ValidationResult::Valid { files } => Ok(files),
            ValidationResult::Invalid { error } => Err(error),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accessors_agree_with_variant() {
        let ok: ValidationResult<&str> = ValidationResult::Valid { files: vec!["a"] };
        assert!(ok.is_valid());
        assert_eq!(ok.files(), Some(&["a"][..]));
        assert!(ok.error().is_none());

        let bad: ValidationResult<&str> = ValidationResult::Invalid {
            error: AnyparserError::NoFilesProvided,
        };
        assert!(!bad.is_valid());
        assert!(bad.files().is_none());
        assert!(matches!(bad.into_result(), Err(AnyparserError::NoFilesProvided)));
    }
}
