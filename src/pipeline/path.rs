//! Document-mode input validation: every supplied path must exist.

use super::validation::ValidationResult;
use crate::error::AnyparserError;
use crate::options::ParseInput;
use std::path::PathBuf;
use tracing::debug;

/// Normalise `input` to a list and check each entry exists.
///
/// Fails with [`AnyparserError::NoFilesProvided`] for an empty list or a sole
/// blank entry, and with [`AnyparserError::FileNotFound`] naming the first
/// missing entry in input order. Entries after the first missing one are not
/// checked.
pub fn validate_path(input: impl Into<ParseInput>) -> ValidationResult<PathBuf> {
    let files = input.into().into_paths();

    let blank = match files.as_slice() {
        [] => true,
        [only] => only.as_os_str().to_string_lossy().trim().is_empty(),
        _ => false,
    };
    if blank {
        return ValidationResult::Invalid {
            error: AnyparserError::NoFilesProvided,
        };
    }

    if let Some(missing) = files.iter().find(|p| !p.exists()) {
        debug!("Path does not exist: {}", missing.display());
        return ValidationResult::Invalid {
            error: AnyparserError::FileNotFound {
                path: missing.clone(),
            },
        };
    }

    debug!("Validated {} input path(s)", files.len());
    ValidationResult::Valid { files }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;
    use tempfile::TempDir;

    fn sample(dir: &TempDir, name: &str) -> PathBuf {
        let path = dir.path().join(name);
        std::fs::write(&path, "Hello, World!").unwrap();
        path
    }

    #[test]
    fn single_string_is_wrapped_in_a_list() {
        let dir = TempDir::new().unwrap();
        let path = sample(&dir, "test.txt");
        let as_str = path.to_str().unwrap();

        let result = validate_path(as_str);
        assert!(result.is_valid());
        assert_eq!(result.files(), Some(&[path.clone()][..]));
    }

    #[test]
    fn single_path_is_wrapped_in_a_list() {
        let dir = TempDir::new().unwrap();
        let path = sample(&dir, "test.txt");

        let result = validate_path(path.as_path());
        assert_eq!(result.files(), Some(&[path.clone()][..]));
    }

    #[test]
    fn multiple_files_are_all_returned() {
        let dir = TempDir::new().unwrap();
        let a = sample(&dir, "test1.txt");
        let b = sample(&dir, "test2.txt");

        let result = validate_path(vec![&a, &b]);
        let files = result.files().unwrap();
        assert_eq!(files.len(), 2);
        assert!(files.contains(&a));
        assert!(files.contains(&b));
    }

    #[test]
    fn nonexistent_file_is_named() {
        let result = validate_path("nonexistent.txt");
        let err = result.error().unwrap();
        assert!(matches!(err, AnyparserError::FileNotFound { .. }));
        assert!(err.to_string().contains("File does not exist: nonexistent.txt"));
    }

    #[test]
    fn mixed_list_names_the_missing_entry_in_any_order() {
        let dir = TempDir::new().unwrap();
        let existing = sample(&dir, "test1.txt");
        let missing = dir.path().join("missing.txt");

        for input in [
            vec![existing.clone(), missing.clone()],
            vec![missing.clone(), existing.clone()],
        ] {
            match validate_path(input).into_result() {
                Err(AnyparserError::FileNotFound { path }) => assert_eq!(path, missing),
                other => panic!("expected FileNotFound, got {other:?}"),
            }
        }
    }

    #[test]
    fn first_missing_entry_wins() {
        let result = validate_path(vec!["first-missing.txt", "second-missing.txt"]);
        match result.into_result() {
            Err(AnyparserError::FileNotFound { path }) => {
                assert_eq!(path, Path::new("first-missing.txt"))
            }
            other => panic!("expected FileNotFound, got {other:?}"),
        }
    }

    #[test]
    fn empty_inputs_report_no_files() {
        for result in [
            validate_path(""),
            validate_path("   "),
            validate_path(Vec::<PathBuf>::new()),
        ] {
            let err = result.error().unwrap();
            assert!(matches!(err, AnyparserError::NoFilesProvided));
            assert!(err.to_string().contains("No files provided"));
        }
    }
}
