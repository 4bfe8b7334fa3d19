//! Core traits for smallcrud
//!
//! Shared behaviors for the schema, definition and configuration types:
//! validation and JSON file persistence.

use crate::error::{CrudError, CrudResult};
use serde::{Serialize, de::DeserializeOwned};
use std::path::Path;

// ============================================================================
// Validatable Trait
// ============================================================================

/// Trait for types that can be validated
///
/// Types implementing this trait can check their internal consistency
/// and return validation errors if the state is invalid.
pub trait Validatable {
    /// Validate the current state of the object
    ///
    /// Returns `Ok(())` if valid, or a `CrudError` describing the problem.
    fn validate(&self) -> CrudResult<()>;

    /// Check if the object is valid without returning error details
    fn is_valid(&self) -> bool {
        self.validate().is_ok()
    }

    /// Get all validation errors (for types that can have multiple errors)
    fn validation_errors(&self) -> Vec<String> {
        match self.validate() {
            Ok(()) => vec![],
            Err(e) => vec![e.to_string()],
        }
    }
}

// ============================================================================
// Persistable Trait
// ============================================================================

/// Trait for types stored as JSON files (schemas, definition sets)
pub trait Persistable: Serialize + DeserializeOwned + Sized {
    /// Save to a JSON string
    fn to_json(&self) -> CrudResult<String> {
        serde_json::to_string_pretty(self).map_err(Into::into)
    }

    /// Load from a JSON string
    fn from_json(json: &str) -> CrudResult<Self> {
        serde_json::from_str(json).map_err(Into::into)
    }

    /// Save to a file
    fn save_to_file(&self, path: &Path) -> CrudResult<()> {
        let json = self.to_json()?;
        std::fs::write(path, json).map_err(|e| CrudError::FileWrite {
            path: path.to_path_buf(),
            message: e.to_string(),
        })
    }

    /// Load from a file
    fn load_from_file(path: &Path) -> CrudResult<Self> {
        let json = std::fs::read_to_string(path).map_err(|e| CrudError::FileRead {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        Self::from_json(&json)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Debug, PartialEq, Serialize, Deserialize)]
    struct Sample {
        name: String,
    }

    impl Persistable for Sample {}

    impl Validatable for Sample {
        fn validate(&self) -> CrudResult<()> {
            if self.name.is_empty() {
                return Err(CrudError::invalid_schema("sample", "name is empty"));
            }
            Ok(())
        }
    }

    #[test]
    fn test_validation_errors() {
        let bad = Sample {
            name: String::new(),
        };
        assert!(!bad.is_valid());
        assert_eq!(bad.validation_errors().len(), 1);
    }

    #[test]
    fn test_save_and_load_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("sample.json");
        let original = Sample {
            name: "friend".to_string(),
        };
        original.save_to_file(&path).unwrap();
        assert_eq!(Sample::load_from_file(&path).unwrap(), original);
    }

    #[test]
    fn test_load_missing_file() {
        let err = Sample::load_from_file(Path::new("/nonexistent/sample.json")).unwrap_err();
        assert!(matches!(err, CrudError::FileRead { .. }));
    }
}
