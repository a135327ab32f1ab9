//! Error types for the payroll engine.
//!
//! This module provides strongly-typed errors using the `thiserror` crate.
//! Configuration errors never reach the calculators: the loader turns them
//! into per-table fallbacks. Only input validation surfaces to callers.

use thiserror::Error;

/// The main error type for the payroll engine.
///
/// # Example
///
/// ```
/// use payroll_engine::error::EngineError;
///
/// let error = EngineError::ConfigNotFound {
///     path: "/missing/countries.json".to_string(),
/// };
/// assert_eq!(error.to_string(), "Configuration file not found: /missing/countries.json");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EngineError {
    /// Configuration file was not found at the specified path.
    #[error("Configuration file not found: {path}")]
    ConfigNotFound {
        /// The path that was not found.
        path: String,
    },

    /// Configuration file could not be parsed.
    #[error("Failed to parse configuration file '{path}': {message}")]
    ConfigParseError {
        /// The path to the file that failed to parse.
        path: String,
        /// A description of the parse error.
        message: String,
    },

    /// A configuration table parsed but failed validation.
    #[error("Invalid table '{table}': {message}")]
    InvalidTable {
        /// The name of the table that failed validation.
        table: String,
        /// A description of the violated constraint.
        message: String,
    },

    /// A calculator was called with an out-of-range input.
    #[error("Invalid input '{field}': {message}")]
    InvalidInput {
        /// The offending input field.
        field: String,
        /// A description of what made the input invalid.
        message: String,
    },
}

impl EngineError {
    /// Reports arithmetic on `field` that left the representable range.
    ///
    /// # Example
    ///
    /// ```
    /// use payroll_engine::error::EngineError;
    ///
    /// let error = EngineError::out_of_range("monthly_salary");
    /// assert_eq!(error.to_string(), "Invalid input 'monthly_salary': out of range");
    /// ```
    pub fn out_of_range(field: &str) -> Self {
        Self::InvalidInput {
            field: field.to_string(),
            message: "out of range".to_string(),
        }
    }
}

/// A type alias for Results that return EngineError.
pub type EngineResult<T> = Result<T, EngineError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_not_found_displays_path() {
        let error = EngineError::ConfigNotFound {
            path: "/missing/file.json".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Configuration file not found: /missing/file.json"
        );
    }

    #[test]
    fn test_config_parse_error_displays_path_and_message() {
        let error = EngineError::ConfigParseError {
            path: "/config/bad.json".to_string(),
            message: "expected value at line 1 column 1".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Failed to parse configuration file '/config/bad.json': expected value at line 1 column 1"
        );
    }

    #[test]
    fn test_invalid_table_displays_table_and_message() {
        let error = EngineError::InvalidTable {
            table: "social_contribution".to_string(),
            message: "brackets must be sorted ascending".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Invalid table 'social_contribution': brackets must be sorted ascending"
        );
    }

    #[test]
    fn test_invalid_input_displays_field_and_message() {
        let error = EngineError::InvalidInput {
            field: "gross_salary".to_string(),
            message: "must not be negative".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Invalid input 'gross_salary': must not be negative"
        );
    }

    #[test]
    fn test_errors_implement_std_error() {
        fn assert_error<T: std::error::Error>() {}
        assert_error::<EngineError>();
    }

    #[test]
    fn test_error_propagation_with_question_mark() {
        fn returns_invalid_input() -> EngineResult<()> {
            Err(EngineError::InvalidInput {
                field: "dependents".to_string(),
                message: "must not be negative".to_string(),
            })
        }

        fn propagates_error() -> EngineResult<()> {
            returns_invalid_input()?;
            Ok(())
        }

        assert!(propagates_error().is_err());
    }
}
