//! Validation system for configuration values
//!
//! Each config section implements the `ConfigSection` trait, which includes
//! validation and merging.

pub use crate::error::ValidationError;

/// Trait for configuration sections that can validate themselves
///
/// New sections plug into `Config` without changes to the loader.
pub trait ConfigSection: Default {
    /// Validates the configuration section
    fn validate(&self) -> Result<(), Vec<ValidationError>>;

    /// Merges another config section into this one
    ///
    /// Values from `other` take precedence.
    fn merge(&mut self, other: Self);

    /// Returns the section name for error reporting
    fn section_name(&self) -> &'static str;
}

/// Common validators for config values
pub struct Validator;

impl Validator {
    /// Validates that a numeric value is within an inclusive range
    pub fn in_range<T>(value: T, min: T, max: T, field: &str) -> Result<(), ValidationError>
    where
        T: PartialOrd + std::fmt::Display + Copy,
    {
        if value < min || value > max {
            Err(ValidationError::with_value(
                field,
                format!("must be between {} and {}", min, max),
                value,
            ))
        } else {
            Ok(())
        }
    }

    /// Validates that a string is not empty or whitespace
    pub fn not_empty(value: &str, field: &str) -> Result<(), ValidationError> {
        if value.trim().is_empty() {
            Err(ValidationError::new(field, "must not be empty"))
        } else {
            Ok(())
        }
    }

    /// Validates that a string has no line breaks
    pub fn single_line(value: &str, field: &str) -> Result<(), ValidationError> {
        if value.contains(['\n', '\r']) {
            Err(ValidationError::with_value(
                field,
                "must be a single line",
                value.escape_debug(),
            ))
        } else {
            Ok(())
        }
    }

    /// Collects multiple validation results into a single result
    pub fn collect_errors(
        results: Vec<Result<(), ValidationError>>,
    ) -> Result<(), Vec<ValidationError>> {
        let errors: Vec<ValidationError> = results.into_iter().filter_map(|r| r.err()).collect();

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_in_range_valid() {
        assert!(Validator::in_range(0usize, 0, 8, "test").is_ok());
        assert!(Validator::in_range(2usize, 0, 8, "test").is_ok());
        assert!(Validator::in_range(8usize, 0, 8, "test").is_ok());
    }

    #[test]
    fn test_in_range_invalid() {
        assert!(Validator::in_range(-1, 0, 8, "test").is_err());
        assert!(Validator::in_range(9, 0, 8, "test").is_err());
    }

    #[test]
    fn test_not_empty() {
        assert!(Validator::not_empty("----", "test").is_ok());
        assert!(Validator::not_empty("", "test").is_err());
        assert!(Validator::not_empty("   ", "test").is_err());
    }

    #[test]
    fn test_single_line() {
        assert!(Validator::single_line("N/A", "test").is_ok());
        assert!(Validator::single_line("N/\nA", "test").is_err());
    }

    #[test]
    fn test_collect_errors_all_ok() {
        let results = vec![Ok(()), Ok(()), Ok(())];
        assert!(Validator::collect_errors(results).is_ok());
    }

    #[test]
    fn test_collect_errors_some_err() {
        let results = vec![
            Ok(()),
            Err(ValidationError::new("field1", "error1")),
            Ok(()),
            Err(ValidationError::new("field2", "error2")),
        ];
        let result = Validator::collect_errors(results);
        assert_eq!(result.expect_err("Should fail").len(), 2);
    }
}
