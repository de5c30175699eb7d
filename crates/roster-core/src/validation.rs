//! Validation utilities.

use crate::{FieldError, RosterError};
use validator::{Validate, ValidationErrors};

/// Extension trait for validation.
pub trait ValidateExt: Validate {
    /// Validates the struct and returns a `RosterError` on failure.
    fn validate_request(&self) -> Result<(), RosterError> {
        self.validate().map_err(validation_errors_to_roster_error)
    }
}

impl<T: Validate> ValidateExt for T {}

/// Converts `validator::ValidationErrors` to `RosterError::InvalidFields`.
///
/// Field errors are sorted by field name so the result is stable regardless
/// of the map order `validator` hands back.
#[must_use]
pub fn validation_errors_to_roster_error(errors: ValidationErrors) -> RosterError {
    let mut field_errors: Vec<FieldError> = errors
        .field_errors()
        .iter()
        .flat_map(|(field, errors)| {
            errors.iter().map(move |error| FieldError {
                field: (*field).to_string(),
                message: error
                    .message
                    .as_ref()
                    .map_or_else(|| error.code.to_string(), ToString::to_string),
                code: error.code.to_string(),
            })
        })
        .collect();

    field_errors.sort_by(|a, b| a.field.cmp(&b.field));

    RosterError::InvalidFields(field_errors)
}

/// Common validation functions.
pub mod rules {
    use validator::{ValidateEmail, ValidationError};

    /// Validates that a string is not empty.
    ///
    /// Whitespace counts as content, so `" "` passes.
    pub fn not_empty(value: &str) -> Result<(), ValidationError> {
        if value.is_empty() {
            return Err(ValidationError::new("not_empty"));
        }
        Ok(())
    }

    /// Validates email syntax, leaving empty values to the required check.
    pub fn email_if_present(value: &str) -> Result<(), ValidationError> {
        if value.is_empty() || value.validate_email() {
            return Ok(());
        }
        Err(ValidationError::new("email"))
    }
}
