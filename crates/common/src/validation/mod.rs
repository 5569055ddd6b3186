//! Field-level validation
//!
//! [`Validator`] collects every failing field before returning, so a
//! registration form with three blank fields reports all three at once.
//! Nested sections prefix their fields (`organiser.email`).

use std::fmt;

mod validators;

pub use validators::{EmailValidator, FieldValidator};

pub type ValidationResult<T> = Result<T, ValidationError>;

/// Every field that failed, in the order it was checked
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationError {
    pub errors: Vec<FieldError>,
}

impl ValidationError {
    /// Error with a single failing field
    pub fn field(field: impl Into<String>, message: impl Into<String>) -> Self {
        let mut err = Self::default();
        err.add_field_error(field, message);
        err
    }

    pub fn add_field_error(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.errors.push(FieldError { field: field.into(), message: message.into() });
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    /// Names of every field that failed, in reporting order
    pub fn fields(&self) -> Vec<&str> {
        self.errors.iter().map(|e| e.field.as_str()).collect()
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.errors.as_slice() {
            [] => f.write_str("Validation failed"),
            [only] => write!(f, "Validation failed: {only}"),
            errors => {
                write!(f, "Validation failed with {} errors: ", errors.len())?;
                for (i, error) in errors.iter().enumerate() {
                    if i > 0 {
                        f.write_str("; ")?;
                    }
                    write!(f, "{error}")?;
                }
                Ok(())
            }
        }
    }
}

impl std::error::Error for ValidationError {}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

impl fmt::Display for FieldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// Accumulates field errors until [`Validator::finalize`]
#[derive(Debug, Default)]
pub struct Validator {
    errors: ValidationError,
    path: Vec<String>,
}

impl Validator {
    pub fn new() -> Self {
        Self::default()
    }

    fn add_error(&mut self, field: &str, message: impl Into<String>) {
        let field = if self.path.is_empty() {
            field.to_string()
        } else {
            format!("{}.{field}", self.path.join("."))
        };
        self.errors.add_field_error(field, message);
    }

    /// Check `value` with a reusable field validator
    pub fn validate_field<T, V>(&mut self, field: &str, value: &T, validator: &V)
    where
        T: ?Sized,
        V: FieldValidator<T> + ?Sized,
    {
        if let Err(message) = validator.validate(value) {
            self.add_error(field, message);
        }
    }

    /// Reject empty and whitespace-only strings
    pub fn validate_not_empty(&mut self, field: &str, value: &str) {
        if value.trim().is_empty() {
            self.add_error(field, "cannot be empty");
        }
    }

    pub fn validate_pattern(&mut self, field: &str, value: &str, pattern: &regex::Regex) {
        if !pattern.is_match(value) {
            self.add_error(field, format!("must match pattern: {}", pattern.as_str()));
        }
    }

    /// Run `f` with `section` prefixed to every field it reports
    pub fn validate_nested<F>(&mut self, section: &str, f: F)
    where
        F: FnOnce(&mut Self),
    {
        self.path.push(section.to_string());
        f(self);
        self.path.pop();
    }

    pub fn finalize(self) -> ValidationResult<()> {
        if self.errors.is_empty() {
            Ok(())
        } else {
            Err(self.errors)
        }
    }
}
