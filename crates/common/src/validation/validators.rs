use once_cell::sync::Lazy;
use regex::Regex;

/// Reusable check for a single field value
pub trait FieldValidator<T: ?Sized> {
    fn validate(&self, value: &T) -> Result<(), String>;
}

#[allow(clippy::expect_used)]
static EMAIL_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}$")
        .expect("EMAIL_REGEX is a valid regex")
});

/// `local@domain.tld` with a two-letter or longer top-level domain
#[derive(Debug, Clone, Copy, Default)]
pub struct EmailValidator;

impl EmailValidator {
    pub const fn new() -> Self {
        Self
    }
}

impl FieldValidator<str> for EmailValidator {
    fn validate(&self, value: &str) -> Result<(), String> {
        if EMAIL_REGEX.is_match(value) {
            Ok(())
        } else {
            Err("Invalid email format".to_string())
        }
    }
}
