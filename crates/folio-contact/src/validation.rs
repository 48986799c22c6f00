//! Contact form rules.

use std::sync::LazyLock;

use regex::Regex;

use crate::model::{ContactRequest, FieldError};

pub const MIN_NAME_CHARS: usize = 2;
pub const MIN_MESSAGE_CHARS: usize = 10;

static EMAIL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("static email pattern must compile")
});

pub fn is_valid_email(email: &str) -> bool {
    EMAIL_RE.is_match(email)
}

/// Every rule the request breaks, in field order.
pub fn validate(req: &ContactRequest) -> Result<(), Vec<FieldError>> {
    let mut errors = Vec::new();

    if req.name.chars().count() < MIN_NAME_CHARS {
        errors.push(FieldError::new(
            "name",
            format!("Name must be at least {MIN_NAME_CHARS} characters"),
        ));
    }
    if !is_valid_email(&req.email) {
        errors.push(FieldError::new("email", "Please enter a valid email address"));
    }
    if req.message.chars().count() < MIN_MESSAGE_CHARS {
        errors.push(FieldError::new(
            "message",
            format!("Message must be at least {MIN_MESSAGE_CHARS} characters"),
        ));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
