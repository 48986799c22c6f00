use crate::model::FieldError;

#[derive(Debug, thiserror::Error)]
pub enum ContactError {
    #[error("validation failed ({} field errors)", .0.len())]
    Validation(Vec<FieldError>),

    #[error("storage error: {0}")]
    Storage(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_counts_field_errors() {
        let err = ContactError::Validation(vec![
            FieldError::new("name", "too short"),
            FieldError::new("email", "invalid"),
        ]);
        assert_eq!(err.to_string(), "validation failed (2 field errors)");

        let err = ContactError::Storage("disk full".into());
        assert_eq!(err.to_string(), "storage error: disk full");
    }
}
