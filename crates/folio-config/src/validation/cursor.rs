//! Cursor spring validation.

use crate::schema::{FolioConfig, SpringConfig};

use super::helpers::validate_range_f64;

fn validate_spring(errors: &mut Vec<String>, prefix: &str, spring: &SpringConfig) {
    validate_range_f64(
        errors,
        &format!("{prefix}.stiffness"),
        spring.stiffness,
        1.0,
        5000.0,
    );
    validate_range_f64(errors, &format!("{prefix}.damping"), spring.damping, 0.0, 500.0);
    validate_range_f64(errors, &format!("{prefix}.mass"), spring.mass, 0.01, 10.0);
}

/// Validate both cursor layer springs.
pub(crate) fn validate_cursor(errors: &mut Vec<String>, config: &FolioConfig) {
    validate_spring(errors, "cursor.dot", &config.cursor.dot);
    validate_spring(errors, "cursor.ring", &config.cursor.ring);
}
