//! Validation for window, performance, and contact sections.

use crate::schema::FolioConfig;

use super::helpers::{validate_range, validate_range_f64};

pub(crate) fn validate_window(errors: &mut Vec<String>, config: &FolioConfig) {
    validate_range(errors, "window.width", config.window.width, 320, 7680);
    validate_range(errors, "window.height", config.window.height, 240, 4320);
}

pub(crate) fn validate_performance(errors: &mut Vec<String>, config: &FolioConfig) {
    validate_range_f64(
        errors,
        "performance.max_pixel_ratio",
        config.performance.max_pixel_ratio,
        1.0,
        4.0,
    );
}

pub(crate) fn validate_contact(errors: &mut Vec<String>, config: &FolioConfig) {
    validate_range(
        errors,
        "contact.port",
        u32::from(config.contact.port),
        1024,
        65535,
    );
    if config.contact.host.trim().is_empty() {
        errors.push("contact.host must not be empty".into());
    }
}
