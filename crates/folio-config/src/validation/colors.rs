//! Palette validation.

use crate::schema::FolioConfig;

use super::helpers::validate_hex_color;

pub(crate) fn validate_colors(errors: &mut Vec<String>, config: &FolioConfig) {
    validate_hex_color(errors, "colors.background", &config.colors.background);
    validate_hex_color(errors, "colors.primary", &config.colors.primary);
    validate_hex_color(errors, "colors.accent", &config.colors.accent);
}
