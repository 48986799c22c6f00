//! Full configuration validation.
//!
//! Each domain has its own submodule; this orchestrator calls them all
//! and collects errors into a single `ConfigError`.

mod colors;
mod cursor;
mod helpers;
mod misc;

#[cfg(test)]
mod tests;

use crate::schema::FolioConfig;
use folio_common::ConfigError;

/// Run all validations on a config, collecting all errors.
pub fn validate(config: &FolioConfig) -> Result<(), ConfigError> {
    let mut errors: Vec<String> = Vec::new();

    misc::validate_window(&mut errors, config);
    colors::validate_colors(&mut errors, config);
    cursor::validate_cursor(&mut errors, config);
    misc::validate_performance(&mut errors, config);
    misc::validate_contact(&mut errors, config);

    if errors.is_empty() {
        Ok(())
    } else {
        Err(ConfigError::ValidationError(errors.join("; ")))
    }
}
