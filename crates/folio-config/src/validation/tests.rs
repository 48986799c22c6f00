//! Tests for the full validation pipeline.

use super::*;

#[test]
fn default_config_validates() {
    let config = FolioConfig::default();
    assert!(validate(&config).is_ok());
}

#[test]
fn catches_window_too_small() {
    let mut config = FolioConfig::default();
    config.window.width = 100;
    let err = validate(&config).unwrap_err().to_string();
    assert!(err.contains("window.width"));
}

#[test]
fn catches_bad_primary_color() {
    let mut config = FolioConfig::default();
    config.colors.primary = "purple".into();
    let err = validate(&config).unwrap_err().to_string();
    assert!(err.contains("colors.primary"));
}

#[test]
fn catches_zero_stiffness() {
    let mut config = FolioConfig::default();
    config.cursor.dot.stiffness = 0.0;
    let err = validate(&config).unwrap_err().to_string();
    assert!(err.contains("cursor.dot.stiffness"));
}

#[test]
fn catches_negative_ring_damping() {
    let mut config = FolioConfig::default();
    config.cursor.ring.damping = -1.0;
    let err = validate(&config).unwrap_err().to_string();
    assert!(err.contains("cursor.ring.damping"));
}

#[test]
fn catches_nan_mass() {
    let mut config = FolioConfig::default();
    config.cursor.ring.mass = f64::NAN;
    let err = validate(&config).unwrap_err().to_string();
    assert!(err.contains("cursor.ring.mass"));
}

#[test]
fn catches_pixel_ratio_below_one() {
    let mut config = FolioConfig::default();
    config.performance.max_pixel_ratio = 0.5;
    let err = validate(&config).unwrap_err().to_string();
    assert!(err.contains("performance.max_pixel_ratio"));
}

#[test]
fn catches_privileged_contact_port() {
    let mut config = FolioConfig::default();
    config.contact.port = 80;
    let err = validate(&config).unwrap_err().to_string();
    assert!(err.contains("contact.port"));
}

#[test]
fn catches_empty_contact_host() {
    let mut config = FolioConfig::default();
    config.contact.host = "  ".into();
    let err = validate(&config).unwrap_err().to_string();
    assert!(err.contains("contact.host"));
}

#[test]
fn collects_multiple_errors() {
    let mut config = FolioConfig::default();
    config.window.height = 10;
    config.colors.accent = "#zzz".into();
    config.cursor.dot.mass = 0.0;
    let err = validate(&config).unwrap_err().to_string();
    assert!(err.contains("window.height"));
    assert!(err.contains("colors.accent"));
    assert!(err.contains("cursor.dot.mass"));
}
