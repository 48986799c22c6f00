//! Default TOML config template with inline documentation comments.

/// Generate the default TOML config content with comments.
pub(crate) fn default_config_toml() -> &'static str {
    r##"# Folio Configuration
# Schema version 1
# Only override what you want to change -- missing fields use defaults.

[window]
# title = "Folio"
# width = 1280           # 320-7680
# height = 800           # 240-4320

[colors]
# background = "#0a0a12"
# primary = "#b026ff"
# accent = "#00d4ff"

[scene]
# enabled = true         # false skips the 3D hero scene entirely

[cursor]
# enabled = true
# pointer = "auto"       # auto, fine, coarse

[cursor.dot]
# stiffness = 500.0      # 1.0-5000.0
# damping = 28.0         # 0.0-500.0
# mass = 0.5             # 0.01-10.0

[cursor.ring]
# stiffness = 150.0
# damping = 15.0
# mass = 0.1

[performance]
# max_pixel_ratio = 2.0  # 1.0-4.0

[logging]
# level = "info"         # trace, debug, info, warn, error

[contact]
# host = "127.0.0.1"
# port = 5000            # 1024-65535
"##
}
