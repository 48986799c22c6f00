//! Custom cursor overlay: a dot and a trailing ring that follow the
//! pointer and grow/shrink over interactive elements.

mod layers;
mod overlay;

pub use layers::{CursorLayer, LayerKind, DOT_DIAMETER, RING_DIAMETER};
pub use overlay::{is_interactive, OverlaySettings, PointerOverlay};

#[cfg(test)]
mod tests;
