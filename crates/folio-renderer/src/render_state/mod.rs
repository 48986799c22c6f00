//! Window compositor.

mod composition;
mod helpers;
mod state;

pub use composition::{Composition, RING_THICKNESS};
pub use state::RenderState;
