mod context;
mod types;

pub use context::GpuContext;
#[cfg(test)]
use context::{pick_alpha_mode, pick_format};
pub use types::*;
