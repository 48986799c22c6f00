//! Host UI model for Folio.
//!
//! A single-threaded stand-in for the services a page component expects
//! from its host: an element tree with structural-change observers, a
//! listener registry keyed by element identity, a frame scheduler, hover
//! tracking, and the pointer-capability query.

pub mod document;
pub mod frames;
pub mod host;
pub mod hover;
pub mod listeners;
pub mod pointer;

pub use document::{Document, Element, ElementId, ElementKind, ElementSpec, Mutation, MutationBatch, ObserverId};
pub use frames::{FrameHandle, FrameScheduler, FrameTick};
pub use host::{deliver, Dispatch, Event, Platform};
pub use hover::{HoverChange, HoverTracker};
pub use listeners::{EventKind, Listener, ListenerId, ListenerRegistry, ListenerTarget, OwnerId};
pub use pointer::PointerCapability;
