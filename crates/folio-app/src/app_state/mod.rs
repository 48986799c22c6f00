//! Top-level application state.
//!
//! Implements `winit::application::ApplicationHandler` to drive the main
//! event loop. Owns the host platform model, the page layer, the mounted
//! scene and the cursor overlay, and composites them every frame.

mod core;
mod dispatch;
mod event_handler;
mod init;
mod navigation;
mod pages;
mod render;
mod shutdown;


pub use core::FolioApp;
