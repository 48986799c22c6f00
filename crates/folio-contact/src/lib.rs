//! Contact-form collaborator for Folio.
//!
//! A small HTTP service that accepts contact messages from the portfolio
//! and lists what it has received.
//!
//! - `POST /api/contact` validates and stores a message
//! - `GET /api/contact` returns stored messages, oldest first

pub mod error;
pub mod handlers;
pub mod model;
pub mod store;
pub mod validation;

pub use error::ContactError;
pub use model::{ContactMessage, ContactRequest, FieldError};
pub use store::{ContactStore, MemoryStore};

use std::sync::Arc;

use axum::routing::get;
use axum::Router;
use tower_http::trace::TraceLayer;

/// Shared handler state.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn ContactStore>,
}

impl AppState {
    pub fn new(store: Arc<dyn ContactStore>) -> Self {
        Self { store }
    }
}

/// Build the router with request tracing.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route(
            "/api/contact",
            get(handlers::list_messages).post(handlers::create_message),
        )
        .with_state(state)
        .layer(TraceLayer::new_for_http())
}
