//! Message storage.

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::error::ContactError;
use crate::model::{ContactMessage, ContactRequest};

#[async_trait]
pub trait ContactStore: Send + Sync {
    /// Persist a validated request and return the stored record.
    async fn create(&self, request: ContactRequest) -> Result<ContactMessage, ContactError>;

    /// All stored messages, oldest first.
    async fn list(&self) -> Result<Vec<ContactMessage>, ContactError>;
}

/// Process-lifetime store; messages are lost on restart.
#[derive(Debug, Default)]
pub struct MemoryStore {
    messages: RwLock<Vec<ContactMessage>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ContactStore for MemoryStore {
    async fn create(&self, request: ContactRequest) -> Result<ContactMessage, ContactError> {
        let message = ContactMessage {
            id: Uuid::new_v4().to_string(),
            name: request.name,
            email: request.email,
            message: request.message,
            created_at: Utc::now(),
        };
        self.messages.write().await.push(message.clone());
        Ok(message)
    }

    async fn list(&self) -> Result<Vec<ContactMessage>, ContactError> {
        Ok(self.messages.read().await.clone())
    }
}
