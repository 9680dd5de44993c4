//! Trait abstractions for runtime I/O
//!
//! These traits enable testing the executor with mock implementations.

use crate::db::{Database, PersistentAttributes};
use crate::timer::{ApiAccess, TimerError, TimerRequest, TimerResponse, TimerService};
use async_trait::async_trait;
use std::sync::Arc;

/// Storage for attributes that outlive a session
#[async_trait]
pub trait AttributeStore: Send + Sync {
    /// Attributes for a user; a user never seen gets the defaults
    async fn load(&self, user_id: &str) -> Result<PersistentAttributes, String>;

    /// Replace the stored attributes for a user
    async fn save(&self, user_id: &str, attributes: &PersistentAttributes) -> Result<(), String>;
}

// ============================================================================
// Arc implementations for trait objects
// ============================================================================

#[async_trait]
impl<T: AttributeStore + ?Sized> AttributeStore for Arc<T> {
    async fn load(&self, user_id: &str) -> Result<PersistentAttributes, String> {
        (**self).load(user_id).await
    }

    async fn save(&self, user_id: &str, attributes: &PersistentAttributes) -> Result<(), String> {
        (**self).save(user_id, attributes).await
    }
}

#[async_trait]
impl<T: TimerService + ?Sized> TimerService for Arc<T> {
    async fn create_timer(
        &self,
        access: &ApiAccess,
        request: &TimerRequest,
    ) -> Result<TimerResponse, TimerError> {
        (**self).create_timer(access, request).await
    }
}

// ============================================================================
// Production Adapters
// ============================================================================

/// Adapter to use Database as `AttributeStore`
#[derive(Clone)]
pub struct DatabaseStore {
    db: Database,
}

impl DatabaseStore {
    pub fn new(db: Database) -> Self {
        Self { db }
    }
}

#[async_trait]
impl AttributeStore for DatabaseStore {
    async fn load(&self, user_id: &str) -> Result<PersistentAttributes, String> {
        self.db
            .get_attributes(user_id)
            .map(Option::unwrap_or_default)
            .map_err(|e| e.to_string())
    }

    async fn save(&self, user_id: &str, attributes: &PersistentAttributes) -> Result<(), String> {
        self.db
            .put_attributes(user_id, attributes)
            .map_err(|e| e.to_string())
    }
}
