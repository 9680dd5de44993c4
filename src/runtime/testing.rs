//! Mock implementations for testing
//!
//! These mocks enable turn-level testing without real I/O.

use super::traits::*;
use crate::db::PersistentAttributes;
use crate::timer::{ApiAccess, TimerError, TimerRequest, TimerResponse, TimerService};
use async_trait::async_trait;
use std::collections::{HashMap, VecDeque};
use std::sync::Mutex;

// ============================================================================
// Mock Timer Service
// ============================================================================

/// Mock timer API that returns queued responses
pub struct MockTimerService {
    responses: Mutex<VecDeque<Result<TimerResponse, TimerError>>>,
    /// Record of all requests made
    pub requests: Mutex<Vec<TimerRequest>>,
}

#[allow(dead_code)]
impl MockTimerService {
    pub fn new() -> Self {
        Self {
            responses: Mutex::new(VecDeque::new()),
            requests: Mutex::new(Vec::new()),
        }
    }

    /// Queue a successful response
    pub fn queue_response(&self, response: TimerResponse) {
        self.responses.lock().unwrap().push_back(Ok(response));
    }

    /// Queue an error response
    pub fn queue_error(&self, error: TimerError) {
        self.responses.lock().unwrap().push_back(Err(error));
    }

    /// Get recorded requests
    pub fn recorded_requests(&self) -> Vec<TimerRequest> {
        self.requests.lock().unwrap().clone()
    }
}

impl Default for MockTimerService {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl TimerService for MockTimerService {
    async fn create_timer(
        &self,
        _access: &ApiAccess,
        request: &TimerRequest,
    ) -> Result<TimerResponse, TimerError> {
        self.requests.lock().unwrap().push(request.clone());
        self.responses
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(TimerError::network("No mock response queued")))
    }
}

// ============================================================================
// Mock Attribute Store
// ============================================================================

/// In-memory attribute store
pub struct MockAttributeStore {
    attributes: Mutex<HashMap<String, PersistentAttributes>>,
    /// Fail every call, as if the database were unreachable
    failing: bool,
}

#[allow(dead_code)]
impl MockAttributeStore {
    pub fn new() -> Self {
        Self {
            attributes: Mutex::new(HashMap::new()),
            failing: false,
        }
    }

    pub fn failing() -> Self {
        Self {
            failing: true,
            ..Self::new()
        }
    }

    /// Seed a user as already visited
    pub fn with_visited(self, user_id: &str) -> Self {
        let mut attributes = PersistentAttributes::default();
        attributes.mark_visited();
        self.attributes
            .lock()
            .unwrap()
            .insert(user_id.to_string(), attributes);
        self
    }

    pub fn get(&self, user_id: &str) -> Option<PersistentAttributes> {
        self.attributes.lock().unwrap().get(user_id).cloned()
    }
}

impl Default for MockAttributeStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl AttributeStore for MockAttributeStore {
    async fn load(&self, user_id: &str) -> Result<PersistentAttributes, String> {
        if self.failing {
            return Err("attribute store unavailable".to_string());
        }
        Ok(self.get(user_id).unwrap_or_default())
    }

    async fn save(&self, user_id: &str, attributes: &PersistentAttributes) -> Result<(), String> {
        if self.failing {
            return Err("attribute store unavailable".to_string());
        }
        self.attributes
            .lock()
            .unwrap()
            .insert(user_id.to_string(), attributes.clone());
        Ok(())
    }
}
