//! HTTP API for the noodle timer skill

mod handlers;
mod types;

pub use handlers::create_router;
#[allow(unused_imports)] // Public API re-exports
pub use types::*;

use crate::runtime::ProductionRuntime;
use std::sync::Arc;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub runtime: Arc<ProductionRuntime>,
    /// Expected application id; `None` accepts any skill
    pub skill_id: Option<String>,
}

impl AppState {
    pub fn new(runtime: ProductionRuntime, skill_id: Option<String>) -> Self {
        Self {
            runtime: Arc::new(runtime),
            skill_id,
        }
    }
}
