//! Database schema and types

use serde::{Deserialize, Serialize};

/// SQL schema for initialization
pub const SCHEMA: &str = r"
CREATE TABLE IF NOT EXISTS user_attributes (
    user_id TEXT PRIMARY KEY,
    attributes TEXT NOT NULL,
    updated_at TEXT NOT NULL
);
";

/// Per-user attributes that survive across sessions
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PersistentAttributes {
    /// `"1"` once the user has been greeted
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub visit: Option<String>,
}

impl PersistentAttributes {
    pub fn has_visited(&self) -> bool {
        self.visit.is_some()
    }

    pub fn mark_visited(&mut self) {
        self.visit = Some("1".to_string());
    }
}
