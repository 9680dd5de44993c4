//! Server configuration from the environment

use std::time::Duration;

const DEFAULT_PORT: u16 = 8000;
const DEFAULT_API_TIMEOUT_SECS: u64 = 5;

/// Configuration for the skill endpoint
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkillConfig {
    pub port: u16,
    pub db_path: String,
    /// Requests for any other skill are rejected when set
    pub skill_id: Option<String>,
    /// Upper bound on one timer API call
    pub api_timeout: Duration,
}

impl SkillConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let db_path = lookup("NOODLE_TIMER_DB_PATH").unwrap_or_else(|| {
            let home = lookup("HOME").unwrap_or_else(|| "/tmp".to_string());
            format!("{home}/.noodle-timer/attributes.db")
        });

        let port = lookup("NOODLE_TIMER_PORT")
            .and_then(|p| p.parse().ok())
            .unwrap_or(DEFAULT_PORT);

        let api_timeout_secs = lookup("NOODLE_TIMER_API_TIMEOUT_SECS")
            .and_then(|s| s.parse().ok())
            .filter(|secs| *secs > 0)
            .unwrap_or(DEFAULT_API_TIMEOUT_SECS);

        Self {
            port,
            db_path,
            skill_id: lookup("NOODLE_TIMER_SKILL_ID").filter(|id| !id.is_empty()),
            api_timeout: Duration::from_secs(api_timeout_secs),
        }
    }
}
