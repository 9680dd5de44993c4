//! Turn state, turn context and response states

use crate::alexa::Directive;
use crate::timer::{ApiAccess, TimerRecord};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Everything a turn needs, built once at turn entry and dropped at exit
#[derive(Debug, Clone)]
pub struct TurnContext {
    pub user_id: String,
    /// Read fresh from the request every turn
    pub consent_token: Option<String>,
    /// Persisted "seen before" flag, as loaded at turn start
    pub visited: bool,
    pub session: SessionAttributes,
    pub api: ApiAccess,
}

/// Attributes carried across turns of one platform session
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionAttributes {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_timer: Option<TimerRecord>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub diagnosis: Option<Diagnosis>,
}

impl SessionAttributes {
    /// Attributes from the request envelope. Unreadable attributes start a
    /// fresh session state rather than failing the turn.
    pub fn from_value(value: &Value) -> Self {
        if value.is_null() {
            return Self::default();
        }
        serde_json::from_value(value.clone()).unwrap_or_else(|e| {
            tracing::warn!(error = %e, "Discarding unreadable session attributes");
            Self::default()
        })
    }

    pub fn to_value(&self) -> Value {
        serde_json::to_value(self).unwrap_or(Value::Null)
    }
}

/// What the user was trying to do when the last timer request came in
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Diagnosis {
    pub intent: String,
    pub noodle: String,
    pub softness: String,
}

/// Progress of a single turn
#[derive(Debug, Clone, PartialEq)]
pub enum TurnState {
    Received,
    /// Timer launch requested, waiting for its outcome
    AwaitingTimer { noodle: String },
    /// Terminal: the response for this turn
    Done(ResponseState),
}

impl TurnState {
    #[cfg(test)]
    pub fn is_done(&self) -> bool {
        matches!(self, TurnState::Done(_))
    }
}

/// The one response a turn produces, ready to be rendered
#[derive(Debug, Clone, PartialEq)]
pub enum ResponseState {
    AskPermission(Directive),
    Greet { first_visit: bool },
    PermissionAccepted,
    PermissionCardSent,
    PermissionRequired,
    TimerStarted { noodle: String, softness_display: String },
    TimerFailed { noodle: String },
    Help,
    Exit,
    Fallback,
    Unhandled,
    SessionEnded,
    ErrorRecoverable,
    ErrorUnrecoverable,
}

impl ResponseState {
    /// Short name for logs
    pub fn name(&self) -> &'static str {
        match self {
            ResponseState::AskPermission(_) => "ask_permission",
            ResponseState::Greet { .. } => "greet",
            ResponseState::PermissionAccepted => "permission_accepted",
            ResponseState::PermissionCardSent => "permission_card_sent",
            ResponseState::PermissionRequired => "permission_required",
            ResponseState::TimerStarted { .. } => "timer_started",
            ResponseState::TimerFailed { .. } => "timer_failed",
            ResponseState::Help => "help",
            ResponseState::Exit => "exit",
            ResponseState::Fallback => "fallback",
            ResponseState::Unhandled => "unhandled",
            ResponseState::SessionEnded => "session_ended",
            ResponseState::ErrorRecoverable => "error_recoverable",
            ResponseState::ErrorUnrecoverable => "error_unrecoverable",
        }
    }
}
