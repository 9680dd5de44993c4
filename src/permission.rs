//! Timer permission gate
//!
//! The platform only lets a skill create timers after the user granted the
//! timer scope. Token validity is the platform's business; presence is all
//! that is checked here.

use crate::alexa::{ConsentRequestPayload, Directive};

/// Permission scope for reading and writing skill timers
pub const TIMERS_PERMISSION: &str = "alexa::alerts:timers:skill:readwrite";

/// Name of the platform task that shows the consent prompt
pub const ASK_FOR: &str = "AskFor";

/// Whether the current turn may use the timer API
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConsentState {
    Granted,
    Ungranted,
}

impl ConsentState {
    pub fn from_token(consent_token: Option<&str>) -> Self {
        match consent_token {
            Some(token) if !token.is_empty() => ConsentState::Granted,
            _ => ConsentState::Ungranted,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Gate {
    Proceed,
    /// Ask the user for the timer scope with this directive
    RequestConsent(Directive),
}

/// Check the consent token carried by the request context
pub fn check(consent_token: Option<&str>) -> Gate {
    match ConsentState::from_token(consent_token) {
        ConsentState::Granted => Gate::Proceed,
        ConsentState::Ungranted => Gate::RequestConsent(consent_directive()),
    }
}

/// `Connections.SendRequest` asking for the timer scope
pub fn consent_directive() -> Directive {
    Directive::SendRequest {
        name: ASK_FOR.to_string(),
        payload: ConsentRequestPayload {
            kind: "AskForPermissionsConsentRequest".to_string(),
            version: "1".to_string(),
            permission_scope: TIMERS_PERMISSION.to_string(),
        },
        token: String::new(),
    }
}

/// User's answer to the consent prompt
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConsentAnswer {
    Accepted,
    Denied,
    NotAnswered,
}

impl ConsentAnswer {
    /// Unrecognized statuses count as no answer
    pub fn parse(status: &str) -> Self {
        match status {
            "ACCEPTED" => ConsentAnswer::Accepted,
            "DENIED" => ConsentAnswer::Denied,
            _ => ConsentAnswer::NotAnswered,
        }
    }
}

/// What to tell the user after the consent prompt
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConsentOutcome {
    Accepted,
    /// A permission card went to the companion app
    CardSent,
    Denied,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConsentReply {
    pub outcome: ConsentOutcome,
    /// Status 400: the timer permission is not declared in the skill manifest
    pub manifest_missing: bool,
}

/// Interpret the `Connections.Response` callback.
///
/// Acceptance wins over a thrown card; for a denial or no answer the card
/// message wins over the plain denial.
pub fn interpret_consent_response(
    status_code: &str,
    payload_status: &str,
    card_thrown: bool,
) -> ConsentReply {
    let outcome = match (ConsentAnswer::parse(payload_status), card_thrown) {
        (ConsentAnswer::Accepted, _) => ConsentOutcome::Accepted,
        (ConsentAnswer::Denied | ConsentAnswer::NotAnswered, true) => ConsentOutcome::CardSent,
        (ConsentAnswer::Denied | ConsentAnswer::NotAnswered, false) => ConsentOutcome::Denied,
    };
    ConsentReply {
        outcome,
        manifest_missing: status_code.trim() == "400",
    }
}
