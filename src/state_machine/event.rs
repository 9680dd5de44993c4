//! Events that drive a turn

use crate::alexa::{synonym_value, Request};
use crate::permission::{interpret_consent_response, ConsentReply, ASK_FOR};
use crate::timer::TimerOutcome;

pub const SET_NOODLE_TIMER_INTENT: &str = "SetNoodleTimerIntent";
pub const HELP_INTENT: &str = "AMAZON.HelpIntent";
pub const CANCEL_INTENT: &str = "AMAZON.CancelIntent";
pub const STOP_INTENT: &str = "AMAZON.StopIntent";
pub const FALLBACK_INTENT: &str = "AMAZON.FallbackIntent";

/// Events that trigger state transitions
#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    // Platform requests
    Launch,
    ConsentAnswered(ConsentReply),
    SetTimer {
        noodle: String,
        /// Minutes slot if spoken, otherwise the softness slot
        softness: String,
    },
    Help,
    Exit,
    Fallback,
    Unhandled,
    SessionEnded {
        reason: Option<String>,
    },

    // Effect results
    TimerLaunched(TimerOutcome),

    /// Anything that went wrong while handling the turn
    Failure {
        message: String,
    },
}

impl Event {
    /// Classify an incoming request
    pub fn from_request(request: &Request) -> Self {
        match request {
            Request::LaunchRequest { .. } => Event::Launch,
            Request::ConnectionsResponse {
                name,
                status,
                payload,
                ..
            } if name == ASK_FOR => Event::ConsentAnswered(interpret_consent_response(
                &status.code,
                &payload.status,
                payload.is_card_thrown,
            )),
            Request::IntentRequest { intent, .. } => match intent.name.as_str() {
                SET_NOODLE_TIMER_INTENT => {
                    let noodle = synonym_value(intent, "noodle");
                    let minutes = synonym_value(intent, "minutes");
                    let softness = if minutes.is_empty() {
                        synonym_value(intent, "softy")
                    } else {
                        minutes
                    };
                    Event::SetTimer { noodle, softness }
                }
                HELP_INTENT => Event::Help,
                CANCEL_INTENT | STOP_INTENT => Event::Exit,
                FALLBACK_INTENT => Event::Fallback,
                _ => Event::Unhandled,
            },
            Request::SessionEndedRequest { reason, .. } => Event::SessionEnded {
                reason: reason.clone(),
            },
            Request::ConnectionsResponse { .. } | Request::Other => Event::Unhandled,
        }
    }
}
