//! Pure state transition function
//!
//! Given the same state, context and event, `transition` always produces the
//! same result and performs no I/O. Timer creation is requested as an effect
//! and its outcome comes back as `Event::TimerLaunched`.

use super::event::SET_NOODLE_TIMER_INTENT;
use super::{Diagnosis, Effect, Event, ResponseState, TurnContext, TurnState};
use crate::permission::{self, ConsentOutcome, Gate};
use crate::timer::{noodle_display, TimerOutcome};
use thiserror::Error;

/// Result of a state transition
#[derive(Debug)]
pub struct TransitionResult {
    pub new_state: TurnState,
    pub effects: Vec<Effect>,
}

impl TransitionResult {
    pub fn new(state: TurnState) -> Self {
        Self {
            new_state: state,
            effects: vec![],
        }
    }

    pub fn done(response: ResponseState) -> Self {
        Self::new(TurnState::Done(response))
    }

    pub fn with_effect(mut self, effect: Effect) -> Self {
        self.effects.push(effect);
        self
    }
}

/// Errors that can occur during transition
#[derive(Debug, Error)]
pub enum TransitionError {
    #[error("Turn already produced its response")]
    TurnComplete,
    #[error("Invalid transition: {0}")]
    InvalidTransition(String),
}

pub fn transition(
    state: &TurnState,
    context: &TurnContext,
    event: Event,
) -> Result<TransitionResult, TransitionError> {
    match (state, event) {
        (TurnState::Done(_), _) => Err(TransitionError::TurnComplete),

        // ============================================================
        // Errors: recoverable when the session says what the user wanted
        // ============================================================
        (_, Event::Failure { .. }) => {
            if context.session.diagnosis.is_some() {
                Ok(TransitionResult::done(ResponseState::ErrorRecoverable))
            } else {
                Ok(TransitionResult::done(ResponseState::ErrorUnrecoverable))
            }
        }

        // ============================================================
        // Launch and permission
        // ============================================================
        (TurnState::Received, Event::Launch) => match permission::check(context.consent_token.as_deref()) {
            Gate::RequestConsent(directive) => {
                Ok(TransitionResult::done(ResponseState::AskPermission(directive)))
            }
            Gate::Proceed => Ok(TransitionResult::done(ResponseState::Greet {
                first_visit: !context.visited,
            })),
        },

        (TurnState::Received, Event::ConsentAnswered(reply)) => {
            let response = match reply.outcome {
                ConsentOutcome::Accepted => ResponseState::PermissionAccepted,
                ConsentOutcome::CardSent => ResponseState::PermissionCardSent,
                ConsentOutcome::Denied => ResponseState::PermissionRequired,
            };
            Ok(TransitionResult::done(response))
        }

        // ============================================================
        // Timer
        // ============================================================
        (TurnState::Received, Event::SetTimer { noodle, softness }) => {
            let diagnosis = Diagnosis {
                intent: SET_NOODLE_TIMER_INTENT.to_string(),
                noodle: noodle.clone(),
                softness: softness.clone(),
            };
            Ok(TransitionResult::new(TurnState::AwaitingTimer {
                noodle: noodle.clone(),
            })
            .with_effect(Effect::RecordDiagnosis(diagnosis))
            .with_effect(Effect::launch_timer(&noodle, &softness)))
        }

        (TurnState::AwaitingTimer { noodle }, Event::TimerLaunched(outcome)) => {
            let response = match outcome {
                TimerOutcome::Started(record) => ResponseState::TimerStarted {
                    noodle: noodle_display(&record.noodle).to_string(),
                    softness_display: record.softness_display(),
                },
                TimerOutcome::Failed { .. } => ResponseState::TimerFailed {
                    noodle: noodle_display(noodle).to_string(),
                },
            };
            Ok(TransitionResult::done(response))
        }

        // ============================================================
        // Canned responses
        // ============================================================
        (TurnState::Received, Event::Help) => Ok(TransitionResult::done(ResponseState::Help)),
        (TurnState::Received, Event::Exit) => Ok(TransitionResult::done(ResponseState::Exit)),
        (TurnState::Received, Event::Fallback) => Ok(TransitionResult::done(ResponseState::Fallback)),
        (TurnState::Received, Event::Unhandled) => {
            Ok(TransitionResult::done(ResponseState::Unhandled))
        }
        (TurnState::Received, Event::SessionEnded { .. }) => {
            Ok(TransitionResult::done(ResponseState::SessionEnded))
        }

        // ============================================================
        // Invalid Transitions
        // ============================================================
        (state, event) => Err(TransitionError::InvalidTransition(format!(
            "No transition from {state:?} with event {event:?}"
        ))),
    }
}
