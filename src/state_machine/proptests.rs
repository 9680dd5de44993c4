//! Property-based tests for the state machine
//!
//! These tests verify key invariants hold across all possible inputs.

use super::event::SET_NOODLE_TIMER_INTENT;
use super::*;
use crate::permission::interpret_consent_response;
use crate::timer::{ApiAccess, FailureReason, RecordStatus, TimerOutcome, TimerRecord};
use proptest::prelude::*;

// ============================================================================
// Arbitrary Generators
// ============================================================================

fn arb_diagnosis() -> impl Strategy<Value = Option<Diagnosis>> {
    proptest::option::of(("\\PC{0,8}", "[0-9a-z]{0,4}").prop_map(|(noodle, softness)| Diagnosis {
        intent: SET_NOODLE_TIMER_INTENT.to_string(),
        noodle,
        softness,
    }))
}

fn arb_context() -> impl Strategy<Value = TurnContext> {
    (
        proptest::option::of("[A-Za-z0-9|]{0,16}"),
        any::<bool>(),
        arb_diagnosis(),
    )
        .prop_map(|(consent_token, visited, diagnosis)| TurnContext {
            user_id: "prop-user".to_string(),
            consent_token,
            visited,
            session: SessionAttributes {
                last_timer: None,
                diagnosis,
            },
            api: ApiAccess {
                endpoint: "https://api.fe.amazonalexa.com".to_string(),
                token: "access".to_string(),
            },
        })
}

fn arb_outcome() -> impl Strategy<Value = TimerOutcome> {
    prop_oneof![
        ("\\PC{0,8}", "[0-9]{1,3}").prop_map(|(noodle, softness)| {
            TimerOutcome::Started(TimerRecord {
                id: Some("timer".to_string()),
                noodle,
                softness,
                status: RecordStatus::On,
            })
        }),
        ("\\PC{0,8}", proptest::option::of(400u16..600)).prop_map(|(noodle, status_code)| {
            TimerOutcome::Failed {
                noodle,
                reason: FailureReason::TimerDidNotStart,
                status_code,
            }
        }),
    ]
}

/// Events the platform can deliver at turn start
fn arb_request_event() -> impl Strategy<Value = Event> {
    prop_oneof![
        Just(Event::Launch),
        (
            prop_oneof![Just("ACCEPTED"), Just("DENIED"), Just("NOT_ANSWERED"), Just("")],
            prop_oneof![Just("200"), Just("400")],
            any::<bool>()
        )
            .prop_map(|(status, code, card)| {
                Event::ConsentAnswered(interpret_consent_response(code, status, card))
            }),
        ("\\PC{0,8}", "\\PC{0,4}").prop_map(|(noodle, softness)| Event::SetTimer { noodle, softness }),
        Just(Event::Help),
        Just(Event::Exit),
        Just(Event::Fallback),
        Just(Event::Unhandled),
        proptest::option::of("[A-Z_]{1,16}").prop_map(|reason| Event::SessionEnded { reason }),
    ]
}

fn arb_failure() -> impl Strategy<Value = Event> {
    "\\PC{0,20}".prop_map(|message| Event::Failure { message })
}

// ============================================================================
// Properties
// ============================================================================

proptest! {
    /// Every request either finishes the turn or waits for exactly one timer launch
    #[test]
    fn request_events_finish_or_launch(context in arb_context(), event in arb_request_event()) {
        let is_set_timer = matches!(event, Event::SetTimer { .. });
        let result = transition(&TurnState::Received, &context, event).unwrap();

        if is_set_timer {
            let is_awaiting = matches!(result.new_state, TurnState::AwaitingTimer { .. });
            prop_assert!(is_awaiting);
            let launches = result
                .effects
                .iter()
                .filter(|e| matches!(e, Effect::LaunchTimer { .. }))
                .count();
            prop_assert_eq!(launches, 1);
        } else {
            prop_assert!(result.new_state.is_done());
            prop_assert!(result.effects.is_empty());
        }
    }

    /// A launched timer always finishes the turn with a timer response
    #[test]
    fn timer_outcome_finishes_turn(
        context in arb_context(),
        noodle in "\\PC{0,8}",
        outcome in arb_outcome(),
    ) {
        let started = matches!(outcome, TimerOutcome::Started(_));
        let state = TurnState::AwaitingTimer { noodle };
        let result = transition(&state, &context, Event::TimerLaunched(outcome)).unwrap();

        match result.new_state {
            TurnState::Done(ResponseState::TimerStarted { .. }) => prop_assert!(started),
            TurnState::Done(ResponseState::TimerFailed { .. }) => prop_assert!(!started),
            other => prop_assert!(false, "unexpected state {:?}", other),
        }
    }

    /// Failures always terminate, and the diagnosis alone picks the error response
    #[test]
    fn failure_always_renders(context in arb_context(), event in arb_failure(), awaiting in any::<bool>()) {
        let state = if awaiting {
            TurnState::AwaitingTimer { noodle: "ラ王".to_string() }
        } else {
            TurnState::Received
        };
        let result = transition(&state, &context, event).unwrap();

        let expected = if context.session.diagnosis.is_some() {
            ResponseState::ErrorRecoverable
        } else {
            ResponseState::ErrorUnrecoverable
        };
        prop_assert_eq!(result.new_state, TurnState::Done(expected));
    }

    /// Launch greets only with consent, and first visit mirrors the stored flag
    #[test]
    fn launch_respects_consent_and_visit(context in arb_context()) {
        let result = transition(&TurnState::Received, &context, Event::Launch).unwrap();
        let granted = context.consent_token.as_deref().is_some_and(|t| !t.is_empty());

        match result.new_state {
            TurnState::Done(ResponseState::Greet { first_visit }) => {
                prop_assert!(granted);
                prop_assert_eq!(first_visit, !context.visited);
            }
            TurnState::Done(ResponseState::AskPermission(_)) => prop_assert!(!granted),
            other => prop_assert!(false, "unexpected state {:?}", other),
        }
    }

    /// Transitions are deterministic
    #[test]
    fn transition_is_deterministic(context in arb_context(), event in arb_request_event()) {
        let first = transition(&TurnState::Received, &context, event.clone()).unwrap();
        let second = transition(&TurnState::Received, &context, event).unwrap();
        prop_assert_eq!(first.new_state, second.new_state);
        prop_assert_eq!(first.effects, second.effects);
    }

    /// A finished turn accepts nothing further
    #[test]
    fn done_is_terminal(context in arb_context(), event in arb_request_event()) {
        let result = transition(&TurnState::Done(ResponseState::Help), &context, event);
        prop_assert!(matches!(result, Err(TransitionError::TurnComplete)));
    }
}
