//! Skill turn executor

use super::traits::AttributeStore;

use crate::alexa::{RequestEnvelope, ResponseEnvelope};
use crate::speech::render;
use crate::state_machine::{
    transition, Effect, Event, ResponseState, SessionAttributes, TurnContext, TurnState,
};
use crate::timer::{launch, ApiAccess, TimerService};
use std::sync::Arc;
use tracing::Instrument;

/// Generic skill runtime that can work with any timer API and attribute storage
pub struct SkillRuntime<T, A>
where
    T: TimerService + 'static,
    A: AttributeStore + 'static,
{
    timer_service: Arc<T>,
    attributes: Arc<A>,
}

impl<T, A> SkillRuntime<T, A>
where
    T: TimerService + 'static,
    A: AttributeStore + 'static,
{
    pub fn new(timer_service: T, attributes: A) -> Self {
        Self {
            timer_service: Arc::new(timer_service),
            attributes: Arc::new(attributes),
        }
    }

    /// Handle one request. Always produces a response; failures inside the
    /// turn become error speech.
    pub async fn handle(&self, envelope: &RequestEnvelope) -> ResponseEnvelope {
        let turn_id = uuid::Uuid::new_v4().to_string();
        let span = tracing::info_span!(
            "turn",
            turn_id = %turn_id,
            request_id = %envelope.request_id(),
            session_id = %envelope.session_id(),
        );
        self.run_turn(envelope).instrument(span).await
    }

    async fn run_turn(&self, envelope: &RequestEnvelope) -> ResponseEnvelope {
        let user_id = envelope.user_id();

        let mut persistent = match self.attributes.load(user_id).await {
            Ok(attributes) => attributes,
            Err(e) => {
                tracing::warn!(error = %e, "Failed to load attributes, treating user as new");
                Default::default()
            }
        };

        let mut context = TurnContext {
            user_id: user_id.to_string(),
            consent_token: envelope.consent_token().map(String::from),
            visited: persistent.has_visited(),
            session: SessionAttributes::from_value(envelope.session_attributes()),
            api: ApiAccess {
                endpoint: envelope.context.system.api_endpoint.clone(),
                token: envelope.context.system.api_access_token.clone(),
            },
        };

        let event = Event::from_request(&envelope.request);
        if let Event::ConsentAnswered(reply) = &event {
            if reply.manifest_missing {
                tracing::warn!("Timer permission is not declared in the skill manifest");
            }
        }
        tracing::debug!(event = ?event, visited = context.visited, "Turn started");

        let response = self.drive(&mut context, event).await;
        tracing::info!(response = response.name(), "Turn finished");

        persistent.mark_visited();
        if let Err(e) = self.attributes.save(&context.user_id, &persistent).await {
            tracing::error!(error = %e, "Failed to save attributes");
        }

        render(&response).into_envelope(context.session.to_value())
    }

    /// Feed events through the state machine until it produces a response
    async fn drive(&self, context: &mut TurnContext, first: Event) -> ResponseState {
        let mut state = TurnState::Received;
        let mut event = first;

        // Process events in a loop - no recursion
        loop {
            let result = match transition(&state, context, event) {
                Ok(result) => result,
                Err(e) => {
                    tracing::error!(error = %e, "Transition failed");
                    event = Event::Failure {
                        message: e.to_string(),
                    };
                    continue;
                }
            };

            state = result.new_state;
            let mut next = None;
            for effect in result.effects {
                if let Some(follow_up) = self.execute_effect(context, effect).await {
                    next = Some(follow_up);
                }
            }

            if let Some(follow_up) = next {
                event = follow_up;
                continue;
            }
            if let TurnState::Done(response) = state {
                return response;
            }

            tracing::error!(state = ?state, "Turn stalled without a response");
            event = Event::Failure {
                message: format!("No response from {state:?}"),
            };
        }
    }

    /// Execute an effect, returning the event it feeds back, if any
    async fn execute_effect(&self, context: &mut TurnContext, effect: Effect) -> Option<Event> {
        match effect {
            Effect::RecordDiagnosis(diagnosis) => {
                context.session.diagnosis = Some(diagnosis);
                None
            }
            Effect::LaunchTimer { noodle, softness } => {
                let result = launch(
                    &*self.timer_service,
                    &context.api,
                    &mut context.session,
                    &noodle,
                    &softness,
                )
                .await;
                match result {
                    Ok(outcome) => Some(Event::TimerLaunched(outcome)),
                    Err(e) => {
                        tracing::warn!(
                            error = %e,
                            noodle = %noodle,
                            softness = %softness,
                            "Could not resolve timer duration"
                        );
                        Some(Event::Failure {
                            message: e.to_string(),
                        })
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::runtime::testing::{MockAttributeStore, MockTimerService};
    use crate::timer::{TimerError, TimerResponse, TimerStatus};
    use serde_json::{json, Value};

    const USER: &str = "amzn1.ask.account.test";

    fn envelope(request: Value, consent_token: Option<&str>, attributes: Value) -> RequestEnvelope {
        let permissions = match consent_token {
            Some(token) => json!({ "consentToken": token }),
            None => json!({}),
        };
        serde_json::from_value(json!({
            "version": "1.0",
            "session": {
                "new": attributes.is_null(),
                "sessionId": "amzn1.echo-api.session.test",
                "application": { "applicationId": "amzn1.ask.skill.test" },
                "attributes": attributes
            },
            "context": {
                "System": {
                    "application": { "applicationId": "amzn1.ask.skill.test" },
                    "user": { "userId": USER, "permissions": permissions },
                    "apiEndpoint": "https://api.fe.amazonalexa.com",
                    "apiAccessToken": "access-token"
                }
            },
            "request": request
        }))
        .unwrap()
    }

    fn launch_request() -> Value {
        json!({ "type": "LaunchRequest", "requestId": "req-launch" })
    }

    fn set_timer_request(noodle: &str, softy: &str) -> Value {
        json!({
            "type": "IntentRequest",
            "requestId": "req-intent",
            "intent": {
                "name": "SetNoodleTimerIntent",
                "slots": {
                    "noodle": { "name": "noodle", "value": noodle },
                    "softy": { "name": "softy", "value": softy }
                }
            }
        })
    }

    fn runtime(
        service: MockTimerService,
        store: MockAttributeStore,
    ) -> SkillRuntime<Arc<MockTimerService>, Arc<MockAttributeStore>> {
        SkillRuntime::new(Arc::new(service), Arc::new(store))
    }

    fn speech_text(response: &ResponseEnvelope) -> String {
        serde_json::to_value(response).unwrap()["response"]["outputSpeech"]["ssml"]
            .as_str()
            .unwrap_or_default()
            .to_string()
    }

    #[tokio::test]
    async fn test_first_and_returning_launch() {
        let store = Arc::new(MockAttributeStore::new());
        let runtime = SkillRuntime::new(Arc::new(MockTimerService::new()), store.clone());
        let request = envelope(launch_request(), Some("consent"), Value::Null);

        let first = speech_text(&runtime.handle(&request).await);
        assert!(first.contains("「固め」"));
        assert!(store.get(USER).unwrap().has_visited());

        let again = speech_text(&runtime.handle(&request).await);
        assert!(again.contains("今日はどんなカップ麺を食べますか"));
    }

    #[tokio::test]
    async fn test_returning_user_greeting() {
        let runtime = runtime(
            MockTimerService::new(),
            MockAttributeStore::new().with_visited(USER),
        );

        let text = speech_text(
            &runtime
                .handle(&envelope(launch_request(), Some("consent"), Value::Null))
                .await,
        );
        assert!(text.contains("今日はどんなカップ麺を食べますか"));
        assert!(!text.contains("「固め」"));
    }

    #[tokio::test]
    async fn test_launch_without_consent_sends_directive() {
        let runtime = runtime(MockTimerService::new(), MockAttributeStore::new());
        let response = runtime
            .handle(&envelope(launch_request(), None, Value::Null))
            .await;

        let value = serde_json::to_value(&response).unwrap();
        assert!(value["response"].get("outputSpeech").is_none());
        assert_eq!(
            value["response"]["directives"][0]["type"],
            "Connections.SendRequest"
        );
    }

    #[tokio::test]
    async fn test_set_timer_starts_timer() {
        let service = Arc::new(MockTimerService::new());
        service.queue_response(TimerResponse {
            id: "timer-1".to_string(),
            status: TimerStatus::On,
            duration: Some("PT4M".to_string()),
            trigger_time: None,
        });
        let runtime = SkillRuntime::new(service.clone(), Arc::new(MockAttributeStore::new()));

        let response = runtime
            .handle(&envelope(set_timer_request("どん兵衛", "かため"), Some("consent"), json!({})))
            .await;

        assert!(speech_text(&response).contains("どん兵衛 を かため ですね？"));
        let value = serde_json::to_value(&response).unwrap();
        assert_eq!(value["response"]["shouldEndSession"], true);
        assert_eq!(value["sessionAttributes"]["lastTimer"]["id"], "timer-1");
        assert_eq!(value["sessionAttributes"]["diagnosis"]["noodle"], "どん兵衛");

        let requests = service.recorded_requests();
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].duration, "PT4M");
    }

    #[tokio::test]
    async fn test_transport_failure_reports_timer_failed() {
        let service = Arc::new(MockTimerService::new());
        service.queue_error(TimerError::server_error("unavailable").with_status(503));
        let runtime = SkillRuntime::new(service.clone(), Arc::new(MockAttributeStore::new()));

        let response = runtime
            .handle(&envelope(set_timer_request("ラ王", ""), Some("consent"), json!({})))
            .await;

        assert!(speech_text(&response).contains("ラ王 の タイマー を開始できませんでした"));
        let value = serde_json::to_value(&response).unwrap();
        assert_eq!(value["sessionAttributes"]["lastTimer"]["status"], "ERROR");
        assert_eq!(service.recorded_requests().len(), 1);
    }

    #[tokio::test]
    async fn test_unknown_noodle_is_recoverable_error() {
        let service = Arc::new(MockTimerService::new());
        let runtime = SkillRuntime::new(service.clone(), Arc::new(MockAttributeStore::new()));

        let response = runtime
            .handle(&envelope(set_timer_request("カップヌードル", ""), Some("consent"), json!({})))
            .await;

        assert!(speech_text(&response).contains("今から食べるカップ麺の時間を教えてください"));
        let value = serde_json::to_value(&response).unwrap();
        assert_eq!(value["response"]["shouldEndSession"], false);
        assert!(service.recorded_requests().is_empty());
    }

    #[tokio::test]
    async fn test_consent_callback_with_missing_manifest() {
        let runtime = runtime(MockTimerService::new(), MockAttributeStore::new());
        let request = json!({
            "type": "Connections.Response",
            "requestId": "req-consent",
            "name": "AskFor",
            "status": { "code": "400", "message": "Bad Request" },
            "payload": { "status": "NOT_ANSWERED", "isCardThrown": false }
        });

        let response = runtime.handle(&envelope(request, None, Value::Null)).await;
        assert!(speech_text(&response).contains("タイマーがないと"));
    }

    #[tokio::test]
    async fn test_session_ended_is_silent() {
        let runtime = runtime(MockTimerService::new(), MockAttributeStore::new());
        let request = json!({
            "type": "SessionEndedRequest",
            "requestId": "req-end",
            "reason": "USER_INITIATED"
        });

        let response = runtime.handle(&envelope(request, Some("consent"), json!({}))).await;
        let value = serde_json::to_value(&response).unwrap();
        assert_eq!(value["response"], json!({}));
    }

    #[tokio::test]
    async fn test_store_failure_does_not_fail_turn() {
        let runtime = runtime(MockTimerService::new(), MockAttributeStore::failing());
        let response = runtime
            .handle(&envelope(launch_request(), Some("consent"), Value::Null))
            .await;

        // Falls back to a first-visit greeting
        assert!(speech_text(&response).contains("「固め」"));
    }
}
