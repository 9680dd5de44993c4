//! Outgoing response envelope

use serde::Serialize;
use serde_json::Value;

/// Body returned to the platform for every turn
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResponseEnvelope {
    pub version: String,
    #[serde(skip_serializing_if = "Value::is_null")]
    pub session_attributes: Value,
    pub response: ResponseBody,
}

#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResponseBody {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub output_speech: Option<OutputSpeech>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reprompt: Option<Reprompt>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub should_end_session: Option<bool>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub directives: Vec<Directive>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "UPPERCASE")]
pub enum OutputSpeech {
    Ssml { ssml: String },
}

impl OutputSpeech {
    pub fn ssml(text: &str) -> Self {
        OutputSpeech::Ssml {
            ssml: format!("<speak>{}</speak>", escape_ssml(text)),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Reprompt {
    pub output_speech: OutputSpeech,
}

/// Platform directives this skill emits
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type")]
pub enum Directive {
    /// Hands the conversation to the platform's permission prompt
    #[serde(rename = "Connections.SendRequest")]
    SendRequest {
        name: String,
        payload: ConsentRequestPayload,
        token: String,
    },
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ConsentRequestPayload {
    #[serde(rename = "@type")]
    pub kind: String,
    #[serde(rename = "@version")]
    pub version: String,
    #[serde(rename = "permissionScope")]
    pub permission_scope: String,
}

impl ResponseEnvelope {
    fn new(session_attributes: Value, response: ResponseBody) -> Self {
        Self {
            version: "1.0".to_string(),
            session_attributes,
            response,
        }
    }

    /// Spoken reply; an empty reprompt is left out
    pub fn speech(
        speak: &str,
        reprompt: &str,
        should_end_session: Option<bool>,
        session_attributes: Value,
    ) -> Self {
        let reprompt = (!reprompt.is_empty()).then(|| Reprompt {
            output_speech: OutputSpeech::ssml(reprompt),
        });
        Self::new(
            session_attributes,
            ResponseBody {
                output_speech: Some(OutputSpeech::ssml(speak)),
                reprompt,
                should_end_session,
                directives: Vec::new(),
            },
        )
    }

    /// Directive-only reply; carries no speech fields
    pub fn directive(directive: Directive, session_attributes: Value) -> Self {
        Self::new(
            session_attributes,
            ResponseBody {
                directives: vec![directive],
                ..ResponseBody::default()
            },
        )
    }

    pub fn empty(session_attributes: Value) -> Self {
        Self::new(session_attributes, ResponseBody::default())
    }
}

fn escape_ssml(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}
