//! Incoming request envelope

use serde::Deserialize;
use serde_json::Value;
use std::collections::HashMap;

/// Top-level body the platform posts for every turn
#[derive(Debug, Clone, Deserialize)]
pub struct RequestEnvelope {
    #[serde(default)]
    pub session: Option<Session>,
    pub context: Context,
    pub request: Request,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Session {
    #[serde(default)]
    pub session_id: String,
    #[serde(default)]
    pub application: Option<Application>,
    /// Attributes echoed back from the previous response of this session
    #[serde(default)]
    pub attributes: Value,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Application {
    pub application_id: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Context {
    #[serde(rename = "System")]
    pub system: SystemContext,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SystemContext {
    #[serde(default)]
    pub application: Option<Application>,
    pub user: User,
    #[serde(default)]
    pub api_endpoint: String,
    #[serde(default)]
    pub api_access_token: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub user_id: String,
    #[serde(default)]
    pub permissions: Option<Permissions>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Permissions {
    #[serde(default)]
    pub consent_token: Option<String>,
}

/// The request proper, keyed by its `type`
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "type")]
pub enum Request {
    #[serde(rename_all = "camelCase")]
    LaunchRequest {
        #[serde(default)]
        request_id: String,
    },
    #[serde(rename_all = "camelCase")]
    IntentRequest {
        #[serde(default)]
        request_id: String,
        intent: Intent,
    },
    #[serde(rename_all = "camelCase")]
    SessionEndedRequest {
        #[serde(default)]
        request_id: String,
        #[serde(default)]
        reason: Option<String>,
    },
    /// Callback after the user answered a permission prompt
    #[serde(rename = "Connections.Response", rename_all = "camelCase")]
    ConnectionsResponse {
        #[serde(default)]
        request_id: String,
        name: String,
        status: ConnectionsStatus,
        #[serde(default)]
        payload: ConsentPayload,
    },
    #[serde(other)]
    Other,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Intent {
    pub name: String,
    #[serde(default)]
    pub slots: HashMap<String, Slot>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Slot {
    #[serde(default)]
    pub value: Option<String>,
    #[serde(default)]
    pub resolutions: Option<Resolutions>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Resolutions {
    #[serde(default)]
    pub resolutions_per_authority: Vec<Authority>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Authority {
    /// Absent on `ER_SUCCESS_NO_MATCH`
    #[serde(default)]
    pub values: Vec<ResolvedValueWrapper>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ResolvedValueWrapper {
    pub value: ResolvedValue,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ResolvedValue {
    pub name: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ConnectionsStatus {
    /// HTTP-style status as a string, e.g. `"200"`
    pub code: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConsentPayload {
    /// `ACCEPTED`, `DENIED` or `NOT_ANSWERED`
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub is_card_thrown: bool,
}

impl RequestEnvelope {
    pub fn user_id(&self) -> &str {
        &self.context.system.user.user_id
    }

    /// Consent token for the timer scope, if the user granted it
    pub fn consent_token(&self) -> Option<&str> {
        self.context
            .system
            .user
            .permissions
            .as_ref()
            .and_then(|p| p.consent_token.as_deref())
    }

    pub fn application_id(&self) -> Option<&str> {
        self.context
            .system
            .application
            .as_ref()
            .or_else(|| self.session.as_ref().and_then(|s| s.application.as_ref()))
            .map(|a| a.application_id.as_str())
    }

    /// Platform session id, empty outside a session
    pub fn session_id(&self) -> &str {
        self.session.as_ref().map_or("", |s| s.session_id.as_str())
    }

    /// Session attributes, `Null` outside a session
    pub fn session_attributes(&self) -> &Value {
        self.session.as_ref().map_or(&Value::Null, |s| &s.attributes)
    }

    pub fn request_id(&self) -> &str {
        match &self.request {
            Request::LaunchRequest { request_id }
            | Request::IntentRequest { request_id, .. }
            | Request::SessionEndedRequest { request_id, .. }
            | Request::ConnectionsResponse { request_id, .. } => request_id,
            Request::Other => "",
        }
    }
}
