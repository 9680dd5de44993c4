//! Wire types for the platform timer API

use super::duration::Minutes;
use super::{noodle_display, LOCALE};
use serde::{Deserialize, Serialize};

/// Body of a create-timer call
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TimerRequest {
    /// ISO-8601 duration, `PT<N>M`
    pub duration: String,
    pub timer_label: String,
    pub creation_behavior: CreationBehavior,
    pub triggering_behavior: TriggeringBehavior,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreationBehavior {
    pub display_experience: DisplayExperience,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DisplayExperience {
    pub visibility: Visibility,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Visibility {
    Visible,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TriggeringBehavior {
    pub operation: Operation,
    pub notification_config: NotificationConfig,
}

/// What happens when the timer goes off
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Operation {
    #[serde(rename_all = "camelCase")]
    Announce { text_to_announce: Vec<LocalizedText> },
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LocalizedText {
    pub locale: String,
    pub text: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NotificationConfig {
    pub play_audible: bool,
}

impl TimerRequest {
    /// Visible, announcing timer for one cup of noodles
    pub fn for_noodle(noodle: &str, duration: Minutes) -> Self {
        let name = noodle_display(noodle);
        Self {
            duration: duration.to_iso8601(),
            timer_label: format!("{name} ができるまであと..."),
            creation_behavior: CreationBehavior {
                display_experience: DisplayExperience {
                    visibility: Visibility::Visible,
                },
            },
            triggering_behavior: TriggeringBehavior {
                operation: Operation::Announce {
                    text_to_announce: vec![LocalizedText {
                        locale: LOCALE.to_string(),
                        text: format!("{name} ができました。冷めないうちにどうぞ！"),
                    }],
                },
                // Audible even after the user has left the skill
                notification_config: NotificationConfig { play_audible: true },
            },
        }
    }
}

/// Timer state as reported by the API
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TimerStatus {
    On,
    Paused,
    Off,
    #[serde(other)]
    Unknown,
}

/// Create-timer response; fields the skill does not use are ignored
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimerResponse {
    pub id: String,
    pub status: TimerStatus,
    #[serde(default)]
    pub duration: Option<String>,
    #[serde(default)]
    pub trigger_time: Option<String>,
}
