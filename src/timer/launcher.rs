//! Single-shot timer launch
//!
//! One create-timer call per turn. By the time the user speaks the hot water
//! is already poured, so a failed launch is reported, never retried.

use super::{
    resolve, ApiAccess, DurationError, Minutes, Softness, TimerRequest, TimerService, TimerStatus,
};
use crate::state_machine::state::SessionAttributes;
use serde::{Deserialize, Serialize};

/// Outcome of the last launch attempt, kept in session attributes
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimerRecord {
    /// Absent when the API never answered
    pub id: Option<String>,
    pub noodle: String,
    /// Raw softness-or-minutes slot value
    pub softness: String,
    pub status: RecordStatus,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RecordStatus {
    On,
    Error,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum FailureReason {
    TimerDidNotStart,
}

/// Normalized result of a launch
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TimerOutcome {
    Started(TimerRecord),
    Failed {
        noodle: String,
        reason: FailureReason,
        /// HTTP status of a rejected call, if any
        status_code: Option<u16>,
    },
}

impl TimerRecord {
    /// Softness as spoken back to the user ("5分", "かため", ...)
    pub fn softness_display(&self) -> String {
        Softness::parse(&self.softness).map_or_else(|_| self.softness.clone(), |s| s.display())
    }
}

/// Resolve the duration, create the timer and record the attempt in `session`.
///
/// Resolution errors return before any call is made. Every API failure folds
/// into [`TimerOutcome::Failed`].
pub async fn launch<T: TimerService + ?Sized>(
    service: &T,
    access: &ApiAccess,
    session: &mut SessionAttributes,
    noodle: &str,
    softness_or_minutes: &str,
) -> Result<TimerOutcome, DurationError> {
    let duration = resolve(noodle, softness_or_minutes)?;
    let request = TimerRequest::for_noodle(noodle, duration);

    let (id, status, status_code) = match service.create_timer(access, &request).await {
        Ok(response) if response.status == TimerStatus::On => {
            tracing::info!(
                timer_id = %response.id,
                duration = %request.duration,
                trigger_time = ?response.trigger_time,
                "Timer started"
            );
            check_reported_duration(duration, response.duration.as_deref());
            (Some(response.id), RecordStatus::On, None)
        }
        Ok(response) => {
            tracing::warn!(
                timer_id = %response.id,
                status = ?response.status,
                "Timer created but not running"
            );
            (Some(response.id), RecordStatus::Error, None)
        }
        Err(e) => {
            tracing::error!(
                error = %e,
                kind = ?e.kind,
                status_code = ?e.status_code,
                "Timer creation failed"
            );
            (None, RecordStatus::Error, e.status_code)
        }
    };

    let record = TimerRecord {
        id,
        noodle: noodle.to_string(),
        softness: softness_or_minutes.to_string(),
        status,
    };
    session.last_timer = Some(record.clone());

    Ok(match status {
        RecordStatus::On => TimerOutcome::Started(record),
        RecordStatus::Error => TimerOutcome::Failed {
            noodle: record.noodle,
            reason: FailureReason::TimerDidNotStart,
            status_code,
        },
    })
}

/// The API echoes the duration it scheduled; a disagreement is only logged
/// since the timer is already running.
fn check_reported_duration(requested: Minutes, reported: Option<&str>) {
    let Some(reported) = reported else {
        return;
    };
    match Minutes::parse_iso8601(reported) {
        Ok(minutes) if minutes == requested => {}
        Ok(minutes) => tracing::warn!(
            requested = requested.get(),
            reported = minutes.get(),
            "Timer API reported a different duration"
        ),
        Err(e) => tracing::warn!(error = %e, "Timer API reported an unreadable duration"),
    }
}
