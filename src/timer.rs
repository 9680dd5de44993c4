//! Noodle timer: duration resolution, timer API payloads and launching
//!
//! Provides the pieces needed to turn slot values into a running platform timer.

mod client;
pub mod duration;
mod error;
pub mod launcher;
mod request;

pub use client::AlexaTimerClient;
#[allow(unused_imports)] // Public API re-exports
pub use duration::{resolve, DurationError, Firmness, Minutes, NoodleKind, Softness};
#[allow(unused_imports)] // Public API re-exports
pub use error::{TimerError, TimerErrorKind};
pub use launcher::{launch, TimerOutcome, TimerRecord};
#[allow(unused_imports)] // Public API re-exports
pub use launcher::{FailureReason, RecordStatus};
pub use request::{TimerRequest, TimerResponse, TimerStatus};

use async_trait::async_trait;

/// Locale used for announcements and speech
pub const LOCALE: &str = "ja-JP";

/// Display name used when the user gave minutes without naming a noodle
pub const DEFAULT_NOODLE_DISPLAY: &str = "カップ麺";

/// Name to use in labels and speech for a (possibly empty) noodle slot
pub fn noodle_display(noodle: &str) -> &str {
    if noodle.is_empty() {
        DEFAULT_NOODLE_DISPLAY
    } else {
        noodle
    }
}

/// Credentials for calling platform APIs on behalf of the current user
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiAccess {
    /// Region-specific API base, e.g. `https://api.fe.amazonalexa.com`
    pub endpoint: String,
    pub token: String,
}

/// Client for the platform timer API
#[async_trait]
pub trait TimerService: Send + Sync {
    /// Create one timer; never retried by callers
    async fn create_timer(
        &self,
        access: &ApiAccess,
        request: &TimerRequest,
    ) -> Result<TimerResponse, TimerError>;
}
