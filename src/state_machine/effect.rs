//! Effects produced by state transitions

use super::state::Diagnosis;

/// Effects to be executed by the runtime, in order
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Remember what the user asked for, for error recovery
    RecordDiagnosis(Diagnosis),

    /// Create the platform timer; the runtime answers with `TimerLaunched`
    LaunchTimer { noodle: String, softness: String },
}

impl Effect {
    pub fn launch_timer(noodle: &str, softness: &str) -> Self {
        Effect::LaunchTimer {
            noodle: noodle.to_string(),
            softness: softness.to_string(),
        }
    }
}
