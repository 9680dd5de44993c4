//! Runtime for handling skill turns
//!
//! Each request is one turn: load the user's attributes, drive the pure
//! state machine to a response, execute its effects, persist, render.

mod executor;
pub mod traits;

#[cfg(test)]
pub mod testing;

pub use executor::SkillRuntime;
pub use traits::*;

use crate::timer::AlexaTimerClient;

/// Type alias for production runtime with concrete implementations
pub type ProductionRuntime = SkillRuntime<AlexaTimerClient, DatabaseStore>;
