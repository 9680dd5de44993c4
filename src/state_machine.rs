//! Conversation state machine
//!
//! Implements the Elm Architecture pattern with pure state transitions: each
//! turn starts in `Received` and ends in exactly one `ResponseState`.

mod effect;
pub mod event;
pub mod state;
pub(crate) mod transition;

#[cfg(test)]
mod proptests;

pub use effect::Effect;
pub use event::Event;
pub use state::{Diagnosis, ResponseState, SessionAttributes, TurnContext, TurnState};
pub use transition::transition;
#[allow(unused_imports)] // Public API re-exports
pub use transition::{TransitionError, TransitionResult};
