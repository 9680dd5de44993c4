//! Voice platform wire format
//!
//! Serde models of the skill request and response envelopes, plus slot
//! extraction helpers.

pub mod request;
pub mod response;
pub mod slots;

pub use request::{Request, RequestEnvelope};
pub use response::{ConsentRequestPayload, Directive, ResponseEnvelope};
pub use slots::synonym_value;
