//! Form flows: explicit state machines the UI layer renders and drives
//!
//! A flow owns its draft exclusively; the UI only dispatches intents (edit a
//! field, submit) and renders the current state. Navigation is a trait seam
//! so tests can observe it.

pub mod create;
pub mod navigator;

pub use create::{CreateCarForm, FormState, SubmitOutcome};
pub use navigator::{Navigator, TracingNavigator};
