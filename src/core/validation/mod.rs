//! Declarative validation for record payloads
//!
//! Constraints are reusable closures over `serde_json::Value`, composed into
//! a static [`RuleSet`]. The same rule set gates the create form locally and
//! the REST handler server-side, so both sides reject the same payloads with
//! the same per-field messages.

pub mod rules;
pub mod validators;

pub use rules::{RuleSet, car_rules};
