//! Rule sets: named per-field constraints over a JSON payload

use super::validators::{integer, non_empty_string, optional};
use crate::core::error::FieldViolation;
use serde_json::Value;

type FieldCheck = Box<dyn Fn(&str, &Value) -> Result<(), String> + Send + Sync>;

/// A declarative, static set of per-field constraints.
///
/// Rules are evaluated independently, synchronously, and without state, so
/// validating the same payload twice always yields the same result. Each
/// invalid field contributes exactly one message (the first failing check).
pub struct RuleSet {
    rules: Vec<(&'static str, FieldCheck)>,
}

impl RuleSet {
    pub fn new() -> Self {
        Self { rules: Vec::new() }
    }

    /// Add a constraint for a field
    pub fn field(
        mut self,
        field: &'static str,
        check: impl Fn(&str, &Value) -> Result<(), String> + Send + Sync + 'static,
    ) -> Self {
        self.rules.push((field, Box::new(check)));
        self
    }

    /// Validate a payload against every rule.
    ///
    /// A field absent from the payload is checked as `null`. Returns all
    /// violations at once so the form can render them inline together.
    pub fn validate(&self, payload: &Value) -> Result<(), Vec<FieldViolation>> {
        let mut violations: Vec<FieldViolation> = Vec::new();

        for (field, check) in &self.rules {
            if violations.iter().any(|v| v.field == *field) {
                continue;
            }
            let value = payload.get(field).unwrap_or(&Value::Null);
            if let Err(message) = check(field, value) {
                violations.push(FieldViolation::new(*field, message));
            }
        }

        if violations.is_empty() {
            Ok(())
        } else {
            Err(violations)
        }
    }

    /// Field names covered by this rule set, in declaration order
    pub fn fields(&self) -> Vec<&'static str> {
        let mut fields: Vec<&'static str> = Vec::new();
        for (field, _) in &self.rules {
            if !fields.contains(field) {
                fields.push(field);
            }
        }
        fields
    }
}

impl Default for RuleSet {
    fn default() -> Self {
        Self::new()
    }
}

/// The rule set gating car submission.
///
/// `organization_id` is deliberately unconstrained: the reference is nullable
/// and its existence is the backend's to enforce.
pub fn car_rules() -> RuleSet {
    RuleSet::new()
        .field("specification", non_empty_string())
        .field("make_year", integer())
        .field("model", non_empty_string())
        .field("engine", non_empty_string())
        .field("organization_id", optional())
}
