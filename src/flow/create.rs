//! Create-car form flow
//!
//! The controller is an explicit state machine:
//!
//! ```text
//! Editing --submit, rules pass--> Submitting --resolve--> (reset + navigate)
//!    ^                                |
//!    |                                +--reject--> Failed
//!    +--------next submit attempt-----------------+
//! ```
//!
//! Field errors from the rule set keep the form in Editing and never reach
//! the network. A remote rejection lands in Failed: the draft is preserved,
//! the error is displayed until the next submit attempt, and the fields stay
//! editable. Success resets the draft to its initial shape (the seeded
//! organization included) and requests exactly one navigation to the
//! listing route.

use crate::client::CarsApi;
use crate::core::auth::{AccessOperation, AccessRequirement, AccessService, AuthContext};
use crate::core::error::{AuthError, FieldViolation, SubmissionError};
use crate::core::record::{Car, CarDraft, Record};
use crate::core::validation::{RuleSet, car_rules};
use crate::flow::navigator::Navigator;

/// Grant required before the create page may exist
pub const CREATE_CAR_REQUIREMENT: AccessRequirement =
    AccessRequirement::new(AccessService::Project, "car", AccessOperation::Create);

/// Observable state of the form
#[derive(Debug, Clone, PartialEq)]
pub enum FormState {
    /// Draft fields mutable; submit available
    Editing,

    /// Create request in flight; draft frozen; submit disabled
    Submitting,

    /// Last create request rejected; error retained until the next attempt
    Failed(SubmissionError),
}

/// What a submit attempt did
#[derive(Debug, Clone, PartialEq)]
pub enum SubmitOutcome {
    /// The rule set rejected the draft; nothing was sent
    Invalid,

    /// The backend persisted the record; the flow reset and navigated
    Created(Car),

    /// The backend rejected the request; the error is on display
    Failed(SubmissionError),

    /// A request was already in flight; nothing happened
    InFlight,
}

/// Controller for the car create form.
///
/// Owns the draft exclusively. Constructing one is the page gate: it fails
/// fast when the context lacks the create grant.
pub struct CreateCarForm {
    initial: CarDraft,
    draft: CarDraft,
    state: FormState,
    field_errors: Vec<FieldViolation>,
    rules: RuleSet,
}

impl CreateCarForm {
    /// Build the controller for an authorized context.
    ///
    /// `organization_id` is the seed from the navigation context; it is kept
    /// in the initial shape so a post-success reset restores it.
    pub fn new(
        context: &AuthContext,
        organization_id: Option<String>,
    ) -> Result<Self, AuthError> {
        CREATE_CAR_REQUIREMENT.check(context)?;

        let initial = CarDraft::seeded(organization_id);
        Ok(Self {
            draft: initial.clone(),
            initial,
            state: FormState::Editing,
            field_errors: Vec::new(),
            rules: car_rules(),
        })
    }

    // === Accessors for the rendering layer ===

    pub fn draft(&self) -> &CarDraft {
        &self.draft
    }

    pub fn state(&self) -> &FormState {
        &self.state
    }

    /// Whether the submit control is enabled
    pub fn can_submit(&self) -> bool {
        !matches!(self.state, FormState::Submitting)
    }

    /// Inline violations from the last rejected submit attempt
    pub fn field_errors(&self) -> &[FieldViolation] {
        &self.field_errors
    }

    /// The inline message for one field, if it is currently invalid
    pub fn field_error(&self, field: &str) -> Option<&str> {
        self.field_errors
            .iter()
            .find(|v| v.field == field)
            .map(|v| v.message.as_str())
    }

    /// The page-level error from the last failed request, if any
    pub fn last_error(&self) -> Option<&SubmissionError> {
        match &self.state {
            FormState::Failed(error) => Some(error),
            _ => None,
        }
    }

    // === Edit intents ===
    //
    // Ignored while a request is in flight: the draft is frozen then.

    pub fn set_specification(&mut self, value: impl Into<String>) {
        if self.can_submit() {
            self.draft.specification = value.into();
        }
    }

    pub fn set_make_year(&mut self, value: Option<f64>) {
        if self.can_submit() {
            self.draft.make_year = value;
        }
    }

    pub fn set_model(&mut self, value: impl Into<String>) {
        if self.can_submit() {
            self.draft.model = value.into();
        }
    }

    pub fn set_engine(&mut self, value: impl Into<String>) {
        if self.can_submit() {
            self.draft.engine = value.into();
        }
    }

    pub fn set_organization(&mut self, value: Option<String>) {
        if self.can_submit() {
            self.draft.organization_id = value;
        }
    }

    // === Submit ===

    /// Run the full validate → create → navigate sequence once.
    ///
    /// At most one request is in flight per form instance; a submit while
    /// Submitting is a no-op. Every attempt first clears the errors left by
    /// the previous one.
    pub async fn submit(
        &mut self,
        cars: &dyn CarsApi,
        navigator: &dyn Navigator,
    ) -> SubmitOutcome {
        if !self.can_submit() {
            return SubmitOutcome::InFlight;
        }

        self.field_errors.clear();
        if matches!(self.state, FormState::Failed(_)) {
            self.state = FormState::Editing;
        }

        if let Err(violations) = self.rules.validate(&self.draft.to_payload()) {
            tracing::debug!(count = violations.len(), "draft rejected by rule set");
            self.field_errors = violations;
            return SubmitOutcome::Invalid;
        }

        self.state = FormState::Submitting;
        tracing::info!(
            resource = Car::resource_name_singular(),
            "submitting create request"
        );

        match cars.create(&self.draft).await {
            Ok(car) => {
                self.draft = self.initial.clone();
                self.state = FormState::Editing;
                navigator.navigate(&Car::collection_route());
                tracing::info!(id = ?car.id, "create succeeded");
                SubmitOutcome::Created(car)
            }
            Err(error) => {
                tracing::warn!(%error, "create request rejected");
                self.state = FormState::Failed(error.clone());
                SubmitOutcome::Failed(error)
            }
        }
    }
}
