//! # Fleetdesk
//!
//! An administrative toolkit for managing car records that belong to
//! organizations.
//!
//! ## Features
//!
//! - **Typed Records**: Car / Organization schemas with backend-assigned
//!   identity and timestamps, plus all-optional query filter shapes
//! - **Declarative Validation**: reusable per-field validators composed into
//!   a static rule set, shared by the form and the REST handlers
//! - **Explicit Form Flow**: the create form is a state machine
//!   (Editing / Submitting / Failed) with pure intents, not UI-framework state
//! - **Explicit Authorization**: the session and its grants are a value the
//!   page gate checks before the controller may exist
//! - **Swappable Backends**: the flow talks to trait seams; a REST client and
//!   an in-process backend ship in the box
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use fleetdesk::prelude::*;
//!
//! let context = AuthContext::User {
//!     user_id: "user-1".to_string(),
//!     grants: vec![Grant::new(AccessService::Project, "car", AccessOperation::Create)],
//! };
//!
//! let backend = InMemoryBackend::new();
//! let mut form = CreateCarForm::new(&context, Some("org-123".to_string()))?;
//!
//! form.set_specification("V6 turbo");
//! form.set_make_year(Some(2024.0));
//! form.set_model("GTX");
//! form.set_engine("3.0L V6");
//!
//! match form.submit(&backend, &TracingNavigator).await {
//!     SubmitOutcome::Created(car) => println!("persisted as {:?}", car.id),
//!     SubmitOutcome::Invalid => println!("errors: {:?}", form.field_errors()),
//!     other => println!("{:?}", other),
//! }
//! ```

pub mod client;
pub mod config;
pub mod core;
pub mod flow;
pub mod server;
pub mod storage;

/// Re-exports of commonly used types and traits
pub mod prelude {
    // === Core Types ===
    pub use crate::core::{
        auth::{AccessOperation, AccessRequirement, AccessService, AuthContext, Grant},
        error::{
            AuthError, ErrorResponse, FieldViolation, FleetError, FleetResult, SubmissionError,
            ValidationError,
        },
        query::{PageParams, PaginatedResponse, PaginationMeta},
        record::{Car, CarDraft, CarQuery, Organization, OrganizationSummary, Record},
        validation::{RuleSet, car_rules},
    };

    // === Client ===
    pub use crate::client::{CarsApi, InMemoryBackend, OrganizationsApi, RestClient};

    // === Flow ===
    pub use crate::flow::{CreateCarForm, FormState, Navigator, SubmitOutcome, TracingNavigator};

    // === Server ===
    pub use crate::server::{AppState, build_router};

    // === Storage ===
    pub use crate::storage::{CarStore, OrganizationStore};

    // === Config ===
    pub use crate::config::{AdminConfig, ApiConfig};

    // === External dependencies ===
    pub use anyhow::Result;
    pub use async_trait::async_trait;
    pub use chrono::{DateTime, Utc};
    pub use serde::{Deserialize, Serialize};
    pub use uuid::Uuid;
}
