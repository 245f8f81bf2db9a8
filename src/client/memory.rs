//! In-process implementation of the client traits
//!
//! Behaves like the REST backend — same rule set, same foreign-key check,
//! same error codes — without a socket in between. Used by the demo and by
//! tests that want the full flow against real storage.

use super::{CarsApi, OrganizationsApi};
use crate::core::error::{SubmissionError, ValidationError};
use crate::core::query::PageParams;
use crate::core::record::{Car, CarDraft, CarQuery, OrganizationSummary};
use crate::core::validation::car_rules;
use crate::storage::{CarStore, OrganizationStore};
use async_trait::async_trait;
use axum::http::StatusCode;

/// In-process backend over the in-memory stores
#[derive(Clone, Default)]
pub struct InMemoryBackend {
    cars: CarStore,
    organizations: OrganizationStore,
}

impl InMemoryBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a backend over existing stores (shared with a server, say)
    pub fn with_stores(cars: CarStore, organizations: OrganizationStore) -> Self {
        Self {
            cars,
            organizations,
        }
    }

    pub fn car_store(&self) -> &CarStore {
        &self.cars
    }

    pub fn organization_store(&self) -> &OrganizationStore {
        &self.organizations
    }

    fn internal(message: impl std::fmt::Display) -> SubmissionError {
        SubmissionError::Api {
            code: "INTERNAL_ERROR".to_string(),
            message: message.to_string(),
            status: StatusCode::INTERNAL_SERVER_ERROR.as_u16(),
        }
    }
}

#[async_trait]
impl CarsApi for InMemoryBackend {
    async fn create(&self, draft: &CarDraft) -> Result<Car, SubmissionError> {
        // same gate the REST handler applies
        if let Err(violations) = car_rules().validate(&draft.to_payload()) {
            let error = ValidationError::FieldErrors(violations);
            return Err(SubmissionError::Api {
                code: "VALIDATION_ERROR".to_string(),
                message: error.to_string(),
                status: StatusCode::UNPROCESSABLE_ENTITY.as_u16(),
            });
        }

        if let Some(org_id) = &draft.organization_id {
            let exists = self
                .organizations
                .contains(org_id)
                .map_err(Self::internal)?;
            if !exists {
                return Err(SubmissionError::Api {
                    code: "FOREIGN_KEY_VIOLATION".to_string(),
                    message: format!("organization_id references unknown record '{}'", org_id),
                    status: StatusCode::BAD_REQUEST.as_u16(),
                });
            }
        }

        self.cars.create(draft).map_err(Self::internal)
    }

    async fn list(&self, query: &CarQuery, page: &PageParams) -> Result<Vec<Car>, SubmissionError> {
        let cars = self
            .cars
            .list(query, &self.organizations)
            .map_err(Self::internal)?;
        let (page_items, _) = page.paginate(cars);
        Ok(page_items)
    }
}

#[async_trait]
impl OrganizationsApi for InMemoryBackend {
    async fn search(
        &self,
        filter: Option<&str>,
    ) -> Result<Vec<OrganizationSummary>, SubmissionError> {
        let orgs = self.organizations.search(filter).map_err(Self::internal)?;
        Ok(orgs.iter().filter_map(|org| org.summary()).collect())
    }
}
