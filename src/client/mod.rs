//! Client traits for the backend API
//!
//! The create form talks to the backend exclusively through these seams, so
//! tests can count calls and inject failures, and the same flow runs against
//! the REST implementation ([`RestClient`]) or the in-process one
//! ([`InMemoryBackend`]).

pub mod http;
pub mod memory;

pub use http::RestClient;
pub use memory::InMemoryBackend;

use crate::core::error::SubmissionError;
use crate::core::query::PageParams;
use crate::core::record::{Car, CarDraft, CarQuery, OrganizationSummary};
use async_trait::async_trait;

/// Operations on the cars collection
#[async_trait]
pub trait CarsApi: Send + Sync {
    /// Persist a new car.
    ///
    /// Atomic from the caller's point of view: either the fully persisted
    /// record comes back (with assigned id and timestamps), or an error with
    /// a user-displayable message does.
    async fn create(&self, draft: &CarDraft) -> Result<Car, SubmissionError>;

    /// List cars matching the filter, one page at a time.
    ///
    /// The read path expands the related organization and the aggregate
    /// count of sub-records.
    async fn list(&self, query: &CarQuery, page: &PageParams) -> Result<Vec<Car>, SubmissionError>;
}

/// Lookup of candidate organizations for the picker control
#[async_trait]
pub trait OrganizationsApi: Send + Sync {
    /// Return organization summaries, optionally narrowed by a name filter
    async fn search(&self, filter: Option<&str>) -> Result<Vec<OrganizationSummary>, SubmissionError>;
}
