//! REST implementation of the client traits
//!
//! Talks to the backend described in [`crate::server`]: JSON bodies, error
//! responses shaped as `{code, message, details?}`. Timeout policy lives in
//! the HTTP client configuration, never in the flow.

use super::{CarsApi, OrganizationsApi};
use crate::config::ApiConfig;
use crate::core::error::{ErrorResponse, FleetResult, SubmissionError};
use crate::core::query::{PageParams, PaginatedResponse};
use crate::core::record::{Car, CarDraft, CarQuery, OrganizationSummary, Record};
use async_trait::async_trait;
use std::time::Duration;

/// HTTP client for the cars backend
#[derive(Clone)]
pub struct RestClient {
    http: reqwest::Client,
    base_url: String,
}

impl RestClient {
    /// Create a client with default settings
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: normalize(base_url.into()),
        }
    }

    /// Create a client from configuration (base URL and request timeout)
    pub fn from_config(config: &ApiConfig) -> FleetResult<Self> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| crate::core::error::FleetError::Internal(e.to_string()))?;
        Ok(Self {
            http,
            base_url: normalize(config.base_url.clone()),
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Map a non-success response to a submission error.
    ///
    /// The backend answers errors with an [`ErrorResponse`] body; anything
    /// else degrades to a bare status error.
    async fn decode_error(response: reqwest::Response) -> SubmissionError {
        let status = response.status().as_u16();
        match response.json::<ErrorResponse>().await {
            Ok(body) => SubmissionError::Api {
                code: body.code,
                message: body.message,
                status,
            },
            Err(_) => SubmissionError::Http { status },
        }
    }
}

fn normalize(base_url: String) -> String {
    base_url.trim_end_matches('/').to_string()
}

#[async_trait]
impl CarsApi for RestClient {
    async fn create(&self, draft: &CarDraft) -> Result<Car, SubmissionError> {
        let url = self.url(&Car::collection_route());
        tracing::debug!(%url, "POST create car");

        let response = self.http.post(&url).json(draft).send().await?;
        if !response.status().is_success() {
            return Err(Self::decode_error(response).await);
        }
        let car = response.json::<Car>().await?;
        tracing::info!(id = ?car.id, "car created");
        Ok(car)
    }

    async fn list(&self, query: &CarQuery, page: &PageParams) -> Result<Vec<Car>, SubmissionError> {
        let url = self.url(&Car::collection_route());
        tracing::debug!(%url, "GET list cars");

        let response = self.http.get(&url).query(query).query(page).send().await?;
        if !response.status().is_success() {
            return Err(Self::decode_error(response).await);
        }
        let body = response.json::<PaginatedResponse<Car>>().await?;
        Ok(body.data)
    }
}

#[async_trait]
impl OrganizationsApi for RestClient {
    async fn search(
        &self,
        filter: Option<&str>,
    ) -> Result<Vec<OrganizationSummary>, SubmissionError> {
        let url = self.url("/organizations");
        let mut request = self.http.get(&url);
        if let Some(filter) = filter {
            request = request.query(&[("filter", filter)]);
        }

        let response = request.send().await?;
        if !response.status().is_success() {
            return Err(Self::decode_error(response).await);
        }
        Ok(response.json::<Vec<OrganizationSummary>>().await?)
    }
}
