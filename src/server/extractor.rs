//! Axum extractor for validated payloads
//!
//! `Validated<T>` runs the payload's rule set before handing the typed value
//! to a handler, so handlers never see a draft that failed validation and
//! rejections share the `{code, message, details}` error shape.

use crate::core::error::{FleetError, ValidationError};
use crate::core::record::CarDraft;
use crate::core::validation::{RuleSet, car_rules};
use axum::Json;
use axum::extract::{FromRequest, Request};
use axum::response::{IntoResponse, Response};
use serde::de::DeserializeOwned;
use serde_json::Value;

/// Trait for payload types with a static rule set
pub trait ValidatedPayload {
    fn rule_set() -> RuleSet;
}

impl ValidatedPayload for CarDraft {
    fn rule_set() -> RuleSet {
        car_rules()
    }
}

/// Extractor that validates and then deserializes a JSON payload
pub struct Validated<T>(pub T);

impl<S, T> FromRequest<S> for Validated<T>
where
    S: Send + Sync,
    T: ValidatedPayload + DeserializeOwned + Send + Sync,
{
    type Rejection = Response;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(payload): Json<Value> =
            Json::from_request(req, state).await.map_err(|e| {
                FleetError::Validation(ValidationError::InvalidJson {
                    message: e.to_string(),
                })
                .into_response()
            })?;

        if let Err(violations) = T::rule_set().validate(&payload) {
            return Err(
                FleetError::Validation(ValidationError::FieldErrors(violations)).into_response(),
            );
        }

        let value: T = serde_json::from_value(payload)
            .map_err(|e| FleetError::from(e).into_response())?;

        Ok(Validated(value))
    }
}
