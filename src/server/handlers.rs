//! Request handlers for the cars backend

use super::extractor::Validated;
use crate::core::error::{FleetError, StoreError};
use crate::core::query::{PageParams, PaginatedResponse, SortDirection, SortSpec};
use crate::core::record::{Car, CarDraft, CarQuery, OrganizationSummary};
use axum::Json;
use axum::extract::{Query, State};
use axum::http::StatusCode;
use serde::Deserialize;

/// Shared handler state: the two stores
#[derive(Clone, Default)]
pub struct AppState {
    pub cars: crate::storage::CarStore,
    pub organizations: crate::storage::OrganizationStore,
}

fn internal(err: anyhow::Error) -> FleetError {
    FleetError::Internal(err.to_string())
}

/// `POST /cars` — persist a validated draft.
///
/// Validation already happened in the extractor; what remains here is the
/// referential check the client cannot do locally.
pub async fn create_car(
    State(state): State<AppState>,
    Validated(draft): Validated<CarDraft>,
) -> Result<(StatusCode, Json<Car>), FleetError> {
    if let Some(org_id) = &draft.organization_id {
        let exists = state.organizations.contains(org_id).map_err(internal)?;
        if !exists {
            return Err(StoreError::MissingReference {
                field: "organization_id".to_string(),
                value: org_id.clone(),
            }
            .into());
        }
    }

    let car = state.cars.create(&draft).map_err(internal)?;
    tracing::info!(id = ?car.id, "car created");
    Ok((StatusCode::CREATED, Json(car)))
}

/// `GET /cars` — filter, sort and paginate the collection
pub async fn list_cars(
    State(state): State<AppState>,
    Query(filter): Query<CarQuery>,
    Query(page): Query<PageParams>,
) -> Result<Json<PaginatedResponse<Car>>, FleetError> {
    let mut cars = state
        .cars
        .list(&filter, &state.organizations)
        .map_err(internal)?;

    if let Some(spec) = page.sort_spec() {
        sort_cars(&mut cars, &spec);
    } else {
        // stable default ordering for pagination
        cars.sort_by(|a, b| a.created_at.cmp(&b.created_at));
    }

    let (data, pagination) = page.paginate(cars);
    Ok(Json(PaginatedResponse { data, pagination }))
}

fn sort_cars(cars: &mut [Car], spec: &SortSpec) {
    match spec.field.as_str() {
        "specification" => cars.sort_by(|a, b| a.specification.cmp(&b.specification)),
        "make_year" => cars.sort_by_key(|c| c.make_year),
        "model" => cars.sort_by(|a, b| a.model.cmp(&b.model)),
        "engine" => cars.sort_by(|a, b| a.engine.cmp(&b.engine)),
        "created_at" => cars.sort_by(|a, b| a.created_at.cmp(&b.created_at)),
        _ => return,
    }
    if spec.direction == SortDirection::Descending {
        cars.reverse();
    }
}

/// Query parameters for the organization picker lookup
#[derive(Debug, Deserialize, Default)]
#[serde(default)]
pub struct OrganizationFilter {
    pub filter: Option<String>,
}

/// `GET /organizations` — summaries for the picker, optionally filtered
pub async fn search_organizations(
    State(state): State<AppState>,
    Query(params): Query<OrganizationFilter>,
) -> Result<Json<Vec<OrganizationSummary>>, FleetError> {
    let orgs = state
        .organizations
        .search(params.filter.as_deref())
        .map_err(internal)?;
    Ok(Json(orgs.iter().filter_map(|org| org.summary()).collect()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn car(make_year: i64, model: &str) -> Car {
        Car {
            id: Some(format!("car-{}", model)),
            specification: "spec".to_string(),
            make_year,
            model: model.to_string(),
            engine: "I4".to_string(),
            organization_id: None,
            created_at: None,
            updated_at: None,
            organization: None,
            count: None,
        }
    }

    #[test]
    fn test_sort_cars_by_year_descending() {
        let mut cars = vec![car(2020, "A"), car(2024, "B"), car(2022, "C")];
        sort_cars(
            &mut cars,
            &SortSpec::parse("make_year:desc").expect("valid sort"),
        );
        let years: Vec<i64> = cars.iter().map(|c| c.make_year).collect();
        assert_eq!(years, vec![2024, 2022, 2020]);
    }

    #[test]
    fn test_sort_cars_unknown_field_is_ignored() {
        let mut cars = vec![car(2020, "A"), car(2024, "B")];
        sort_cars(&mut cars, &SortSpec::parse("color:asc").expect("valid sort"));
        assert_eq!(cars[0].model, "A");
        assert_eq!(cars[1].model, "B");
    }
}
