//! Reference REST backend for cars and organizations
//!
//! A small axum surface with the same semantics the clients expect:
//!
//! - `POST /cars` — validate, check the organization reference, persist
//! - `GET /cars` — filter + sort + paginate, with read-path expansions
//! - `GET /organizations` — name search for the picker
//!
//! Errors come back as `{code, message, details?}` via [`FleetError`].

pub mod extractor;
pub mod handlers;

pub use extractor::{Validated, ValidatedPayload};
pub use handlers::AppState;

use axum::Router;
use axum::routing::get;
use handlers::{create_car, list_cars, search_organizations};
use tower::ServiceBuilder;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

/// Build the backend router over the given stores
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/cars", axum::routing::post(create_car).get(list_cars))
        .route("/organizations", get(search_organizations))
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(CorsLayer::permissive()),
        )
        .with_state(state)
}

/// Serve the router on an already bound listener
pub async fn serve(listener: tokio::net::TcpListener, router: Router) -> anyhow::Result<()> {
    let addr = listener.local_addr()?;
    tracing::info!("backend listening on {}", addr);
    axum::serve(listener, router).await?;
    Ok(())
}
