//! Record types for the car administration domain
//!
//! A [`Record`] is a persisted entity as the backend stores it. Identifiers
//! and timestamps are assigned by the backend, so they are absent on anything
//! that has not been persisted yet. Drafts (see [`CarDraft`]) are the
//! client-side candidate shape sent to the create operation.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Base trait for persisted records.
///
/// All records share:
/// - a backend-assigned string identifier, absent until persisted
/// - backend-managed created_at / updated_at timestamps
/// - singular and plural resource names used to build API routes
pub trait Record: Clone + Send + Sync + 'static {
    /// The plural resource name used in URLs (e.g., "cars")
    fn resource_name() -> &'static str;

    /// The singular resource name (e.g., "car")
    fn resource_name_singular() -> &'static str;

    /// Get the backend-assigned identifier, if any
    fn id(&self) -> Option<&str>;

    /// Get the creation timestamp, if persisted
    fn created_at(&self) -> Option<DateTime<Utc>>;

    /// Get the last update timestamp, if persisted
    fn updated_at(&self) -> Option<DateTime<Utc>>;

    /// The collection route for this record type (e.g., "/cars")
    fn collection_route() -> String {
        format!("/{}", Self::resource_name())
    }

    /// Whether the backend has assigned an identity to this record
    fn is_persisted(&self) -> bool {
        self.id().is_some()
    }
}

/// A persisted car record.
///
/// `organization` and `count` are read-path expansions: the backend fills
/// them when listing, they are never sent back on writes. The aggregate
/// count structure is backend-defined, so it is held as opaque JSON.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Car {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    pub specification: String,

    pub make_year: i64,

    pub model: String,

    pub engine: String,

    /// Nullable reference to the owning organization
    pub organization_id: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,

    /// Expanded related organization (read path only)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub organization: Option<Organization>,

    /// Aggregate count of related sub-records (read path only)
    #[serde(rename = "_count", skip_serializing_if = "Option::is_none")]
    pub count: Option<Value>,
}

impl Record for Car {
    fn resource_name() -> &'static str {
        "cars"
    }

    fn resource_name_singular() -> &'static str {
        "car"
    }

    fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    fn created_at(&self) -> Option<DateTime<Utc>> {
        self.created_at
    }

    fn updated_at(&self) -> Option<DateTime<Utc>> {
        self.updated_at
    }
}

/// The in-memory, not-yet-persisted candidate car held by the create form.
///
/// `make_year` carries the raw number-input value; whether it is an acceptable
/// integer is decided by the validation rule set at submission time, not by
/// the type. A missing `organization_id` is serialized as an explicit JSON
/// `null` so the backend sees the same body the original clients sent.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct CarDraft {
    pub specification: String,

    pub make_year: Option<f64>,

    pub model: String,

    pub engine: String,

    pub organization_id: Option<String>,
}

impl CarDraft {
    /// Create an empty draft, optionally seeded with the organization from
    /// the navigation context.
    pub fn seeded(organization_id: Option<String>) -> Self {
        Self {
            organization_id,
            ..Self::default()
        }
    }

    /// The draft as a JSON payload, exactly as it goes over the wire.
    ///
    /// Serialization of a plain struct cannot fail, so this is infallible.
    pub fn to_payload(&self) -> Value {
        serde_json::to_value(self).expect("draft serialization is infallible")
    }
}

/// Query filter shape for listing cars.
///
/// Every field is optional; set fields are matched exactly. Pagination and
/// sorting ride alongside in [`crate::core::query::PageParams`].
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct CarQuery {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub specification: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub engine: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub organization_id: Option<String>,
}

impl CarQuery {
    /// Whether a car satisfies every filter that is set
    pub fn matches(&self, car: &Car) -> bool {
        let eq = |filter: &Option<String>, value: Option<&str>| match filter {
            Some(wanted) => value == Some(wanted.as_str()),
            None => true,
        };

        eq(&self.id, car.id.as_deref())
            && eq(&self.specification, Some(car.specification.as_str()))
            && eq(&self.model, Some(car.model.as_str()))
            && eq(&self.engine, Some(car.engine.as_str()))
            && eq(&self.organization_id, car.organization_id.as_deref())
    }

    /// Whether any filter is set
    pub fn is_empty(&self) -> bool {
        self.id.is_none()
            && self.specification.is_none()
            && self.model.is_none()
            && self.engine.is_none()
            && self.organization_id.is_none()
    }
}

/// A persisted organization record
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Organization {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    pub name: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

impl Record for Organization {
    fn resource_name() -> &'static str {
        "organizations"
    }

    fn resource_name_singular() -> &'static str {
        "organization"
    }

    fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    fn created_at(&self) -> Option<DateTime<Utc>> {
        self.created_at
    }

    fn updated_at(&self) -> Option<DateTime<Utc>> {
        self.updated_at
    }
}

impl Organization {
    /// The `{id, name}` projection consumed by picker controls.
    ///
    /// Returns None for organizations the backend has not persisted yet.
    pub fn summary(&self) -> Option<OrganizationSummary> {
        Some(OrganizationSummary {
            id: self.id.clone()?,
            name: self.name.clone(),
        })
    }
}

/// Organization projection for selection widgets
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct OrganizationSummary {
    pub id: String,
    pub name: String,
}
