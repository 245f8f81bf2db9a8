//! In-memory stores backing the reference REST backend
//!
//! Thread-safe via `Arc<RwLock<...>>`. The stores mint identifiers and
//! timestamps, which is what makes a draft into a persisted record.

use crate::core::record::{Car, CarDraft, CarQuery, Organization};
use anyhow::{Result, anyhow};
use chrono::Utc;
use serde_json::json;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};
use uuid::Uuid;

/// In-memory car store
#[derive(Clone, Default)]
pub struct CarStore {
    records: Arc<RwLock<HashMap<String, Car>>>,
}

impl CarStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Persist a validated draft: mint an id and timestamps.
    ///
    /// The draft must have passed the rule set; a make_year that is absent
    /// or fractional at this point is a caller bug, not user input.
    pub fn create(&self, draft: &CarDraft) -> Result<Car> {
        let make_year = draft
            .make_year
            .filter(|y| y.fract() == 0.0)
            .map(|y| y as i64)
            .ok_or_else(|| anyhow!("unvalidated draft reached the store"))?;

        let now = Utc::now();
        let car = Car {
            id: Some(Uuid::new_v4().to_string()),
            specification: draft.specification.clone(),
            make_year,
            model: draft.model.clone(),
            engine: draft.engine.clone(),
            organization_id: draft.organization_id.clone(),
            created_at: Some(now),
            updated_at: Some(now),
            organization: None,
            count: None,
        };

        let mut records = self
            .records
            .write()
            .map_err(|e| anyhow!("Failed to acquire write lock: {}", e))?;
        records.insert(car.id.clone().expect("id was just minted"), car.clone());

        Ok(car)
    }

    pub fn get(&self, id: &str) -> Result<Option<Car>> {
        let records = self
            .records
            .read()
            .map_err(|e| anyhow!("Failed to acquire read lock: {}", e))?;
        Ok(records.get(id).cloned())
    }

    /// List cars matching the filter, with read-path expansions filled in
    /// from the organization store.
    pub fn list(&self, query: &CarQuery, organizations: &OrganizationStore) -> Result<Vec<Car>> {
        let records = self
            .records
            .read()
            .map_err(|e| anyhow!("Failed to acquire read lock: {}", e))?;

        let mut cars: Vec<Car> = records
            .values()
            .filter(|car| query.matches(car))
            .cloned()
            .collect();

        for car in &mut cars {
            car.organization = match &car.organization_id {
                Some(org_id) => organizations.get(org_id)?,
                None => None,
            };
            // cars have no child relations yet; the backend still reports
            // the aggregate container on the read path
            car.count = Some(json!({}));
        }

        Ok(cars)
    }

    pub fn len(&self) -> Result<usize> {
        let records = self
            .records
            .read()
            .map_err(|e| anyhow!("Failed to acquire read lock: {}", e))?;
        Ok(records.len())
    }

    pub fn is_empty(&self) -> Result<bool> {
        Ok(self.len()? == 0)
    }
}

/// In-memory organization store
#[derive(Clone, Default)]
pub struct OrganizationStore {
    records: Arc<RwLock<HashMap<String, Organization>>>,
}

impl OrganizationStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Persist an organization under a minted id
    pub fn create(&self, name: impl Into<String>) -> Result<Organization> {
        self.create_with_id(Uuid::new_v4().to_string(), name)
    }

    /// Persist an organization under a caller-chosen id (seeding, tests)
    pub fn create_with_id(
        &self,
        id: impl Into<String>,
        name: impl Into<String>,
    ) -> Result<Organization> {
        let now = Utc::now();
        let org = Organization {
            id: Some(id.into()),
            name: name.into(),
            description: None,
            created_at: Some(now),
            updated_at: Some(now),
        };

        let mut records = self
            .records
            .write()
            .map_err(|e| anyhow!("Failed to acquire write lock: {}", e))?;
        records.insert(org.id.clone().expect("id was just set"), org.clone());

        Ok(org)
    }

    pub fn get(&self, id: &str) -> Result<Option<Organization>> {
        let records = self
            .records
            .read()
            .map_err(|e| anyhow!("Failed to acquire read lock: {}", e))?;
        Ok(records.get(id).cloned())
    }

    pub fn contains(&self, id: &str) -> Result<bool> {
        Ok(self.get(id)?.is_some())
    }

    /// List organizations whose name contains the filter, case-insensitively.
    /// No filter returns everything, sorted by name for stable picker output.
    pub fn search(&self, filter: Option<&str>) -> Result<Vec<Organization>> {
        let records = self
            .records
            .read()
            .map_err(|e| anyhow!("Failed to acquire read lock: {}", e))?;

        let needle = filter.map(|f| f.to_lowercase());
        let mut orgs: Vec<Organization> = records
            .values()
            .filter(|org| match &needle {
                Some(needle) => org.name.to_lowercase().contains(needle),
                None => true,
            })
            .cloned()
            .collect();
        orgs.sort_by(|a, b| a.name.cmp(&b.name));

        Ok(orgs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_draft() -> CarDraft {
        CarDraft {
            specification: "V6 turbo".to_string(),
            make_year: Some(2024.0),
            model: "GTX".to_string(),
            engine: "3.0L V6".to_string(),
            organization_id: None,
        }
    }

    #[test]
    fn test_create_mints_id_and_timestamps() {
        let store = CarStore::new();
        let car = store.create(&valid_draft()).unwrap();

        assert!(car.id.is_some());
        assert!(car.created_at.is_some());
        assert_eq!(car.created_at, car.updated_at);
        assert_eq!(car.make_year, 2024);
        assert_eq!(store.len().unwrap(), 1);
    }

    #[test]
    fn test_create_rejects_unvalidated_draft() {
        let store = CarStore::new();

        let mut draft = valid_draft();
        draft.make_year = None;
        assert!(store.create(&draft).is_err());

        draft.make_year = Some(2024.5);
        assert!(store.create(&draft).is_err());

        assert!(store.is_empty().unwrap());
    }

    #[test]
    fn test_get_returns_persisted_car() {
        let store = CarStore::new();
        let car = store.create(&valid_draft()).unwrap();
        let id = car.id.clone().unwrap();

        let found = store.get(&id).unwrap();
        assert_eq!(found, Some(car));
        assert!(store.get("missing").unwrap().is_none());
    }

    #[test]
    fn test_list_filters_and_expands() {
        let cars = CarStore::new();
        let orgs = OrganizationStore::new();
        orgs.create_with_id("org-123", "Acme Motors").unwrap();

        let mut assigned = valid_draft();
        assigned.organization_id = Some("org-123".to_string());
        cars.create(&assigned).unwrap();
        cars.create(&valid_draft()).unwrap();

        let all = cars.list(&CarQuery::default(), &orgs).unwrap();
        assert_eq!(all.len(), 2);
        for car in &all {
            assert!(car.count.is_some());
        }

        let query = CarQuery {
            organization_id: Some("org-123".to_string()),
            ..CarQuery::default()
        };
        let filtered = cars.list(&query, &orgs).unwrap();
        assert_eq!(filtered.len(), 1);
        let expanded = filtered[0].organization.as_ref().expect("expanded org");
        assert_eq!(expanded.name, "Acme Motors");
    }

    #[test]
    fn test_list_leaves_unknown_reference_unexpanded() {
        let cars = CarStore::new();
        let orgs = OrganizationStore::new();

        let mut draft = valid_draft();
        draft.organization_id = Some("org-gone".to_string());
        cars.create(&draft).unwrap();

        let all = cars.list(&CarQuery::default(), &orgs).unwrap();
        assert!(all[0].organization.is_none());
        assert_eq!(all[0].organization_id.as_deref(), Some("org-gone"));
    }

    #[test]
    fn test_organization_search_is_case_insensitive_and_sorted() {
        let orgs = OrganizationStore::new();
        orgs.create("Zenith Fleet").unwrap();
        orgs.create("Acme Motors").unwrap();
        orgs.create("Acme Logistics").unwrap();

        let all = orgs.search(None).unwrap();
        let names: Vec<&str> = all.iter().map(|o| o.name.as_str()).collect();
        assert_eq!(names, vec!["Acme Logistics", "Acme Motors", "Zenith Fleet"]);

        let acme = orgs.search(Some("acme")).unwrap();
        assert_eq!(acme.len(), 2);

        let none = orgs.search(Some("globex")).unwrap();
        assert!(none.is_empty());
    }

    #[test]
    fn test_organization_contains() {
        let orgs = OrganizationStore::new();
        orgs.create_with_id("org-123", "Acme Motors").unwrap();

        assert!(orgs.contains("org-123").unwrap());
        assert!(!orgs.contains("org-999").unwrap());
    }
}
