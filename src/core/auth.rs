//! Authorization context for page-level gates
//!
//! The hosted auth service is an external collaborator; what the flow needs
//! from it is a value: who is authenticated and which grants they hold. The
//! page gate checks a single requirement (e.g. `project/car/create`) against
//! that value before the form controller is allowed to exist.

use crate::core::error::AuthError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Scope a grant applies to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AccessService {
    /// Grants scoped to the current project
    Project,
    /// Grants scoped to the whole platform
    Platform,
}

impl fmt::Display for AccessService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AccessService::Project => write!(f, "project"),
            AccessService::Platform => write!(f, "platform"),
        }
    }
}

/// Operation a grant allows on an entity type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AccessOperation {
    Create,
    Read,
    Update,
    Delete,
}

impl fmt::Display for AccessOperation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AccessOperation::Create => write!(f, "create"),
            AccessOperation::Read => write!(f, "read"),
            AccessOperation::Update => write!(f, "update"),
            AccessOperation::Delete => write!(f, "delete"),
        }
    }
}

/// A single permission: operation on an entity type within a service scope
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Grant {
    pub service: AccessService,
    pub entity: String,
    pub operation: AccessOperation,
}

impl Grant {
    pub fn new(
        service: AccessService,
        entity: impl Into<String>,
        operation: AccessOperation,
    ) -> Self {
        Self {
            service,
            entity: entity.into(),
            operation,
        }
    }

    /// Parse a grant from its config form, e.g. `"project:car:create"`
    pub fn parse(s: &str) -> Option<Self> {
        let mut parts = s.split(':');
        let service = match parts.next()? {
            "project" => AccessService::Project,
            "platform" => AccessService::Platform,
            _ => return None,
        };
        let entity = parts.next()?.to_string();
        let operation = match parts.next()? {
            "create" => AccessOperation::Create,
            "read" => AccessOperation::Read,
            "update" => AccessOperation::Update,
            "delete" => AccessOperation::Delete,
            _ => return None,
        };
        if parts.next().is_some() || entity.is_empty() {
            return None;
        }
        Some(Self {
            service,
            entity,
            operation,
        })
    }
}

/// Authenticated session context, passed into page construction explicitly
#[derive(Debug, Clone)]
pub enum AuthContext {
    /// Authenticated user with a set of grants
    User { user_id: String, grants: Vec<Grant> },

    /// No authenticated session
    Anonymous,
}

impl AuthContext {
    /// Get the user id if a session exists
    pub fn user_id(&self) -> Option<&str> {
        match self {
            AuthContext::User { user_id, .. } => Some(user_id),
            AuthContext::Anonymous => None,
        }
    }

    /// Whether any session exists
    pub fn is_authenticated(&self) -> bool {
        !matches!(self, AuthContext::Anonymous)
    }

    /// Whether this context holds a grant for the given operation
    pub fn can(&self, service: AccessService, entity: &str, operation: AccessOperation) -> bool {
        match self {
            AuthContext::User { grants, .. } => grants
                .iter()
                .any(|g| g.service == service && g.entity == entity && g.operation == operation),
            AuthContext::Anonymous => false,
        }
    }
}

/// The requirement a page gate enforces before rendering
#[derive(Debug, Clone)]
pub struct AccessRequirement {
    pub service: AccessService,
    pub entity: &'static str,
    pub operation: AccessOperation,
}

impl AccessRequirement {
    pub const fn new(
        service: AccessService,
        entity: &'static str,
        operation: AccessOperation,
    ) -> Self {
        Self {
            service,
            entity,
            operation,
        }
    }

    /// Check the requirement against a context.
    ///
    /// An anonymous context fails with [`AuthError::NotAuthenticated`]; an
    /// authenticated one without the grant fails with
    /// [`AuthError::PermissionDenied`].
    pub fn check(&self, context: &AuthContext) -> Result<(), AuthError> {
        if !context.is_authenticated() {
            return Err(AuthError::NotAuthenticated);
        }
        if !context.can(self.service, self.entity, self.operation) {
            return Err(AuthError::PermissionDenied {
                service: self.service.to_string(),
                entity: self.entity.to_string(),
                operation: self.operation.to_string(),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn car_creator() -> AuthContext {
        AuthContext::User {
            user_id: "user-1".to_string(),
            grants: vec![Grant::new(
                AccessService::Project,
                "car",
                AccessOperation::Create,
            )],
        }
    }

    #[test]
    fn test_can_matches_exact_grant() {
        let ctx = car_creator();
        assert!(ctx.can(AccessService::Project, "car", AccessOperation::Create));
        assert!(!ctx.can(AccessService::Project, "car", AccessOperation::Delete));
        assert!(!ctx.can(AccessService::Project, "organization", AccessOperation::Create));
        assert!(!ctx.can(AccessService::Platform, "car", AccessOperation::Create));
    }

    #[test]
    fn test_anonymous_has_no_grants() {
        let ctx = AuthContext::Anonymous;
        assert!(!ctx.is_authenticated());
        assert!(ctx.user_id().is_none());
        assert!(!ctx.can(AccessService::Project, "car", AccessOperation::Read));
    }

    #[test]
    fn test_requirement_passes_with_grant() {
        let requirement =
            AccessRequirement::new(AccessService::Project, "car", AccessOperation::Create);
        assert!(requirement.check(&car_creator()).is_ok());
    }

    #[test]
    fn test_requirement_rejects_anonymous_as_unauthenticated() {
        let requirement =
            AccessRequirement::new(AccessService::Project, "car", AccessOperation::Create);
        assert_eq!(
            requirement.check(&AuthContext::Anonymous),
            Err(AuthError::NotAuthenticated)
        );
    }

    #[test]
    fn test_requirement_rejects_missing_grant_as_denied() {
        let requirement =
            AccessRequirement::new(AccessService::Project, "car", AccessOperation::Delete);
        let result = requirement.check(&car_creator());
        assert!(matches!(result, Err(AuthError::PermissionDenied { .. })));
    }

    #[test]
    fn test_grant_parse_round_trip() {
        let grant = Grant::parse("project:car:create").expect("valid grant string");
        assert_eq!(grant.service, AccessService::Project);
        assert_eq!(grant.entity, "car");
        assert_eq!(grant.operation, AccessOperation::Create);

        assert_eq!(
            Grant::parse("platform:organization:read"),
            Some(Grant::new(
                AccessService::Platform,
                "organization",
                AccessOperation::Read
            ))
        );
    }

    #[test]
    fn test_grant_parse_rejects_malformed_strings() {
        assert!(Grant::parse("").is_none());
        assert!(Grant::parse("project:car").is_none());
        assert!(Grant::parse("tenant:car:create").is_none());
        assert!(Grant::parse("project:car:drive").is_none());
        assert!(Grant::parse("project::create").is_none());
        assert!(Grant::parse("project:car:create:extra").is_none());
    }

    #[test]
    fn test_display_forms_match_config_forms() {
        assert_eq!(AccessService::Project.to_string(), "project");
        assert_eq!(AccessOperation::Create.to_string(), "create");
    }
}
