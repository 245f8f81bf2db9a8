//! Typed error handling for fleetdesk
//!
//! Two kinds of failure surface to the user of the create flow:
//!
//! - [`ValidationError`]: local, per-field constraint violations. Reported
//!   inline, block submission entirely, never reach the network.
//! - [`SubmissionError`]: the remote create operation rejected. Reported as a
//!   single page-level message; the draft is preserved for a retry.
//!
//! The remaining categories cover the ambient concerns around the flow:
//!
//! - [`AuthError`]: missing session or missing grant; the page gate refuses
//!   to construct the controller.
//! - [`ConfigError`]: configuration parsing and loading.
//! - [`StoreError`]: the reference storage backend.
//!
//! Everything rolls up into [`FleetError`], which knows its HTTP status and
//! stable error code so the REST surface can answer with a uniform
//! `{code, message, details}` body.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::{Deserialize, Serialize};
use std::fmt;

/// The main error type for fleetdesk
#[derive(Debug)]
pub enum FleetError {
    /// Local per-field validation failures
    Validation(ValidationError),

    /// The remote create/list operation rejected
    Submission(SubmissionError),

    /// Authentication / authorization failures
    Auth(AuthError),

    /// Configuration errors
    Config(ConfigError),

    /// Storage backend errors
    Store(StoreError),

    /// Internal errors (should not happen in normal operation)
    Internal(String),
}

impl fmt::Display for FleetError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FleetError::Validation(e) => write!(f, "{}", e),
            FleetError::Submission(e) => write!(f, "{}", e),
            FleetError::Auth(e) => write!(f, "{}", e),
            FleetError::Config(e) => write!(f, "{}", e),
            FleetError::Store(e) => write!(f, "{}", e),
            FleetError::Internal(msg) => write!(f, "Internal error: {}", msg),
        }
    }
}

impl std::error::Error for FleetError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            FleetError::Validation(e) => Some(e),
            FleetError::Submission(e) => Some(e),
            FleetError::Auth(e) => Some(e),
            FleetError::Config(e) => Some(e),
            FleetError::Store(e) => Some(e),
            FleetError::Internal(_) => None,
        }
    }
}

/// Error response structure for HTTP responses
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Error code for programmatic handling
    pub code: String,
    /// Human-readable error message
    pub message: String,
    /// Optional additional details
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

impl FleetError {
    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            FleetError::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
            FleetError::Submission(e) => e.status_code(),
            FleetError::Auth(e) => e.status_code(),
            FleetError::Config(_) => StatusCode::INTERNAL_SERVER_ERROR,
            FleetError::Store(e) => e.status_code(),
            FleetError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Get the stable error code for this error
    pub fn error_code(&self) -> &'static str {
        match self {
            FleetError::Validation(_) => "VALIDATION_ERROR",
            FleetError::Submission(e) => e.error_code(),
            FleetError::Auth(e) => e.error_code(),
            FleetError::Config(_) => "CONFIG_ERROR",
            FleetError::Store(e) => e.error_code(),
            FleetError::Internal(_) => "INTERNAL_ERROR",
        }
    }

    /// Convert to an error response body
    pub fn to_response(&self) -> ErrorResponse {
        ErrorResponse {
            code: self.error_code().to_string(),
            message: self.to_string(),
            details: self.details(),
        }
    }

    /// Get additional details for the error
    fn details(&self) -> Option<serde_json::Value> {
        match self {
            FleetError::Validation(ValidationError::FieldErrors(errors)) => {
                Some(serde_json::json!({ "fields": errors }))
            }
            FleetError::Store(StoreError::MissingReference { field, value }) => {
                Some(serde_json::json!({ "field": field, "value": value }))
            }
            _ => None,
        }
    }
}

impl IntoResponse for FleetError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let body = Json(self.to_response());
        (status, body).into_response()
    }
}

// =============================================================================
// Validation Errors
// =============================================================================

/// Errors related to local input validation
#[derive(Debug)]
pub enum ValidationError {
    /// One violation per invalid field
    FieldErrors(Vec<FieldViolation>),

    /// Payload was not a JSON object at all
    InvalidJson { message: String },
}

/// A single field constraint violation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldViolation {
    pub field: String,
    pub message: String,
}

impl FieldViolation {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValidationError::FieldErrors(errors) => {
                let msgs: Vec<String> = errors
                    .iter()
                    .map(|e| format!("{}: {}", e.field, e.message))
                    .collect();
                write!(f, "Validation errors: {}", msgs.join(", "))
            }
            ValidationError::InvalidJson { message } => {
                write!(f, "Invalid JSON: {}", message)
            }
        }
    }
}

impl std::error::Error for ValidationError {}

impl From<ValidationError> for FleetError {
    fn from(err: ValidationError) -> Self {
        FleetError::Validation(err)
    }
}

// =============================================================================
// Submission Errors
// =============================================================================

/// Errors yielded by the remote create/list operations.
///
/// Whatever the cause, the variant carries a message fit for display in the
/// page-level error banner.
#[derive(Debug, Clone, PartialEq)]
pub enum SubmissionError {
    /// The backend answered with a structured error body
    Api {
        code: String,
        message: String,
        status: u16,
    },

    /// The backend answered with a non-success status and no readable body
    Http { status: u16 },

    /// The request never completed (connection refused, DNS, timeout, ...)
    Transport { message: String },
}

impl SubmissionError {
    /// The message shown in the page-level error banner
    pub fn display_message(&self) -> String {
        self.to_string()
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            SubmissionError::Api { status, .. } | SubmissionError::Http { status } => {
                StatusCode::from_u16(*status).unwrap_or(StatusCode::BAD_GATEWAY)
            }
            SubmissionError::Transport { .. } => StatusCode::BAD_GATEWAY,
        }
    }

    pub fn error_code(&self) -> &'static str {
        match self {
            SubmissionError::Api { .. } => "API_ERROR",
            SubmissionError::Http { .. } => "HTTP_ERROR",
            SubmissionError::Transport { .. } => "TRANSPORT_ERROR",
        }
    }
}

impl fmt::Display for SubmissionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SubmissionError::Api { message, .. } => write!(f, "{}", message),
            SubmissionError::Http { status } => {
                write!(f, "Request failed with status {}", status)
            }
            SubmissionError::Transport { message } => {
                write!(f, "Request could not be sent: {}", message)
            }
        }
    }
}

impl std::error::Error for SubmissionError {}

impl From<SubmissionError> for FleetError {
    fn from(err: SubmissionError) -> Self {
        FleetError::Submission(err)
    }
}

impl From<reqwest::Error> for SubmissionError {
    fn from(err: reqwest::Error) -> Self {
        match err.status() {
            Some(status) => SubmissionError::Http {
                status: status.as_u16(),
            },
            None => SubmissionError::Transport {
                message: err.to_string(),
            },
        }
    }
}

// =============================================================================
// Auth Errors
// =============================================================================

/// Errors related to authentication and authorization
#[derive(Debug, Clone, PartialEq)]
pub enum AuthError {
    /// No authenticated session
    NotAuthenticated,

    /// Session exists but the required grant is missing
    PermissionDenied {
        service: String,
        entity: String,
        operation: String,
    },
}

impl fmt::Display for AuthError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AuthError::NotAuthenticated => {
                write!(f, "No authenticated session")
            }
            AuthError::PermissionDenied {
                service,
                entity,
                operation,
            } => {
                write!(
                    f,
                    "Missing '{}' grant on '{}' in the {} scope",
                    operation, entity, service
                )
            }
        }
    }
}

impl std::error::Error for AuthError {}

impl AuthError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            AuthError::NotAuthenticated => StatusCode::UNAUTHORIZED,
            AuthError::PermissionDenied { .. } => StatusCode::FORBIDDEN,
        }
    }

    pub fn error_code(&self) -> &'static str {
        match self {
            AuthError::NotAuthenticated => "NOT_AUTHENTICATED",
            AuthError::PermissionDenied { .. } => "PERMISSION_DENIED",
        }
    }
}

impl From<AuthError> for FleetError {
    fn from(err: AuthError) -> Self {
        FleetError::Auth(err)
    }
}

// =============================================================================
// Config Errors
// =============================================================================

/// Errors related to configuration
#[derive(Debug)]
pub enum ConfigError {
    /// Failed to parse configuration file
    ParseError {
        file: Option<String>,
        message: String,
    },

    /// Invalid value in configuration
    InvalidValue {
        field: String,
        value: String,
        message: String,
    },

    /// Configuration file not found
    FileNotFound { path: String },

    /// IO error while reading configuration
    IoError { message: String },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::ParseError { file, message } => {
                if let Some(file) = file {
                    write!(f, "Failed to parse config file '{}': {}", file, message)
                } else {
                    write!(f, "Failed to parse config: {}", message)
                }
            }
            ConfigError::InvalidValue {
                field,
                value,
                message,
            } => {
                write!(
                    f,
                    "Invalid value '{}' for field '{}': {}",
                    value, field, message
                )
            }
            ConfigError::FileNotFound { path } => {
                write!(f, "Configuration file not found: {}", path)
            }
            ConfigError::IoError { message } => {
                write!(f, "IO error: {}", message)
            }
        }
    }
}

impl std::error::Error for ConfigError {}

impl From<ConfigError> for FleetError {
    fn from(err: ConfigError) -> Self {
        FleetError::Config(err)
    }
}

// =============================================================================
// Store Errors
// =============================================================================

/// Errors related to the reference storage backend
#[derive(Debug)]
pub enum StoreError {
    /// Record was not found
    NotFound { resource: String, id: String },

    /// A nullable foreign key points at a record that does not exist
    MissingReference { field: String, value: String },

    /// Store lock was poisoned or otherwise unusable
    Unavailable { message: String },
}

impl fmt::Display for StoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StoreError::NotFound { resource, id } => {
                write!(f, "{} with id '{}' not found", resource, id)
            }
            StoreError::MissingReference { field, value } => {
                write!(f, "{} references unknown record '{}'", field, value)
            }
            StoreError::Unavailable { message } => {
                write!(f, "Store unavailable: {}", message)
            }
        }
    }
}

impl std::error::Error for StoreError {}

impl StoreError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            StoreError::NotFound { .. } => StatusCode::NOT_FOUND,
            StoreError::MissingReference { .. } => StatusCode::BAD_REQUEST,
            StoreError::Unavailable { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn error_code(&self) -> &'static str {
        match self {
            StoreError::NotFound { .. } => "RECORD_NOT_FOUND",
            StoreError::MissingReference { .. } => "FOREIGN_KEY_VIOLATION",
            StoreError::Unavailable { .. } => "STORE_UNAVAILABLE",
        }
    }
}

impl From<StoreError> for FleetError {
    fn from(err: StoreError) -> Self {
        FleetError::Store(err)
    }
}

// =============================================================================
// Conversions from external errors
// =============================================================================

impl From<serde_json::Error> for FleetError {
    fn from(err: serde_json::Error) -> Self {
        FleetError::Validation(ValidationError::InvalidJson {
            message: err.to_string(),
        })
    }
}

impl From<std::io::Error> for FleetError {
    fn from(err: std::io::Error) -> Self {
        FleetError::Config(ConfigError::IoError {
            message: err.to_string(),
        })
    }
}

impl From<serde_yaml::Error> for FleetError {
    fn from(err: serde_yaml::Error) -> Self {
        FleetError::Config(ConfigError::ParseError {
            file: None,
            message: err.to_string(),
        })
    }
}

// =============================================================================
// Result type alias
// =============================================================================

/// A specialized Result type for fleetdesk operations
pub type FleetResult<T> = Result<T, FleetError>;

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_error_display_lists_fields() {
        let err = ValidationError::FieldErrors(vec![
            FieldViolation::new("specification", "is a required field"),
            FieldViolation::new("make_year", "must be an integer"),
        ]);
        let display = err.to_string();
        assert!(display.contains("specification"));
        assert!(display.contains("make_year"));
    }

    #[test]
    fn test_validation_error_status_and_code() {
        let err: FleetError = ValidationError::FieldErrors(vec![]).into();
        assert_eq!(err.status_code(), StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(err.error_code(), "VALIDATION_ERROR");
    }

    #[test]
    fn test_validation_error_response_carries_field_details() {
        let err: FleetError = ValidationError::FieldErrors(vec![FieldViolation::new(
            "engine",
            "is a required field",
        )])
        .into();
        let response = err.to_response();
        assert_eq!(response.code, "VALIDATION_ERROR");
        let details = response.details.expect("field errors include details");
        assert_eq!(details["fields"][0]["field"], "engine");
    }

    #[test]
    fn test_submission_error_api_displays_backend_message() {
        let err = SubmissionError::Api {
            code: "FOREIGN_KEY_VIOLATION".to_string(),
            message: "organization_id references unknown record 'org-9'".to_string(),
            status: 400,
        };
        assert_eq!(
            err.display_message(),
            "organization_id references unknown record 'org-9'"
        );
        assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn test_submission_error_transport_is_bad_gateway() {
        let err = SubmissionError::Transport {
            message: "connection refused".to_string(),
        };
        assert_eq!(err.status_code(), StatusCode::BAD_GATEWAY);
        assert_eq!(err.error_code(), "TRANSPORT_ERROR");
        assert!(err.to_string().contains("connection refused"));
    }

    #[test]
    fn test_auth_error_status_codes() {
        assert_eq!(
            AuthError::NotAuthenticated.status_code(),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            AuthError::PermissionDenied {
                service: "project".to_string(),
                entity: "car".to_string(),
                operation: "create".to_string(),
            }
            .status_code(),
            StatusCode::FORBIDDEN
        );
    }

    #[test]
    fn test_auth_error_display_names_the_grant() {
        let err = AuthError::PermissionDenied {
            service: "project".to_string(),
            entity: "car".to_string(),
            operation: "create".to_string(),
        };
        let display = err.to_string();
        assert!(display.contains("create"));
        assert!(display.contains("car"));
    }

    #[test]
    fn test_store_error_missing_reference() {
        let err = StoreError::MissingReference {
            field: "organization_id".to_string(),
            value: "org-9".to_string(),
        };
        assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(err.error_code(), "FOREIGN_KEY_VIOLATION");

        let fleet: FleetError = err.into();
        let details = fleet.to_response().details.expect("details present");
        assert_eq!(details["field"], "organization_id");
    }

    #[test]
    fn test_config_error_display() {
        let err = ConfigError::FileNotFound {
            path: "/etc/fleetdesk.yaml".to_string(),
        };
        assert!(err.to_string().contains("/etc/fleetdesk.yaml"));
    }

    #[test]
    fn test_from_serde_json_error() {
        let json_err = serde_json::from_str::<serde_json::Value>("not json").unwrap_err();
        let fleet: FleetError = json_err.into();
        assert!(matches!(
            fleet,
            FleetError::Validation(ValidationError::InvalidJson { .. })
        ));
    }

    #[test]
    fn test_error_response_round_trips() {
        let err: FleetError = AuthError::NotAuthenticated.into();
        let body = serde_json::to_string(&err.to_response()).expect("serialize should succeed");
        let parsed: ErrorResponse =
            serde_json::from_str(&body).expect("deserialize should succeed");
        assert_eq!(parsed.code, "NOT_AUTHENTICATED");
    }
}
