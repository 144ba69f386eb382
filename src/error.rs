// src/error.rs - Error taxonomy for the admin client

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

use crate::types::{CorrelationId, Metadata};

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl fmt::Display for ErrorSeverity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Low => write!(f, "LOW"),
            Self::Medium => write!(f, "MEDIUM"),
            Self::High => write!(f, "HIGH"),
            Self::Critical => write!(f, "CRITICAL"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ErrorKind {
    Configuration {
        key: Option<String>,
        validation_errors: Vec<String>,
    },
    /// Client-side form validation; never reaches the network
    Validation {
        field: Option<String>,
        rules: Vec<String>,
    },
    /// Transport failure (`status_code == None`) or non-success HTTP status
    Network {
        status_code: Option<u16>,
        endpoint: Option<String>,
    },
    NotFound {
        resource: String,
        id: Option<String>,
    },
    Upload {
        filename: Option<String>,
    },
    /// A screen already has a request in flight
    Busy {
        screen: String,
    },
    Workflow {
        from: String,
        action: String,
    },
    Application,
    Io,
    Serialization,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Error {
    pub id: Uuid,
    pub kind: ErrorKind,
    pub message: String,
    pub severity: ErrorSeverity,
    pub source: String,
    pub correlation_id: Option<CorrelationId>,
    pub timestamp: DateTime<Utc>,
    pub metadata: Metadata,
    pub causes: Vec<String>,
}

impl Error {
    /// Creates a new error with the specified kind and message
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            kind,
            message: message.into(),
            severity: ErrorSeverity::Medium,
            source: "unknown".to_string(),
            correlation_id: None,
            timestamp: Utc::now(),
            metadata: std::collections::HashMap::new(),
            causes: Vec::new(),
        }
    }

    /// Sets the error severity
    pub fn severity(mut self, severity: ErrorSeverity) -> Self {
        self.severity = severity;
        self
    }

    /// Sets the error source
    pub fn source(mut self, source: impl Into<String>) -> Self {
        self.source = source.into();
        self
    }

    /// Sets the correlation ID
    pub fn correlation_id(mut self, correlation_id: CorrelationId) -> Self {
        self.correlation_id = Some(correlation_id);
        self
    }

    /// Adds metadata to the error
    pub fn metadata(mut self, key: impl Into<String>, value: serde_json::Value) -> Self {
        self.metadata.insert(key.into(), value);
        self
    }

    /// Adds a cause to the error chain
    pub fn caused_by(mut self, cause: impl fmt::Display) -> Self {
        self.causes.push(cause.to_string());
        self
    }

    /// Creates a configuration error
    pub fn config(message: impl Into<String>) -> Self {
        Self::new(
            ErrorKind::Configuration {
                key: None,
                validation_errors: Vec::new(),
            },
            message,
        )
        .severity(ErrorSeverity::High)
    }

    /// Creates a configuration error for a specific key
    pub fn config_key(
        key: impl Into<String>,
        validation_errors: Vec<String>,
        message: impl Into<String>,
    ) -> Self {
        Self::new(
            ErrorKind::Configuration {
                key: Some(key.into()),
                validation_errors,
            },
            message,
        )
        .severity(ErrorSeverity::High)
    }

    /// Creates a validation error for a single field
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        let message = message.into();
        Self::new(
            ErrorKind::Validation {
                field: Some(field.into()),
                rules: vec![message.clone()],
            },
            message,
        )
        .severity(ErrorSeverity::Low)
    }

    /// Creates a transport-level error (no HTTP status available)
    pub fn network(endpoint: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(
            ErrorKind::Network {
                status_code: None,
                endpoint: Some(endpoint.into()),
            },
            message,
        )
    }

    /// Creates an error for a non-success HTTP status
    pub fn http(status_code: u16, endpoint: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(
            ErrorKind::Network {
                status_code: Some(status_code),
                endpoint: Some(endpoint.into()),
            },
            message,
        )
    }

    /// Creates a not-found error
    pub fn not_found(resource: impl Into<String>, id: Option<String>) -> Self {
        let resource = resource.into();
        let message = match &id {
            Some(id) => format!("{} {} not found", resource, id),
            None => format!("{} not found", resource),
        };
        Self::new(ErrorKind::NotFound { resource, id }, message).severity(ErrorSeverity::Low)
    }

    /// Creates an image upload error
    pub fn upload(filename: Option<String>, message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Upload { filename }, message)
    }

    /// Creates a busy error for a screen with a request in flight
    pub fn busy(screen: impl Into<String>) -> Self {
        let screen = screen.into();
        let message = format!("{} is busy with another request", screen);
        Self::new(ErrorKind::Busy { screen }, message).severity(ErrorSeverity::Low)
    }

    /// Creates a workflow error for an action the status gate does not offer
    pub fn workflow(from: impl Into<String>, action: impl Into<String>) -> Self {
        let from = from.into();
        let action = action.into();
        let message = format!("action '{}' is not available from status {}", action, from);
        Self::new(ErrorKind::Workflow { from, action }, message).severity(ErrorSeverity::Low)
    }

    /// Creates a serialization error
    pub fn serialization(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Serialization, message)
    }

    /// HTTP status carried by a network error, if any
    pub fn status_code(&self) -> Option<u16> {
        match &self.kind {
            ErrorKind::Network { status_code, .. } => *status_code,
            _ => None,
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self.kind, ErrorKind::NotFound { .. })
    }

    pub fn is_validation(&self) -> bool {
        matches!(self.kind, ErrorKind::Validation { .. })
    }

    /// Checks if the error is critical
    pub fn is_critical(&self) -> bool {
        matches!(self.severity, ErrorSeverity::Critical)
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[{}] {} ({}): {}",
            self.severity, self.source, self.id, self.message
        )
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        None
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        let msg = err.to_string();

        let mut error = Error::new(ErrorKind::Io, msg);
        error.source = "std::io::Error".to_string();
        error.severity = ErrorSeverity::High;

        error
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::serialization(err.to_string()).source("serde_json")
    }
}

impl From<crate::forms::FieldErrors> for Error {
    fn from(errors: crate::forms::FieldErrors) -> Self {
        let field = errors.fields().next().map(str::to_string);
        let rules = errors.messages().map(str::to_string).collect();
        Error::new(
            ErrorKind::Validation { field, rules },
            errors.to_string(),
        )
        .severity(ErrorSeverity::Low)
        .source("form_validator")
    }
}

/// Extension trait for Results to add context
pub trait ResultExt<T> {
    /// Adds context to an error
    fn with_context<F>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> String;

    /// Sets the error source
    fn with_source(self, source: impl Into<String>) -> Result<T>;

    /// Sets the correlation ID
    fn with_correlation(self, correlation_id: CorrelationId) -> Result<T>;
}

impl<T, E> ResultExt<T> for std::result::Result<T, E>
where
    E: std::error::Error + Send + Sync + 'static,
{
    fn with_context<F>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> String,
    {
        self.map_err(|e| Error::new(ErrorKind::Application, f()).caused_by(e))
    }

    fn with_source(self, source: impl Into<String>) -> Result<T> {
        self.map_err(|e| {
            Error::new(ErrorKind::Application, e.to_string())
                .source(source)
                .caused_by(e)
        })
    }

    fn with_correlation(self, correlation_id: CorrelationId) -> Result<T> {
        self.map_err(|e| {
            Error::new(ErrorKind::Application, e.to_string())
                .correlation_id(correlation_id)
                .caused_by(e)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_creation() {
        let error = Error::config("Invalid base url")
            .source("config_manager")
            .metadata("key", serde_json::Value::String("api.base_url".to_string()));

        assert_eq!(error.severity, ErrorSeverity::High);
        assert_eq!(error.source, "config_manager");
        assert!(matches!(error.kind, ErrorKind::Configuration { .. }));
        assert!(error.metadata.contains_key("key"));
    }

    #[test]
    fn test_http_error_carries_status() {
        let error = Error::http(502, "/products/admin/all", "bad gateway");
        assert_eq!(error.status_code(), Some(502));
        assert!(!error.is_not_found());

        let transport = Error::network("/products/admin/all", "connection refused");
        assert_eq!(transport.status_code(), None);
    }

    #[test]
    fn test_not_found_message() {
        let error = Error::not_found("tracking", Some("42".to_string()));
        assert!(error.is_not_found());
        assert_eq!(error.message, "tracking 42 not found");
    }

    #[test]
    fn test_error_context() {
        let io_error: std::result::Result<(), std::io::Error> = Err(std::io::Error::new(
            std::io::ErrorKind::NotFound,
            "File not found",
        ));

        let result = io_error.with_context(|| "Failed to read image".to_string());
        let error = result.unwrap_err();
        assert_eq!(error.message, "Failed to read image");
        assert_eq!(error.causes.len(), 1);
    }
}
