use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Error, Debug, Clone, Serialize, Deserialize)]
pub enum FabricaError {
    #[error("Catalog error: {message}")]
    Catalog { message: String },

    #[error("Database error: {message}")]
    Database { message: String },

    #[error("Validation error: {field} - {message}")]
    Validation { field: String, message: String },

    #[error("Not an assembly: {identifier}")]
    NotAnAssembly { identifier: String },

    #[error("Not found: {resource}")]
    NotFound { resource: String },

    #[error("Configuration error: {message}")]
    Configuration { message: String },

    #[error("Internal server error: {message}")]
    Internal { message: String },
}

impl FabricaError {
    pub fn catalog(message: impl Into<String>) -> Self {
        Self::Catalog {
            message: message.into(),
        }
    }

    pub fn database(message: impl Into<String>) -> Self {
        Self::Database {
            message: message.into(),
        }
    }

    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Validation {
            field: field.into(),
            message: message.into(),
        }
    }

    pub fn not_an_assembly(identifier: impl Into<String>) -> Self {
        Self::NotAnAssembly {
            identifier: identifier.into(),
        }
    }

    pub fn not_found(resource: impl Into<String>) -> Self {
        Self::NotFound {
            resource: resource.into(),
        }
    }

    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }

    pub fn error_code(&self) -> &'static str {
        match self {
            Self::Catalog { .. } => "CATALOG_ERROR",
            Self::Database { .. } => "DATABASE_ERROR",
            Self::Validation { .. } => "VALIDATION_ERROR",
            Self::NotAnAssembly { .. } => "NOT_AN_ASSEMBLY",
            Self::NotFound { .. } => "NOT_FOUND",
            Self::Configuration { .. } => "CONFIGURATION_ERROR",
            Self::Internal { .. } => "INTERNAL_SERVER_ERROR",
        }
    }

    pub fn http_status_code(&self) -> u16 {
        match self {
            Self::Catalog { .. } => 500,
            Self::Database { .. } => 500,
            Self::Validation { .. } => 400,
            Self::NotAnAssembly { .. } => 400,
            Self::NotFound { .. } => 404,
            Self::Configuration { .. } => 500,
            Self::Internal { .. } => 500,
        }
    }
}

pub type FabricaResult<T> = Result<T, FabricaError>;

#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    pub code: String,
    pub message: String,
    pub details: Option<serde_json::Value>,
}

impl From<FabricaError> for ErrorResponse {
    fn from(error: FabricaError) -> Self {
        Self {
            error: error.to_string(),
            code: error.error_code().to_string(),
            message: error.to_string(),
            details: None,
        }
    }
}

// Conversion from common error types
impl From<sqlx::Error> for FabricaError {
    fn from(error: sqlx::Error) -> Self {
        Self::database(error.to_string())
    }
}

impl From<std::io::Error> for FabricaError {
    fn from(error: std::io::Error) -> Self {
        Self::catalog(error.to_string())
    }
}

impl From<serde_json::Error> for FabricaError {
    fn from(error: serde_json::Error) -> Self {
        Self::validation("JSON", error.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_errors_are_distinguishable() {
        let not_found = FabricaError::not_found("part PCA-MISSING");
        let not_assembly = FabricaError::not_an_assembly("RES-001");

        assert_eq!(not_found.http_status_code(), 404);
        assert_eq!(not_assembly.http_status_code(), 400);
        assert_ne!(not_found.error_code(), not_assembly.error_code());
    }

    #[test]
    fn test_error_response_carries_code() {
        let response: ErrorResponse = FabricaError::catalog("root unreadable").into();
        assert_eq!(response.code, "CATALOG_ERROR");
        assert!(response.message.contains("root unreadable"));
    }
}
