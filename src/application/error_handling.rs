// src/application/error_handling.rs
//
// Maps internal errors to transport-neutral responses
//
// ARCHITECTURE:
// - Validation -> 400, NotFound -> 404, everything else -> 500
// - Domain messages are safe to show; infrastructure details are logged only

use serde::{Deserialize, Serialize};

use crate::error::{AppError, ErrorKind};

/// Standard error response for any transport
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub success: bool,
    pub error_type: ErrorType,
    /// HTTP-style status code
    pub status: u16,
    pub message: String,
    pub details: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorType {
    /// Invalid input (400)
    Validation,

    /// Missing entity or relation (404)
    NotFound,

    /// Storage, pool, configuration or unknown failure (500)
    Internal,
}

impl ErrorType {
    pub fn status(self) -> u16 {
        match self {
            ErrorType::Validation => 400,
            ErrorType::NotFound => 404,
            ErrorType::Internal => 500,
        }
    }
}

impl From<ErrorKind> for ErrorType {
    fn from(kind: ErrorKind) -> Self {
        match kind {
            ErrorKind::Validation => ErrorType::Validation,
            ErrorKind::NotFound => ErrorType::NotFound,
            ErrorKind::Internal => ErrorType::Internal,
        }
    }
}

impl ErrorResponse {
    pub fn from_app_error(error: AppError) -> Self {
        let error_type = ErrorType::from(error.kind());

        match error {
            AppError::Domain(domain_error) => Self {
                success: false,
                error_type,
                status: error_type.status(),
                message: domain_error.to_string(),
                details: None,
            },

            AppError::Database(db_error) => {
                log::error!("Database error: {:?}", db_error);
                Self::internal("Database operation failed")
            }

            AppError::Pool(pool_error) => {
                log::error!("Connection pool error: {}", pool_error);
                Self::internal("Database connection failed")
            }

            AppError::Io(io_error) => {
                log::error!("IO error: {:?}", io_error);
                Self::internal("File system operation failed")
            }

            AppError::Config(message) => {
                log::error!("Configuration error: {}", message);
                Self::internal("Service is misconfigured")
            }

            AppError::Other(message) => {
                log::error!("Other error: {}", message);
                Self::internal("Internal error")
            }
        }
    }

    fn internal(message: &str) -> Self {
        Self {
            success: false,
            error_type: ErrorType::Internal,
            status: 500,
            message: message.to_string(),
            details: Some("Check logs for details".to_string()),
        }
    }
}

/// Helper trait to convert Results into serialized ErrorResponse payloads
pub trait ToErrorResponse<T> {
    fn to_error_response(self) -> Result<T, String>;
}

impl<T> ToErrorResponse<T> for Result<T, AppError> {
    fn to_error_response(self) -> Result<T, String> {
        self.map_err(|e| {
            let error_response = ErrorResponse::from_app_error(e);
            serde_json::to_string(&error_response)
                .unwrap_or_else(|_| "Internal error".to_string())
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::DomainError;

    #[test]
    fn test_validation_maps_to_400() {
        let error = ErrorResponse::from_app_error(AppError::Domain(
            DomainError::InvariantViolation("Film name cannot be empty".to_string()),
        ));
        assert_eq!(error.error_type, ErrorType::Validation);
        assert_eq!(error.status, 400);
        assert!(error.message.contains("Film name cannot be empty"));
    }

    #[test]
    fn test_already_liked_maps_to_400() {
        let error = ErrorResponse::from_app_error(AppError::Domain(DomainError::AlreadyExists(
            "User 1 already liked film 2".to_string(),
        )));
        assert_eq!(error.status, 400);
    }

    #[test]
    fn test_not_found_maps_to_404() {
        let error =
            ErrorResponse::from_app_error(AppError::Domain(DomainError::not_found("MPA", 9999)));
        assert_eq!(error.error_type, ErrorType::NotFound);
        assert_eq!(error.status, 404);
        assert!(error.message.contains("9999"));

        let error = ErrorResponse::from_app_error(AppError::Domain(
            DomainError::MissingReferences {
                entity: "Genre",
                ids: vec![7, 8],
            },
        ));
        assert_eq!(error.status, 404);
    }

    #[test]
    fn test_infrastructure_details_are_hidden() {
        let error = ErrorResponse::from_app_error(AppError::Pool("timed out".to_string()));
        assert_eq!(error.status, 500);
        assert!(!error.message.contains("timed out"));

        let error =
            ErrorResponse::from_app_error(AppError::Database(rusqlite::Error::QueryReturnedNoRows));
        assert_eq!(error.error_type, ErrorType::Internal);
    }

    #[test]
    fn test_to_error_response_serializes() {
        let result: Result<(), AppError> =
            Err(AppError::Domain(DomainError::not_found("User", 3)));
        let json = result.to_error_response().unwrap_err();
        let parsed: ErrorResponse = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed.error_type, ErrorType::NotFound);
        assert_eq!(parsed.status, 404);
    }
}
