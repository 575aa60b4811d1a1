//! Sistema de manejo de errores
//!
//! Este módulo define todos los tipos de errores del sistema
//! y su conversión a respuestas HTTP apropiadas.

use std::borrow::Cow;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

/// SQLSTATE de una violación de restricción EXCLUDE en PostgreSQL
const EXCLUSION_VIOLATION: &str = "23P01";

/// Errores principales de la aplicación
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Validation error: {0}")]
    Validation(#[from] validator::ValidationErrors),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Store error: {0}")]
    Store(String),
}

impl From<sqlx::Error> for AppError {
    fn from(err: sqlx::Error) -> Self {
        if let sqlx::Error::Database(db_err) = &err {
            if db_err.code().as_deref() == Some(EXCLUSION_VIOLATION) {
                return AppError::Conflict("Vehicle already booked".to_string());
            }
        }
        AppError::Store(err.to_string())
    }
}

/// Respuesta de error para la API
#[derive(Debug, serde::Serialize)]
struct ErrorResponse {
    error: String,
    message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    details: Option<serde_json::Value>,
    code: String,
}

impl AppError {
    /// Código HTTP asociado a cada variante
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::Validation(_) | AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            // Un solapamiento de reservas se reporta como petición inválida
            AppError::Conflict(_) => StatusCode::BAD_REQUEST,
            AppError::Store(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Etiqueta estable para clientes de la API
    pub fn code(&self) -> &'static str {
        match self {
            AppError::Validation(_) => "VALIDATION_ERROR",
            AppError::BadRequest(_) => "BAD_REQUEST",
            AppError::NotFound(_) => "NOT_FOUND",
            AppError::Conflict(_) => "CONFLICT",
            AppError::Store(_) => "STORE_ERROR",
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let code = self.code().to_string();

        let error_response = match self {
            AppError::Validation(e) => {
                tracing::warn!("Validation error: {}", e);
                ErrorResponse {
                    error: "Validation Error".to_string(),
                    message: e.to_string(),
                    details: Some(json!(e)),
                    code,
                }
            }

            AppError::BadRequest(msg) => {
                tracing::warn!("Bad request: {}", msg);
                ErrorResponse {
                    error: "Bad Request".to_string(),
                    message: msg,
                    details: None,
                    code,
                }
            }

            AppError::NotFound(msg) => {
                tracing::warn!("Resource not found: {}", msg);
                ErrorResponse {
                    error: "Not Found".to_string(),
                    message: msg,
                    details: None,
                    code,
                }
            }

            AppError::Conflict(msg) => {
                tracing::warn!("Conflict: {}", msg);
                ErrorResponse {
                    error: "Conflict".to_string(),
                    message: msg,
                    details: None,
                    code,
                }
            }

            AppError::Store(msg) => {
                tracing::error!("Store error: {}", msg);
                ErrorResponse {
                    error: "Store Error".to_string(),
                    message: msg,
                    details: None,
                    code,
                }
            }
        };

        (status, Json(error_response)).into_response()
    }
}

/// Resultado tipado para operaciones que pueden fallar
pub type AppResult<T> = Result<T, AppError>;

/// Función helper para crear errores de validación sobre un campo
pub fn validation_error(field: &'static str, message: impl Into<Cow<'static, str>>) -> AppError {
    AppError::Validation(field_errors(field, validator::ValidationError::new("custom"), message))
}

/// Agrupa un `ValidationError` suelto bajo el nombre de su campo
pub fn field_errors(
    field: &'static str,
    mut error: validator::ValidationError,
    message: impl Into<Cow<'static, str>>,
) -> validator::ValidationErrors {
    error.message = Some(message.into());
    error.add_param("field".into(), &field);

    let mut errors = validator::ValidationErrors::new();
    errors.add(field, error);
    errors
}

/// Función helper para crear errores de recurso no encontrado
pub fn not_found_error(resource: &str) -> AppError {
    AppError::NotFound(format!("{} not found", resource))
}

/// Función helper para crear errores de solicitud incorrecta
pub fn bad_request_error(message: impl Into<String>) -> AppError {
    AppError::BadRequest(message.into())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        assert_eq!(validation_error("tyres", "tyres is required").status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(not_found_error("Vehicle").status_code(), StatusCode::NOT_FOUND);
        assert_eq!(AppError::Conflict("x".into()).status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(AppError::Store("DB error".into()).status_code(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(bad_request_error("bad json").status_code(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn test_validation_error_names_field() {
        let err = validation_error("tyres", "tyres is required");
        match err {
            AppError::Validation(errors) => {
                let fields = errors.field_errors();
                assert!(fields.contains_key("tyres"));
                assert_eq!(
                    fields["tyres"][0].message.as_deref(),
                    Some("tyres is required")
                );
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn test_not_found_message() {
        assert_eq!(not_found_error("Booking").to_string(), "Not found: Booking not found");
    }

    #[test]
    fn test_plain_sqlx_error_is_store_failure() {
        let err: AppError = sqlx::Error::RowNotFound.into();
        assert_eq!(err.code(), "STORE_ERROR");
        match err {
            AppError::Store(msg) => assert_eq!(msg, sqlx::Error::RowNotFound.to_string()),
            other => panic!("unexpected error: {:?}", other),
        }

        let err: AppError = sqlx::Error::PoolTimedOut.into();
        match err {
            AppError::Store(msg) => assert_eq!(msg, sqlx::Error::PoolTimedOut.to_string()),
            other => panic!("unexpected error: {:?}", other),
        }
    }
}
