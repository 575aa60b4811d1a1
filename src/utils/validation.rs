//! Utilidades de validación
//!
//! Este módulo contiene funciones helper para validación de datos
//! y conversión explícita de los parámetros que llegan como texto.

use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use validator::ValidationError;

use crate::utils::errors::{field_errors, validation_error, AppError};

/// Validar y convertir string a datetime
pub fn validate_datetime(value: &str) -> Result<DateTime<Utc>, ValidationError> {
    DateTime::parse_from_rfc3339(value.trim())
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|_| {
            let mut error = ValidationError::new("datetime");
            error.add_param("value".into(), &value.to_string());
            error.add_param("format".into(), &"RFC3339".to_string());
            error
        })
}

/// Validar que un string no esté vacío
pub fn validate_not_empty(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        let mut error = ValidationError::new("not_empty");
        error.add_param("value".into(), &value.to_string());
        return Err(error);
    }
    Ok(())
}

/// Validar que un valor sea positivo
pub fn validate_positive<T: PartialOrd + std::fmt::Display + num_traits::Zero + Serialize>(
    value: T,
) -> Result<(), ValidationError> {
    if value <= T::zero() {
        let mut error = ValidationError::new("positive");
        error.add_param("value".into(), &value);
        return Err(error);
    }
    Ok(())
}

/// Validar que un valor sea no negativo
pub fn validate_non_negative<T: PartialOrd + std::fmt::Display + num_traits::Zero + Serialize>(
    value: T,
) -> Result<(), ValidationError> {
    if value < T::zero() {
        let mut error = ValidationError::new("non_negative");
        error.add_param("value".into(), &value);
        return Err(error);
    }
    Ok(())
}

/// Exigir que un campo opcional esté presente
pub fn require<T>(field: &'static str, value: Option<T>) -> Result<T, AppError> {
    value.ok_or_else(|| validation_error(field, format!("{} is required", field)))
}

/// Convertir un parámetro de texto obligatorio con `FromStr`
pub fn parse_required<T: FromStr>(field: &'static str, value: Option<&str>) -> Result<T, AppError> {
    let raw = require(field, value)?;
    raw.trim()
        .parse::<T>()
        .map_err(|_| validation_error(field, format!("{} has an invalid value '{}'", field, raw)))
}

/// Convertir un timestamp RFC 3339 obligatorio
pub fn parse_required_datetime(field: &'static str, value: Option<&str>) -> Result<DateTime<Utc>, AppError> {
    let raw = require(field, value)?;
    validate_datetime(raw).map_err(|e| {
        AppError::Validation(field_errors(field, e, format!("{} must be an RFC 3339 timestamp", field)))
    })
}

/// Convertir un campo obligatorio del body JSON con un parser explícito.
///
/// Un tipo incorrecto se reporta como error de validación del campo.
pub fn parse_json_field<T, F>(field: &'static str, value: Option<Value>, parse: F) -> Result<T, AppError>
where
    F: FnOnce(Value) -> Result<T, serde_json::Error>,
{
    let raw = require(field, value)?;
    let shown = raw.to_string();
    parse(raw).map_err(|_| validation_error(field, format!("{} has an invalid value {}", field, shown)))
}

/// Igual que `parse_json_field`, usando el `Deserialize` del tipo destino
pub fn json_field<T: DeserializeOwned>(field: &'static str, value: Option<Value>) -> Result<T, AppError> {
    parse_json_field(field, value, serde_json::from_value)
}
