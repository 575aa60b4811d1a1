use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;
use validator::Validate;

use crate::models::Vehicle;

// Request para registrar un vehículo; cada campo llega como JSON crudo y se
// convierte explícitamente para que un tipo incorrecto sea un error de validación
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateVehicleRequest {
    pub name: Option<Value>,
    pub capacity_kg: Option<Value>,
    pub tyres: Option<Value>,
}

// Campos del registro ya convertidos
#[derive(Debug, Validate)]
pub struct VehicleFields {
    #[validate(length(min = 1, max = 100))]
    pub name: String,

    pub capacity_kg: Decimal,

    #[validate(range(min = 1))]
    pub tyres: i32,
}

// Query de disponibilidad; todo llega como texto y se convierte explícitamente
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AvailabilityQuery {
    pub capacity_required: Option<String>,
    pub from_pincode: Option<String>,
    pub to_pincode: Option<String>,
    pub start_time: Option<String>,
}

// Response de vehículo
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VehicleResponse {
    pub id: Uuid,
    pub name: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub capacity_kg: Decimal,
    pub tyres: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

// Vehículo disponible con la duración estimada del trayecto
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AvailableVehicleResponse {
    #[serde(flatten)]
    pub vehicle: VehicleResponse,
    pub estimated_ride_duration_hours: u32,
}

#[derive(Debug, Serialize)]
pub struct AvailableVehiclesResponse {
    pub available: Vec<AvailableVehicleResponse>,
}

impl From<Vehicle> for VehicleResponse {
    fn from(vehicle: Vehicle) -> Self {
        Self {
            id: vehicle.id,
            name: vehicle.name,
            capacity_kg: vehicle.capacity_kg,
            tyres: vehicle.tyres,
            created_at: vehicle.created_at,
            updated_at: vehicle.updated_at,
        }
    }
}
