use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

use super::vehicle_dto::VehicleResponse;
use crate::models::BookingDetails;

// Request para reservar un vehículo; los campos se convierten en el controlador
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateBookingRequest {
    pub vehicle_id: Option<Value>,
    pub from_pincode: Option<Value>,
    pub to_pincode: Option<Value>,
    pub start_time: Option<Value>,
    pub customer_id: Option<Value>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListBookingsQuery {
    pub customer_id: Option<String>,
}

// Response de reserva con el vehículo expandido
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BookingResponse {
    pub id: Uuid,
    pub vehicle_id: Uuid,
    pub vehicle: Option<VehicleResponse>,
    pub from_pincode: i32,
    pub to_pincode: i32,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    pub customer_id: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<BookingDetails> for BookingResponse {
    fn from(details: BookingDetails) -> Self {
        let booking = details.booking;
        Self {
            id: booking.id,
            vehicle_id: booking.vehicle_id,
            vehicle: details.vehicle.map(VehicleResponse::from),
            from_pincode: booking.from_pincode,
            to_pincode: booking.to_pincode,
            start_time: booking.start_time,
            end_time: booking.end_time,
            customer_id: booking.customer_id,
            created_at: booking.created_at,
            updated_at: booking.updated_at,
        }
    }
}
