use std::sync::Arc;

use uuid::Uuid;

use crate::dto::booking_dto::{BookingResponse, CreateBookingRequest};
use crate::models::{NewBooking, Pincode, TimeWindow};
use crate::repositories::{BookingStore, VehicleStore};
use crate::services::duration_service::booking_window;
use crate::utils::errors::{field_errors, not_found_error, validation_error, AppError, AppResult};
use crate::utils::validation::{json_field, parse_required_datetime, require, validate_not_empty};

pub struct BookingController {
    vehicles: Arc<dyn VehicleStore>,
    bookings: Arc<dyn BookingStore>,
}

impl BookingController {
    pub fn new(vehicles: Arc<dyn VehicleStore>, bookings: Arc<dyn BookingStore>) -> Self {
        Self { vehicles, bookings }
    }

    pub async fn create(&self, request: CreateBookingRequest) -> AppResult<BookingResponse> {
        let vehicle_id: String = json_field("vehicleId", request.vehicle_id)?;
        let from: Pincode = json_field("fromPincode", request.from_pincode)?;
        let to: Pincode = json_field("toPincode", request.to_pincode)?;
        let start_time: String = json_field("startTime", request.start_time)?;
        let start = parse_required_datetime("startTime", Some(&start_time))?;
        let customer_id: String = json_field("customerId", request.customer_id)?;
        validate_not_empty(&customer_id).map_err(|e| {
            AppError::Validation(field_errors("customerId", e, "customerId must not be blank"))
        })?;

        // Un identificador mal formado no puede resolver a ningún vehículo
        let vehicle_id = Uuid::parse_str(vehicle_id.trim()).map_err(|_| not_found_error("Vehicle"))?;
        if self.vehicles.find_by_id(vehicle_id).await?.is_none() {
            return Err(not_found_error("Vehicle"));
        }

        let window = booking_window(start, from, to);
        if window.is_empty() {
            return Err(validation_error(
                "toPincode",
                "estimated ride duration is zero hours; the booking window would be empty",
            ));
        }

        let details = self
            .bookings
            .create_if_available(NewBooking {
                vehicle_id,
                from_pincode: from,
                to_pincode: to,
                window,
                customer_id,
            })
            .await
            .map_err(|e| {
                if let AppError::Conflict(_) = &e {
                    tracing::warn!(%vehicle_id, start = %window.start, end = %window.end, "⚠️ Reserva rechazada por solapamiento");
                }
                e
            })?;

        tracing::info!(
            booking_id = %details.booking.id,
            %vehicle_id,
            hours = window.duration_hours(),
            "✅ Reserva creada"
        );
        Ok(BookingResponse::from(details))
    }

    /// ¿Hay alguna reserva de este vehículo que solape la ventana?
    pub async fn has_conflict(&self, vehicle_id: Uuid, window: &TimeWindow) -> AppResult<bool> {
        let overlapping = self.bookings.find_overlapping(window, Some(vehicle_id)).await?;
        Ok(!overlapping.is_empty())
    }

    pub async fn list_by_customer(&self, customer_id: Option<String>) -> AppResult<Vec<BookingResponse>> {
        let customer_id = require("customerId", customer_id)?;
        validate_not_empty(&customer_id).map_err(|e| {
            AppError::Validation(field_errors("customerId", e, "customerId must not be blank"))
        })?;

        let bookings = self.bookings.find_by_customer(&customer_id).await?;
        Ok(bookings.into_iter().map(BookingResponse::from).collect())
    }

    pub async fn cancel(&self, id: &str) -> AppResult<()> {
        let id = Uuid::parse_str(id.trim()).map_err(|_| not_found_error("Booking"))?;

        match self.bookings.delete(id).await? {
            Some(booking) => {
                tracing::info!(booking_id = %booking.id, vehicle_id = %booking.vehicle_id, "🗑️ Reserva cancelada");
                Ok(())
            }
            None => Err(not_found_error("Booking")),
        }
    }
}
