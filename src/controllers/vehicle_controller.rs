use std::collections::HashSet;
use std::sync::Arc;

use rust_decimal::Decimal;
use uuid::Uuid;
use validator::Validate;

use crate::dto::vehicle_dto::{
    AvailabilityQuery, AvailableVehicleResponse, AvailableVehiclesResponse, CreateVehicleRequest,
    VehicleFields, VehicleResponse,
};
use crate::models::{NewVehicle, Pincode};
use crate::repositories::{BookingStore, VehicleStore};
use crate::services::duration_service::{booking_window, calculate_duration};
use crate::utils::errors::{field_errors, AppError, AppResult};
use crate::utils::validation::{
    json_field, parse_json_field, parse_required, parse_required_datetime, validate_non_negative,
    validate_positive,
};

pub struct VehicleController {
    vehicles: Arc<dyn VehicleStore>,
    bookings: Arc<dyn BookingStore>,
}

impl VehicleController {
    pub fn new(vehicles: Arc<dyn VehicleStore>, bookings: Arc<dyn BookingStore>) -> Self {
        Self { vehicles, bookings }
    }

    pub async fn register(&self, request: CreateVehicleRequest) -> AppResult<VehicleResponse> {
        let name: String = json_field("name", request.name)?;
        let fields = VehicleFields {
            name: name.trim().to_string(),
            capacity_kg: parse_json_field("capacityKg", request.capacity_kg, |v| {
                rust_decimal::serde::float::deserialize(v)
            })?,
            tyres: json_field("tyres", request.tyres)?,
        };
        fields.validate()?;
        validate_positive(fields.capacity_kg).map_err(|e| {
            AppError::Validation(field_errors("capacityKg", e, "capacityKg must be greater than zero"))
        })?;
        let VehicleFields { name, capacity_kg, tyres } = fields;

        let vehicle = self
            .vehicles
            .create(NewVehicle {
                name,
                capacity_kg,
                tyres,
            })
            .await?;

        tracing::info!(vehicle_id = %vehicle.id, "✅ Vehículo registrado");
        Ok(VehicleResponse::from(vehicle))
    }

    /// Vehículos con capacidad suficiente y sin reservas que solapen la ventana del trayecto
    pub async fn find_available(&self, query: AvailabilityQuery) -> AppResult<AvailableVehiclesResponse> {
        let capacity: Decimal = parse_required("capacityRequired", query.capacity_required.as_deref())?;
        validate_non_negative(capacity).map_err(|e| {
            AppError::Validation(field_errors(
                "capacityRequired",
                e,
                "capacityRequired must not be negative",
            ))
        })?;
        let from: Pincode = parse_required("fromPincode", query.from_pincode.as_deref())?;
        let to: Pincode = parse_required("toPincode", query.to_pincode.as_deref())?;
        let start = parse_required_datetime("startTime", query.start_time.as_deref())?;

        let duration = calculate_duration(from, to);
        let window = booking_window(start, from, to);

        let vehicles = self.vehicles.find_with_min_capacity(capacity).await?;
        let booked: HashSet<Uuid> = self
            .bookings
            .find_overlapping(&window, None)
            .await?
            .into_iter()
            .map(|b| b.vehicle_id)
            .collect();

        let available: Vec<AvailableVehicleResponse> = vehicles
            .into_iter()
            .filter(|v| !booked.contains(&v.id))
            .map(|v| AvailableVehicleResponse {
                vehicle: VehicleResponse::from(v),
                estimated_ride_duration_hours: duration,
            })
            .collect();

        tracing::debug!(
            capacity = %capacity,
            start = %window.start,
            end = %window.end,
            count = available.len(),
            "🔍 Consulta de disponibilidad"
        );

        Ok(AvailableVehiclesResponse { available })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repositories::InMemoryStore;
    use serde_json::json;

    fn controller() -> VehicleController {
        let store = Arc::new(InMemoryStore::new());
        VehicleController::new(store.clone(), store)
    }

    fn request(capacity: serde_json::Value, tyres: serde_json::Value) -> CreateVehicleRequest {
        CreateVehicleRequest {
            name: Some(json!(" Truck A ")),
            capacity_kg: Some(capacity),
            tyres: Some(tyres),
        }
    }

    fn invalid_field(result: AppResult<VehicleResponse>) -> String {
        match result {
            Err(AppError::Validation(errors)) => {
                let fields: Vec<&str> = errors.field_errors().keys().copied().collect();
                fields.join(",")
            }
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_register_trims_name() {
        let vehicle = controller().register(request(json!(1000.5), json!(6))).await.unwrap();
        assert_eq!(vehicle.name, "Truck A");
        assert_eq!(vehicle.capacity_kg, Decimal::new(10005, 1));
        assert_eq!(vehicle.tyres, 6);
    }

    #[tokio::test]
    async fn test_register_reports_the_offending_field() {
        let controller = controller();
        assert_eq!(invalid_field(controller.register(request(json!(1000), json!("four"))).await), "tyres");
        assert_eq!(invalid_field(controller.register(request(json!(1000), json!(0))).await), "tyres");
        assert_eq!(invalid_field(controller.register(request(json!("heavy"), json!(6))).await), "capacityKg");
        assert_eq!(invalid_field(controller.register(request(json!(-1), json!(6))).await), "capacityKg");

        let mut blank = request(json!(1000), json!(6));
        blank.name = Some(json!("   "));
        assert_eq!(invalid_field(controller.register(blank).await), "name");
    }
}
