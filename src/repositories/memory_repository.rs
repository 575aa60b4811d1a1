//! Almacenamiento en memoria
//!
//! Implementa `VehicleStore` y `BookingStore` sobre un `RwLock` de tokio.
//! Se usa en desarrollo (`STORE_BACKEND=memory`) y en los tests.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use rust_decimal::Decimal;
use tokio::sync::RwLock;
use uuid::Uuid;

use super::{BookingStore, VehicleStore};
use crate::models::{Booking, BookingDetails, NewBooking, NewVehicle, TimeWindow, Vehicle};
use crate::utils::errors::{not_found_error, AppError, AppResult};

#[derive(Debug, Default)]
struct Tables {
    vehicles: Vec<Vehicle>,
    bookings: Vec<Booking>,
}

impl Tables {
    fn vehicle(&self, id: Uuid) -> Option<&Vehicle> {
        self.vehicles.iter().find(|v| v.id == id)
    }

    fn details(&self, booking: &Booking) -> BookingDetails {
        BookingDetails {
            booking: booking.clone(),
            vehicle: self.vehicle(booking.vehicle_id).cloned(),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct InMemoryStore {
    tables: Arc<RwLock<Tables>>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl VehicleStore for InMemoryStore {
    async fn create(&self, vehicle: NewVehicle) -> AppResult<Vehicle> {
        let record = Vehicle::from_new(vehicle, Utc::now());
        self.tables.write().await.vehicles.push(record.clone());
        Ok(record)
    }

    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Vehicle>> {
        Ok(self.tables.read().await.vehicle(id).cloned())
    }

    async fn find_with_min_capacity(&self, capacity: Decimal) -> AppResult<Vec<Vehicle>> {
        let tables = self.tables.read().await;
        Ok(tables
            .vehicles
            .iter()
            .filter(|v| v.meets_capacity(capacity))
            .cloned()
            .collect())
    }
}

#[async_trait]
impl BookingStore for InMemoryStore {
    async fn find_overlapping(
        &self,
        window: &TimeWindow,
        vehicle_id: Option<Uuid>,
    ) -> AppResult<Vec<Booking>> {
        let tables = self.tables.read().await;
        Ok(tables
            .bookings
            .iter()
            .filter(|b| vehicle_id.map_or(true, |id| b.vehicle_id == id))
            .filter(|b| b.window().overlaps(window))
            .cloned()
            .collect())
    }

    async fn create_if_available(&self, booking: NewBooking) -> AppResult<BookingDetails> {
        // Comprobación e inserción bajo el mismo guard de escritura
        let mut tables = self.tables.write().await;

        let vehicle = tables
            .vehicle(booking.vehicle_id)
            .cloned()
            .ok_or_else(|| not_found_error("Vehicle"))?;

        let conflict = tables
            .bookings
            .iter()
            .any(|b| b.vehicle_id == booking.vehicle_id && b.window().overlaps(&booking.window));
        if conflict {
            return Err(AppError::Conflict("Vehicle already booked".to_string()));
        }

        let record = Booking::from_new(booking, Utc::now());
        tables.bookings.push(record.clone());

        Ok(BookingDetails {
            booking: record,
            vehicle: Some(vehicle),
        })
    }

    async fn find_by_customer(&self, customer_id: &str) -> AppResult<Vec<BookingDetails>> {
        let tables = self.tables.read().await;
        let mut bookings: Vec<&Booking> = tables
            .bookings
            .iter()
            .filter(|b| b.customer_id == customer_id)
            .collect();
        bookings.sort_by(|a, b| {
            b.start_time
                .cmp(&a.start_time)
                .then_with(|| b.created_at.cmp(&a.created_at))
        });

        Ok(bookings.into_iter().map(|b| tables.details(b)).collect())
    }

    async fn delete(&self, id: Uuid) -> AppResult<Option<Booking>> {
        let mut tables = self.tables.write().await;
        let position = tables.bookings.iter().position(|b| b.id == id);
        Ok(position.map(|index| tables.bookings.remove(index)))
    }
}
