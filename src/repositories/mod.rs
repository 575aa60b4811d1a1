//! Acceso a datos
//!
//! Los controladores sólo conocen los traits `VehicleStore` y `BookingStore`;
//! la implementación concreta (PostgreSQL o memoria) se inyecta en `AppState`.

pub mod booking_repository;
pub mod memory_repository;
pub mod vehicle_repository;

use async_trait::async_trait;
use rust_decimal::Decimal;
use uuid::Uuid;

use crate::models::{Booking, BookingDetails, NewBooking, NewVehicle, TimeWindow, Vehicle};
use crate::utils::errors::AppResult;

pub use booking_repository::BookingRepository;
pub use memory_repository::InMemoryStore;
pub use vehicle_repository::VehicleRepository;

/// Almacenamiento de vehículos
#[async_trait]
pub trait VehicleStore: Send + Sync {
    async fn create(&self, vehicle: NewVehicle) -> AppResult<Vehicle>;

    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Vehicle>>;

    /// Vehículos con `capacity_kg >= capacity`
    async fn find_with_min_capacity(&self, capacity: Decimal) -> AppResult<Vec<Vehicle>>;
}

/// Almacenamiento de reservas
#[async_trait]
pub trait BookingStore: Send + Sync {
    /// Reservas que solapan `window`, de un vehículo concreto o de todos
    async fn find_overlapping(
        &self,
        window: &TimeWindow,
        vehicle_id: Option<Uuid>,
    ) -> AppResult<Vec<Booking>>;

    /// Comprueba conflictos e inserta como una sola operación atómica.
    ///
    /// Falla con `NotFound` si el vehículo no existe y con `Conflict` si ya
    /// hay una reserva del mismo vehículo que solapa la ventana.
    async fn create_if_available(&self, booking: NewBooking) -> AppResult<BookingDetails>;

    /// Reservas de un cliente, de la más reciente a la más antigua
    async fn find_by_customer(&self, customer_id: &str) -> AppResult<Vec<BookingDetails>>;

    /// Devuelve la reserva eliminada, o `None` si no existía
    async fn delete(&self, id: Uuid) -> AppResult<Option<Booking>>;
}
