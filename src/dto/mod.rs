//! DTOs de la API
//!
//! Formas JSON de entrada y salida (camelCase), separadas de los modelos
//! persistidos.

pub mod booking_dto;
pub mod vehicle_dto;

pub use booking_dto::{BookingResponse, CreateBookingRequest, ListBookingsQuery};
pub use vehicle_dto::{
    AvailabilityQuery, AvailableVehicleResponse, AvailableVehiclesResponse, CreateVehicleRequest,
    VehicleFields, VehicleResponse,
};
