//! Modelos del sistema
//!
//! Este módulo contiene los modelos de datos que mapean
//! al schema PostgreSQL (ver `migrations/`).

pub mod booking;
pub mod pincode;
pub mod vehicle;

pub use booking::{Booking, BookingDetails, NewBooking, TimeWindow};
pub use pincode::Pincode;
pub use vehicle::{NewVehicle, Vehicle};
