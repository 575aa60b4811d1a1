//! Servicios de negocio
//!
//! Lógica pura que no depende del almacenamiento.

pub mod duration_service;

pub use duration_service::{booking_window, calculate_duration};
