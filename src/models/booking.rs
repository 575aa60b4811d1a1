//! Modelo de Booking
//!
//! Reservas de un vehículo sobre una ventana de tiempo semiabierta
//! `[start, end)`. Dos reservas del mismo vehículo nunca se solapan.

use chrono::{DateTime, Duration, Utc};
use sqlx::FromRow;
use uuid::Uuid;

use super::pincode::Pincode;
use super::vehicle::Vehicle;

/// Intervalo semiabierto `[start, end)`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeWindow {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

impl TimeWindow {
    pub fn new(start: DateTime<Utc>, end: DateTime<Utc>) -> Self {
        Self { start, end }
    }

    /// Ventana que empieza en `start` y dura `hours` horas
    pub fn starting_at(start: DateTime<Utc>, hours: u32) -> Self {
        Self {
            start,
            end: start + Duration::hours(i64::from(hours)),
        }
    }

    /// Solapamiento estricto: ventanas que sólo se tocan en un extremo no chocan.
    pub fn overlaps(&self, other: &TimeWindow) -> bool {
        self.start < other.end && self.end > other.start
    }

    pub fn is_empty(&self) -> bool {
        self.end <= self.start
    }

    pub fn duration_hours(&self) -> i64 {
        (self.end - self.start).num_hours()
    }
}

/// Booking principal - mapea a la tabla bookings
#[derive(Debug, Clone, PartialEq, FromRow)]
pub struct Booking {
    pub id: Uuid,
    pub vehicle_id: Uuid,
    pub from_pincode: i32,
    pub to_pincode: i32,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    pub customer_id: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Booking {
    /// Construir el registro que se va a insertar
    pub fn from_new(new: NewBooking, now: DateTime<Utc>) -> Self {
        Self {
            id: Uuid::new_v4(),
            vehicle_id: new.vehicle_id,
            from_pincode: new.from_pincode.value(),
            to_pincode: new.to_pincode.value(),
            start_time: new.window.start,
            end_time: new.window.end,
            customer_id: new.customer_id,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn window(&self) -> TimeWindow {
        TimeWindow::new(self.start_time, self.end_time)
    }
}

/// Reserva validada, con la ventana ya calculada
#[derive(Debug, Clone)]
pub struct NewBooking {
    pub vehicle_id: Uuid,
    pub from_pincode: Pincode,
    pub to_pincode: Pincode,
    pub window: TimeWindow,
    pub customer_id: String,
}

/// Reserva con el vehículo expandido
#[derive(Debug, Clone, PartialEq)]
pub struct BookingDetails {
    pub booking: Booking,
    pub vehicle: Option<Vehicle>,
}
