//! Modelo de Vehicle
//!
//! Este módulo contiene el struct Vehicle tal como se persiste.
//! Mapea exactamente a la tabla `vehicles` con primary key 'id'.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sqlx::FromRow;
use uuid::Uuid;

/// Vehicle principal - mapea a la tabla vehicles
#[derive(Debug, Clone, PartialEq, FromRow)]
pub struct Vehicle {
    pub id: Uuid,
    pub name: String,
    pub capacity_kg: Decimal,
    pub tyres: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Datos ya validados para registrar un vehículo
#[derive(Debug, Clone)]
pub struct NewVehicle {
    pub name: String,
    pub capacity_kg: Decimal,
    pub tyres: i32,
}

impl Vehicle {
    /// Construir el registro que se va a insertar
    pub fn from_new(new: NewVehicle, now: DateTime<Utc>) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: new.name,
            capacity_kg: new.capacity_kg,
            tyres: new.tyres,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn meets_capacity(&self, capacity_floor: Decimal) -> bool {
        self.capacity_kg >= capacity_floor
    }
}
