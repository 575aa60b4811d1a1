use async_trait::async_trait;
use chrono::Utc;
use rust_decimal::Decimal;
use sqlx::PgPool;
use uuid::Uuid;

use super::VehicleStore;
use crate::models::{NewVehicle, Vehicle};
use crate::utils::errors::AppResult;

pub struct VehicleRepository {
    pool: PgPool,
}

impl VehicleRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl VehicleStore for VehicleRepository {
    async fn create(&self, vehicle: NewVehicle) -> AppResult<Vehicle> {
        let record = Vehicle::from_new(vehicle, Utc::now());

        let vehicle = sqlx::query_as::<_, Vehicle>(
            r#"
            INSERT INTO vehicles (id, name, capacity_kg, tyres, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING *
            "#
        )
        .bind(record.id)
        .bind(record.name)
        .bind(record.capacity_kg)
        .bind(record.tyres)
        .bind(record.created_at)
        .bind(record.updated_at)
        .fetch_one(&self.pool)
        .await?;

        Ok(vehicle)
    }

    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Vehicle>> {
        let vehicle = sqlx::query_as::<_, Vehicle>("SELECT * FROM vehicles WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(vehicle)
    }

    async fn find_with_min_capacity(&self, capacity: Decimal) -> AppResult<Vec<Vehicle>> {
        let vehicles = sqlx::query_as::<_, Vehicle>(
            "SELECT * FROM vehicles WHERE capacity_kg >= $1 ORDER BY created_at ASC"
        )
        .bind(capacity)
        .fetch_all(&self.pool)
        .await?;

        Ok(vehicles)
    }
}
