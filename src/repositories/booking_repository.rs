use async_trait::async_trait;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sqlx::PgPool;
use uuid::Uuid;

use super::BookingStore;
use crate::models::{Booking, BookingDetails, NewBooking, TimeWindow, Vehicle};
use crate::utils::errors::{not_found_error, AppError, AppResult};

// Reserva + columnas del vehículo (LEFT JOIN)
#[derive(Debug, sqlx::FromRow)]
struct BookingWithVehicleRow {
    id: Uuid,
    vehicle_id: Uuid,
    from_pincode: i32,
    to_pincode: i32,
    start_time: DateTime<Utc>,
    end_time: DateTime<Utc>,
    customer_id: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
    vehicle_name: Option<String>,
    vehicle_capacity_kg: Option<Decimal>,
    vehicle_tyres: Option<i32>,
    vehicle_created_at: Option<DateTime<Utc>>,
    vehicle_updated_at: Option<DateTime<Utc>>,
}

impl From<BookingWithVehicleRow> for BookingDetails {
    fn from(row: BookingWithVehicleRow) -> Self {
        let vehicle = match (
            row.vehicle_name,
            row.vehicle_capacity_kg,
            row.vehicle_tyres,
            row.vehicle_created_at,
            row.vehicle_updated_at,
        ) {
            (Some(name), Some(capacity_kg), Some(tyres), Some(created_at), Some(updated_at)) => Some(Vehicle {
                id: row.vehicle_id,
                name,
                capacity_kg,
                tyres,
                created_at,
                updated_at,
            }),
            _ => None,
        };

        BookingDetails {
            booking: Booking {
                id: row.id,
                vehicle_id: row.vehicle_id,
                from_pincode: row.from_pincode,
                to_pincode: row.to_pincode,
                start_time: row.start_time,
                end_time: row.end_time,
                customer_id: row.customer_id,
                created_at: row.created_at,
                updated_at: row.updated_at,
            },
            vehicle,
        }
    }
}

pub struct BookingRepository {
    pool: PgPool,
}

impl BookingRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl BookingStore for BookingRepository {
    async fn find_overlapping(
        &self,
        window: &TimeWindow,
        vehicle_id: Option<Uuid>,
    ) -> AppResult<Vec<Booking>> {
        let bookings = sqlx::query_as::<_, Booking>(
            r#"
            SELECT * FROM bookings
            WHERE start_time < $2 AND end_time > $1
              AND ($3::uuid IS NULL OR vehicle_id = $3)
            "#
        )
        .bind(window.start)
        .bind(window.end)
        .bind(vehicle_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(bookings)
    }

    async fn create_if_available(&self, booking: NewBooking) -> AppResult<BookingDetails> {
        let record = Booking::from_new(booking, Utc::now());
        let window = record.window();

        let mut tx = self.pool.begin().await?;

        // Bloquear la fila del vehículo serializa las reservas concurrentes del mismo vehículo
        let vehicle = sqlx::query_as::<_, Vehicle>("SELECT * FROM vehicles WHERE id = $1 FOR UPDATE")
            .bind(record.vehicle_id)
            .fetch_optional(&mut *tx)
            .await?
            .ok_or_else(|| not_found_error("Vehicle"))?;

        let (conflict,): (bool,) = sqlx::query_as(
            r#"
            SELECT EXISTS(
                SELECT 1 FROM bookings
                WHERE vehicle_id = $1 AND start_time < $3 AND end_time > $2
            )
            "#
        )
        .bind(record.vehicle_id)
        .bind(window.start)
        .bind(window.end)
        .fetch_one(&mut *tx)
        .await?;

        if conflict {
            return Err(AppError::Conflict("Vehicle already booked".to_string()));
        }

        // La restricción EXCLUDE de la tabla devuelve 23P01 → Conflict
        let stored = sqlx::query_as::<_, Booking>(
            r#"
            INSERT INTO bookings (id, vehicle_id, from_pincode, to_pincode, start_time, end_time, customer_id, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            RETURNING *
            "#
        )
        .bind(record.id)
        .bind(record.vehicle_id)
        .bind(record.from_pincode)
        .bind(record.to_pincode)
        .bind(record.start_time)
        .bind(record.end_time)
        .bind(&record.customer_id)
        .bind(record.created_at)
        .bind(record.updated_at)
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;

        Ok(BookingDetails {
            booking: stored,
            vehicle: Some(vehicle),
        })
    }

    async fn find_by_customer(&self, customer_id: &str) -> AppResult<Vec<BookingDetails>> {
        let rows = sqlx::query_as::<_, BookingWithVehicleRow>(
            r#"
            SELECT b.*,
                   v.name AS vehicle_name,
                   v.capacity_kg AS vehicle_capacity_kg,
                   v.tyres AS vehicle_tyres,
                   v.created_at AS vehicle_created_at,
                   v.updated_at AS vehicle_updated_at
            FROM bookings b
            LEFT JOIN vehicles v ON v.id = b.vehicle_id
            WHERE b.customer_id = $1
            ORDER BY b.start_time DESC, b.created_at DESC
            "#
        )
        .bind(customer_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(BookingDetails::from).collect())
    }

    async fn delete(&self, id: Uuid) -> AppResult<Option<Booking>> {
        let deleted = sqlx::query_as::<_, Booking>("DELETE FROM bookings WHERE id = $1 RETURNING *")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(deleted)
    }
}
