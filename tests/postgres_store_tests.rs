//! Tests del almacén PostgreSQL
//!
//! Necesitan una base de datos real: `DATABASE_URL=postgres://... cargo test -- --ignored`.
//! `sqlx::test` crea una base de datos temporal por test y aplica `migrations/`.

use chrono::{DateTime, TimeZone, Utc};
use rust_decimal::Decimal;
use sqlx::PgPool;
use uuid::Uuid;

use fleet_booking::models::{NewBooking, NewVehicle, Pincode, TimeWindow, Vehicle};
use fleet_booking::repositories::{BookingRepository, BookingStore, VehicleRepository, VehicleStore};
use fleet_booking::utils::AppError;

fn at(day: u32, hour: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 1, day, hour, 0, 0).unwrap()
}

async fn truck(pool: &PgPool, capacity: i64) -> Vehicle {
    VehicleRepository::new(pool.clone())
        .create(NewVehicle {
            name: format!("Truck {}", capacity),
            capacity_kg: Decimal::new(capacity, 0),
            tyres: 6,
        })
        .await
        .unwrap()
}

fn new_booking(vehicle_id: Uuid, start: DateTime<Utc>, end: DateTime<Utc>, customer: &str) -> NewBooking {
    let hours = (end - start).num_hours();
    NewBooking {
        vehicle_id,
        from_pincode: Pincode::new(100001).unwrap(),
        to_pincode: Pincode::new(100001 + hours).unwrap(),
        window: TimeWindow::new(start, end),
        customer_id: customer.to_string(),
    }
}

#[sqlx::test(migrations = "./migrations")]
#[ignore]
async fn test_vehicle_capacity_filter(pool: PgPool) {
    truck(&pool, 1000).await;
    truck(&pool, 500).await;
    truck(&pool, 200).await;

    let vehicles = VehicleRepository::new(pool.clone());
    let found = vehicles.find_with_min_capacity(Decimal::new(500, 0)).await.unwrap();
    assert_eq!(found.len(), 2);
    assert!(found.iter().all(|v| v.capacity_kg >= Decimal::new(500, 0)));

    let first = &found[0];
    assert_eq!(vehicles.find_by_id(first.id).await.unwrap().as_ref(), Some(first));
    assert!(vehicles.find_by_id(Uuid::new_v4()).await.unwrap().is_none());
}

#[sqlx::test(migrations = "./migrations")]
#[ignore]
async fn test_overlap_is_conflict_and_touching_is_allowed(pool: PgPool) {
    let a = truck(&pool, 1000).await;
    let b = truck(&pool, 1000).await;
    let bookings = BookingRepository::new(pool.clone());

    let created = bookings
        .create_if_available(new_booking(a.id, at(1, 10), at(1, 15), "c1"))
        .await
        .unwrap();
    assert_eq!(created.vehicle.as_ref().map(|v| v.id), Some(a.id));
    assert_eq!(created.booking.end_time, at(1, 15));

    let err = bookings
        .create_if_available(new_booking(a.id, at(1, 12), at(1, 14), "c2"))
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::Conflict(ref msg) if msg == "Vehicle already booked"));

    // Otro vehículo, misma ventana
    bookings
        .create_if_available(new_booking(b.id, at(1, 12), at(1, 14), "c2"))
        .await
        .unwrap();
    // Contigua
    bookings
        .create_if_available(new_booking(a.id, at(1, 15), at(1, 20), "c3"))
        .await
        .unwrap();
}

#[sqlx::test(migrations = "./migrations")]
#[ignore]
async fn test_unknown_vehicle_is_not_found(pool: PgPool) {
    let bookings = BookingRepository::new(pool);
    let err = bookings
        .create_if_available(new_booking(Uuid::new_v4(), at(1, 10), at(1, 15), "c1"))
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::NotFound(ref msg) if msg == "Vehicle not found"));
}

#[sqlx::test(migrations = "./migrations")]
#[ignore]
async fn test_exclusion_constraint_maps_to_conflict(pool: PgPool) {
    let a = truck(&pool, 1000).await;
    BookingRepository::new(pool.clone())
        .create_if_available(new_booking(a.id, at(1, 10), at(1, 15), "c1"))
        .await
        .unwrap();

    // Inserción directa, sin pasar por la comprobación del repositorio
    let err = sqlx::query(
        r#"
        INSERT INTO bookings (id, vehicle_id, from_pincode, to_pincode, start_time, end_time, customer_id)
        VALUES ($1, $2, 100001, 100003, $3, $4, 'c2')
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(a.id)
    .bind(at(1, 14))
    .bind(at(1, 16))
    .execute(&pool)
    .await
    .unwrap_err();

    let err = AppError::from(err);
    assert_eq!(err.code(), "CONFLICT");
}

#[sqlx::test(migrations = "./migrations")]
#[ignore]
async fn test_find_overlapping_with_and_without_vehicle(pool: PgPool) {
    let a = truck(&pool, 1000).await;
    let b = truck(&pool, 1000).await;
    let bookings = BookingRepository::new(pool.clone());

    bookings
        .create_if_available(new_booking(a.id, at(1, 10), at(1, 15), "c1"))
        .await
        .unwrap();
    bookings
        .create_if_available(new_booking(b.id, at(1, 1), at(1, 3), "c1"))
        .await
        .unwrap();

    let query = TimeWindow::new(at(1, 14), at(1, 16));
    assert_eq!(bookings.find_overlapping(&query, None).await.unwrap().len(), 1);
    assert_eq!(bookings.find_overlapping(&query, Some(a.id)).await.unwrap().len(), 1);
    assert!(bookings.find_overlapping(&query, Some(b.id)).await.unwrap().is_empty());

    let touching = TimeWindow::new(at(1, 15), at(1, 18));
    assert!(bookings.find_overlapping(&touching, None).await.unwrap().is_empty());
}

#[sqlx::test(migrations = "./migrations")]
#[ignore]
async fn test_customer_listing_order(pool: PgPool) {
    let a = truck(&pool, 1000).await;
    let bookings = BookingRepository::new(pool.clone());

    for (day, customer) in [(1, "c1"), (3, "c1"), (4, "c2"), (2, "c1")] {
        bookings
            .create_if_available(new_booking(a.id, at(day, 8), at(day, 10), customer))
            .await
            .unwrap();
    }

    let listed = bookings.find_by_customer("c1").await.unwrap();
    let starts: Vec<DateTime<Utc>> = listed.iter().map(|d| d.booking.start_time).collect();
    assert_eq!(starts, vec![at(3, 8), at(2, 8), at(1, 8)]);
    assert!(listed.iter().all(|d| d.vehicle.as_ref() == Some(&a)));

    assert!(bookings.find_by_customer("nobody").await.unwrap().is_empty());
}

#[sqlx::test(migrations = "./migrations")]
#[ignore]
async fn test_delete_returns_removed_booking(pool: PgPool) {
    let a = truck(&pool, 1000).await;
    let bookings = BookingRepository::new(pool.clone());
    let created = bookings
        .create_if_available(new_booking(a.id, at(1, 1), at(1, 3), "c1"))
        .await
        .unwrap();

    let deleted = bookings.delete(created.booking.id).await.unwrap();
    assert_eq!(deleted.map(|b| b.id), Some(created.booking.id));
    assert!(bookings.delete(created.booking.id).await.unwrap().is_none());
    assert!(bookings.find_by_customer("c1").await.unwrap().is_empty());
}

#[sqlx::test(migrations = "./migrations")]
#[ignore]
async fn test_concurrent_creates_single_winner(pool: PgPool) {
    let a = truck(&pool, 1000).await;

    let handles: Vec<_> = (0..6)
        .map(|i| {
            let bookings = BookingRepository::new(pool.clone());
            let booking = new_booking(a.id, at(1, 10), at(1, 15), &format!("c{}", i));
            tokio::spawn(async move { bookings.create_if_available(booking).await })
        })
        .collect();

    let mut created = 0;
    let mut conflicts = 0;
    for result in futures::future::join_all(handles).await {
        match result.unwrap() {
            Ok(_) => created += 1,
            Err(AppError::Conflict(_)) => conflicts += 1,
            Err(other) => panic!("unexpected error: {:?}", other),
        }
    }

    assert_eq!(created, 1);
    assert_eq!(conflicts, 5);
}
