//! Fleet Booking API
//!
//! Registro de vehículos, consulta de disponibilidad por capacidad y ventana
//! de tiempo, y ciclo de vida de reservas sin solapamientos por vehículo.

pub mod config;
pub mod controllers;
pub mod database;
pub mod dto;
pub mod middleware;
pub mod models;
pub mod repositories;
pub mod routes;
pub mod services;
pub mod state;
pub mod utils;

use axum::{extract::State, response::Json, routing::get, Router};
use serde_json::json;
use tower::ServiceBuilder;
use tower_http::trace::TraceLayer;

pub use state::AppState;

/// Construir el router completo de la API
pub fn create_app(state: AppState) -> Router {
    let cors = middleware::cors::cors_layer(&state.config);

    Router::new()
        .route("/health", get(health))
        .nest("/vehicles", routes::vehicle_routes::create_vehicle_router())
        .nest("/bookings", routes::booking_routes::create_booking_router())
        .layer(ServiceBuilder::new().layer(TraceLayer::new_for_http()).layer(cors))
        .with_state(state)
}

/// Health check simple
async fn health(State(state): State<AppState>) -> Json<serde_json::Value> {
    Json(json!({
        "status": "ok",
        "service": "fleet-booking",
        "timestamp": chrono::Utc::now().to_rfc3339(),
        "store": state.store_backend().to_string()
    }))
}
