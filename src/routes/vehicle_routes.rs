use axum::{
    extract::{rejection::{JsonRejection, QueryRejection}, Query, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};

use crate::controllers::vehicle_controller::VehicleController;
use crate::dto::vehicle_dto::{
    AvailabilityQuery, AvailableVehiclesResponse, CreateVehicleRequest, VehicleResponse,
};
use crate::state::AppState;
use crate::utils::errors::{bad_request_error, AppError};

pub fn create_vehicle_router() -> Router<AppState> {
    Router::new()
        .route("/", post(register_vehicle))
        .route("/available", get(available_vehicles))
}

fn controller(state: &AppState) -> VehicleController {
    VehicleController::new(state.vehicles.clone(), state.bookings.clone())
}

async fn register_vehicle(
    State(state): State<AppState>,
    payload: Result<Json<CreateVehicleRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<VehicleResponse>), AppError> {
    let Json(request) = payload.map_err(|e| bad_request_error(e.body_text()))?;
    let response = controller(&state).register(request).await?;
    Ok((StatusCode::CREATED, Json(response)))
}

async fn available_vehicles(
    State(state): State<AppState>,
    query: Result<Query<AvailabilityQuery>, QueryRejection>,
) -> Result<Json<AvailableVehiclesResponse>, AppError> {
    let Query(query) = query.map_err(|e| bad_request_error(e.body_text()))?;
    let response = controller(&state).find_available(query).await?;
    Ok(Json(response))
}
