use axum::{
    extract::{rejection::{JsonRejection, QueryRejection}, Path, Query, State},
    http::StatusCode,
    routing::{delete, get, post},
    Json, Router,
};

use crate::controllers::booking_controller::BookingController;
use crate::dto::booking_dto::{BookingResponse, CreateBookingRequest, ListBookingsQuery};
use crate::state::AppState;
use crate::utils::errors::{bad_request_error, AppError};

pub fn create_booking_router() -> Router<AppState> {
    Router::new()
        .route("/", post(create_booking))
        .route("/", get(list_bookings))
        .route("/:id", delete(cancel_booking))
}

fn controller(state: &AppState) -> BookingController {
    BookingController::new(state.vehicles.clone(), state.bookings.clone())
}

async fn create_booking(
    State(state): State<AppState>,
    payload: Result<Json<CreateBookingRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<BookingResponse>), AppError> {
    let Json(request) = payload.map_err(|e| bad_request_error(e.body_text()))?;
    let response = controller(&state).create(request).await?;
    Ok((StatusCode::CREATED, Json(response)))
}

async fn list_bookings(
    State(state): State<AppState>,
    query: Result<Query<ListBookingsQuery>, QueryRejection>,
) -> Result<Json<Vec<BookingResponse>>, AppError> {
    let Query(query) = query.map_err(|e| bad_request_error(e.body_text()))?;
    let response = controller(&state).list_by_customer(query.customer_id).await?;
    Ok(Json(response))
}

async fn cancel_booking(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<serde_json::Value>, AppError> {
    controller(&state).cancel(&id).await?;
    Ok(Json(serde_json::json!({
        "success": true,
        "message": "Booking cancelled successfully"
    })))
}
