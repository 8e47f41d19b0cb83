use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    middleware,
    routing::{delete, get, post, put},
    Extension, Json, Router,
};
use axum_extra::extract::WithRejection;
use innkeep_core::bookings;
use innkeep_shared::pii::MaskedEmail;
use innkeep_shared::{Booking, BookingDateUpdate, NewBooking};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{error::AppError, middleware::session_guard, session::Session, state::AppState};

#[derive(Debug, Deserialize)]
struct EmailQuery {
    email: Option<String>,
}

#[derive(Debug, Serialize)]
struct DeleteResponse {
    deleted: bool,
    id: Uuid,
}

pub fn routes(state: AppState) -> Router<AppState> {
    let guarded_list = get(list_user_bookings)
        .route_layer(middleware::from_fn_with_state(state, session_guard));

    Router::new()
        .route("/booked-room", post(create_booking).merge(guarded_list))
        .route("/date-update/{id}", get(get_booking))
        .route("/dateUpdate/{id}", put(update_booking_date))
        .route("/room/{id}", delete(delete_booking))
}

/// POST /booked-room
async fn create_booking(
    State(state): State<AppState>,
    WithRejection(Json(req), _): WithRejection<Json<NewBooking>, AppError>,
) -> Result<(StatusCode, Json<Booking>), AppError> {
    let booking = bookings::create_booking(&state.data, req).await?;
    Ok((StatusCode::CREATED, Json(booking)))
}

/// GET /booked-room?email=
/// Only the session owner may list their own bookings.
async fn list_user_bookings(
    State(state): State<AppState>,
    Extension(session): Extension<Session>,
    Query(query): Query<EmailQuery>,
) -> Result<Json<Vec<Booking>>, AppError> {
    if query.email.as_deref() != Some(session.email.as_str()) {
        tracing::warn!(
            session = %MaskedEmail(&session.email),
            "Booking list requested for another user"
        );
        return Err(AppError::AuthorizationError("forbidden".to_string()));
    }

    let list = bookings::list_bookings_by_user(&state.data, &session.email).await?;
    Ok(Json(list))
}

/// GET /date-update/{id}
async fn get_booking(
    State(state): State<AppState>,
    WithRejection(Path(id), _): WithRejection<Path<Uuid>, AppError>,
) -> Result<Json<Booking>, AppError> {
    Ok(Json(bookings::get_booking(&state.data, id).await?))
}

/// PUT /dateUpdate/{id}
async fn update_booking_date(
    State(state): State<AppState>,
    WithRejection(Path(id), _): WithRejection<Path<Uuid>, AppError>,
    WithRejection(Json(req), _): WithRejection<Json<BookingDateUpdate>, AppError>,
) -> Result<Json<Booking>, AppError> {
    let booking = bookings::update_booking_date(&state.data, id, req.booking_date).await?;
    Ok(Json(booking))
}

/// DELETE /room/{id}
/// Cancel a booking and release its room.
async fn delete_booking(
    State(state): State<AppState>,
    WithRejection(Path(id), _): WithRejection<Path<Uuid>, AppError>,
) -> Result<Json<DeleteResponse>, AppError> {
    let booking = bookings::delete_booking(&state.data, id).await?;
    Ok(Json(DeleteResponse {
        deleted: true,
        id: booking.id,
    }))
}
