use axum::{
    extract::{Path, Query, State},
    routing::get,
    Json, Router,
};
use axum_extra::extract::WithRejection;
use innkeep_core::catalog;
use innkeep_shared::{Room, RoomSort};
use serde::Deserialize;
use uuid::Uuid;

use crate::{error::AppError, state::AppState};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ListRoomsQuery {
    sort_by: Option<String>,
}

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/rooms", get(list_rooms))
        .route("/rooms/{id}", get(get_room))
}

/// GET /rooms?sortBy=priceAsc|priceDesc
async fn list_rooms(
    State(state): State<AppState>,
    Query(query): Query<ListRoomsQuery>,
) -> Result<Json<Vec<Room>>, AppError> {
    let sort = RoomSort::from_query(query.sort_by.as_deref());
    let rooms = catalog::list_rooms(&state.data, sort).await?;
    Ok(Json(rooms))
}

/// GET /rooms/{id}
async fn get_room(
    State(state): State<AppState>,
    WithRejection(Path(id), _): WithRejection<Path<Uuid>, AppError>,
) -> Result<Json<Room>, AppError> {
    let room = catalog::get_room(&state.data, id).await?;
    Ok(Json(room))
}
