use axum::{
    extract::State,
    routing::{get, post},
    Json, Router,
};
use axum_extra::extract::WithRejection;
use innkeep_core::reviews;
use innkeep_shared::{NewReview, Review};
use serde::Serialize;

use crate::{error::AppError, state::AppState};

#[derive(Debug, Serialize)]
struct ReviewResponse {
    success: bool,
    message: &'static str,
    review: Review,
}

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/rooms/reviews", post(add_review))
        .route("/reviews", get(list_reviews))
}

/// POST /rooms/reviews
/// Attach a review to a room and repost it to the global feed.
async fn add_review(
    State(state): State<AppState>,
    WithRejection(Json(req), _): WithRejection<Json<NewReview>, AppError>,
) -> Result<Json<ReviewResponse>, AppError> {
    let review = reviews::add_review(&state.data, req).await?;

    Ok(Json(ReviewResponse {
        success: true,
        message: "Review added and reposted successfully",
        review,
    }))
}

/// GET /reviews
async fn list_reviews(State(state): State<AppState>) -> Result<Json<Vec<Review>>, AppError> {
    Ok(Json(reviews::list_reviews(&state.data).await?))
}
