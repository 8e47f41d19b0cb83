pub mod bookings;
pub mod catalog;
pub mod memory;
pub mod repository;
pub mod reviews;

use std::sync::Arc;
use uuid::Uuid;

use repository::{BookingRepository, RepoError, ReviewFeedRepository, RoomRepository};

#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("Room not found: {0}")]
    RoomNotFound(Uuid),
    #[error("Booking not found: {0}")]
    BookingNotFound(Uuid),
    #[error("{0}")]
    PartialFailure(String),
    #[error("Storage error: {0}")]
    Storage(String),
}

impl From<RepoError> for CoreError {
    fn from(err: RepoError) -> Self {
        CoreError::Storage(err.to_string())
    }
}

pub type CoreResult<T> = Result<T, CoreError>;

/// Repository handles threaded through every service call.
#[derive(Clone)]
pub struct DataContext {
    pub rooms: Arc<dyn RoomRepository>,
    pub bookings: Arc<dyn BookingRepository>,
    pub review_feed: Arc<dyn ReviewFeedRepository>,
}

impl DataContext {
    pub fn new(
        rooms: Arc<dyn RoomRepository>,
        bookings: Arc<dyn BookingRepository>,
        review_feed: Arc<dyn ReviewFeedRepository>,
    ) -> Self {
        Self {
            rooms,
            bookings,
            review_feed,
        }
    }
}
