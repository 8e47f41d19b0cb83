use async_trait::async_trait;
use chrono::NaiveDate;
use innkeep_shared::{Booking, Review, Room, RoomSort, RoomState};
use uuid::Uuid;

pub type RepoError = Box<dyn std::error::Error + Send + Sync>;

/// Repository trait for room data access
#[async_trait]
pub trait RoomRepository: Send + Sync {
    async fn list_rooms(&self, sort: RoomSort) -> Result<Vec<Room>, RepoError>;

    async fn get_room(&self, id: Uuid) -> Result<Option<Room>, RepoError>;

    /// Returns `false` when no room has this id.
    async fn set_room_state(&self, id: Uuid, state: RoomState) -> Result<bool, RepoError>;

    /// Appends to the room's embedded review list. Returns `false` when no
    /// room has this id.
    async fn push_review(&self, id: Uuid, review: &Review) -> Result<bool, RepoError>;
}

/// Repository trait for booking records
#[async_trait]
pub trait BookingRepository: Send + Sync {
    async fn insert_booking(&self, booking: &Booking) -> Result<(), RepoError>;

    async fn get_booking(&self, id: Uuid) -> Result<Option<Booking>, RepoError>;

    async fn update_booking_date(
        &self,
        id: Uuid,
        booking_date: NaiveDate,
    ) -> Result<Option<Booking>, RepoError>;

    /// Removes the booking and hands back the removed record.
    async fn delete_booking(&self, id: Uuid) -> Result<Option<Booking>, RepoError>;

    async fn list_bookings_by_email(&self, email: &str) -> Result<Vec<Booking>, RepoError>;
}

/// Repository trait for the global review feed
#[async_trait]
pub trait ReviewFeedRepository: Send + Sync {
    async fn insert_review(&self, review: &Review) -> Result<(), RepoError>;

    /// Newest first.
    async fn list_reviews(&self) -> Result<Vec<Review>, RepoError>;
}
