use async_trait::async_trait;
use chrono::NaiveDate;
use innkeep_shared::{Booking, Review, Room, RoomSort, RoomState};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, MutexGuard};
use uuid::Uuid;

use crate::repository::{BookingRepository, RepoError, ReviewFeedRepository, RoomRepository};
use crate::DataContext;

/// In-memory backing for all three repositories. Used by tests and local
/// runs without Postgres.
#[derive(Default)]
pub struct MemoryStore {
    rooms: Mutex<Vec<Room>>,
    bookings: Mutex<Vec<Booking>>,
    feed: Mutex<Vec<Review>>,
    fail_feed_inserts: AtomicBool,
}

fn guard<T>(lock: &Mutex<T>) -> Result<MutexGuard<'_, T>, RepoError> {
    lock.lock().map_err(|_| "memory store lock poisoned".into())
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_rooms(rooms: Vec<Room>) -> Self {
        Self {
            rooms: Mutex::new(rooms),
            ..Self::default()
        }
    }

    pub fn context(self: &Arc<Self>) -> DataContext {
        DataContext::new(self.clone(), self.clone(), self.clone())
    }

    /// Makes every following feed insert fail, to exercise the partial
    /// review write path.
    pub fn set_feed_failing(&self, failing: bool) {
        self.fail_feed_inserts.store(failing, Ordering::SeqCst);
    }

    pub fn room_state(&self, id: Uuid) -> Option<RoomState> {
        let rooms = self.rooms.lock().ok()?;
        rooms.iter().find(|r| r.id == id).map(|r| r.room_state)
    }

    pub fn feed_len(&self) -> usize {
        self.feed.lock().map(|f| f.len()).unwrap_or(0)
    }
}

#[async_trait]
impl RoomRepository for MemoryStore {
    async fn list_rooms(&self, sort: RoomSort) -> Result<Vec<Room>, RepoError> {
        let mut rooms = guard(&self.rooms)?.clone();
        match sort {
            RoomSort::Unsorted => {}
            RoomSort::PriceAscending => rooms.sort_by(|a, b| a.price.total_cmp(&b.price)),
            RoomSort::PriceDescending => rooms.sort_by(|a, b| b.price.total_cmp(&a.price)),
        }
        Ok(rooms)
    }

    async fn get_room(&self, id: Uuid) -> Result<Option<Room>, RepoError> {
        Ok(guard(&self.rooms)?.iter().find(|r| r.id == id).cloned())
    }

    async fn set_room_state(&self, id: Uuid, state: RoomState) -> Result<bool, RepoError> {
        let mut rooms = guard(&self.rooms)?;
        match rooms.iter_mut().find(|r| r.id == id) {
            Some(room) => {
                room.room_state = state;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn push_review(&self, id: Uuid, review: &Review) -> Result<bool, RepoError> {
        let mut rooms = guard(&self.rooms)?;
        match rooms.iter_mut().find(|r| r.id == id) {
            Some(room) => {
                room.reviews.push(review.clone());
                Ok(true)
            }
            None => Ok(false),
        }
    }
}

#[async_trait]
impl BookingRepository for MemoryStore {
    async fn insert_booking(&self, booking: &Booking) -> Result<(), RepoError> {
        guard(&self.bookings)?.push(booking.clone());
        Ok(())
    }

    async fn get_booking(&self, id: Uuid) -> Result<Option<Booking>, RepoError> {
        Ok(guard(&self.bookings)?.iter().find(|b| b.id == id).cloned())
    }

    async fn update_booking_date(
        &self,
        id: Uuid,
        booking_date: NaiveDate,
    ) -> Result<Option<Booking>, RepoError> {
        let mut bookings = guard(&self.bookings)?;
        Ok(bookings.iter_mut().find(|b| b.id == id).map(|booking| {
            booking.booking_date = booking_date;
            booking.clone()
        }))
    }

    async fn delete_booking(&self, id: Uuid) -> Result<Option<Booking>, RepoError> {
        let mut bookings = guard(&self.bookings)?;
        Ok(bookings
            .iter()
            .position(|b| b.id == id)
            .map(|idx| bookings.remove(idx)))
    }

    async fn list_bookings_by_email(&self, email: &str) -> Result<Vec<Booking>, RepoError> {
        Ok(guard(&self.bookings)?
            .iter()
            .filter(|b| b.user_email == email)
            .cloned()
            .collect())
    }
}

#[async_trait]
impl ReviewFeedRepository for MemoryStore {
    async fn insert_review(&self, review: &Review) -> Result<(), RepoError> {
        if self.fail_feed_inserts.load(Ordering::SeqCst) {
            return Err("review feed unavailable".into());
        }
        guard(&self.feed)?.push(review.clone());
        Ok(())
    }

    /// Newest first.
    async fn list_reviews(&self) -> Result<Vec<Review>, RepoError> {
        let mut feed = guard(&self.feed)?.clone();
        feed.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
        Ok(feed)
    }
}
