pub mod models;
pub mod pii;

pub use models::booking::{Booking, BookingDateUpdate, NewBooking};
pub use models::review::{NewReview, Review};
pub use models::room::{Room, RoomSort, RoomState, UnknownRoomState};
