pub mod app_config;
pub mod booking_repo;
pub mod database;
pub mod review_repo;
pub mod room_repo;

pub use booking_repo::StoreBookingRepository;
pub use database::DbClient;
pub use review_repo::StoreReviewFeedRepository;
pub use room_repo::StoreRoomRepository;
