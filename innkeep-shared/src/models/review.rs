use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Review {
    pub id: Uuid,
    pub room_id: Uuid,
    pub user_name: String,
    pub user_photo: Option<String>,
    pub user_email: String,
    pub rating: i32,
    pub comment: String,
    pub timestamp: DateTime<Utc>,
}

/// Body of `POST /rooms/reviews`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewReview {
    pub room_id: Uuid,
    pub user_name: String,
    pub user_photo: Option<String>,
    pub user_email: String,
    pub rating: i32,
    #[serde(default)]
    pub comment: String,
    pub timestamp: Option<DateTime<Utc>>,
}

impl NewReview {
    pub fn into_review(self, now: DateTime<Utc>) -> Review {
        Review {
            id: Uuid::new_v4(),
            room_id: self.room_id,
            user_name: self.user_name,
            user_photo: self.user_photo,
            user_email: self.user_email,
            rating: self.rating,
            comment: self.comment,
            timestamp: self.timestamp.unwrap_or(now),
        }
    }
}
