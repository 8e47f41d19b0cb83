use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Booking {
    pub id: Uuid,
    pub room_id: Uuid,
    pub user_email: String,
    pub booking_date: NaiveDate,
    pub created_at: DateTime<Utc>,
}

/// Body of `POST /booked-room`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewBooking {
    pub room_id: Uuid,
    #[serde(alias = "user")]
    pub user_email: String,
    pub booking_date: NaiveDate,
}

impl NewBooking {
    pub fn into_booking(self, now: DateTime<Utc>) -> Booking {
        Booking {
            id: Uuid::new_v4(),
            room_id: self.room_id,
            user_email: self.user_email,
            booking_date: self.booking_date,
            created_at: now,
        }
    }
}

/// Body of `PUT /dateUpdate/{id}`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookingDateUpdate {
    pub booking_date: NaiveDate,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_booking_accepts_user_alias() {
        let body = serde_json::json!({
            "roomId": Uuid::nil(),
            "user": "guest@example.com",
            "bookingDate": "2024-07-14"
        });
        let new_booking: NewBooking = serde_json::from_value(body).unwrap();

        assert_eq!(new_booking.user_email, "guest@example.com");
        assert_eq!(new_booking.booking_date, NaiveDate::from_ymd_opt(2024, 7, 14).unwrap());
    }
}
