use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use innkeep_core::repository::{BookingRepository, RepoError};
use innkeep_shared::Booking;
use sqlx::PgPool;
use uuid::Uuid;

pub struct StoreBookingRepository {
    pool: PgPool,
}

impl StoreBookingRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(sqlx::FromRow)]
struct BookingRow {
    id: Uuid,
    room_id: Uuid,
    user_email: String,
    booking_date: NaiveDate,
    created_at: DateTime<Utc>,
}

impl From<BookingRow> for Booking {
    fn from(row: BookingRow) -> Self {
        Booking {
            id: row.id,
            room_id: row.room_id,
            user_email: row.user_email,
            booking_date: row.booking_date,
            created_at: row.created_at,
        }
    }
}

#[async_trait]
impl BookingRepository for StoreBookingRepository {
    async fn insert_booking(&self, booking: &Booking) -> Result<(), RepoError> {
        sqlx::query(
            r#"
            INSERT INTO bookings (id, room_id, user_email, booking_date, created_at)
            VALUES ($1, $2, $3, $4, $5)
            "#,
        )
        .bind(booking.id)
        .bind(booking.room_id)
        .bind(&booking.user_email)
        .bind(booking.booking_date)
        .bind(booking.created_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn get_booking(&self, id: Uuid) -> Result<Option<Booking>, RepoError> {
        let row = sqlx::query_as::<_, BookingRow>(
            "SELECT id, room_id, user_email, booking_date, created_at FROM bookings WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(Booking::from))
    }

    async fn update_booking_date(
        &self,
        id: Uuid,
        booking_date: NaiveDate,
    ) -> Result<Option<Booking>, RepoError> {
        let row = sqlx::query_as::<_, BookingRow>(
            r#"
            UPDATE bookings SET booking_date = $2 WHERE id = $1
            RETURNING id, room_id, user_email, booking_date, created_at
            "#,
        )
        .bind(id)
        .bind(booking_date)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(Booking::from))
    }

    async fn delete_booking(&self, id: Uuid) -> Result<Option<Booking>, RepoError> {
        let row = sqlx::query_as::<_, BookingRow>(
            r#"
            DELETE FROM bookings WHERE id = $1
            RETURNING id, room_id, user_email, booking_date, created_at
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(Booking::from))
    }

    async fn list_bookings_by_email(&self, email: &str) -> Result<Vec<Booking>, RepoError> {
        let rows = sqlx::query_as::<_, BookingRow>(
            r#"
            SELECT id, room_id, user_email, booking_date, created_at
            FROM bookings WHERE user_email = $1
            ORDER BY booking_date
            "#,
        )
        .bind(email)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(Booking::from).collect())
    }
}
