use async_trait::async_trait;
use chrono::{DateTime, Utc};
use innkeep_core::repository::{RepoError, ReviewFeedRepository};
use innkeep_shared::Review;
use sqlx::PgPool;
use uuid::Uuid;

/// The global review feed, denormalized from the per-room lists.
pub struct StoreReviewFeedRepository {
    pool: PgPool,
}

impl StoreReviewFeedRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(sqlx::FromRow)]
struct FeedRow {
    id: Uuid,
    room_id: Uuid,
    user_name: String,
    user_photo: Option<String>,
    user_email: String,
    rating: i32,
    comment: String,
    posted_at: DateTime<Utc>,
}

#[async_trait]
impl ReviewFeedRepository for StoreReviewFeedRepository {
    async fn insert_review(&self, review: &Review) -> Result<(), RepoError> {
        sqlx::query(
            r#"
            INSERT INTO review_feed (id, room_id, user_name, user_photo, user_email, rating, comment, posted_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            "#,
        )
        .bind(review.id)
        .bind(review.room_id)
        .bind(&review.user_name)
        .bind(&review.user_photo)
        .bind(&review.user_email)
        .bind(review.rating)
        .bind(&review.comment)
        .bind(review.timestamp)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn list_reviews(&self) -> Result<Vec<Review>, RepoError> {
        let rows = sqlx::query_as::<_, FeedRow>(
            r#"
            SELECT id, room_id, user_name, user_photo, user_email, rating, comment, posted_at
            FROM review_feed
            ORDER BY posted_at DESC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(rows
            .into_iter()
            .map(|row| Review {
                id: row.id,
                room_id: row.room_id,
                user_name: row.user_name,
                user_photo: row.user_photo,
                user_email: row.user_email,
                rating: row.rating,
                comment: row.comment,
                timestamp: row.posted_at,
            })
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn review(comment: &str, day: u32) -> Review {
        Review {
            id: Uuid::new_v4(),
            room_id: Uuid::new_v4(),
            user_name: "Grace".to_string(),
            user_photo: None,
            user_email: "grace@example.com".to_string(),
            rating: 4,
            comment: comment.to_string(),
            timestamp: Utc.with_ymd_and_hms(2024, 1, day, 9, 0, 0).unwrap(),
        }
    }

    #[sqlx::test(migrations = "../migrations")]
    async fn test_feed_lists_newest_first(pool: PgPool) {
        let repo = StoreReviewFeedRepository::new(pool);
        let old = review("old", 1);
        let new = review("new", 5);

        repo.insert_review(&old).await.unwrap();
        repo.insert_review(&new).await.unwrap();

        assert_eq!(repo.list_reviews().await.unwrap(), vec![new, old]);
    }
}
