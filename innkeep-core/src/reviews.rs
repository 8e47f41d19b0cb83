use chrono::Utc;
use innkeep_shared::pii::MaskedEmail;
use innkeep_shared::{NewReview, Review};

use crate::{CoreError, CoreResult, DataContext};

/// Appends a review to its room, then mirrors it into the global feed.
///
/// The two writes are not atomic. If the room update lands but the feed
/// insert fails, the review stays on the room and `PartialFailure` is
/// returned.
pub async fn add_review(ctx: &DataContext, new_review: NewReview) -> CoreResult<Review> {
    let room_id = new_review.room_id;
    if ctx.rooms.get_room(room_id).await?.is_none() {
        return Err(CoreError::RoomNotFound(room_id));
    }

    let review = new_review.into_review(Utc::now());

    if !ctx.rooms.push_review(room_id, &review).await? {
        // Room vanished between the lookup and the update.
        return Err(CoreError::RoomNotFound(room_id));
    }

    if let Err(e) = ctx.review_feed.insert_review(&review).await {
        tracing::error!(%room_id, review_id = %review.id, "Review feed insert failed: {}", e);
        return Err(CoreError::PartialFailure(
            "Review added to room but failed to repost".to_string(),
        ));
    }

    tracing::info!(
        %room_id,
        review_id = %review.id,
        author = %MaskedEmail(&review.user_email),
        "Review added and reposted"
    );
    Ok(review)
}

pub async fn list_reviews(ctx: &DataContext) -> CoreResult<Vec<Review>> {
    Ok(ctx.review_feed.list_reviews().await?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory::MemoryStore;
    use chrono::TimeZone;
    use innkeep_shared::{Room, RoomState};
    use std::sync::Arc;
    use uuid::Uuid;

    fn room() -> Room {
        Room {
            id: Uuid::new_v4(),
            name: "Courtyard".to_string(),
            description: Some("Faces the fountain".to_string()),
            image: None,
            price: 150.0,
            room_state: RoomState::Available,
            reviews: vec![],
        }
    }

    fn new_review(room_id: Uuid) -> NewReview {
        NewReview {
            room_id,
            user_name: "Grace".to_string(),
            user_photo: None,
            user_email: "grace@example.com".to_string(),
            rating: 4,
            comment: "Lovely breakfast".to_string(),
            timestamp: None,
        }
    }

    #[tokio::test]
    async fn test_review_lands_on_room_and_feed() {
        let room = room();
        let store = Arc::new(MemoryStore::with_rooms(vec![room.clone()]));
        let ctx = store.context();

        let review = add_review(&ctx, new_review(room.id)).await.unwrap();

        let stored = ctx.rooms.get_room(room.id).await.unwrap().unwrap();
        assert_eq!(stored.reviews, vec![review.clone()]);
        assert_eq!(list_reviews(&ctx).await.unwrap(), vec![review]);
    }

    #[tokio::test]
    async fn test_feed_lists_newest_first() {
        let room = room();
        let store = Arc::new(MemoryStore::with_rooms(vec![room.clone()]));
        let ctx = store.context();

        let mut older = new_review(room.id);
        older.comment = "old".to_string();
        older.timestamp = Some(Utc.with_ymd_and_hms(2024, 1, 1, 9, 0, 0).unwrap());
        let mut newer = new_review(room.id);
        newer.comment = "new".to_string();
        newer.timestamp = Some(Utc.with_ymd_and_hms(2024, 1, 5, 9, 0, 0).unwrap());

        add_review(&ctx, older).await.unwrap();
        add_review(&ctx, newer).await.unwrap();

        let comments: Vec<String> = list_reviews(&ctx)
            .await
            .unwrap()
            .into_iter()
            .map(|r| r.comment)
            .collect();
        assert_eq!(comments, vec!["new", "old"]);

        // The room keeps its own list in posting order.
        let stored = ctx.rooms.get_room(room.id).await.unwrap().unwrap();
        assert_eq!(stored.reviews[0].comment, "old");
    }

    #[tokio::test]
    async fn test_missing_room_leaves_feed_untouched() {
        let store = Arc::new(MemoryStore::with_rooms(vec![room()]));
        let ctx = store.context();

        let result = add_review(&ctx, new_review(Uuid::new_v4())).await;

        assert!(matches!(result, Err(CoreError::RoomNotFound(_))));
        assert_eq!(store.feed_len(), 0);
    }

    #[tokio::test]
    async fn test_feed_failure_is_partial() {
        let room = room();
        let store = Arc::new(MemoryStore::with_rooms(vec![room.clone()]));
        store.set_feed_failing(true);
        let ctx = store.context();

        let result = add_review(&ctx, new_review(room.id)).await;

        assert!(matches!(result, Err(CoreError::PartialFailure(_))));
        let stored = ctx.rooms.get_room(room.id).await.unwrap().unwrap();
        assert_eq!(stored.reviews.len(), 1);
        assert_eq!(store.feed_len(), 0);
    }
}
