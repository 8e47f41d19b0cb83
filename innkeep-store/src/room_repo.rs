use async_trait::async_trait;
use innkeep_core::repository::{RepoError, RoomRepository};
use innkeep_shared::{Review, Room, RoomSort, RoomState, UnknownRoomState};
use sqlx::types::Json;
use sqlx::PgPool;
use uuid::Uuid;

const LIST_UNSORTED: &str =
    "SELECT id, name, description, image, price, room_state, reviews FROM rooms";
const LIST_PRICE_ASC: &str =
    "SELECT id, name, description, image, price, room_state, reviews FROM rooms ORDER BY price ASC";
const LIST_PRICE_DESC: &str =
    "SELECT id, name, description, image, price, room_state, reviews FROM rooms ORDER BY price DESC";

pub struct StoreRoomRepository {
    pool: PgPool,
}

impl StoreRoomRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(sqlx::FromRow)]
struct RoomRow {
    id: Uuid,
    name: String,
    description: Option<String>,
    image: Option<String>,
    price: f64,
    room_state: String,
    reviews: Json<Vec<Review>>,
}

impl TryFrom<RoomRow> for Room {
    type Error = UnknownRoomState;

    fn try_from(row: RoomRow) -> Result<Self, Self::Error> {
        Ok(Room {
            id: row.id,
            name: row.name,
            description: row.description,
            image: row.image,
            price: row.price,
            room_state: row.room_state.parse()?,
            reviews: row.reviews.0,
        })
    }
}

#[async_trait]
impl RoomRepository for StoreRoomRepository {
    async fn list_rooms(&self, sort: RoomSort) -> Result<Vec<Room>, RepoError> {
        let sql = match sort {
            RoomSort::Unsorted => LIST_UNSORTED,
            RoomSort::PriceAscending => LIST_PRICE_ASC,
            RoomSort::PriceDescending => LIST_PRICE_DESC,
        };

        let rows = sqlx::query_as::<_, RoomRow>(sql)
            .fetch_all(&self.pool)
            .await?;

        let rooms = rows
            .into_iter()
            .map(Room::try_from)
            .collect::<Result<Vec<_>, _>>()?;
        Ok(rooms)
    }

    async fn get_room(&self, id: Uuid) -> Result<Option<Room>, RepoError> {
        let row = sqlx::query_as::<_, RoomRow>(
            "SELECT id, name, description, image, price, room_state, reviews FROM rooms WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        match row {
            Some(row) => Ok(Some(Room::try_from(row)?)),
            None => Ok(None),
        }
    }

    async fn set_room_state(&self, id: Uuid, state: RoomState) -> Result<bool, RepoError> {
        let result = sqlx::query("UPDATE rooms SET room_state = $2 WHERE id = $1")
            .bind(id)
            .bind(state.as_str())
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn push_review(&self, id: Uuid, review: &Review) -> Result<bool, RepoError> {
        let result = sqlx::query(
            "UPDATE rooms SET reviews = reviews || jsonb_build_array($2::jsonb) WHERE id = $1",
        )
        .bind(id)
        .bind(Json(review))
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    async fn insert_room(pool: &PgPool, name: &str, price: f64) -> Uuid {
        let id = Uuid::new_v4();
        sqlx::query("INSERT INTO rooms (id, name, price) VALUES ($1, $2, $3)")
            .bind(id)
            .bind(name)
            .bind(price)
            .execute(pool)
            .await
            .unwrap();
        id
    }

    fn review(room_id: Uuid, comment: &str, day: u32) -> Review {
        Review {
            id: Uuid::new_v4(),
            room_id,
            user_name: "Ada".to_string(),
            user_photo: Some("https://images.example.com/ada.png".to_string()),
            user_email: "ada@example.com".to_string(),
            rating: 5,
            comment: comment.to_string(),
            timestamp: Utc.with_ymd_and_hms(2024, 3, day, 10, 30, 0).unwrap(),
        }
    }

    #[sqlx::test(migrations = "../migrations")]
    async fn test_push_review_appends_in_order(pool: PgPool) {
        let repo = StoreRoomRepository::new(pool.clone());
        let room_id = insert_room(&pool, "Attic", 88.0).await;
        let first = review(room_id, "first", 1);
        let second = review(room_id, "second", 2);

        assert!(repo.push_review(room_id, &first).await.unwrap());
        assert!(repo.push_review(room_id, &second).await.unwrap());

        let room = repo.get_room(room_id).await.unwrap().unwrap();
        assert_eq!(room.reviews, vec![first, second]);
        assert_eq!(room.room_state, RoomState::Available);
    }

    #[sqlx::test(migrations = "../migrations")]
    async fn test_push_review_unknown_room(pool: PgPool) {
        let repo = StoreRoomRepository::new(pool);
        let missing = Uuid::new_v4();

        assert!(!repo.push_review(missing, &review(missing, "lost", 1)).await.unwrap());
        assert!(repo.get_room(missing).await.unwrap().is_none());
    }

    #[sqlx::test(migrations = "../migrations")]
    async fn test_set_room_state(pool: PgPool) {
        let repo = StoreRoomRepository::new(pool.clone());
        let room_id = insert_room(&pool, "Attic", 88.0).await;

        assert!(repo.set_room_state(room_id, RoomState::Unavailable).await.unwrap());
        let room = repo.get_room(room_id).await.unwrap().unwrap();
        assert_eq!(room.room_state, RoomState::Unavailable);

        assert!(repo.set_room_state(room_id, RoomState::Available).await.unwrap());
        let room = repo.get_room(room_id).await.unwrap().unwrap();
        assert_eq!(room.room_state, RoomState::Available);

        assert!(!repo.set_room_state(Uuid::new_v4(), RoomState::Available).await.unwrap());
    }

    #[sqlx::test(migrations = "../migrations")]
    async fn test_list_rooms_by_price(pool: PgPool) {
        let repo = StoreRoomRepository::new(pool);

        let asc = repo.list_rooms(RoomSort::PriceAscending).await.unwrap();
        assert!(!asc.is_empty());
        assert!(asc.windows(2).all(|w| w[0].price <= w[1].price));

        let desc = repo.list_rooms(RoomSort::PriceDescending).await.unwrap();
        assert!(desc.windows(2).all(|w| w[0].price >= w[1].price));

        let unsorted = repo.list_rooms(RoomSort::Unsorted).await.unwrap();
        assert_eq!(unsorted.len(), asc.len());
    }
}
