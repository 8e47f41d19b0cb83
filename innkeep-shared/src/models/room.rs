use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

use super::review::Review;

/// Bookability flag carried on every room.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum RoomState {
    #[default]
    Available,
    Unavailable,
}

impl RoomState {
    pub fn as_str(&self) -> &'static str {
        match self {
            RoomState::Available => "Available",
            RoomState::Unavailable => "Unavailable",
        }
    }
}

impl fmt::Display for RoomState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, thiserror::Error)]
#[error("Unknown room state: {0}")]
pub struct UnknownRoomState(pub String);

impl FromStr for RoomState {
    type Err = UnknownRoomState;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Available" => Ok(RoomState::Available),
            "Unavailable" => Ok(RoomState::Unavailable),
            other => Err(UnknownRoomState(other.to_string())),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Room {
    pub id: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub image: Option<String>,
    pub price: f64,
    pub room_state: RoomState,
    /// Embedded reviews, oldest first.
    #[serde(default)]
    pub reviews: Vec<Review>,
}

/// Ordering applied to room listings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RoomSort {
    #[default]
    Unsorted,
    PriceAscending,
    PriceDescending,
}

impl RoomSort {
    /// Maps the `sortBy` query value. Anything unrecognised is `Unsorted`.
    pub fn from_query(value: Option<&str>) -> Self {
        match value {
            Some("priceAsc") => RoomSort::PriceAscending,
            Some("priceDesc") => RoomSort::PriceDescending,
            _ => RoomSort::Unsorted,
        }
    }
}
