use innkeep_shared::{Room, RoomSort};
use uuid::Uuid;

use crate::{CoreError, CoreResult, DataContext};

pub async fn list_rooms(ctx: &DataContext, sort: RoomSort) -> CoreResult<Vec<Room>> {
    let rooms = ctx.rooms.list_rooms(sort).await?;
    tracing::debug!(count = rooms.len(), ?sort, "Listed rooms");
    Ok(rooms)
}

pub async fn get_room(ctx: &DataContext, id: Uuid) -> CoreResult<Room> {
    ctx.rooms
        .get_room(id)
        .await?
        .ok_or(CoreError::RoomNotFound(id))
}
