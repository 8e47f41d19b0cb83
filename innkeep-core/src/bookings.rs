use chrono::{NaiveDate, Utc};
use innkeep_shared::pii::MaskedEmail;
use innkeep_shared::{Booking, NewBooking, RoomState};
use uuid::Uuid;

use crate::{CoreError, CoreResult, DataContext};

/// Records a booking and marks its room `Unavailable`.
///
/// There is no conflict check: booking a room that is already unavailable
/// is accepted.
pub async fn create_booking(ctx: &DataContext, new_booking: NewBooking) -> CoreResult<Booking> {
    let room = ctx
        .rooms
        .get_room(new_booking.room_id)
        .await?
        .ok_or(CoreError::RoomNotFound(new_booking.room_id))?;

    if room.room_state == RoomState::Unavailable {
        tracing::warn!(room_id = %room.id, "Booking a room that is already unavailable");
    }

    let booking = new_booking.into_booking(Utc::now());
    ctx.bookings.insert_booking(&booking).await?;
    ctx.rooms
        .set_room_state(booking.room_id, RoomState::Unavailable)
        .await?;

    tracing::info!(
        booking_id = %booking.id,
        room_id = %booking.room_id,
        guest = %MaskedEmail(&booking.user_email),
        "Booking created"
    );
    Ok(booking)
}

pub async fn get_booking(ctx: &DataContext, id: Uuid) -> CoreResult<Booking> {
    ctx.bookings
        .get_booking(id)
        .await?
        .ok_or(CoreError::BookingNotFound(id))
}

pub async fn update_booking_date(
    ctx: &DataContext,
    id: Uuid,
    booking_date: NaiveDate,
) -> CoreResult<Booking> {
    let booking = ctx
        .bookings
        .update_booking_date(id, booking_date)
        .await?
        .ok_or(CoreError::BookingNotFound(id))?;

    tracing::info!(booking_id = %id, %booking_date, "Booking date updated");
    Ok(booking)
}

/// Removes a booking and puts its room back to `Available`.
///
/// The room is released even when other bookings still reference it.
pub async fn delete_booking(ctx: &DataContext, id: Uuid) -> CoreResult<Booking> {
    let booking = ctx
        .bookings
        .delete_booking(id)
        .await?
        .ok_or(CoreError::BookingNotFound(id))?;

    let released = ctx
        .rooms
        .set_room_state(booking.room_id, RoomState::Available)
        .await?;
    if !released {
        tracing::warn!(room_id = %booking.room_id, "Deleted booking referenced a missing room");
    }

    tracing::info!(booking_id = %id, room_id = %booking.room_id, "Booking deleted");
    Ok(booking)
}

pub async fn list_bookings_by_user(ctx: &DataContext, email: &str) -> CoreResult<Vec<Booking>> {
    Ok(ctx.bookings.list_bookings_by_email(email).await?)
}
