use crate::domain::{Booking, BookingId, Item, ItemId, User, UserId};

use super::dependencies::ServiceDependencies;
use super::errors::{ApplicationError, Result};

/// ユーザーを解決する（存在しなければNotFound）
pub(crate) async fn resolve_user(deps: &ServiceDependencies, user_id: UserId) -> Result<User> {
    deps.user_directory
        .find(user_id)
        .await
        .map_err(ApplicationError::UserDirectoryError)?
        .ok_or(ApplicationError::NotFound("User"))
}

/// アイテムを解決する（存在しなければNotFound）
pub(crate) async fn resolve_item(deps: &ServiceDependencies, item_id: ItemId) -> Result<Item> {
    deps.item_catalog
        .find(item_id)
        .await
        .map_err(ApplicationError::ItemCatalogError)?
        .ok_or(ApplicationError::NotFound("Item"))
}

/// 予約を読み込む（存在しなければNotFound）
pub(crate) async fn load_booking(
    deps: &ServiceDependencies,
    booking_id: BookingId,
) -> Result<Booking> {
    deps.booking_repository
        .get_by_id(booking_id)
        .await
        .map_err(ApplicationError::BookingRepositoryError)?
        .ok_or(ApplicationError::NotFound("Booking"))
}
