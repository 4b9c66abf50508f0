use crate::domain::{
    self, Booking, BookingId, BookingPeriod, BookingQuery, BookingRole, BookingState, PageRequest,
    UserId, commands::*,
};

use crate::application::dependencies::ServiceDependencies;
use crate::application::errors::{ApplicationError, Result};
use crate::application::lookups::{load_booking, resolve_item, resolve_user};

/// 予約を申請する
///
/// ビジネスルール：
/// - アイテムが存在すること（NotFound）
/// - アイテムが貸出可能であること（Validation）
/// - `start < end`であること（Validation）
/// - 借り手が存在すること（NotFound）
/// - 所有者は自分のアイテムを予約できない（NotFoundとして秘匿）
/// - 重複拒否ポリシーが有効なら、承認済み予約と期間が重ならないこと（Validation）
///
/// 開始・終了が未来であることの検証は呼び出し側（API層）の責務。
///
/// # 戻り値
/// 成功時は保存されたWaiting状態の予約
pub async fn create_booking(deps: &ServiceDependencies, cmd: RequestBooking) -> Result<Booking> {
    // 1. アイテムの存在と貸出可否
    let item = resolve_item(deps, cmd.item_id).await?;
    domain::booking::ensure_rentable(&item)?;

    // 2. 期間の妥当性
    let period = BookingPeriod::new(cmd.start, cmd.end)?;

    // 3. 借り手の存在確認
    let booker = resolve_user(deps, cmd.booker_id).await?;

    // 4. 重複確認（ポリシーで有効化した場合のみ）
    if deps.policy.reject_overlaps {
        let existing = deps
            .booking_repository
            .find_by_item(item.item_id)
            .await
            .map_err(ApplicationError::BookingRepositoryError)?;
        domain::booking::ensure_no_overlap(&period, &existing)?;
    }

    // 5. ドメイン層の純粋関数を呼び出し
    let booking =
        domain::booking::request_booking(&item, booker.user_id, period, deps.clock.now())?;

    // 6. 保存
    deps.booking_repository
        .insert(booking.clone())
        .await
        .map_err(ApplicationError::BookingRepositoryError)?;

    tracing::info!(
        booking_id = %booking.booking_id.value(),
        item_id = %booking.item_id.value(),
        booker_id = %booking.booker_id.value(),
        "booking requested"
    );

    Ok(booking)
}

/// 予約を承認または却下する
///
/// ビジネスルール：
/// - 予約が存在すること（NotFound）
/// - アイテム所有者のみ操作可能（NotFoundとして秘匿）
/// - 同じ状態の再適用は不可（Validation）
///
/// 読み込んだ時点のステータスを期待値として比較交換で保存するため、
/// 同時に2つの承認操作が走っても片方だけが成功する。
pub async fn set_approval(deps: &ServiceDependencies, cmd: DecideBooking) -> Result<Booking> {
    // 1. 予約を読み込む
    let booking = load_booking(deps, cmd.booking_id).await?;

    // 2. ドメイン層の純粋関数を呼び出し
    let decided = domain::booking::decide_booking(
        &booking,
        cmd.approve,
        cmd.acting_user_id,
        deps.clock.now(),
    )?;

    // 3. 比較交換で保存
    let swapped = deps
        .booking_repository
        .update_status(
            booking.booking_id,
            booking.status,
            decided.status,
            decided.updated_at,
        )
        .await
        .map_err(ApplicationError::BookingRepositoryError)?;

    if !swapped {
        tracing::warn!(
            booking_id = %booking.booking_id.value(),
            "booking status changed concurrently"
        );
        return Err(ApplicationError::Validation(
            "Booking status changed concurrently".to_string(),
        ));
    }

    tracing::info!(
        booking_id = %decided.booking_id.value(),
        status = decided.status.as_str(),
        "booking decided"
    );

    Ok(decided)
}

/// 予約をIDで取得する
///
/// 借り手本人とアイテム所有者のみ閲覧可能（それ以外はNotFoundとして秘匿）。
pub async fn get_booking(
    deps: &ServiceDependencies,
    booking_id: BookingId,
    viewer_id: UserId,
) -> Result<Booking> {
    let booking = load_booking(deps, booking_id).await?;

    if !booking.is_visible_to(viewer_id) {
        return Err(ApplicationError::hidden(
            "Booking",
            "only the booker or the item owner can view",
        ));
    }

    Ok(booking)
}

/// 借り手として自分の予約一覧を取得する
///
/// 結果は`start`の降順。
pub async fn list_bookings_as_booker(
    deps: &ServiceDependencies,
    booker_id: UserId,
    state: BookingState,
    from: i64,
    size: i64,
) -> Result<Vec<Booking>> {
    list_bookings(deps, BookingRole::Booker(booker_id), state, from, size).await
}

/// 所有者として自分のアイテムの予約一覧を取得する
///
/// 結果は`start`の降順。
pub async fn list_bookings_as_owner(
    deps: &ServiceDependencies,
    owner_id: UserId,
    state: BookingState,
    from: i64,
    size: i64,
) -> Result<Vec<Booking>> {
    list_bookings(deps, BookingRole::Owner(owner_id), state, from, size).await
}

async fn list_bookings(
    deps: &ServiceDependencies,
    role: BookingRole,
    state: BookingState,
    from: i64,
    size: i64,
) -> Result<Vec<Booking>> {
    // ページ指定の検証はリポジトリへの問い合わせより前
    let page = PageRequest::new(from, size)?;
    resolve_user(deps, role.user_id()).await?;

    let query = BookingQuery::new(role, state, deps.clock.now());
    tracing::debug!(?query, from, size, "listing bookings");

    deps.booking_repository
        .find(query, page)
        .await
        .map_err(ApplicationError::BookingRepositoryError)
}
