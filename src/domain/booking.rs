use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{
    BookingId, BookingPeriod, DecideBookingError, Item, ItemId, RequestBookingError, UserId,
};

/// 予約ステータス
///
/// 初期状態は常にWaiting。Waiting → Approved / Waiting → Rejected。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum BookingStatus {
    /// 所有者の承認待ち
    Waiting,
    /// 承認済み
    Approved,
    /// 却下済み
    Rejected,
}

impl BookingStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            BookingStatus::Waiting => "WAITING",
            BookingStatus::Approved => "APPROVED",
            BookingStatus::Rejected => "REJECTED",
        }
    }
}

impl std::str::FromStr for BookingStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "WAITING" => Ok(BookingStatus::Waiting),
            "APPROVED" => Ok(BookingStatus::Approved),
            "REJECTED" => Ok(BookingStatus::Rejected),
            _ => Err(format!("Invalid booking status: {}", s)),
        }
    }
}

/// Booking集約 - 1つのアイテムの1回の予約
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Booking {
    // 識別子
    pub booking_id: BookingId,

    // 他の集約への参照（IDのみ、作成後は不変）
    pub item_id: ItemId,
    /// 予約時点のアイテム所有者（所有者ビューの検索キー）
    pub owner_id: UserId,
    pub booker_id: UserId,

    // 予約管理の責務
    pub period: BookingPeriod,
    pub status: BookingStatus,

    // 監査情報
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Booking {
    pub fn start(&self) -> DateTime<Utc> {
        self.period.start()
    }

    pub fn end(&self) -> DateTime<Utc> {
        self.period.end()
    }

    /// 現在進行中か（`start <= now <= end`）
    pub fn is_current_at(&self, now: DateTime<Utc>) -> bool {
        self.start() <= now && self.end() >= now
    }

    /// 終了済みか（`end < now`）
    pub fn is_past_at(&self, now: DateTime<Utc>) -> bool {
        self.end() < now
    }

    /// 未開始か（`start > now`）
    pub fn is_future_at(&self, now: DateTime<Utc>) -> bool {
        self.start() > now
    }

    /// 閲覧可能か：借り手本人またはアイテム所有者のみ
    pub fn is_visible_to(&self, user_id: UserId) -> bool {
        self.owner_id == user_id || self.booker_id == user_id
    }
}

/// 純粋関数：アイテムが貸出可能か確認する
pub fn ensure_rentable(item: &Item) -> Result<(), RequestBookingError> {
    if !item.available {
        return Err(RequestBookingError::ItemNotAvailable);
    }
    Ok(())
}

/// 純粋関数：承認済みの予約と期間が重ならないか確認する
///
/// 重複拒否ポリシーが有効な場合のみアプリケーション層から呼ばれる。
pub fn ensure_no_overlap(
    period: &BookingPeriod,
    existing: &[Booking],
) -> Result<(), RequestBookingError> {
    let overlaps = existing
        .iter()
        .filter(|b| b.status == BookingStatus::Approved)
        .any(|b| b.period.overlaps(period));

    if overlaps {
        return Err(RequestBookingError::OverlapsApprovedBooking);
    }
    Ok(())
}

/// 純粋関数：予約を申請する
///
/// ビジネスルール：
/// - アイテムが貸出可能であること
/// - 所有者は自分のアイテムを予約できない
/// - 状態はWaiting（呼び出し側は指定できない）
///
/// 期間の妥当性は`BookingPeriod`の型で保証される。
/// 副作用なし。新しいBookingを返す。
pub fn request_booking(
    item: &Item,
    booker_id: UserId,
    period: BookingPeriod,
    requested_at: DateTime<Utc>,
) -> Result<Booking, RequestBookingError> {
    ensure_rentable(item)?;

    if item.is_owned_by(booker_id) {
        return Err(RequestBookingError::OwnerCannotBookOwnItem);
    }

    Ok(Booking {
        booking_id: BookingId::new(),
        item_id: item.item_id,
        owner_id: item.owner_id,
        booker_id,
        period,
        status: BookingStatus::Waiting,
        created_at: requested_at,
        updated_at: requested_at,
    })
}

/// 純粋関数：予約を承認または却下する
///
/// ビジネスルール：
/// - アイテム所有者のみ操作可能
/// - 承認済みを再承認することはできない
/// - 却下済みを再却下することはできない
///
/// 却下済みの承認、承認済みの却下は妨げない（同じ状態の再適用のみ拒否）。
/// 副作用なし。新しいBookingを返す。
pub fn decide_booking(
    booking: &Booking,
    approve: bool,
    acting_user_id: UserId,
    decided_at: DateTime<Utc>,
) -> Result<Booking, DecideBookingError> {
    if booking.owner_id != acting_user_id {
        return Err(DecideBookingError::NotItemOwner);
    }

    let status = if approve {
        if booking.status == BookingStatus::Approved {
            return Err(DecideBookingError::AlreadyApproved);
        }
        BookingStatus::Approved
    } else {
        if booking.status == BookingStatus::Rejected {
            return Err(DecideBookingError::AlreadyRejected);
        }
        BookingStatus::Rejected
    };

    Ok(Booking {
        status,
        updated_at: decided_at,
        ..booking.clone()
    })
}
