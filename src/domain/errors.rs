use chrono::{DateTime, Utc};

/// 予約期間のエラー（`start >= end`）
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InvalidPeriod {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

/// ページ指定のエラー
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InvalidPage {
    /// from が負
    NegativeFrom(i64),
    /// size が1未満
    NonPositiveSize(i64),
}

/// 予約申請のエラー
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RequestBookingError {
    /// アイテムが貸出不可
    ItemNotAvailable,
    /// 所有者が自分のアイテムを予約しようとした
    OwnerCannotBookOwnItem,
    /// 承認済みの予約と期間が重なる
    OverlapsApprovedBooking,
}

/// 承認・却下のエラー
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DecideBookingError {
    /// 所有者以外が操作した
    NotItemOwner,
    /// 既に承認済み
    AlreadyApproved,
    /// 既に却下済み
    AlreadyRejected,
}

/// コメント投稿資格のエラー
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommentEligibilityError {
    /// このアイテムを予約したことがない
    NeverBooked,
    /// 却下された予約がある
    HasRejectedBooking,
    /// 最初の予約がまだ始まっていない
    RentalNotStarted,
}

/// 未知の予約状態（バケット）
///
/// クライアントの入力ミスではなくサーバー側の列挙値の不一致として扱う。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownBookingState(pub String);

impl std::fmt::Display for UnknownBookingState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Unknown state: {}", self.0)
    }
}
