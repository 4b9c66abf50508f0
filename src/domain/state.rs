use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{Booking, BookingStatus, UnknownBookingState, UserId};

/// 予約一覧の分類（バケット）
///
/// CURRENT/PAST/FUTUREは時刻に対して互いに排他。
/// WAITING/REJECTEDは時刻と無関係にステータスで絞り込む。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum BookingState {
    All,
    Current,
    Past,
    Future,
    Waiting,
    Rejected,
}

impl BookingState {
    pub fn as_str(&self) -> &'static str {
        match self {
            BookingState::All => "ALL",
            BookingState::Current => "CURRENT",
            BookingState::Past => "PAST",
            BookingState::Future => "FUTURE",
            BookingState::Waiting => "WAITING",
            BookingState::Rejected => "REJECTED",
        }
    }

    /// バケットを問い合わせ時刻に対する述語へ写す純粋関数
    pub fn predicate(self, now: DateTime<Utc>) -> BookingPredicate {
        match self {
            BookingState::All => BookingPredicate::Any,
            BookingState::Current => BookingPredicate::ActiveAt(now),
            BookingState::Past => BookingPredicate::EndedBefore(now),
            BookingState::Future => BookingPredicate::StartsAfter(now),
            BookingState::Waiting => BookingPredicate::HasStatus(BookingStatus::Waiting),
            BookingState::Rejected => BookingPredicate::HasStatus(BookingStatus::Rejected),
        }
    }
}

impl std::str::FromStr for BookingState {
    type Err = UnknownBookingState;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "ALL" => Ok(BookingState::All),
            "CURRENT" => Ok(BookingState::Current),
            "PAST" => Ok(BookingState::Past),
            "FUTURE" => Ok(BookingState::Future),
            "WAITING" => Ok(BookingState::Waiting),
            "REJECTED" => Ok(BookingState::Rejected),
            _ => Err(UnknownBookingState(s.to_string())),
        }
    }
}

/// 一覧の視点：借り手として、または所有者として
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BookingRole {
    Booker(UserId),
    Owner(UserId),
}

impl BookingRole {
    pub fn user_id(&self) -> UserId {
        match self {
            BookingRole::Booker(id) | BookingRole::Owner(id) => *id,
        }
    }

    pub fn matches(&self, booking: &Booking) -> bool {
        match self {
            BookingRole::Booker(id) => booking.booker_id == *id,
            BookingRole::Owner(id) => booking.owner_id == *id,
        }
    }
}

/// 予約に対する述語（リポジトリはこれをSQLのWHERE句に変換する）
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BookingPredicate {
    Any,
    /// `start <= at AND end >= at`
    ActiveAt(DateTime<Utc>),
    /// `end < at`
    EndedBefore(DateTime<Utc>),
    /// `start > at`
    StartsAfter(DateTime<Utc>),
    HasStatus(BookingStatus),
}

impl BookingPredicate {
    pub fn matches(&self, booking: &Booking) -> bool {
        match self {
            BookingPredicate::Any => true,
            BookingPredicate::ActiveAt(at) => booking.is_current_at(*at),
            BookingPredicate::EndedBefore(at) => booking.is_past_at(*at),
            BookingPredicate::StartsAfter(at) => booking.is_future_at(*at),
            BookingPredicate::HasStatus(status) => booking.status == *status,
        }
    }
}

/// 予約一覧の問い合わせ
///
/// 結果は常に`start`の降順で返される。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BookingQuery {
    pub role: BookingRole,
    pub predicate: BookingPredicate,
}

impl BookingQuery {
    pub fn new(role: BookingRole, state: BookingState, now: DateTime<Utc>) -> Self {
        Self {
            role,
            predicate: state.predicate(now),
        }
    }

    pub fn matches(&self, booking: &Booking) -> bool {
        self.role.matches(booking) && self.predicate.matches(booking)
    }
}
