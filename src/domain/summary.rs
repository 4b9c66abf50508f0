use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{Booking, BookingId, Comment, CommentId, Item, UserId};

/// 「次の予約」の選び方
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NextBookingSelection {
    /// 開始昇順リストの末尾（既存クライアントとの互換動作）
    #[default]
    LastOfUpcoming,
    /// 開始昇順リストの先頭（最も近い未来の予約）
    Soonest,
}

impl std::str::FromStr for NextBookingSelection {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "last" => Ok(NextBookingSelection::LastOfUpcoming),
            "soonest" => Ok(NextBookingSelection::Soonest),
            _ => Err(format!("Invalid next booking selection: {}", s)),
        }
    }
}

/// アイテム詳細に埋め込む予約の要約
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookingBrief {
    pub booking_id: BookingId,
    pub booker_id: UserId,
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

impl From<&Booking> for BookingBrief {
    fn from(booking: &Booking) -> Self {
        Self {
            booking_id: booking.booking_id,
            booker_id: booking.booker_id,
            start: booking.start(),
            end: booking.end(),
        }
    }
}

/// コメントの表示用ビュー
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommentView {
    pub comment_id: CommentId,
    pub text: String,
    pub author_name: String,
    pub created_at: DateTime<Utc>,
}

impl From<Comment> for CommentView {
    fn from(comment: Comment) -> Self {
        Self {
            comment_id: comment.comment_id,
            text: comment.text,
            author_name: comment.author_name,
            created_at: comment.created_at,
        }
    }
}

/// アイテムと予約要約・コメントをまとめたビュー
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemSummary {
    pub item: Item,
    pub last_booking: Option<BookingBrief>,
    pub next_booking: Option<BookingBrief>,
    pub comments: Vec<CommentView>,
}

/// 「直前の予約」「次の予約」の組
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LastAndNext {
    pub last: Option<BookingBrief>,
    pub next: Option<BookingBrief>,
}

/// 純粋関数：直前・次の予約を選ぶ
///
/// ビジネスルール：
/// - 閲覧者がアイテム所有者でなければ両方とも空
/// - 終了済みと未開始の両方があれば、終了済み（end降順）の先頭を直前、
///   未開始（start昇順）から`selection`に従って次を選ぶ
/// - どちらかが空なら、所有者の進行中予約（start降順）のうち
///   このアイテムのものを直前とする（複数あれば最後に一致したもの）。次は空
///
/// # 引数
/// * `ended` - このアイテムの終了済み予約（end降順）
/// * `upcoming` - このアイテムの未開始予約（start昇順）
/// * `active_for_owner` - 所有者の全アイテムの進行中予約（start降順）
pub fn select_last_and_next(
    item: &Item,
    viewer_id: UserId,
    ended: &[Booking],
    upcoming: &[Booking],
    active_for_owner: &[Booking],
    selection: NextBookingSelection,
) -> LastAndNext {
    if !item.is_owned_by(viewer_id) {
        return LastAndNext::default();
    }

    if let (Some(last), false) = (ended.first(), upcoming.is_empty()) {
        let next = match selection {
            NextBookingSelection::LastOfUpcoming => upcoming.last(),
            NextBookingSelection::Soonest => upcoming.first(),
        };
        return LastAndNext {
            last: Some(BookingBrief::from(last)),
            next: next.map(BookingBrief::from),
        };
    }

    let last = active_for_owner
        .iter()
        .filter(|b| b.item_id == item.item_id)
        .last()
        .map(BookingBrief::from);

    LastAndNext { last, next: None }
}
