use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{Booking, BookingStatus, CommentEligibilityError, CommentId, Item, ItemId, User, UserId};

/// アイテムへのコメント（レンタル後のフィードバック）
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Comment {
    pub comment_id: CommentId,
    pub item_id: ItemId,
    pub author_id: UserId,
    /// 投稿時点の投稿者名
    pub author_name: String,
    pub text: String,
    pub created_at: DateTime<Utc>,
}

/// 純粋関数：コメント投稿資格の判定
///
/// ビジネスルール：
/// - 投稿者がこのアイテムを1回以上予約していること
/// - 投稿者の予約に却下済みのものが1つもないこと
///   （別の予約が承認・完了していても却下が1つあれば不可）
/// - 最も早く始まる予約の開始時刻が投稿時刻以前であること
///
/// # 引数
/// * `bookings` - 投稿者によるこのアイテムの予約すべて
/// * `created_at` - コメントの投稿時刻
pub fn check_comment_eligibility(
    bookings: &[Booking],
    created_at: DateTime<Utc>,
) -> Result<(), CommentEligibilityError> {
    let earliest = bookings
        .iter()
        .min_by_key(|b| b.start())
        .ok_or(CommentEligibilityError::NeverBooked)?;

    if bookings.iter().any(|b| b.status == BookingStatus::Rejected) {
        return Err(CommentEligibilityError::HasRejectedBooking);
    }

    if earliest.start() > created_at {
        return Err(CommentEligibilityError::RentalNotStarted);
    }

    Ok(())
}

/// 純粋関数：コメントを投稿する
///
/// 資格判定に通った場合のみ新しいCommentを返す。副作用なし。
pub fn post_comment(
    item: &Item,
    author: &User,
    text: String,
    created_at: DateTime<Utc>,
    author_bookings: &[Booking],
) -> Result<Comment, CommentEligibilityError> {
    check_comment_eligibility(author_bookings, created_at)?;

    Ok(Comment {
        comment_id: CommentId::new(),
        item_id: item.item_id,
        author_id: author.user_id,
        author_name: author.name.clone(),
        text,
        created_at,
    })
}
