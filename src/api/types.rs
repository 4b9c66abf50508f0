use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::{Booking, BookingBrief, Comment, CommentView, ItemSummary};

/// 予約作成リクエスト（POST /bookings）
#[derive(Debug, Deserialize)]
pub struct CreateBookingRequest {
    pub item_id: Uuid,
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

/// 承認クエリ（PATCH /bookings/:id?approved=true）
#[derive(Debug, Deserialize)]
pub struct ApprovalQuery {
    pub approved: bool,
}

/// 予約一覧のクエリパラメータ
#[derive(Debug, Deserialize)]
pub struct ListBookingsQuery {
    #[serde(default = "default_state")]
    pub state: String,
    #[serde(default)]
    pub from: i64,
    #[serde(default = "default_size")]
    pub size: i64,
}

/// ページングのクエリパラメータ
#[derive(Debug, Deserialize)]
pub struct PageQuery {
    #[serde(default)]
    pub from: i64,
    #[serde(default = "default_size")]
    pub size: i64,
}

fn default_state() -> String {
    "ALL".to_string()
}

fn default_size() -> i64 {
    10
}

/// コメント投稿リクエスト（POST /items/:id/comment）
#[derive(Debug, Deserialize)]
pub struct CreateCommentRequest {
    pub text: String,
}

/// 予約レスポンス
#[derive(Debug, Serialize, Deserialize)]
pub struct BookingResponse {
    pub id: Uuid,
    pub item_id: Uuid,
    pub owner_id: Uuid,
    pub booker_id: Uuid,
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
    pub status: String,
}

impl From<Booking> for BookingResponse {
    fn from(booking: Booking) -> Self {
        Self {
            id: booking.booking_id.value(),
            item_id: booking.item_id.value(),
            owner_id: booking.owner_id.value(),
            booker_id: booking.booker_id.value(),
            start: booking.start(),
            end: booking.end(),
            status: booking.status.as_str().to_string(),
        }
    }
}

/// アイテム詳細に埋め込む予約
#[derive(Debug, Serialize, Deserialize)]
pub struct BookingBriefResponse {
    pub id: Uuid,
    pub booker_id: Uuid,
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

impl From<BookingBrief> for BookingBriefResponse {
    fn from(brief: BookingBrief) -> Self {
        Self {
            id: brief.booking_id.value(),
            booker_id: brief.booker_id.value(),
            start: brief.start,
            end: brief.end,
        }
    }
}

/// コメントレスポンス
#[derive(Debug, Serialize, Deserialize)]
pub struct CommentResponse {
    pub id: Uuid,
    pub text: String,
    pub author_name: String,
    pub created: DateTime<Utc>,
}

impl From<CommentView> for CommentResponse {
    fn from(view: CommentView) -> Self {
        Self {
            id: view.comment_id.value(),
            text: view.text,
            author_name: view.author_name,
            created: view.created_at,
        }
    }
}

impl From<Comment> for CommentResponse {
    fn from(comment: Comment) -> Self {
        CommentView::from(comment).into()
    }
}

/// アイテムレスポンス（予約要約・コメント付き）
#[derive(Debug, Serialize, Deserialize)]
pub struct ItemResponse {
    pub id: Uuid,
    pub name: String,
    pub description: String,
    pub available: bool,
    pub last_booking: Option<BookingBriefResponse>,
    pub next_booking: Option<BookingBriefResponse>,
    pub comments: Vec<CommentResponse>,
}

impl From<ItemSummary> for ItemResponse {
    fn from(summary: ItemSummary) -> Self {
        Self {
            id: summary.item.item_id.value(),
            name: summary.item.name,
            description: summary.item.description,
            available: summary.item.available,
            last_booking: summary.last_booking.map(Into::into),
            next_booking: summary.next_booking.map(Into::into),
            comments: summary.comments.into_iter().map(Into::into).collect(),
        }
    }
}

/// エラーレスポンス
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            message: message.into(),
        }
    }
}
