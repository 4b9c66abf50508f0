use crate::application::{
    ApplicationError, ServiceDependencies,
    booking::{
        create_booking as execute_create_booking, get_booking as execute_get_booking,
        list_bookings_as_booker, list_bookings_as_owner, set_approval,
    },
    item::{add_comment as execute_add_comment, get_item_summary, list_owner_items},
};
use crate::domain::{
    BookingId, BookingState, ItemId, UserId,
    commands::{DecideBooking, PostComment, RequestBooking},
};
use axum::{
    Json, async_trait,
    extract::{FromRequestParts, Path, Query, State},
    http::{StatusCode, request::Parts},
};
use std::sync::Arc;
use uuid::Uuid;

use super::{
    error::ApiError,
    types::{
        ApprovalQuery, BookingResponse, CommentResponse, CreateBookingRequest,
        CreateCommentRequest, ItemResponse, ListBookingsQuery, PageQuery,
    },
};

/// 操作ユーザーを識別するヘッダー
pub const USER_ID_HEADER: &str = "X-Sharer-User-Id";

// ============================================================================
// State
// ============================================================================

/// ハンドラー間で共有されるアプリケーション状態
#[derive(Clone)]
pub struct AppState {
    pub service_deps: ServiceDependencies,
}

// ============================================================================
// Extractors
// ============================================================================

/// `X-Sharer-User-Id`ヘッダーから取り出した操作ユーザー
///
/// ヘッダーが無い、またはUUIDとして解釈できない場合は400。
#[derive(Debug, Clone, Copy)]
pub struct ActingUser(pub UserId);

#[async_trait]
impl<S> FromRequestParts<S> for ActingUser
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let raw = parts
            .headers
            .get(USER_ID_HEADER)
            .ok_or_else(|| ApiError::BadRequest(format!("{} header is required", USER_ID_HEADER)))?;

        let uuid = raw
            .to_str()
            .ok()
            .and_then(|value| Uuid::parse_str(value.trim()).ok())
            .ok_or_else(|| {
                ApiError::BadRequest(format!("{} header must be a UUID", USER_ID_HEADER))
            })?;

        Ok(ActingUser(UserId::from_uuid(uuid)))
    }
}

fn parse_state(raw: &str) -> Result<BookingState, ApiError> {
    raw.parse::<BookingState>()
        .map_err(|e| ApiError::from(ApplicationError::from(e)))
}

// ============================================================================
// Booking handlers
// ============================================================================

/// POST /bookings - 予約を申請
///
/// 開始が現在以降、終了が現在より後であることはここで検証する。
/// それ以外のルールはアプリケーション層で強制される:
/// - アイテムが存在し貸出可能であること
/// - 開始が終了より前であること
/// - 所有者は自分のアイテムを予約できないこと
pub async fn create_booking(
    State(state): State<Arc<AppState>>,
    ActingUser(booker_id): ActingUser,
    Json(req): Json<CreateBookingRequest>,
) -> Result<(StatusCode, Json<BookingResponse>), ApiError> {
    let now = state.service_deps.clock.now();
    if req.start < now {
        return Err(ApiError::BadRequest("start must not be in the past".to_string()));
    }
    if req.end <= now {
        return Err(ApiError::BadRequest("end must be in the future".to_string()));
    }

    let cmd = RequestBooking {
        item_id: ItemId::from_uuid(req.item_id),
        booker_id,
        start: req.start,
        end: req.end,
    };

    let booking = execute_create_booking(&state.service_deps, cmd).await?;

    Ok((StatusCode::CREATED, Json(BookingResponse::from(booking))))
}

/// PATCH /bookings/:id?approved=bool - 予約を承認または却下
///
/// アイテム所有者のみ操作できる。同じ状態の再適用は400。
pub async fn approve_booking(
    State(state): State<Arc<AppState>>,
    ActingUser(acting_user_id): ActingUser,
    Path(booking_id): Path<Uuid>,
    Query(query): Query<ApprovalQuery>,
) -> Result<Json<BookingResponse>, ApiError> {
    let cmd = DecideBooking {
        booking_id: BookingId::from_uuid(booking_id),
        approve: query.approved,
        acting_user_id,
    };

    let booking = set_approval(&state.service_deps, cmd).await?;

    Ok(Json(BookingResponse::from(booking)))
}

/// GET /bookings/:id - 予約詳細
///
/// 借り手とアイテム所有者以外には404を返す。
pub async fn get_booking(
    State(state): State<Arc<AppState>>,
    ActingUser(viewer_id): ActingUser,
    Path(booking_id): Path<Uuid>,
) -> Result<Json<BookingResponse>, ApiError> {
    let booking =
        execute_get_booking(&state.service_deps, BookingId::from_uuid(booking_id), viewer_id)
            .await?;

    Ok(Json(BookingResponse::from(booking)))
}

/// GET /bookings?state=ALL&from=0&size=10 - 借り手としての予約一覧
pub async fn list_bookings(
    State(state): State<Arc<AppState>>,
    ActingUser(booker_id): ActingUser,
    Query(query): Query<ListBookingsQuery>,
) -> Result<Json<Vec<BookingResponse>>, ApiError> {
    let booking_state = parse_state(&query.state)?;

    let bookings = list_bookings_as_booker(
        &state.service_deps,
        booker_id,
        booking_state,
        query.from,
        query.size,
    )
    .await?;

    Ok(Json(bookings.into_iter().map(BookingResponse::from).collect()))
}

/// GET /bookings/owner?state=ALL&from=0&size=10 - 所有者としての予約一覧
pub async fn list_owner_bookings(
    State(state): State<Arc<AppState>>,
    ActingUser(owner_id): ActingUser,
    Query(query): Query<ListBookingsQuery>,
) -> Result<Json<Vec<BookingResponse>>, ApiError> {
    let booking_state = parse_state(&query.state)?;

    let bookings = list_bookings_as_owner(
        &state.service_deps,
        owner_id,
        booking_state,
        query.from,
        query.size,
    )
    .await?;

    Ok(Json(bookings.into_iter().map(BookingResponse::from).collect()))
}

// ============================================================================
// Item handlers
// ============================================================================

/// GET /items/:id - アイテム詳細（予約要約・コメント付き）
///
/// 直前・次の予約は所有者が閲覧したときだけ埋まる。
pub async fn get_item(
    State(state): State<Arc<AppState>>,
    ActingUser(viewer_id): ActingUser,
    Path(item_id): Path<Uuid>,
) -> Result<Json<ItemResponse>, ApiError> {
    let summary =
        get_item_summary(&state.service_deps, ItemId::from_uuid(item_id), viewer_id).await?;

    Ok(Json(ItemResponse::from(summary)))
}

/// GET /items?from=0&size=10 - 所有者のアイテム一覧
pub async fn list_items(
    State(state): State<Arc<AppState>>,
    ActingUser(owner_id): ActingUser,
    Query(query): Query<PageQuery>,
) -> Result<Json<Vec<ItemResponse>>, ApiError> {
    let summaries =
        list_owner_items(&state.service_deps, owner_id, query.from, query.size).await?;

    Ok(Json(summaries.into_iter().map(ItemResponse::from).collect()))
}

/// POST /items/:id/comment - コメントを投稿
///
/// 空白のみの本文は400。投稿時刻はサーバーの時計で決まる。
pub async fn add_comment(
    State(state): State<Arc<AppState>>,
    ActingUser(author_id): ActingUser,
    Path(item_id): Path<Uuid>,
    Json(req): Json<CreateCommentRequest>,
) -> Result<Json<CommentResponse>, ApiError> {
    if req.text.trim().is_empty() {
        return Err(ApiError::BadRequest("text must not be blank".to_string()));
    }

    let cmd = PostComment {
        item_id: ItemId::from_uuid(item_id),
        author_id,
        text: req.text,
        created_at: state.service_deps.clock.now(),
    };

    let comment = execute_add_comment(&state.service_deps, cmd).await?;

    Ok(Json(CommentResponse::from(comment)))
}
