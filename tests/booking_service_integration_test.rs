mod common;

use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use common::TestContext;
use rusty_shareit::adapters::mock::BookingRepository as MockBookingRepository;
use rusty_shareit::application::booking::{
    create_booking, get_booking, list_bookings_as_booker, list_bookings_as_owner, set_approval,
};
use rusty_shareit::application::{BookingPolicy, ErrorKind, ServiceDependencies};
use rusty_shareit::domain::commands::*;
use rusty_shareit::domain::*;
use rusty_shareit::ports::booking_repository::{
    BookingRepository as BookingRepositoryPort, Result as PortResult,
};
use rusty_shareit::ports::clock::Clock;
use std::sync::Arc;

fn request(
    ctx: &TestContext,
    item_id: ItemId,
    booker_id: UserId,
    start_hours: i64,
    end_hours: i64,
) -> RequestBooking {
    let now = ctx.clock.now();
    RequestBooking {
        item_id,
        booker_id,
        start: now + Duration::hours(start_hours),
        end: now + Duration::hours(end_hours),
    }
}

fn decide(booking_id: BookingId, approve: bool, acting_user_id: UserId) -> DecideBooking {
    DecideBooking {
        booking_id,
        approve,
        acting_user_id,
    }
}

// ============================================================================
// create_booking
// ============================================================================

#[tokio::test]
async fn test_create_then_get_round_trip() {
    let ctx = TestContext::new();
    let (_, booker, item) = ctx.owner_booker_item();
    let cmd = request(&ctx, item, booker, 24, 48);

    let created = create_booking(&ctx.deps, cmd.clone()).await.unwrap();
    let fetched = get_booking(&ctx.deps, created.booking_id, booker)
        .await
        .unwrap();

    assert_eq!(fetched.start(), cmd.start);
    assert_eq!(fetched.end(), cmd.end);
    assert_eq!(fetched.item_id, item);
    assert_eq!(fetched.booker_id, booker);
    assert_eq!(fetched.status, BookingStatus::Waiting);
}

#[tokio::test]
async fn test_create_rejects_empty_or_inverted_period() {
    let ctx = TestContext::new();
    let (_, booker, item) = ctx.owner_booker_item();

    let equal = create_booking(&ctx.deps, request(&ctx, item, booker, 24, 24)).await;
    assert_eq!(equal.unwrap_err().kind(), ErrorKind::Validation);

    let inverted = create_booking(&ctx.deps, request(&ctx, item, booker, 48, 24)).await;
    assert_eq!(inverted.unwrap_err().kind(), ErrorKind::Validation);
}

#[tokio::test]
async fn test_create_rejects_unavailable_item() {
    let ctx = TestContext::new();
    let (_, booker, item) = ctx.owner_booker_item();
    ctx.items.set_available(item, false);

    let result = create_booking(&ctx.deps, request(&ctx, item, booker, 24, 48)).await;
    let err = result.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Validation);
    assert_eq!(err.to_string(), "Item is not available for rent");
}

#[tokio::test]
async fn test_unavailable_item_wins_over_invalid_period() {
    let ctx = TestContext::new();
    let (_, booker, item) = ctx.owner_booker_item();
    ctx.items.set_available(item, false);

    let err = create_booking(&ctx.deps, request(&ctx, item, booker, 48, 24))
        .await
        .unwrap_err();
    assert_eq!(err.to_string(), "Item is not available for rent");
}

#[tokio::test]
async fn test_owner_cannot_book_own_item() {
    let ctx = TestContext::new();
    let (owner, _, item) = ctx.owner_booker_item();

    let err = create_booking(&ctx.deps, request(&ctx, item, owner, 24, 48))
        .await
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::NotFound);
}

#[tokio::test]
async fn test_create_with_unknown_item_or_user() {
    let ctx = TestContext::new();
    let (_, booker, item) = ctx.owner_booker_item();

    let err = create_booking(&ctx.deps, request(&ctx, ItemId::new(), booker, 24, 48))
        .await
        .unwrap_err();
    assert_eq!(err.to_string(), "Item not found");

    let err = create_booking(&ctx.deps, request(&ctx, item, UserId::new(), 24, 48))
        .await
        .unwrap_err();
    assert_eq!(err.to_string(), "User not found");
}

#[tokio::test]
async fn test_overlapping_bookings_allowed_by_default() {
    let ctx = TestContext::new();
    let (owner, booker, item) = ctx.owner_booker_item();
    let first = ctx.book(item, booker, 24, 48).await;
    set_approval(&ctx.deps, decide(first.booking_id, true, owner))
        .await
        .unwrap();

    let second = create_booking(&ctx.deps, request(&ctx, item, booker, 30, 60)).await;
    assert!(second.is_ok());
}

#[tokio::test]
async fn test_overlap_rejection_policy() {
    let ctx = TestContext::with_policy(BookingPolicy {
        reject_overlaps: true,
        ..BookingPolicy::default()
    });
    let (owner, booker, item) = ctx.owner_booker_item();
    let first = ctx.book(item, booker, 24, 48).await;

    // 未承認の予約とは重なってもよい
    assert!(
        create_booking(&ctx.deps, request(&ctx, item, booker, 30, 60))
            .await
            .is_ok()
    );

    set_approval(&ctx.deps, decide(first.booking_id, true, owner))
        .await
        .unwrap();

    let err = create_booking(&ctx.deps, request(&ctx, item, booker, 30, 60))
        .await
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Validation);

    // 終了時刻ちょうどに始まる予約は重ならない
    assert!(
        create_booking(&ctx.deps, request(&ctx, item, booker, 48, 72))
            .await
            .is_ok()
    );
}

// ============================================================================
// set_approval
// ============================================================================

#[tokio::test]
async fn test_approve_twice_fails() {
    let ctx = TestContext::new();
    let (owner, booker, item) = ctx.owner_booker_item();
    let booking = ctx.book(item, booker, 24, 48).await;

    let approved = set_approval(&ctx.deps, decide(booking.booking_id, true, owner))
        .await
        .unwrap();
    assert_eq!(approved.status, BookingStatus::Approved);

    let err = set_approval(&ctx.deps, decide(booking.booking_id, true, owner))
        .await
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Validation);
    assert_eq!(err.to_string(), "Cannot approve a booking twice");
}

#[tokio::test]
async fn test_reject_twice_fails() {
    let ctx = TestContext::new();
    let (owner, booker, item) = ctx.owner_booker_item();
    let booking = ctx.book(item, booker, 24, 48).await;

    set_approval(&ctx.deps, decide(booking.booking_id, false, owner))
        .await
        .unwrap();
    let err = set_approval(&ctx.deps, decide(booking.booking_id, false, owner))
        .await
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Validation);
}

#[tokio::test]
async fn test_decision_can_be_reversed() {
    let ctx = TestContext::new();
    let (owner, booker, item) = ctx.owner_booker_item();
    let booking = ctx.book(item, booker, 24, 48).await;

    set_approval(&ctx.deps, decide(booking.booking_id, false, owner))
        .await
        .unwrap();
    let approved = set_approval(&ctx.deps, decide(booking.booking_id, true, owner))
        .await
        .unwrap();
    assert_eq!(approved.status, BookingStatus::Approved);

    let rejected = set_approval(&ctx.deps, decide(booking.booking_id, false, owner))
        .await
        .unwrap();
    assert_eq!(rejected.status, BookingStatus::Rejected);
}

#[tokio::test]
async fn test_non_owner_approval_is_not_found() {
    let ctx = TestContext::new();
    let (_, booker, item) = ctx.owner_booker_item();
    let booking = ctx.book(item, booker, 24, 48).await;
    let stranger = ctx.users.add_user("Stan");

    for actor in [booker, stranger] {
        let err = set_approval(&ctx.deps, decide(booking.booking_id, true, actor))
            .await
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::NotFound);
    }

    let stored = ctx
        .bookings
        .get_by_id(booking.booking_id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(stored.status, BookingStatus::Waiting);
}

#[tokio::test]
async fn test_approval_of_missing_booking() {
    let ctx = TestContext::new();
    let (owner, _, _) = ctx.owner_booker_item();

    let err = set_approval(&ctx.deps, decide(BookingId::new(), true, owner))
        .await
        .unwrap_err();
    assert_eq!(err.to_string(), "Booking not found");
}

#[tokio::test]
async fn test_sequential_duplicate_approval_is_rejected_by_domain() {
    let ctx = TestContext::new();
    let (owner, booker, item) = ctx.owner_booker_item();
    let booking = ctx.book(item, booker, 24, 48).await;

    // インメモリリポジトリは待機しないので、2つ目は1つ目の結果を読み込む
    let (first, second) = tokio::join!(
        set_approval(&ctx.deps, decide(booking.booking_id, true, owner)),
        set_approval(&ctx.deps, decide(booking.booking_id, true, owner)),
    );

    assert_eq!(first.unwrap().status, BookingStatus::Approved);
    assert_eq!(
        second.unwrap_err().to_string(),
        "Cannot approve a booking twice"
    );
}

/// 読み込み直後に別の決定が割り込むBookingRepository
///
/// `get_by_id`は読み込んだ時点の予約を返すが、返す前に保存済みのステータスを
/// `interleaved`へ書き換える。比較交換が古い期待値で呼ばれる状況を再現する。
struct InterleavingBookingRepository {
    inner: Arc<MockBookingRepository>,
    interleaved: BookingStatus,
}

#[async_trait]
impl BookingRepositoryPort for InterleavingBookingRepository {
    async fn insert(&self, booking: Booking) -> PortResult<()> {
        self.inner.insert(booking).await
    }

    async fn get_by_id(&self, booking_id: BookingId) -> PortResult<Option<Booking>> {
        let snapshot = self.inner.get_by_id(booking_id).await?;
        if let Some(booking) = &snapshot {
            self.inner
                .update_status(
                    booking_id,
                    booking.status,
                    self.interleaved,
                    booking.updated_at,
                )
                .await?;
        }
        Ok(snapshot)
    }

    async fn update_status(
        &self,
        booking_id: BookingId,
        expected: BookingStatus,
        new: BookingStatus,
        updated_at: DateTime<Utc>,
    ) -> PortResult<bool> {
        self.inner
            .update_status(booking_id, expected, new, updated_at)
            .await
    }

    async fn find(&self, query: BookingQuery, page: PageRequest) -> PortResult<Vec<Booking>> {
        self.inner.find(query, page).await
    }

    async fn find_by_item(&self, item_id: ItemId) -> PortResult<Vec<Booking>> {
        self.inner.find_by_item(item_id).await
    }

    async fn find_by_item_and_booker(
        &self,
        item_id: ItemId,
        booker_id: UserId,
    ) -> PortResult<Vec<Booking>> {
        self.inner.find_by_item_and_booker(item_id, booker_id).await
    }

    async fn find_ended_for_item(
        &self,
        item_id: ItemId,
        now: DateTime<Utc>,
    ) -> PortResult<Vec<Booking>> {
        self.inner.find_ended_for_item(item_id, now).await
    }

    async fn find_upcoming_for_item(
        &self,
        item_id: ItemId,
        now: DateTime<Utc>,
    ) -> PortResult<Vec<Booking>> {
        self.inner.find_upcoming_for_item(item_id, now).await
    }

    async fn find_active_for_owner(
        &self,
        owner_id: UserId,
        now: DateTime<Utc>,
    ) -> PortResult<Vec<Booking>> {
        self.inner.find_active_for_owner(owner_id, now).await
    }
}

#[tokio::test]
async fn test_approval_loses_to_interleaved_rejection() {
    let ctx = TestContext::new();
    let (owner, booker, item) = ctx.owner_booker_item();
    let booking = ctx.book(item, booker, 24, 48).await;

    let deps = ServiceDependencies {
        booking_repository: Arc::new(InterleavingBookingRepository {
            inner: ctx.bookings.clone(),
            interleaved: BookingStatus::Rejected,
        }),
        ..ctx.deps.clone()
    };

    // WAITINGとして読み込んで承認を決めるが、保存時には既に却下されている
    let err = set_approval(&deps, decide(booking.booking_id, true, owner))
        .await
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Validation);
    assert_eq!(err.to_string(), "Booking status changed concurrently");

    // 割り込んだ却下が残り、承認で上書きされない
    let stored = ctx
        .bookings
        .get_by_id(booking.booking_id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(stored.status, BookingStatus::Rejected);
}

// ============================================================================
// get_booking
// ============================================================================

#[tokio::test]
async fn test_get_booking_visibility() {
    let ctx = TestContext::new();
    let (owner, booker, item) = ctx.owner_booker_item();
    let stranger = ctx.users.add_user("Stan");
    let booking = ctx.book(item, booker, 24, 48).await;

    assert!(get_booking(&ctx.deps, booking.booking_id, booker).await.is_ok());
    assert!(get_booking(&ctx.deps, booking.booking_id, owner).await.is_ok());

    let err = get_booking(&ctx.deps, booking.booking_id, stranger)
        .await
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::NotFound);
    assert_eq!(err.to_string(), "Booking not found");
}

// ============================================================================
// list_bookings_as_booker / list_bookings_as_owner
// ============================================================================

/// 過去・進行中・未来・却下済み・未承認の予約を1件ずつ用意する
async fn seed_buckets(ctx: &TestContext) -> (UserId, UserId, [Booking; 4]) {
    let (owner, booker, item) = ctx.owner_booker_item();

    let past = ctx.book(item, booker, -72, -48).await;
    let current = ctx.book(item, booker, -2, 2).await;
    let future = ctx.book(item, booker, 24, 48).await;
    let far_future = ctx.book(item, booker, 96, 120).await;

    set_approval(&ctx.deps, decide(past.booking_id, true, owner))
        .await
        .unwrap();
    set_approval(&ctx.deps, decide(current.booking_id, true, owner))
        .await
        .unwrap();
    set_approval(&ctx.deps, decide(far_future.booking_id, false, owner))
        .await
        .unwrap();

    (owner, booker, [past, current, future, far_future])
}

fn ids(bookings: &[Booking]) -> Vec<BookingId> {
    bookings.iter().map(|b| b.booking_id).collect()
}

#[tokio::test]
async fn test_list_as_booker_by_state() {
    let ctx = TestContext::new();
    let (_, booker, [past, current, future, far_future]) = seed_buckets(&ctx).await;

    let list = |state| list_bookings_as_booker(&ctx.deps, booker, state, 0, 10);

    let all = list(BookingState::All).await.unwrap();
    assert_eq!(
        ids(&all),
        vec![
            far_future.booking_id,
            future.booking_id,
            current.booking_id,
            past.booking_id
        ]
    );

    assert_eq!(
        ids(&list(BookingState::Current).await.unwrap()),
        vec![current.booking_id]
    );
    assert_eq!(
        ids(&list(BookingState::Past).await.unwrap()),
        vec![past.booking_id]
    );
    assert_eq!(
        ids(&list(BookingState::Future).await.unwrap()),
        vec![far_future.booking_id, future.booking_id]
    );
    assert_eq!(
        ids(&list(BookingState::Waiting).await.unwrap()),
        vec![future.booking_id]
    );
    assert_eq!(
        ids(&list(BookingState::Rejected).await.unwrap()),
        vec![far_future.booking_id]
    );
}

#[tokio::test]
async fn test_list_as_owner_by_state() {
    let ctx = TestContext::new();
    let (owner, booker, [past, current, future, far_future]) = seed_buckets(&ctx).await;

    let list = |state| list_bookings_as_owner(&ctx.deps, owner, state, 0, 10);

    assert_eq!(
        ids(&list(BookingState::All).await.unwrap()),
        vec![
            far_future.booking_id,
            future.booking_id,
            current.booking_id,
            past.booking_id
        ]
    );
    assert_eq!(
        ids(&list(BookingState::Current).await.unwrap()),
        vec![current.booking_id]
    );
    assert_eq!(
        ids(&list(BookingState::Past).await.unwrap()),
        vec![past.booking_id]
    );
    assert_eq!(
        ids(&list(BookingState::Future).await.unwrap()),
        vec![far_future.booking_id, future.booking_id]
    );
    assert_eq!(
        ids(&list(BookingState::Waiting).await.unwrap()),
        vec![future.booking_id]
    );
    assert_eq!(
        ids(&list(BookingState::Rejected).await.unwrap()),
        vec![far_future.booking_id]
    );

    // 借り手は所有者としての一覧に何も持たない
    let as_owner = list_bookings_as_owner(&ctx.deps, booker, BookingState::All, 0, 10)
        .await
        .unwrap();
    assert!(as_owner.is_empty());
}

#[tokio::test]
async fn test_future_booking_moves_between_buckets_as_time_passes() {
    let ctx = TestContext::new();
    let (_, booker, item) = ctx.owner_booker_item();
    let booking = ctx.book(item, booker, 24, 48).await;

    let future = list_bookings_as_booker(&ctx.deps, booker, BookingState::Future, 0, 10)
        .await
        .unwrap();
    assert_eq!(ids(&future), vec![booking.booking_id]);
    let past = list_bookings_as_booker(&ctx.deps, booker, BookingState::Past, 0, 10)
        .await
        .unwrap();
    assert!(past.is_empty());

    ctx.clock.advance(Duration::hours(36));

    let current = list_bookings_as_booker(&ctx.deps, booker, BookingState::Current, 0, 10)
        .await
        .unwrap();
    assert_eq!(ids(&current), vec![booking.booking_id]);

    ctx.clock.set(booking.end() + Duration::seconds(1));

    let past = list_bookings_as_booker(&ctx.deps, booker, BookingState::Past, 0, 10)
        .await
        .unwrap();
    assert_eq!(ids(&past), vec![booking.booking_id]);
    let current = list_bookings_as_booker(&ctx.deps, booker, BookingState::Current, 0, 10)
        .await
        .unwrap();
    assert!(current.is_empty());
}

#[tokio::test]
async fn test_list_pagination_is_page_aligned() {
    let ctx = TestContext::new();
    let (_, booker, item) = ctx.owner_booker_item();
    for day in 1..=5 {
        ctx.book(item, booker, day * 24, day * 24 + 1).await;
    }

    let first_page = list_bookings_as_booker(&ctx.deps, booker, BookingState::All, 0, 2)
        .await
        .unwrap();
    // from=3, size=2 は2ページ目（offset 2）
    let second_page = list_bookings_as_booker(&ctx.deps, booker, BookingState::All, 3, 2)
        .await
        .unwrap();
    let last_page = list_bookings_as_booker(&ctx.deps, booker, BookingState::All, 4, 2)
        .await
        .unwrap();

    assert_eq!(first_page.len(), 2);
    assert_eq!(second_page.len(), 2);
    assert_eq!(last_page.len(), 1);
    assert!(first_page[1].start() > second_page[0].start());
    assert!(second_page[1].start() > last_page[0].start());
}

#[tokio::test]
async fn test_invalid_page_is_rejected_before_lookup() {
    let ctx = TestContext::new();
    let unknown_user = UserId::new();

    // 存在しないユーザーでもページ指定の検証が先に失敗する
    let err = list_bookings_as_booker(&ctx.deps, unknown_user, BookingState::All, -1, 10)
        .await
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Validation);

    let err = list_bookings_as_owner(&ctx.deps, unknown_user, BookingState::All, 0, 0)
        .await
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Validation);

    let err = list_bookings_as_owner(&ctx.deps, unknown_user, BookingState::All, 0, 10)
        .await
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::NotFound);
}
