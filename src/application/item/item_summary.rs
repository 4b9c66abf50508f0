use futures::future::try_join_all;

use crate::domain::{
    self, CommentView, Item, ItemId, ItemSummary, PageRequest, UserId, summary::LastAndNext,
};

use crate::application::dependencies::ServiceDependencies;
use crate::application::errors::{ApplicationError, Result};
use crate::application::lookups::{resolve_item, resolve_user};

/// アイテムの予約要約とコメントを計算する
///
/// ビジネスルール：
/// - 直前・次の予約は所有者にだけ見える
/// - コメントは閲覧者に関係なく常に含める
///
/// 終了済みと未開始の予約は並行して取得する。
/// 進行中予約へのフォールバックが必要なときだけ追加で問い合わせる。
pub async fn compute_item_summary(
    deps: &ServiceDependencies,
    item: Item,
    viewer_id: UserId,
) -> Result<ItemSummary> {
    let LastAndNext { last, next } = if item.is_owned_by(viewer_id) {
        let now = deps.clock.now();
        let repository = &deps.booking_repository;

        let (ended, upcoming) = futures::try_join!(
            repository.find_ended_for_item(item.item_id, now),
            repository.find_upcoming_for_item(item.item_id, now),
        )
        .map_err(ApplicationError::BookingRepositoryError)?;

        let active = if ended.is_empty() || upcoming.is_empty() {
            repository
                .find_active_for_owner(viewer_id, now)
                .await
                .map_err(ApplicationError::BookingRepositoryError)?
        } else {
            Vec::new()
        };

        domain::summary::select_last_and_next(
            &item,
            viewer_id,
            &ended,
            &upcoming,
            &active,
            deps.policy.next_booking,
        )
    } else {
        LastAndNext::default()
    };

    let comments = deps
        .comment_repository
        .find_by_item(item.item_id)
        .await
        .map_err(ApplicationError::CommentRepositoryError)?
        .into_iter()
        .map(CommentView::from)
        .collect();

    Ok(ItemSummary {
        item,
        last_booking: last,
        next_booking: next,
        comments,
    })
}

/// 閲覧者向けにアイテム詳細を取得する
///
/// 閲覧者とアイテムの両方が存在すること（NotFound）。
pub async fn get_item_summary(
    deps: &ServiceDependencies,
    item_id: ItemId,
    viewer_id: UserId,
) -> Result<ItemSummary> {
    resolve_user(deps, viewer_id).await?;
    let item = resolve_item(deps, item_id).await?;
    compute_item_summary(deps, item, viewer_id).await
}

/// 所有者のアイテム一覧を予約要約付きで取得する
pub async fn list_owner_items(
    deps: &ServiceDependencies,
    owner_id: UserId,
    from: i64,
    size: i64,
) -> Result<Vec<ItemSummary>> {
    let page = PageRequest::new(from, size)?;
    resolve_user(deps, owner_id).await?;

    let items = deps
        .item_catalog
        .find_by_owner(owner_id, page)
        .await
        .map_err(ApplicationError::ItemCatalogError)?;

    try_join_all(
        items
            .into_iter()
            .map(|item| compute_item_summary(deps, item, owner_id)),
    )
    .await
}
