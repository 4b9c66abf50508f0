use crate::domain::{self, Comment, commands::PostComment};

use crate::application::dependencies::ServiceDependencies;
use crate::application::errors::{ApplicationError, Result};
use crate::application::lookups::{resolve_item, resolve_user};

/// アイテムにコメントを投稿する
///
/// ビジネスルール：
/// - アイテムと投稿者が存在すること（NotFound）
/// - 投稿者がこのアイテムを予約したことがあること
/// - 投稿者の予約に却下済みのものがないこと
/// - 最初の予約が投稿時刻までに始まっていること
pub async fn add_comment(deps: &ServiceDependencies, cmd: PostComment) -> Result<Comment> {
    // 1. アイテムと投稿者の存在確認
    let item = resolve_item(deps, cmd.item_id).await?;
    let author = resolve_user(deps, cmd.author_id).await?;

    // 2. 投稿者によるこのアイテムの予約を取得
    let bookings = deps
        .booking_repository
        .find_by_item_and_booker(item.item_id, author.user_id)
        .await
        .map_err(ApplicationError::BookingRepositoryError)?;

    // 3. ドメイン層の純粋関数を呼び出し
    let comment =
        domain::comment::post_comment(&item, &author, cmd.text, cmd.created_at, &bookings)?;

    // 4. 保存
    deps.comment_repository
        .insert(comment.clone())
        .await
        .map_err(ApplicationError::CommentRepositoryError)?;

    tracing::info!(
        comment_id = %comment.comment_id.value(),
        item_id = %comment.item_id.value(),
        "comment posted"
    );

    Ok(comment)
}
