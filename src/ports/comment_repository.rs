use crate::domain::{Comment, ItemId};
use async_trait::async_trait;

pub type Result<T> = std::result::Result<T, Box<dyn std::error::Error + Send + Sync>>;

/// コメントリポジトリポート
#[async_trait]
pub trait CommentRepository: Send + Sync {
    /// コメントを保存する
    async fn insert(&self, comment: Comment) -> Result<()>;

    /// アイテムのコメントをすべて取得する
    ///
    /// 投稿日時の昇順で返す。
    async fn find_by_item(&self, item_id: ItemId) -> Result<Vec<Comment>>;
}
