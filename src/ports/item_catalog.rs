use crate::domain::{Item, ItemId, PageRequest, UserId};
use async_trait::async_trait;

pub type Result<T> = std::result::Result<T, Box<dyn std::error::Error + Send + Sync>>;

/// アイテムカタログポート
///
/// 予約コンテキストとアイテム管理コンテキストの境界を維持する。
#[async_trait]
pub trait ItemCatalog: Send + Sync {
    /// アイテムを取得する
    ///
    /// 存在しない場合は`None`を返す。
    async fn find(&self, item_id: ItemId) -> Result<Option<Item>>;

    /// 所有者のアイテムをページ単位で取得する
    async fn find_by_owner(&self, owner_id: UserId, page: PageRequest) -> Result<Vec<Item>>;
}
