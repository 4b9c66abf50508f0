use crate::domain::{User, UserId};
use async_trait::async_trait;

pub type Result<T> = std::result::Result<T, Box<dyn std::error::Error + Send + Sync>>;

/// ユーザーディレクトリポート
///
/// 予約コンテキストとユーザー管理コンテキストの境界を維持する。
/// 予約コンテキストはUserIDと表示名のみを知る。
#[async_trait]
pub trait UserDirectory: Send + Sync {
    /// ユーザーを取得する
    ///
    /// 存在しない場合は`None`を返す。
    async fn find(&self, user_id: UserId) -> Result<Option<User>>;
}
