use serde::{Deserialize, Serialize};

use super::{ItemId, UserId};

/// アイテム（アイテム管理コンテキストのスナップショット）
///
/// 予約コンテキストは所有者と貸出可否だけを判断に使う。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Item {
    pub item_id: ItemId,
    pub owner_id: UserId,
    pub name: String,
    pub description: String,
    /// 新しい予約を受け付けるか
    pub available: bool,
}

impl Item {
    pub fn is_owned_by(&self, user_id: UserId) -> bool {
        self.owner_id == user_id
    }
}

/// ユーザー（ユーザー管理コンテキストのスナップショット）
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub user_id: UserId,
    pub name: String,
}
