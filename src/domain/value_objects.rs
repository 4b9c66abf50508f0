use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{InvalidPage, InvalidPeriod};

/// 予約ID - 予約集約のID
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BookingId(Uuid);

impl BookingId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    pub fn value(&self) -> Uuid {
        self.0
    }
}

impl Default for BookingId {
    fn default() -> Self {
        Self::new()
    }
}

/// アイテムID - アイテム管理コンテキストへの参照
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ItemId(Uuid);

impl ItemId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    pub fn value(&self) -> Uuid {
        self.0
    }
}

impl Default for ItemId {
    fn default() -> Self {
        Self::new()
    }
}

/// ユーザーID - ユーザー管理コンテキストへの参照
///
/// 借り手（booker）とアイテム所有者（owner）の両方に使われる。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct UserId(Uuid);

impl UserId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    pub fn value(&self) -> Uuid {
        self.0
    }
}

impl Default for UserId {
    fn default() -> Self {
        Self::new()
    }
}

/// コメントID
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CommentId(Uuid);

impl CommentId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    pub fn value(&self) -> Uuid {
        self.0
    }
}

impl Default for CommentId {
    fn default() -> Self {
        Self::new()
    }
}

/// 予約期間（半開区間 `[start, end)`）
///
/// 不変条件：`start < end`（同時刻も不正）
/// 型システムでこの制約を強制し、不正な期間を作成できないようにする。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookingPeriod {
    start: DateTime<Utc>,
    end: DateTime<Utc>,
}

impl BookingPeriod {
    /// 期間を作成する
    ///
    /// # エラー
    /// `start >= end` の場合は`InvalidPeriod`を返す
    pub fn new(start: DateTime<Utc>, end: DateTime<Utc>) -> Result<Self, InvalidPeriod> {
        if start >= end {
            return Err(InvalidPeriod { start, end });
        }
        Ok(Self { start, end })
    }

    pub fn start(&self) -> DateTime<Utc> {
        self.start
    }

    pub fn end(&self) -> DateTime<Utc> {
        self.end
    }

    /// 半開区間同士が重なるか
    pub fn overlaps(&self, other: &BookingPeriod) -> bool {
        self.start < other.end && other.start < self.end
    }
}

/// ページ指定
///
/// 不変条件：`from >= 0` かつ `size >= 1`
/// オフセットは `from / size` ページ目の先頭（`(from / size) * size`）。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    from: i64,
    size: i64,
}

impl PageRequest {
    pub fn new(from: i64, size: i64) -> Result<Self, InvalidPage> {
        if from < 0 {
            return Err(InvalidPage::NegativeFrom(from));
        }
        if size < 1 {
            return Err(InvalidPage::NonPositiveSize(size));
        }
        Ok(Self { from, size })
    }

    pub fn from(&self) -> i64 {
        self.from
    }

    pub fn size(&self) -> i64 {
        self.size
    }

    /// ページ番号（0始まり）
    pub fn page_index(&self) -> i64 {
        self.from / self.size
    }

    /// 読み飛ばす件数
    pub fn offset(&self) -> i64 {
        self.page_index() * self.size
    }

    pub fn limit(&self) -> i64 {
        self.size
    }

    /// スライスにページを適用する（インメモリ実装用）
    pub fn apply<T>(&self, items: Vec<T>) -> Vec<T> {
        items
            .into_iter()
            .skip(self.offset() as usize)
            .take(self.limit() as usize)
            .collect()
    }
}
