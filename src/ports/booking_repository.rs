use crate::domain::{
    Booking, BookingId, BookingQuery, BookingStatus, ItemId, PageRequest, UserId,
};
use async_trait::async_trait;
use chrono::{DateTime, Utc};

pub type Result<T> = std::result::Result<T, Box<dyn std::error::Error + Send + Sync>>;

/// 予約リポジトリポート
///
/// 永続化された予約はリポジトリが所有する。
/// サービスはリクエストの間だけ一時的な参照を持つ。
#[async_trait]
pub trait BookingRepository: Send + Sync {
    /// 新しい予約を保存する
    async fn insert(&self, booking: Booking) -> Result<()>;

    /// IDで予約を取得する
    async fn get_by_id(&self, booking_id: BookingId) -> Result<Option<Booking>>;

    /// ステータスを比較交換で更新する
    ///
    /// 永続化されている状態が`expected`のときだけ`new`へ更新し、`true`を返す。
    /// 他のリクエストが先に更新していた場合は何もせず`false`を返す。
    async fn update_status(
        &self,
        booking_id: BookingId,
        expected: BookingStatus,
        new: BookingStatus,
        updated_at: DateTime<Utc>,
    ) -> Result<bool>;

    /// 借り手・所有者視点の一覧
    ///
    /// `query`に一致する予約を`start`の降順でページ単位に返す。
    async fn find(&self, query: BookingQuery, page: PageRequest) -> Result<Vec<Booking>>;

    /// アイテムの全予約（重複チェック用）
    async fn find_by_item(&self, item_id: ItemId) -> Result<Vec<Booking>>;

    /// 特定の借り手によるアイテムの全予約（コメント資格判定用）
    async fn find_by_item_and_booker(
        &self,
        item_id: ItemId,
        booker_id: UserId,
    ) -> Result<Vec<Booking>>;

    /// アイテムの終了済み予約（`end < now`）を`end`の降順で返す
    async fn find_ended_for_item(
        &self,
        item_id: ItemId,
        now: DateTime<Utc>,
    ) -> Result<Vec<Booking>>;

    /// アイテムの未開始予約（`start > now`）を`start`の昇順で返す
    async fn find_upcoming_for_item(
        &self,
        item_id: ItemId,
        now: DateTime<Utc>,
    ) -> Result<Vec<Booking>>;

    /// 所有者の全アイテムの進行中予約を`start`の降順で返す
    async fn find_active_for_owner(
        &self,
        owner_id: UserId,
        now: DateTime<Utc>,
    ) -> Result<Vec<Booking>>;
}
