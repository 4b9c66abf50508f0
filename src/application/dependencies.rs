use std::sync::Arc;

use crate::domain::NextBookingSelection;
use crate::ports::{BookingRepository, Clock, CommentRepository, ItemCatalog, UserDirectory};

/// 予約のポリシー
///
/// 既定値は既存クライアントとの互換動作。
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BookingPolicy {
    /// アイテム詳細の「次の予約」の選び方
    pub next_booking: NextBookingSelection,
    /// 承認済み予約と重なる新規予約を拒否するか
    pub reject_overlaps: bool,
}

/// サービスの依存関係
///
/// データ構造として定義し、振る舞いは持たない。
/// ユースケース関数に依存関係を明示的に渡す。
#[derive(Clone)]
pub struct ServiceDependencies {
    pub booking_repository: Arc<dyn BookingRepository>,
    pub comment_repository: Arc<dyn CommentRepository>,
    pub user_directory: Arc<dyn UserDirectory>,
    pub item_catalog: Arc<dyn ItemCatalog>,
    pub clock: Arc<dyn Clock>,
    pub policy: BookingPolicy,
}
