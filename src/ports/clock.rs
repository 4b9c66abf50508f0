use chrono::{DateTime, Utc};

/// 時刻ソースポート
///
/// 予約の過去・現在・未来の分類に使う「現在時刻」を供給する。
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}
