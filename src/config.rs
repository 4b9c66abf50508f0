use std::str::FromStr;

use crate::application::BookingPolicy;
use crate::domain::NextBookingSelection;

/// 環境変数から読み込むアプリケーション設定
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub database_url: String,
    pub port: u16,
    pub max_connections: u32,
    pub policy: BookingPolicy,
    /// インメモリのユーザー・アイテムにデモ用データを投入するか
    pub seed_demo_data: bool,
}

impl AppConfig {
    /// 起動時に1回だけ環境変数から読み込む
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// 任意のキー参照関数から読み込む
    ///
    /// 不正な値はデフォルトに戻し、警告を出す。
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let database_url = lookup("DATABASE_URL")
            .unwrap_or_else(|| "postgres://localhost/shareit".to_string());

        Self {
            database_url,
            port: parse_or_default("PORT", lookup("PORT"), 3000),
            max_connections: parse_or_default(
                "DATABASE_MAX_CONNECTIONS",
                lookup("DATABASE_MAX_CONNECTIONS"),
                5,
            ),
            policy: BookingPolicy {
                next_booking: parse_or_default(
                    "BOOKING_NEXT_SELECTION",
                    lookup("BOOKING_NEXT_SELECTION"),
                    NextBookingSelection::LastOfUpcoming,
                ),
                reject_overlaps: parse_or_default(
                    "BOOKING_REJECT_OVERLAPS",
                    lookup("BOOKING_REJECT_OVERLAPS"),
                    false,
                ),
            },
            seed_demo_data: parse_or_default("SEED_DEMO_DATA", lookup("SEED_DEMO_DATA"), false),
        }
    }
}

fn parse_or_default<T: FromStr>(key: &str, raw: Option<String>, default: T) -> T {
    match raw {
        None => default,
        Some(value) => value.trim().parse().unwrap_or_else(|_| {
            tracing::warn!(key, value = %value, "invalid configuration value, using default");
            default
        }),
    }
}
