use crate::domain::{
    Booking, BookingId, BookingPeriod, BookingPredicate, BookingQuery, BookingRole,
    BookingStatus, ItemId, PageRequest, UserId,
};
use crate::ports::booking_repository::{BookingRepository as BookingRepositoryTrait, Result};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{PgPool, Postgres, QueryBuilder, Row, postgres::PgRow};
use std::str::FromStr;

const SELECT_BOOKINGS: &str = r#"
    SELECT
        booking_id,
        item_id,
        owner_id,
        booker_id,
        start_time,
        end_time,
        status,
        created_at,
        updated_at
    FROM bookings
"#;

fn invalid_data(message: String) -> Box<dyn std::error::Error + Send + Sync> {
    Box::new(std::io::Error::new(std::io::ErrorKind::InvalidData, message))
}

/// PostgreSQLの行データをBookingに変換する
///
/// statusの文字列変換と期間の不変条件（start < end）を検証する。
fn map_row_to_booking(row: &PgRow) -> Result<Booking> {
    let status_str: &str = row.get("status");
    let status = BookingStatus::from_str(status_str).map_err(invalid_data)?;

    let start: DateTime<Utc> = row.get("start_time");
    let end: DateTime<Utc> = row.get("end_time");
    let period = BookingPeriod::new(start, end)
        .map_err(|_| invalid_data(format!("invalid period: {} - {}", start, end)))?;

    Ok(Booking {
        booking_id: BookingId::from_uuid(row.get("booking_id")),
        item_id: ItemId::from_uuid(row.get("item_id")),
        owner_id: UserId::from_uuid(row.get("owner_id")),
        booker_id: UserId::from_uuid(row.get("booker_id")),
        period,
        status,
        created_at: row.get("created_at"),
        updated_at: row.get("updated_at"),
    })
}

/// BookingQueryをWHERE句に変換する
fn push_query_filter(builder: &mut QueryBuilder<'_, Postgres>, query: &BookingQuery) {
    match query.role {
        BookingRole::Booker(id) => builder.push(" WHERE booker_id = ").push_bind(id.value()),
        BookingRole::Owner(id) => builder.push(" WHERE owner_id = ").push_bind(id.value()),
    };

    match query.predicate {
        BookingPredicate::Any => {}
        BookingPredicate::ActiveAt(at) => {
            builder
                .push(" AND start_time <= ")
                .push_bind(at)
                .push(" AND end_time >= ")
                .push_bind(at);
        }
        BookingPredicate::EndedBefore(at) => {
            builder.push(" AND end_time < ").push_bind(at);
        }
        BookingPredicate::StartsAfter(at) => {
            builder.push(" AND start_time > ").push_bind(at);
        }
        BookingPredicate::HasStatus(status) => {
            builder.push(" AND status = ").push_bind(status.as_str());
        }
    }
}

/// BookingRepositoryのPostgreSQL実装
pub struct BookingRepository {
    pool: PgPool,
}

impl BookingRepository {
    /// PostgreSQLコネクションプールから新しいBookingRepositoryを作成
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn fetch_where(
        &self,
        condition: &str,
        order_by: &str,
        item_or_owner: uuid::Uuid,
        now: Option<DateTime<Utc>>,
    ) -> Result<Vec<Booking>> {
        let sql = format!("{} WHERE {} ORDER BY {}", SELECT_BOOKINGS, condition, order_by);
        let mut query = sqlx::query(&sql).bind(item_or_owner);
        if let Some(now) = now {
            query = query.bind(now);
        }
        let rows = query.fetch_all(&self.pool).await?;

        rows.iter().map(map_row_to_booking).collect()
    }
}

#[async_trait]
impl BookingRepositoryTrait for BookingRepository {
    async fn insert(&self, booking: Booking) -> Result<()> {
        sqlx::query(
            r#"
            INSERT INTO bookings (
                booking_id,
                item_id,
                owner_id,
                booker_id,
                start_time,
                end_time,
                status,
                created_at,
                updated_at
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            "#,
        )
        .bind(booking.booking_id.value())
        .bind(booking.item_id.value())
        .bind(booking.owner_id.value())
        .bind(booking.booker_id.value())
        .bind(booking.start())
        .bind(booking.end())
        .bind(booking.status.as_str())
        .bind(booking.created_at)
        .bind(booking.updated_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn get_by_id(&self, booking_id: BookingId) -> Result<Option<Booking>> {
        let sql = format!("{} WHERE booking_id = $1", SELECT_BOOKINGS);
        let row = sqlx::query(&sql)
            .bind(booking_id.value())
            .fetch_optional(&self.pool)
            .await?;

        row.as_ref().map(map_row_to_booking).transpose()
    }

    /// 条件付きUPDATEによる比較交換
    ///
    /// 現在のステータスが期待値と一致する行だけを更新する。
    /// 単一のUPDATE文なので、同時実行された承認のうち1つだけが行を更新できる。
    async fn update_status(
        &self,
        booking_id: BookingId,
        expected: BookingStatus,
        new: BookingStatus,
        updated_at: DateTime<Utc>,
    ) -> Result<bool> {
        let result = sqlx::query(
            r#"
            UPDATE bookings
            SET status = $1, updated_at = $2
            WHERE booking_id = $3 AND status = $4
            "#,
        )
        .bind(new.as_str())
        .bind(updated_at)
        .bind(booking_id.value())
        .bind(expected.as_str())
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected() == 1)
    }

    async fn find(&self, query: BookingQuery, page: PageRequest) -> Result<Vec<Booking>> {
        let mut builder = QueryBuilder::<Postgres>::new(SELECT_BOOKINGS);
        push_query_filter(&mut builder, &query);
        builder
            .push(" ORDER BY start_time DESC LIMIT ")
            .push_bind(page.limit())
            .push(" OFFSET ")
            .push_bind(page.offset());

        let rows = builder.build().fetch_all(&self.pool).await?;

        rows.iter().map(map_row_to_booking).collect()
    }

    async fn find_by_item(&self, item_id: ItemId) -> Result<Vec<Booking>> {
        self.fetch_where("item_id = $1", "start_time ASC", item_id.value(), None)
            .await
    }

    async fn find_by_item_and_booker(
        &self,
        item_id: ItemId,
        booker_id: UserId,
    ) -> Result<Vec<Booking>> {
        let sql = format!(
            "{} WHERE item_id = $1 AND booker_id = $2 ORDER BY start_time ASC",
            SELECT_BOOKINGS
        );
        let rows = sqlx::query(&sql)
            .bind(item_id.value())
            .bind(booker_id.value())
            .fetch_all(&self.pool)
            .await?;

        rows.iter().map(map_row_to_booking).collect()
    }

    async fn find_ended_for_item(
        &self,
        item_id: ItemId,
        now: DateTime<Utc>,
    ) -> Result<Vec<Booking>> {
        self.fetch_where(
            "item_id = $1 AND end_time < $2",
            "end_time DESC",
            item_id.value(),
            Some(now),
        )
        .await
    }

    async fn find_upcoming_for_item(
        &self,
        item_id: ItemId,
        now: DateTime<Utc>,
    ) -> Result<Vec<Booking>> {
        self.fetch_where(
            "item_id = $1 AND start_time > $2",
            "start_time ASC",
            item_id.value(),
            Some(now),
        )
        .await
    }

    async fn find_active_for_owner(
        &self,
        owner_id: UserId,
        now: DateTime<Utc>,
    ) -> Result<Vec<Booking>> {
        self.fetch_where(
            "owner_id = $1 AND start_time <= $2 AND end_time >= $2",
            "start_time DESC",
            owner_id.value(),
            Some(now),
        )
        .await
    }
}
