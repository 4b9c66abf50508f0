use crate::domain::{Comment, CommentId, ItemId, UserId};
use crate::ports::comment_repository::{CommentRepository as CommentRepositoryTrait, Result};
use async_trait::async_trait;
use sqlx::{PgPool, Row};

/// PostgreSQL implementation of CommentRepository
pub struct CommentRepository {
    pool: PgPool,
}

impl CommentRepository {
    /// Create a new CommentRepository with a PostgreSQL connection pool
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CommentRepositoryTrait for CommentRepository {
    async fn insert(&self, comment: Comment) -> Result<()> {
        sqlx::query(
            r#"
            INSERT INTO comments (
                comment_id,
                item_id,
                author_id,
                author_name,
                text,
                created_at
            )
            VALUES ($1, $2, $3, $4, $5, $6)
            "#,
        )
        .bind(comment.comment_id.value())
        .bind(comment.item_id.value())
        .bind(comment.author_id.value())
        .bind(&comment.author_name)
        .bind(&comment.text)
        .bind(comment.created_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// Load all comments of an item, oldest first
    async fn find_by_item(&self, item_id: ItemId) -> Result<Vec<Comment>> {
        let rows = sqlx::query(
            r#"
            SELECT comment_id, item_id, author_id, author_name, text, created_at
            FROM comments
            WHERE item_id = $1
            ORDER BY created_at ASC
            "#,
        )
        .bind(item_id.value())
        .fetch_all(&self.pool)
        .await?;

        Ok(rows
            .iter()
            .map(|row| Comment {
                comment_id: CommentId::from_uuid(row.get("comment_id")),
                item_id: ItemId::from_uuid(row.get("item_id")),
                author_id: UserId::from_uuid(row.get("author_id")),
                author_name: row.get("author_name"),
                text: row.get("text"),
                created_at: row.get("created_at"),
            })
            .collect())
    }
}
