use serde::{Deserialize, Serialize};
use sqlx::{FromRow, PgPool};
use time::OffsetDateTime;
use uuid::Uuid;

/// A feedback entry. `reply` stays empty until an admin sets it.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Feedback {
    pub id: Uuid,
    pub name: String,
    pub feedback: String,
    pub comment: Option<String>,
    pub owner_id: Uuid,
    pub reply: String,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
    #[serde(with = "time::serde::rfc3339")]
    pub updated_at: OffsetDateTime,
}

impl Feedback {
    pub async fn insert(
        db: &PgPool,
        name: &str,
        feedback: &str,
        comment: Option<&str>,
        owner_id: Uuid,
    ) -> anyhow::Result<Feedback> {
        let row = sqlx::query_as::<_, Feedback>(
            r#"
            INSERT INTO feedback (name, feedback, comment, owner_id)
            VALUES ($1, $2, $3, $4)
            RETURNING id, name, feedback, comment, owner_id, reply, created_at, updated_at
            "#,
        )
        .bind(name)
        .bind(feedback)
        .bind(comment)
        .bind(owner_id)
        .fetch_one(db)
        .await?;
        Ok(row)
    }

    /// All entries, newest first.
    pub async fn list_all(db: &PgPool) -> anyhow::Result<Vec<Feedback>> {
        let rows = sqlx::query_as::<_, Feedback>(
            r#"
            SELECT id, name, feedback, comment, owner_id, reply, created_at, updated_at
            FROM feedback
            ORDER BY created_at DESC
            "#,
        )
        .fetch_all(db)
        .await?;
        Ok(rows)
    }

    pub async fn find_by_id(db: &PgPool, id: Uuid) -> anyhow::Result<Option<Feedback>> {
        let row = sqlx::query_as::<_, Feedback>(
            r#"
            SELECT id, name, feedback, comment, owner_id, reply, created_at, updated_at
            FROM feedback
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(db)
        .await?;
        Ok(row)
    }

    /// Overwrite the submitter-editable fields. `reply` and `owner_id` are untouched.
    pub async fn update_content(
        db: &PgPool,
        id: Uuid,
        name: &str,
        feedback: &str,
        comment: Option<&str>,
    ) -> anyhow::Result<Option<Feedback>> {
        let row = sqlx::query_as::<_, Feedback>(
            r#"
            UPDATE feedback
            SET name = $2, feedback = $3, comment = $4, updated_at = now()
            WHERE id = $1
            RETURNING id, name, feedback, comment, owner_id, reply, created_at, updated_at
            "#,
        )
        .bind(id)
        .bind(name)
        .bind(feedback)
        .bind(comment)
        .fetch_optional(db)
        .await?;
        Ok(row)
    }

    pub async fn set_reply(db: &PgPool, id: Uuid, reply: &str) -> anyhow::Result<Option<Feedback>> {
        let row = sqlx::query_as::<_, Feedback>(
            r#"
            UPDATE feedback
            SET reply = $2, updated_at = now()
            WHERE id = $1
            RETURNING id, name, feedback, comment, owner_id, reply, created_at, updated_at
            "#,
        )
        .bind(id)
        .bind(reply)
        .fetch_optional(db)
        .await?;
        Ok(row)
    }

    /// Returns true when a row was removed.
    pub async fn delete(db: &PgPool, id: Uuid) -> anyhow::Result<bool> {
        let result = sqlx::query(
            r#"
            DELETE FROM feedback
            WHERE id = $1
            "#,
        )
        .bind(id)
        .execute(db)
        .await?;
        Ok(result.rows_affected() > 0)
    }
}
