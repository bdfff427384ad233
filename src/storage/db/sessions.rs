use anyhow::anyhow;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{postgres::PgRow, Row};

use crate::{
    app::repositories::SessionsRepository,
    model::{SessionToken, UniqueId, UserId, UserSession},
};

use super::DatabaseConnectionRef;

pub struct DbSessions {
    db: DatabaseConnectionRef,
}

impl DbSessions {
    pub fn new(db: DatabaseConnectionRef) -> Self {
        Self { db }
    }
}

fn session_from_row(row: &PgRow) -> anyhow::Result<UserSession> {
    let raw_session_id: i32 = row.try_get("id")?;
    let raw_token: String = row.try_get("session_uuid")?;
    let raw_user_id: i32 = row.try_get("user_id")?;
    let created_at: DateTime<Utc> = row.try_get("created_at")?;

    let token = SessionToken::from_str(&raw_token)
        .ok_or_else(|| anyhow!("malformed session uuid in database: {raw_token}"))?;

    Ok(UserSession {
        session_id: UniqueId::from_raw(raw_session_id),
        token,
        user_id: UserId::from_raw(raw_user_id),
        created_at,
    })
}

#[async_trait]
impl SessionsRepository for DbSessions {
    async fn find_session(&self, token: &SessionToken) -> anyhow::Result<Option<UserSession>> {
        let optional_row = sqlx::query(
            "SELECT id, session_uuid, user_id, created_at FROM sessions WHERE session_uuid = $1",
        )
        .bind(token.to_hyphenated())
        .fetch_optional(self.db.as_pool())
        .await?;

        optional_row.as_ref().map(session_from_row).transpose()
    }

    async fn create_session(&self, user_id: UserId) -> anyhow::Result<SessionToken> {
        let token = SessionToken::generate_random();

        sqlx::query("INSERT INTO sessions (session_uuid, user_id) VALUES ($1, $2)")
            .bind(token.to_hyphenated())
            .bind(user_id.raw())
            .execute(self.db.as_pool())
            .await?;

        Ok(token)
    }

    async fn delete_session(&self, token: &SessionToken) -> anyhow::Result<()> {
        sqlx::query("DELETE FROM sessions WHERE session_uuid = $1")
            .bind(token.to_hyphenated())
            .execute(self.db.as_pool())
            .await?;

        Ok(())
    }
}
