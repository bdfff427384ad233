use async_trait::async_trait;
use sqlx::Row;

use crate::{
    app::repositories::UsersRepository,
    model::{User, UserId},
};

use super::DatabaseConnectionRef;

pub struct DbUsers {
    db: DatabaseConnectionRef,
}

impl DbUsers {
    pub fn new(db: DatabaseConnectionRef) -> Self {
        Self { db }
    }
}

#[async_trait]
impl UsersRepository for DbUsers {
    async fn find_user(&self, login: &str) -> anyhow::Result<Option<User>> {
        let optional_row = sqlx::query("SELECT id, login, password_hash FROM users WHERE login = $1")
            .bind(login)
            .fetch_optional(self.db.as_pool())
            .await?;

        let Some(row) = optional_row else {
            return Ok(None);
        };

        let raw_user_id: i32 = row.try_get(0)?;

        Ok(Some(User {
            user_id: UserId::from_raw(raw_user_id),
            login: row.try_get(1)?,
            password_hash: row.try_get(2)?,
        }))
    }

    async fn create_user(&self, login: &str, password_hash: &str) -> anyhow::Result<UserId> {
        let row = sqlx::query("INSERT INTO users (login, password_hash) VALUES ($1, $2) RETURNING id")
            .bind(login)
            .bind(password_hash)
            .fetch_one(self.db.as_pool())
            .await?;

        let raw_user_id: i32 = row.try_get(0)?;
        Ok(UserId::from_raw(raw_user_id))
    }
}
