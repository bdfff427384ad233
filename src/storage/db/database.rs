use std::sync::Arc;

use sqlx::{migrate::Migrator, pool::PoolOptions};

// Database connection to PostgreSQL + type definitions for database types.

pub type DbError = sqlx::Error;
pub type DbPool = sqlx::PgPool;

pub type DatabaseConnectionRef = Arc<DatabaseConnection>;

static MIGRATOR: Migrator = sqlx::migrate!();

pub struct DatabaseConnection {
    pool: DbPool,
}

impl DatabaseConnection {
    pub fn connect(url: &str) -> Result<Self, DbError> {
        Ok(Self {
            pool: PoolOptions::new().connect_lazy(url)?,
        })
    }

    pub async fn run_migrations(&self) -> anyhow::Result<()> {
        MIGRATOR.run(&self.pool).await?;
        Ok(())
    }

    pub fn as_pool(&self) -> &DbPool {
        &self.pool
    }
}
