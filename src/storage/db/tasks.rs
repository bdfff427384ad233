use async_trait::async_trait;
use sqlx::{postgres::PgRow, Row};

use crate::{
    app::repositories::TasksRepository,
    model::{NewTask, Task, TaskId, UserId},
};

use super::{DatabaseConnectionRef, DbError};

pub struct DbTasks {
    db: DatabaseConnectionRef,
}

impl DbTasks {
    pub fn new(db: DatabaseConnectionRef) -> Self {
        Self { db }
    }
}

const TASK_COLUMNS: &str = "id, user_id, name, description, created_at, updated_at";

fn task_from_row(row: &PgRow) -> Result<Task, DbError> {
    let raw_task_id: i32 = row.try_get("id")?;
    let raw_user_id: i32 = row.try_get("user_id")?;

    Ok(Task {
        task_id: TaskId::from_raw(raw_task_id),
        user_id: UserId::from_raw(raw_user_id),
        name: row.try_get("name")?,
        description: row.try_get("description")?,
        created_at: row.try_get("created_at")?,
        updated_at: row.try_get("updated_at")?,
    })
}

#[async_trait]
impl TasksRepository for DbTasks {
    async fn read_all(&self, user_id: UserId) -> anyhow::Result<Vec<Task>> {
        let rows = sqlx::query(&format!(
            "SELECT {TASK_COLUMNS} FROM tasks WHERE user_id = $1 ORDER BY id"
        ))
        .bind(user_id.raw())
        .fetch_all(self.db.as_pool())
        .await?;

        Ok(rows.iter().map(task_from_row).collect::<Result<_, _>>()?)
    }

    async fn read_by_id(&self, task_id: TaskId, user_id: UserId) -> anyhow::Result<Option<Task>> {
        let optional_row = sqlx::query(&format!(
            "SELECT {TASK_COLUMNS} FROM tasks WHERE id = $1 AND user_id = $2"
        ))
        .bind(task_id.raw())
        .bind(user_id.raw())
        .fetch_optional(self.db.as_pool())
        .await?;

        Ok(optional_row.as_ref().map(task_from_row).transpose()?)
    }

    async fn create(&self, user_id: UserId, task: &NewTask) -> anyhow::Result<TaskId> {
        let row = sqlx::query(
            "INSERT INTO tasks (user_id, name, description) VALUES ($1, $2, $3) RETURNING id",
        )
        .bind(user_id.raw())
        .bind(&task.name)
        .bind(task.description.as_deref())
        .fetch_one(self.db.as_pool())
        .await?;

        let raw_task_id: i32 = row.try_get(0)?;
        Ok(TaskId::from_raw(raw_task_id))
    }

    async fn update(&self, task: &Task) -> anyhow::Result<()> {
        let res = sqlx::query(
            "UPDATE tasks SET name = $1, description = $2, updated_at = now() WHERE id = $3 AND user_id = $4",
        )
        .bind(&task.name)
        .bind(task.description.as_deref())
        .bind(task.task_id.raw())
        .bind(task.user_id.raw())
        .execute(self.db.as_pool())
        .await?;

        // Expected to modify exactly 1 task.
        if res.rows_affected() == 0 {
            return Err(DbError::RowNotFound.into());
        }

        Ok(())
    }

    async fn delete(&self, task_id: TaskId, user_id: UserId) -> anyhow::Result<()> {
        let res = sqlx::query("DELETE FROM tasks WHERE id = $1 AND user_id = $2")
            .bind(task_id.raw())
            .bind(user_id.raw())
            .execute(self.db.as_pool())
            .await?;

        // Expected to delete exactly 1 task.
        if res.rows_affected() == 0 {
            return Err(DbError::RowNotFound.into());
        }

        Ok(())
    }
}
