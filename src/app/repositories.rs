use async_trait::async_trait;

use crate::model::{NewTask, SessionToken, Task, TaskId, User, UserId, UserSession};

#[async_trait]
pub trait SessionsRepository: Send + Sync {
    async fn find_session(&self, token: &SessionToken) -> anyhow::Result<Option<UserSession>>;

    async fn create_session(&self, user_id: UserId) -> anyhow::Result<SessionToken>;

    /// Removing a session that does not exist is not an error.
    async fn delete_session(&self, token: &SessionToken) -> anyhow::Result<()>;
}

#[async_trait]
pub trait UsersRepository: Send + Sync {
    async fn find_user(&self, login: &str) -> anyhow::Result<Option<User>>;

    async fn create_user(&self, login: &str, password_hash: &str) -> anyhow::Result<UserId>;
}

/// Every query is scoped by the owning user.
#[async_trait]
pub trait TasksRepository: Send + Sync {
    async fn read_all(&self, user_id: UserId) -> anyhow::Result<Vec<Task>>;

    async fn read_by_id(&self, task_id: TaskId, user_id: UserId) -> anyhow::Result<Option<Task>>;

    async fn create(&self, user_id: UserId, task: &NewTask) -> anyhow::Result<TaskId>;

    async fn update(&self, task: &Task) -> anyhow::Result<()>;

    async fn delete(&self, task_id: TaskId, user_id: UserId) -> anyhow::Result<()>;
}
