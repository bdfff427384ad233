use chrono::{DateTime, Utc};

use super::{UniqueId, UserId};

pub type TaskId = UniqueId;

#[derive(Debug, Clone)]
pub struct Task {
    pub task_id: TaskId,
    pub user_id: UserId,
    pub name: String,
    pub description: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct NewTask {
    pub name: String,
    pub description: Option<String>,
}
