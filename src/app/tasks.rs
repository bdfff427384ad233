use std::sync::Arc;

use crate::model::{NewTask, Task, TaskId, UserId};

use super::repositories::TasksRepository;

pub struct TasksService {
    tasks: Arc<dyn TasksRepository>,
}

impl TasksService {
    pub fn new(tasks: Arc<dyn TasksRepository>) -> Self {
        Self { tasks }
    }

    pub async fn read_all(&self, user_id: UserId) -> anyhow::Result<Vec<Task>> {
        self.tasks.read_all(user_id).await
    }

    pub async fn read_by_id(&self, task_id: TaskId, user_id: UserId) -> anyhow::Result<Option<Task>> {
        self.tasks.read_by_id(task_id, user_id).await
    }

    pub async fn create(&self, user_id: UserId, task: &NewTask) -> anyhow::Result<TaskId> {
        self.tasks.create(user_id, task).await
    }

    /// Applies new form input to a task previously loaded for its owner.
    pub async fn rename(&self, mut task: Task, input: NewTask) -> anyhow::Result<()> {
        task.name = input.name;
        task.description = input.description;

        self.tasks.update(&task).await
    }

    pub async fn delete(&self, task: &Task) -> anyhow::Result<()> {
        self.tasks.delete(task.task_id, task.user_id).await
    }
}
