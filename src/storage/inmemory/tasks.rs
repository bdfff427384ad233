use std::{collections::BTreeMap, sync::Mutex};

use anyhow::anyhow;
use async_trait::async_trait;
use chrono::Utc;

use crate::{
    app::repositories::TasksRepository,
    model::{NewTask, Task, TaskId, UserId},
};

struct MutableTasksStorage {
    next_id: TaskId,
    // Keyed by id, so iteration order matches `ORDER BY id`.
    tasks: BTreeMap<TaskId, Task>,
}

pub struct InMemoryTasks {
    tasks: Mutex<MutableTasksStorage>,
}

impl InMemoryTasks {
    pub fn new() -> Self {
        Self {
            tasks: Mutex::new(MutableTasksStorage {
                next_id: TaskId::from_raw(1),
                tasks: BTreeMap::new(),
            }),
        }
    }
}

#[async_trait]
impl TasksRepository for InMemoryTasks {
    async fn read_all(&self, user_id: UserId) -> anyhow::Result<Vec<Task>> {
        let tasks = self.tasks.lock().unwrap();

        Ok(tasks
            .tasks
            .values()
            .filter(|t| t.user_id == user_id)
            .cloned()
            .collect())
    }

    async fn read_by_id(&self, task_id: TaskId, user_id: UserId) -> anyhow::Result<Option<Task>> {
        let tasks = self.tasks.lock().unwrap();

        Ok(tasks
            .tasks
            .get(&task_id)
            .filter(|t| t.user_id == user_id)
            .cloned())
    }

    async fn create(&self, user_id: UserId, task: &NewTask) -> anyhow::Result<TaskId> {
        let mut tasks = self.tasks.lock().unwrap();

        let task_id = tasks.next_id;
        tasks.next_id = TaskId::from_raw(task_id.raw() + 1);

        let now = Utc::now();
        tasks.tasks.insert(
            task_id,
            Task {
                task_id,
                user_id,
                name: task.name.clone(),
                description: task.description.clone(),
                created_at: now,
                updated_at: now,
            },
        );

        Ok(task_id)
    }

    async fn update(&self, task: &Task) -> anyhow::Result<()> {
        let mut tasks = self.tasks.lock().unwrap();

        let Some(stored) = tasks
            .tasks
            .get_mut(&task.task_id)
            .filter(|t| t.user_id == task.user_id)
        else {
            return Err(anyhow!("no such task: {}", task.task_id));
        };

        stored.name = task.name.clone();
        stored.description = task.description.clone();
        stored.updated_at = Utc::now();
        Ok(())
    }

    async fn delete(&self, task_id: TaskId, user_id: UserId) -> anyhow::Result<()> {
        let mut tasks = self.tasks.lock().unwrap();

        let owned = tasks
            .tasks
            .get(&task_id)
            .is_some_and(|t| t.user_id == user_id);

        if !owned {
            return Err(anyhow!("no such task: {task_id}"));
        }

        tasks.tasks.remove(&task_id);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn new_task(name: &str) -> NewTask {
        NewTask {
            name: name.to_string(),
            description: None,
        }
    }

    #[rocket::async_test]
    async fn tasks_are_scoped_to_their_owner() {
        let repo = InMemoryTasks::new();
        let alice = UserId::from_raw(1);
        let bob = UserId::from_raw(2);

        let rest = repo.create(alice, &new_task("Отдохнуть")).await.unwrap();
        repo.create(bob, &new_task("Bob's chore")).await.unwrap();
        let shop = repo.create(alice, &new_task("Сходить в магазин")).await.unwrap();

        let names: Vec<_> = repo
            .read_all(alice)
            .await
            .unwrap()
            .into_iter()
            .map(|t| (t.task_id, t.name))
            .collect();
        assert_eq!(
            names,
            vec![
                (rest, "Отдохнуть".to_string()),
                (shop, "Сходить в магазин".to_string()),
            ]
        );

        assert!(repo.read_by_id(rest, bob).await.unwrap().is_none());
        assert!(repo.delete(rest, bob).await.is_err());
        assert!(repo.read_by_id(rest, alice).await.unwrap().is_some());
    }

    #[rocket::async_test]
    async fn update_keeps_creation_time() {
        let repo = InMemoryTasks::new();
        let user = UserId::from_raw(1);
        let id = repo.create(user, &new_task("Отдохнуть")).await.unwrap();

        let mut task = repo.read_by_id(id, user).await.unwrap().unwrap();
        task.name = "Пилатес".to_string();
        task.description = Some("Вечером".to_string());
        repo.update(&task).await.unwrap();

        let updated = repo.read_by_id(id, user).await.unwrap().unwrap();
        assert_eq!(updated.name, "Пилатес");
        assert_eq!(updated.description.as_deref(), Some("Вечером"));
        assert_eq!(updated.created_at, task.created_at);
        assert!(updated.updated_at >= task.updated_at);
    }

    #[rocket::async_test]
    async fn delete_removes_the_task() {
        let repo = InMemoryTasks::new();
        let user = UserId::from_raw(1);
        let id = repo.create(user, &new_task("Отдохнуть")).await.unwrap();

        repo.delete(id, user).await.unwrap();

        assert!(repo.read_all(user).await.unwrap().is_empty());
        assert!(repo.delete(id, user).await.is_err());
    }
}
