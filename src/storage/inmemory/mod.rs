mod sessions;
mod tasks;
mod users;

pub use sessions::InMemorySessions;
pub use tasks::InMemoryTasks;
pub use users::InMemoryUsers;
