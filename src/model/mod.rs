pub mod sessions;
pub mod tasks;
mod types;
pub mod users;

pub use sessions::{SessionToken, UserSession};
pub use tasks::{NewTask, Task, TaskId};
pub use types::UniqueId;
pub use users::{User, UserId};
