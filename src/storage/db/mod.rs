mod database;
mod sessions;
mod tasks;
mod users;


pub use database::{DatabaseConnection, DatabaseConnectionRef, DbError};
pub use sessions::DbSessions;
pub use tasks::DbTasks;
pub use users::DbUsers;
