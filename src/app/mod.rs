pub mod auth;
pub mod passwords;
pub mod repositories;
pub mod tasks;
