use super::UniqueId;

pub type UserId = UniqueId;

#[derive(Debug, Clone)]
pub struct User {
    pub user_id: UserId,
    #[allow(unused)]
    pub login: String,
    pub password_hash: String,
}
