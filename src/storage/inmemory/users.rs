use std::{collections::HashMap, sync::Mutex};

use async_trait::async_trait;

use crate::{
    app::repositories::UsersRepository,
    model::{User, UserId},
};

struct MutableUsersStorage {
    next_id: UserId,
    users_by_login: HashMap<String, User>,
}

pub struct InMemoryUsers {
    users: Mutex<MutableUsersStorage>,
}

impl InMemoryUsers {
    pub fn new() -> Self {
        Self {
            users: Mutex::new(MutableUsersStorage {
                next_id: UserId::from_raw(1),
                users_by_login: HashMap::new(),
            }),
        }
    }
}

#[async_trait]
impl UsersRepository for InMemoryUsers {
    async fn find_user(&self, login: &str) -> anyhow::Result<Option<User>> {
        let users = self.users.lock().unwrap();

        Ok(users.users_by_login.get(login).cloned())
    }

    async fn create_user(&self, login: &str, password_hash: &str) -> anyhow::Result<UserId> {
        let mut users = self.users.lock().unwrap();

        // Mirrors the UNIQUE constraint on users.login.
        if users.users_by_login.contains_key(login) {
            return Err(anyhow::anyhow!("login {login} is already taken"));
        }

        let user_id = users.next_id;
        users.next_id = UserId::from_raw(user_id.raw() + 1);

        users.users_by_login.insert(
            login.to_string(),
            User {
                user_id,
                login: login.to_string(),
                password_hash: password_hash.to_string(),
            },
        );

        Ok(user_id)
    }
}
