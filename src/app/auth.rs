use std::sync::Arc;

use crate::model::{SessionToken, UserId, UserSession};

use super::{
    passwords::Passwords,
    repositories::{SessionsRepository, UsersRepository},
};

pub struct AuthService {
    sessions: Arc<dyn SessionsRepository>,
    users: Arc<dyn UsersRepository>,
    passwords: Passwords,
}

#[derive(Debug, PartialEq, Eq, thiserror::Error)]
pub enum LoginError {
    /// Unknown login and wrong password are reported the same way.
    #[error("invalid username or password")]
    InvalidCredentials,
}

#[derive(Debug, PartialEq, Eq, thiserror::Error)]
pub enum RegisterError {
    #[error("user already exists")]
    UserAlreadyExists,
}

impl AuthService {
    pub fn new(
        sessions: Arc<dyn SessionsRepository>,
        users: Arc<dyn UsersRepository>,
        passwords: Passwords,
    ) -> Self {
        Self {
            sessions,
            users,
            passwords,
        }
    }

    pub async fn find_session(&self, token: &SessionToken) -> anyhow::Result<Option<UserSession>> {
        self.sessions.find_session(token).await
    }

    pub async fn user_exists(&self, login: &str) -> anyhow::Result<bool> {
        Ok(self.users.find_user(login).await?.is_some())
    }

    pub async fn register(
        &self,
        login: &str,
        password: &str,
    ) -> anyhow::Result<Result<UserId, RegisterError>> {
        if self.user_exists(login).await? {
            return Ok(Err(RegisterError::UserAlreadyExists));
        }

        let passwords = self.passwords;
        let password = password.to_string();
        let password_hash =
            tokio::task::spawn_blocking(move || passwords.hash(&password)).await??;

        let user_id = self.users.create_user(login, &password_hash).await?;
        log::info!("Registered user {} ({})", login, user_id);

        Ok(Ok(user_id))
    }

    pub async fn login(
        &self,
        login: &str,
        password: &str,
    ) -> anyhow::Result<Result<SessionToken, LoginError>> {
        let Some(user) = self.users.find_user(login).await? else {
            return Ok(Err(LoginError::InvalidCredentials));
        };

        let passwords = self.passwords;
        let password = password.to_string();
        let password_hash = user.password_hash;
        let matches =
            tokio::task::spawn_blocking(move || passwords.verify(&password_hash, &password))
                .await?;

        if !matches {
            return Ok(Err(LoginError::InvalidCredentials));
        }

        let token = self.sessions.create_session(user.user_id).await?;
        log::debug!("Created session for user {}", user.user_id);

        Ok(Ok(token))
    }

    pub async fn logout(&self, token: &SessionToken) -> anyhow::Result<()> {
        self.sessions.delete_session(token).await?;
        log::debug!("Removed session");

        Ok(())
    }
}
