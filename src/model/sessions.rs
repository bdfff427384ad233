use chrono::{DateTime, Utc};
use uuid::Uuid;

use super::{UniqueId, UserId};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SessionToken(Uuid);

impl SessionToken {
    pub fn from_str(token: &str) -> Option<SessionToken> {
        Uuid::parse_str(token).ok().map(Self)
    }

    pub fn generate_random() -> SessionToken {
        Self(Uuid::new_v4())
    }

    /// Hyphenated form, as stored in the `sessions` table and the cookie.
    pub fn to_hyphenated(&self) -> String {
        self.0.hyphenated().to_string()
    }
}

/// Server-side session row.
#[derive(Debug, Clone)]
pub struct UserSession {
    #[allow(unused)]
    pub session_id: UniqueId,
    #[allow(unused)]
    pub token: SessionToken,
    pub user_id: UserId,
    #[allow(unused)]
    pub created_at: DateTime<Utc>,
}
