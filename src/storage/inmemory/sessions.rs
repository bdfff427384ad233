use std::{collections::HashMap, sync::Mutex};

use async_trait::async_trait;
use chrono::Utc;

use crate::{
    app::repositories::SessionsRepository,
    model::{SessionToken, UniqueId, UserId, UserSession},
};

struct MutableSessionsStorage {
    next_id: UniqueId,
    sessions: HashMap<SessionToken, UserSession>,
}

pub struct InMemorySessions {
    sessions: Mutex<MutableSessionsStorage>,
}

impl InMemorySessions {
    pub fn new() -> Self {
        Self {
            sessions: Mutex::new(MutableSessionsStorage {
                next_id: UniqueId::from_raw(1),
                sessions: HashMap::new(),
            }),
        }
    }
}

#[async_trait]
impl SessionsRepository for InMemorySessions {
    async fn find_session(&self, token: &SessionToken) -> anyhow::Result<Option<UserSession>> {
        Ok(self.sessions.lock().unwrap().sessions.get(token).cloned())
    }

    async fn create_session(&self, user_id: UserId) -> anyhow::Result<SessionToken> {
        let token = SessionToken::generate_random();

        let mut s = self.sessions.lock().unwrap();

        if s.sessions.contains_key(&token) {
            return Err(anyhow::anyhow!("could not create a unique session token"));
        }

        let session_id = s.next_id;
        s.next_id = UniqueId::from_raw(session_id.raw() + 1);
        s.sessions.insert(
            token,
            UserSession {
                session_id,
                token,
                user_id,
                created_at: Utc::now(),
            },
        );

        Ok(token)
    }

    async fn delete_session(&self, token: &SessionToken) -> anyhow::Result<()> {
        self.sessions.lock().unwrap().sessions.remove(token);
        Ok(())
    }
}
