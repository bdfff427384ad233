use std::convert::Infallible;

use anyhow::anyhow;
use rocket::{
    http::{Cookie, CookieJar, Status},
    request::{FromRequest, Outcome},
    time::Duration,
    Request,
};

use crate::model::{SessionToken, UserId};

use super::ContextState;

pub struct SessionTokenCookie<'a>(&'a CookieJar<'a>);

impl<'a> SessionTokenCookie<'a> {
    pub const COOKIE_NAME: &'static str = "task_tracker_session";

    pub fn new(jar: &'a CookieJar<'a>) -> Self {
        Self(jar)
    }

    pub fn read(&self) -> Option<SessionToken> {
        let raw = self.0.get(Self::COOKIE_NAME)?;

        SessionToken::from_str(raw.value_trimmed())
    }

    /// Sets (or refreshes) the cookie, expiring `max_age_secs` from now.
    pub fn write(&self, session_token: &SessionToken, max_age_secs: i64) {
        let cookie = Cookie::build((Self::COOKIE_NAME, session_token.to_hyphenated()))
            .path("/")
            .http_only(true)
            .max_age(Duration::seconds(max_age_secs))
            .build();

        self.0.add(cookie);
    }

    pub fn remove(&self) {
        self.0
            .remove(Cookie::build((Self::COOKIE_NAME, "")).path("/").build());
    }
}

#[rocket::async_trait]
impl<'r> FromRequest<'r> for SessionToken {
    type Error = Infallible;

    async fn from_request(request: &'r Request<'_>) -> Outcome<Self, Self::Error> {
        match SessionTokenCookie::new(request.cookies()).read() {
            Some(s) => Outcome::Success(s),
            None => Outcome::Forward(Status::Unauthorized),
        }
    }
}

/// A request carrying a cookie that maps to a live session row.
pub struct AuthorizedUser {
    pub user_id: UserId,
    pub session_token: SessionToken,
}

#[rocket::async_trait]
impl<'r> FromRequest<'r> for AuthorizedUser {
    type Error = anyhow::Error;

    async fn from_request(request: &'r Request<'_>) -> Outcome<Self, Self::Error> {
        let session_token = match request.guard::<SessionToken>().await {
            Outcome::Success(token) => token,
            Outcome::Forward(status) => return Outcome::Forward(status),
            Outcome::Error((_, never)) => match never {},
        };

        let Some(context) = ContextState::get(request.rocket()) else {
            return Outcome::Error((Status::InternalServerError, anyhow!("no context")));
        };

        match context.auth.find_session(&session_token).await {
            Ok(Some(session)) => Outcome::Success(AuthorizedUser {
                user_id: session.user_id,
                session_token,
            }),
            Ok(None) => Outcome::Forward(Status::Unauthorized),
            Err(err) => {
                log::error!("Session lookup failed: {:?}", err);
                Outcome::Error((Status::InternalServerError, err))
            }
        }
    }
}

/// The visitor's session on pages open to guests. No session means a guest,
/// but a failed lookup still answers 500.
pub struct CurrentUser(pub Option<AuthorizedUser>);

impl CurrentUser {
    pub fn is_logged_in(&self) -> bool {
        self.0.is_some()
    }
}

#[rocket::async_trait]
impl<'r> FromRequest<'r> for CurrentUser {
    type Error = anyhow::Error;

    async fn from_request(request: &'r Request<'_>) -> Outcome<Self, Self::Error> {
        match AuthorizedUser::from_request(request).await {
            Outcome::Success(user) => Outcome::Success(CurrentUser(Some(user))),
            Outcome::Forward(_) => Outcome::Success(CurrentUser(None)),
            Outcome::Error(err) => Outcome::Error(err),
        }
    }
}
