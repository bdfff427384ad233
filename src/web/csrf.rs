use anyhow::anyhow;
use rand::Rng;
use rocket::{
    http::{Cookie, SameSite, Status},
    request::{FromRequest, Outcome},
    Request,
};

use super::ContextState;

/// Synchronizer token kept in a private (encrypted) cookie and echoed back
/// through a hidden `csrf_token` form field.
pub struct CsrfToken {
    value: String,
    enforced: bool,
}

impl CsrfToken {
    const COOKIE_NAME: &'static str = "csrf_token";

    fn generate_random() -> String {
        let mut rng = rand::thread_rng();

        let mut bytes: [u8; 16] = [0; 16];
        bytes.iter_mut().for_each(|b| *b = rng.gen());

        hex::encode(bytes)
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    pub fn verify(&self, submitted: Option<&str>) -> bool {
        if !self.enforced {
            return true;
        }

        submitted.is_some_and(|s| s == self.value)
    }
}

#[rocket::async_trait]
impl<'r> FromRequest<'r> for CsrfToken {
    type Error = anyhow::Error;

    async fn from_request(request: &'r Request<'_>) -> Outcome<Self, Self::Error> {
        let Some(context) = ContextState::get(request.rocket()) else {
            return Outcome::Error((Status::InternalServerError, anyhow!("no context")));
        };

        let jar = request.cookies();
        let value = match jar.get_private(Self::COOKIE_NAME) {
            Some(cookie) => cookie.value().to_string(),
            None => {
                let value = Self::generate_random();
                let cookie = Cookie::build((Self::COOKIE_NAME, value.clone()))
                    .path("/")
                    .http_only(true)
                    .same_site(SameSite::Strict)
                    .build();

                jar.add_private(cookie);
                value
            }
        };

        Outcome::Success(CsrfToken {
            value,
            enforced: context.settings.csrf_enabled,
        })
    }
}
