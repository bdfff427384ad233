use anyhow::anyhow;
use scrypt::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Params, Scrypt,
};

use crate::config::PasswordCost;

const HASH_LEN: usize = 32;

/// Salted scrypt hashing. Hashes are stored as PHC strings, so verification
/// reads the cost parameters back from the hash itself.
#[derive(Clone, Copy)]
pub struct Passwords {
    params: Params,
}

impl Passwords {
    pub fn new(cost: &PasswordCost) -> anyhow::Result<Self> {
        let params = Params::new(cost.log_n, cost.r, cost.p, HASH_LEN)
            .map_err(|err| anyhow!("invalid scrypt parameters: {err}"))?;

        Ok(Self { params })
    }

    pub fn hash(&self, password: &str) -> anyhow::Result<String> {
        let salt = SaltString::generate(&mut OsRng);
        let hash = Scrypt
            .hash_password_customized(password.as_bytes(), None, None, self.params, &salt)
            .map_err(|err| anyhow!("failed to hash password: {err}"))?;

        Ok(hash.to_string())
    }

    pub fn verify(&self, hash: &str, password: &str) -> bool {
        let Ok(parsed) = PasswordHash::new(hash) else {
            log::warn!("stored password hash is not a PHC string");
            return false;
        };

        Scrypt.verify_password(password.as_bytes(), &parsed).is_ok()
    }
}
