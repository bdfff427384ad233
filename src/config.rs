use rocket::figment::{providers::Env, Figment};
use serde::Deserialize;

/// Environment prefix for application settings, e.g. `TASK_TRACKER_DATABASE_URL`.
/// Nested keys use a double underscore: `TASK_TRACKER_POSTGRES__HOSTNAME`.
const ENV_PREFIX: &str = "TASK_TRACKER_";

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read configuration: {0}")]
    Extract(#[from] Box<rocket::figment::Error>),
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Full connection string. Takes precedence over `postgres`.
    pub database_url: Option<String>,
    pub postgres: Option<PostgresSettings>,
    pub session_max_age_secs: i64,
    pub csrf_enabled: bool,
    pub run_migrations: bool,
    pub password_cost: PasswordCost,
    pub log_filter: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PostgresSettings {
    pub username: String,
    #[serde(default)]
    pub password: String,
    pub hostname: String,
    #[serde(default = "PostgresSettings::default_port")]
    pub port: u16,
    pub database: String,
}

/// scrypt cost parameters used for new password hashes.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct PasswordCost {
    pub log_n: u8,
    pub r: u32,
    pub p: u32,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            database_url: None,
            postgres: None,
            session_max_age_secs: 60 * 60,
            csrf_enabled: true,
            run_migrations: true,
            password_cost: PasswordCost::default(),
            log_filter: "info".to_string(),
        }
    }
}

impl Default for PasswordCost {
    fn default() -> Self {
        Self {
            log_n: 17,
            r: 8,
            p: 1,
        }
    }
}

impl PostgresSettings {
    const fn default_port() -> u16 {
        5432
    }

    pub fn url(&self) -> String {
        format!(
            "postgres://{}:{}@{}:{}/{}",
            self.username, self.password, self.hostname, self.port, self.database
        )
    }
}

impl Settings {
    pub fn extract(figment: &Figment) -> Result<Self, ConfigError> {
        figment.extract().map_err(|err| ConfigError::from(Box::new(err)))
    }

    /// Connection string for PostgreSQL, if one is configured.
    pub fn connection_url(&self) -> Option<String> {
        self.database_url
            .clone()
            .or_else(|| self.postgres.as_ref().map(PostgresSettings::url))
    }
}

/// Rocket's own configuration (`Rocket.toml`, `ROCKET_*`) plus the
/// application's environment overrides.
pub fn figment() -> Figment {
    rocket::Config::figment()
        .merge(Env::raw().only(&["DATABASE"]).map(|_| "database_url".into()))
        .merge(Env::prefixed(ENV_PREFIX).split("__"))
}

#[cfg(test)]
pub fn figment_from_toml(toml: &str) -> Figment {
    use rocket::figment::providers::{Format, Toml};

    Figment::from(rocket::Config::default()).merge(Toml::string(toml))
}
