#[macro_use]
extern crate rocket;

mod app;
mod config;
mod model;
mod storage;
mod web;

use std::sync::Arc;

use app::{
    auth::AuthService,
    passwords::Passwords,
    repositories::{SessionsRepository, TasksRepository, UsersRepository},
    tasks::TasksService,
};
use config::Settings;
use storage::{
    db::{self, DatabaseConnection, DatabaseConnectionRef},
    inmemory,
};
use web::{initialize_web, Context};

fn init_logging(settings: &Settings) {
    let env = env_logger::Env::default().default_filter_or(settings.log_filter.as_str());

    env_logger::Builder::from_env(env).init();
}

struct Repositories {
    users: Arc<dyn UsersRepository>,
    sessions: Arc<dyn SessionsRepository>,
    tasks: Arc<dyn TasksRepository>,
}

fn create_inmemory_repositories() -> Repositories {
    Repositories {
        sessions: Arc::new(inmemory::InMemorySessions::new()),
        users: Arc::new(inmemory::InMemoryUsers::new()),
        tasks: Arc::new(inmemory::InMemoryTasks::new()),
    }
}

fn create_db_repositories(db: DatabaseConnectionRef) -> Repositories {
    Repositories {
        sessions: Arc::new(db::DbSessions::new(db.clone())),
        users: Arc::new(db::DbUsers::new(db.clone())),
        tasks: Arc::new(db::DbTasks::new(db)),
    }
}

fn create_context(repos: Repositories, settings: Settings) -> anyhow::Result<Context> {
    let passwords = Passwords::new(&settings.password_cost)?;

    Ok(Context {
        auth: Box::new(AuthService::new(repos.sessions, repos.users, passwords)),
        tasks: Box::new(TasksService::new(repos.tasks)),
        settings,
    })
}

async fn create_repos(settings: &Settings) -> anyhow::Result<Repositories> {
    if let Some(url) = settings.connection_url() {
        log::info!("Connecting to database");
        let db = Arc::new(DatabaseConnection::connect(&url)?);

        if settings.run_migrations {
            log::info!("Running database migrations");
            db.run_migrations().await?;
        }

        Ok(create_db_repositories(db))
    } else {
        log::info!("Using in-memory repositories, since database URL is not set.");
        Ok(create_inmemory_repositories())
    }
}

#[rocket::main]
async fn main() -> anyhow::Result<()> {
    let figment = config::figment();
    let settings = Settings::extract(&figment)?;

    init_logging(&settings);

    log::info!("Start");

    let repos = create_repos(&settings).await?;
    let context = Arc::new(create_context(repos, settings)?);

    if let Err(err) = initialize_web(figment, context).launch().await {
        log::error!("Server stopped: {}", err);
        return Err(anyhow::anyhow!("server stopped: {err}"));
    }

    Ok(())
}
