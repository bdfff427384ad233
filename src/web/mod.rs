use std::sync::Arc;

use rocket::{figment::Figment, Build, Rocket};
use rocket_dyn_templates::Template;

mod context;
pub mod controllers;
mod csrf;
mod forms;
mod response;
mod session;


pub use context::{Context, ContextState};
pub use csrf::CsrfToken;
pub use response::{FlashView, Page, PageResult};
pub use session::{AuthorizedUser, CurrentUser, SessionTokenCookie};

/// Creates [`Rocket`] object that serves the site using the provided context.
pub fn initialize_web(figment: Figment, context: Arc<Context>) -> Rocket<Build> {
    let routes = routes![
        controllers::pages::index,
        controllers::auth::register_form,
        controllers::auth::register,
        controllers::auth::login_form,
        controllers::auth::login,
        controllers::auth::logout,
        controllers::tasks::list_tasks,
        controllers::tasks::show_task,
        controllers::tasks::create_task,
        controllers::tasks::update_task,
        controllers::tasks::delete_task,
    ];

    // Autoescape every template regardless of its file name.
    let templates = Template::custom(|engines| engines.tera.autoescape_on(vec![""]));

    rocket::custom(figment)
        .manage(context)
        .attach(templates)
        .mount("/", routes)
        .register("/", catchers![controllers::pages::error_page])
}
