use rocket::{http::Status, Request};
use rocket_dyn_templates::{context, Template};

use super::super::CurrentUser;

#[get("/")]
pub fn index(user: CurrentUser) -> Template {
    Template::render(
        "index",
        context! {
            logged_in: user.is_logged_in(),
        },
    )
}

fn describe(status: Status) -> &'static str {
    match status.code {
        400 => "The browser (or proxy) sent a request that this server could not understand.",
        401 => "The server could not verify that you are authorized to access the URL requested. You either supplied the wrong credentials (e.g. a bad password), or your browser doesn't understand how to supply the credentials required.",
        403 => "You don't have the permission to access the requested resource.",
        404 => "The requested URL was not found on the server.",
        _ => "The server could not complete the request.",
    }
}

#[catch(default)]
pub fn error_page(status: Status, _request: &Request) -> (Status, Template) {
    let page = Template::render(
        "error",
        context! {
            code: status.code,
            reason: status.reason().unwrap_or("Error"),
            description: describe(status),
        },
    );

    (status, page)
}
