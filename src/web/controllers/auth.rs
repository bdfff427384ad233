use rocket::{
    form::Form,
    http::{CookieJar, Status},
    request::FlashMessage,
    response::{Flash, Redirect},
};
use rocket_dyn_templates::{context, Template};

use crate::app::auth::{LoginError, RegisterError};

use super::super::{
    forms::{FormErrors, LoginForm, RegisterForm},
    ContextState, CsrfToken, CurrentUser, FlashView, Page, PageResult, SessionTokenCookie,
};

fn register_page(
    csrf: &CsrfToken,
    username: &str,
    errors: &FormErrors,
    notice: Option<&str>,
) -> Template {
    Template::render(
        "register",
        context! {
            logged_in: false,
            csrf_token: csrf.value(),
            username: username,
            errors: errors,
            notice: notice,
        },
    )
}

#[get("/register")]
pub fn register_form(user: CurrentUser, csrf: CsrfToken) -> Page {
    if user.is_logged_in() {
        return Page::redirect("/");
    }

    Page::Html(register_page(&csrf, "", &FormErrors::default(), None))
}

#[post("/register", data = "<form>")]
pub async fn register(
    context: &ContextState,
    user: CurrentUser,
    csrf: CsrfToken,
    form: Option<Form<RegisterForm>>,
) -> PageResult {
    if user.is_logged_in() {
        return Ok(Page::redirect("/"));
    }

    let Some(form) = form else {
        return Ok(Page::Status(Status::BadRequest));
    };

    if !csrf.verify(form.csrf_token.as_deref()) {
        return Ok(Page::Status(Status::Forbidden));
    }

    if let Err(errors) = form.validate() {
        return Ok(Page::Html(register_page(&csrf, &form.username, &errors, None)));
    }

    match context.auth.register(&form.username, &form.password).await? {
        Ok(_user_id) => Ok(Page::Flash(Flash::success(
            Redirect::found("/login"),
            "You have successfully registered",
        ))),
        Err(RegisterError::UserAlreadyExists) => Ok(Page::Html(register_page(
            &csrf,
            &form.username,
            &FormErrors::default(),
            Some("You are already registered, try to log in"),
        ))),
    }
}

#[get("/login")]
pub fn login_form(
    user: CurrentUser,
    csrf: CsrfToken,
    flash: Option<FlashMessage<'_>>,
) -> Page {
    if user.is_logged_in() {
        return Page::redirect("/");
    }

    Page::Html(Template::render(
        "login",
        context! {
            logged_in: false,
            csrf_token: csrf.value(),
            flash: FlashView::from_message(flash),
        },
    ))
}

#[post("/login", data = "<form>")]
pub async fn login(
    context: &ContextState,
    jar: &CookieJar<'_>,
    user: CurrentUser,
    csrf: CsrfToken,
    form: Option<Form<LoginForm>>,
) -> PageResult {
    if user.is_logged_in() {
        return Ok(Page::redirect("/"));
    }

    let Some(form) = form.filter(|f| f.is_complete()) else {
        return Ok(Page::Status(Status::BadRequest));
    };

    if !csrf.verify(form.csrf_token.as_deref()) {
        return Ok(Page::Status(Status::Forbidden));
    }

    match context.auth.login(&form.username, &form.password).await? {
        Ok(token) => {
            SessionTokenCookie::new(jar).write(&token, context.settings.session_max_age_secs);

            Ok(Page::redirect("/tasks"))
        }
        Err(LoginError::InvalidCredentials) => Ok(Page::Flash(Flash::error(
            Redirect::found("/login"),
            "Invalid username or password",
        ))),
    }
}

#[get("/logout")]
pub async fn logout(
    context: &ContextState,
    jar: &CookieJar<'_>,
    user: CurrentUser,
) -> PageResult {
    let CurrentUser(Some(user)) = user else {
        return Ok(Page::redirect("/"));
    };

    // Server side first, then the browser.
    context.auth.logout(&user.session_token).await?;
    SessionTokenCookie::new(jar).remove();

    Ok(Page::redirect("/"))
}
