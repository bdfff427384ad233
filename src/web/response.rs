use rocket::{
    http::Status,
    request::FlashMessage,
    response::{self, Flash, Redirect, Responder},
    Request,
};
use rocket_dyn_templates::Template;
use serde::Serialize;

/// Everything a page handler can answer with.
#[derive(Responder)]
pub enum Page {
    Html(Template),
    Redirect(Redirect),
    Flash(Flash<Redirect>),
    Status(Status),
}

impl Page {
    pub fn redirect(to: &'static str) -> Self {
        Self::Redirect(Redirect::found(to))
    }
}

/// Infrastructure failure. Logged, then answered with a bare 500.
#[derive(Debug)]
pub struct ServerError(anyhow::Error);

impl<E: Into<anyhow::Error>> From<E> for ServerError {
    fn from(err: E) -> Self {
        Self(err.into())
    }
}

impl<'r, 'o: 'r> Responder<'r, 'o> for ServerError {
    fn respond_to(self, request: &'r Request<'_>) -> response::Result<'o> {
        log::error!("{} {}: {:?}", request.method(), request.uri(), self.0);
        Status::InternalServerError.respond_to(request)
    }
}

pub type PageResult = Result<Page, ServerError>;

#[derive(Serialize)]
pub struct FlashView {
    kind: &'static str,
    message: String,
}

impl FlashView {
    pub fn from_message(flash: Option<FlashMessage<'_>>) -> Option<Self> {
        flash.map(|f| Self {
            kind: match f.kind() {
                "error" => "danger",
                "success" => "success",
                _ => "info",
            },
            message: f.message().to_string(),
        })
    }
}
