use rocket::{form::Form, http::CookieJar, http::Status};
use rocket_dyn_templates::{context, Template};
use serde::Serialize;

use crate::model::{Task, TaskId};

use super::super::{
    forms::TaskForm, AuthorizedUser, ContextState, CsrfToken, Page, PageResult,
    SessionTokenCookie,
};

const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M";

#[derive(Serialize)]
pub struct TaskView {
    id: i32,
    name: String,
    description: Option<String>,
    created_at: String,
    updated_at: String,
}

/// Loads a task owned by `user`. An id that is not a valid `i32` (non-numeric
/// or out of range) names no task.
async fn find_own_task(
    context: &ContextState,
    user: &AuthorizedUser,
    id: Option<i32>,
) -> anyhow::Result<Option<Task>> {
    let Some(id) = id else {
        return Ok(None);
    };

    context.tasks.read_by_id(TaskId::from_raw(id), user.user_id).await
}

impl From<Task> for TaskView {
    fn from(task: Task) -> Self {
        Self {
            id: task.task_id.raw(),
            name: task.name,
            description: task.description,
            created_at: task.created_at.format(TIMESTAMP_FORMAT).to_string(),
            updated_at: task.updated_at.format(TIMESTAMP_FORMAT).to_string(),
        }
    }
}

#[get("/tasks")]
pub async fn list_tasks(
    context: &ContextState,
    jar: &CookieJar<'_>,
    user: AuthorizedUser,
    csrf: CsrfToken,
) -> PageResult {
    let tasks: Vec<TaskView> = context
        .tasks
        .read_all(user.user_id)
        .await?
        .into_iter()
        .map(TaskView::from)
        .collect();

    // Browsing the list keeps the session alive.
    SessionTokenCookie::new(jar).write(&user.session_token, context.settings.session_max_age_secs);

    Ok(Page::Html(Template::render(
        "tasks",
        context! {
            logged_in: true,
            csrf_token: csrf.value(),
            tasks: tasks,
        },
    )))
}

#[get("/tasks/<id>")]
pub async fn show_task(
    context: &ContextState,
    user: AuthorizedUser,
    csrf: CsrfToken,
    id: Option<i32>,
) -> PageResult {
    let Some(task) = find_own_task(context, &user, id).await? else {
        return Ok(Page::Status(Status::NotFound));
    };

    Ok(Page::Html(Template::render(
        "task",
        context! {
            logged_in: true,
            csrf_token: csrf.value(),
            task: TaskView::from(task),
        },
    )))
}

#[post("/tasks/create", data = "<form>")]
pub async fn create_task(
    context: &ContextState,
    user: AuthorizedUser,
    csrf: CsrfToken,
    form: Option<Form<TaskForm>>,
) -> PageResult {
    let Some(form) = form else {
        return Ok(Page::Status(Status::BadRequest));
    };

    if !csrf.verify(form.csrf_token.as_deref()) {
        return Ok(Page::Status(Status::Forbidden));
    }

    let Ok(new_task) = form.into_inner().validate() else {
        return Ok(Page::Status(Status::BadRequest));
    };

    let task_id = context.tasks.create(user.user_id, &new_task).await?;
    log::debug!("User {} created task {}", user.user_id, task_id);

    Ok(Page::redirect("/tasks"))
}

#[post("/tasks/<id>/update", data = "<form>")]
pub async fn update_task(
    context: &ContextState,
    user: AuthorizedUser,
    csrf: CsrfToken,
    id: Option<i32>,
    form: Option<Form<TaskForm>>,
) -> PageResult {
    let Some(task) = find_own_task(context, &user, id).await? else {
        return Ok(Page::Status(Status::NotFound));
    };

    let Some(form) = form else {
        return Ok(Page::Status(Status::BadRequest));
    };

    if !csrf.verify(form.csrf_token.as_deref()) {
        return Ok(Page::Status(Status::Forbidden));
    }

    let Ok(input) = form.into_inner().validate() else {
        return Ok(Page::Status(Status::BadRequest));
    };

    context.tasks.rename(task, input).await?;

    Ok(Page::redirect("/tasks"))
}

#[get("/tasks/<id>/delete")]
pub async fn delete_task(
    context: &ContextState,
    user: AuthorizedUser,
    id: Option<i32>,
) -> PageResult {
    let Some(task) = find_own_task(context, &user, id).await? else {
        return Ok(Page::Status(Status::NotFound));
    };

    context.tasks.delete(&task).await?;

    Ok(Page::redirect("/tasks"))
}
