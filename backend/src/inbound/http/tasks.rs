//! To-do task handlers. Every route needs a live session.
//!
//! ```text
//! GET /tasks
//! POST /tasks/todo {"title":"Buy milk","description":"Semi-skimmed","dueDate":"2026-05-01"}
//! PATCH /tasks/complete/{id}
//! PATCH /tasks/notComplete/{id}
//! PUT /tasks/update/{id} {"title":..,"description":..,"dueDate":..}
//! DELETE /tasks/delete/{id}
//! ```

use actix_web::{HttpResponse, delete, get, patch, post, put, web};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::{
    DUE_DATE_FORMAT, Error, Task, TaskDraft, TaskError, TaskId, TaskValidationError, UserId,
};
use crate::inbound::http::ApiResult;
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;

/// Message returned when a task route is called without a live session.
pub const LOGIN_REQUIRED_MESSAGE: &str = "login required";

/// Body for `POST /tasks/todo` and `PUT /tasks/update/{id}`.
#[derive(Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TaskRequest {
    #[schema(example = "Buy milk")]
    pub title: String,
    #[schema(example = "Semi-skimmed, two litres")]
    pub description: String,
    #[schema(example = "2026-05-01")]
    pub due_date: String,
}

impl TryFrom<TaskRequest> for TaskDraft {
    type Error = TaskValidationError;

    fn try_from(value: TaskRequest) -> Result<Self, Self::Error> {
        Self::try_from_parts(&value.title, &value.description, &value.due_date)
    }
}

/// A task as clients see it.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TaskView {
    #[schema(example = "3fa85f64-5717-4562-b3fc-2c963f66afa6")]
    pub id: String,
    pub title: String,
    pub description: String,
    #[schema(example = "2026-05-01")]
    pub due_date: String,
    #[schema(example = "2026-04-01T08:00:00+00:00")]
    pub created_on: String,
    pub completed: bool,
}

impl From<&Task> for TaskView {
    fn from(task: &Task) -> Self {
        Self {
            id: task.id().to_string(),
            title: task.title().to_owned(),
            description: task.description().to_owned(),
            due_date: task.due_date().format(DUE_DATE_FORMAT).to_string(),
            created_on: task.created_on().to_rfc3339(),
            completed: task.is_completed(),
        }
    }
}

/// A changed task together with a human-readable confirmation.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
pub struct TaskOutcome {
    pub task: TaskView,
    #[schema(example = "Task updated successfully!")]
    pub message: String,
}

impl TaskOutcome {
    fn new(task: &Task, message: &str) -> web::Json<Self> {
        web::Json(Self {
            task: TaskView::from(task),
            message: message.to_owned(),
        })
    }
}

/// User bound to the caller's session, or `401` when there is none.
async fn signed_in(state: &HttpState, session: &SessionContext) -> ApiResult<UserId> {
    let Some(token) = session.token()? else {
        return Err(Error::unauthorized(LOGIN_REQUIRED_MESSAGE));
    };
    match state.sessions.resolve(&token).await.map_err(Error::from)? {
        Some(user_id) => Ok(user_id),
        None => {
            session.purge();
            Err(Error::unauthorized(LOGIN_REQUIRED_MESSAGE))
        }
    }
}

fn task_id(raw: &str) -> ApiResult<TaskId> {
    TaskId::parse(raw).ok_or_else(|| TaskError::NotFound.into())
}

fn draft(payload: web::Json<TaskRequest>) -> ApiResult<TaskDraft> {
    TaskDraft::try_from(payload.into_inner()).map_err(|err| TaskError::from(err).into())
}

/// List the caller's tasks, newest first.
#[utoipa::path(
    get,
    path = "/tasks",
    responses(
        (status = 200, description = "Tasks owned by the caller", body = [TaskView]),
        (status = 401, description = "Login required", body = Error),
        (status = 503, description = "Task store unavailable", body = Error)
    ),
    tags = ["tasks"],
    operation_id = "listTasks"
)]
#[get("/tasks")]
pub async fn list_tasks(
    state: web::Data<HttpState>,
    session: SessionContext,
) -> ApiResult<web::Json<Vec<TaskView>>> {
    let owner = signed_in(&state, &session).await?;
    let tasks = state.tasks.list(&owner).await?;
    Ok(web::Json(tasks.iter().map(TaskView::from).collect()))
}

#[utoipa::path(
    post,
    path = "/tasks/todo",
    request_body = TaskRequest,
    responses(
        (status = 201, description = "Task created", body = TaskView),
        (status = 400, description = "Invalid task", body = Error),
        (status = 401, description = "Login required", body = Error)
    ),
    tags = ["tasks"],
    operation_id = "createTask"
)]
#[post("/tasks/todo")]
pub async fn create_task(
    state: web::Data<HttpState>,
    session: SessionContext,
    payload: web::Json<TaskRequest>,
) -> ApiResult<HttpResponse> {
    let owner = signed_in(&state, &session).await?;
    let task = state.tasks.create(&owner, draft(payload)?).await?;
    Ok(HttpResponse::Created().json(TaskView::from(&task)))
}

#[utoipa::path(
    patch,
    path = "/tasks/complete/{id}",
    params(("id" = String, Path, description = "Task identifier")),
    responses(
        (status = 200, description = "Task marked done", body = TaskOutcome),
        (status = 401, description = "Login required", body = Error),
        (status = 404, description = "No such task for this user", body = Error)
    ),
    tags = ["tasks"],
    operation_id = "completeTask"
)]
#[patch("/tasks/complete/{id}")]
pub async fn complete_task(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<String>,
) -> ApiResult<web::Json<TaskOutcome>> {
    let owner = signed_in(&state, &session).await?;
    let task = state
        .tasks
        .set_completed(&owner, task_id(&path)?, true)
        .await?;
    Ok(TaskOutcome::new(&task, "Task set as completed!"))
}

#[utoipa::path(
    patch,
    path = "/tasks/notComplete/{id}",
    params(("id" = String, Path, description = "Task identifier")),
    responses(
        (status = 200, description = "Task reopened", body = TaskOutcome),
        (status = 401, description = "Login required", body = Error),
        (status = 404, description = "No such task for this user", body = Error)
    ),
    tags = ["tasks"],
    operation_id = "reopenTask"
)]
#[patch("/tasks/notComplete/{id}")]
pub async fn reopen_task(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<String>,
) -> ApiResult<web::Json<TaskOutcome>> {
    let owner = signed_in(&state, &session).await?;
    let task = state
        .tasks
        .set_completed(&owner, task_id(&path)?, false)
        .await?;
    Ok(TaskOutcome::new(&task, "Task set as not completed!"))
}

/// Replace a task's title, description and due date.
#[utoipa::path(
    put,
    path = "/tasks/update/{id}",
    params(("id" = String, Path, description = "Task identifier")),
    request_body = TaskRequest,
    responses(
        (status = 200, description = "Task updated", body = TaskOutcome),
        (status = 400, description = "Invalid task", body = Error),
        (status = 401, description = "Login required", body = Error),
        (status = 404, description = "No such task for this user", body = Error)
    ),
    tags = ["tasks"],
    operation_id = "updateTask"
)]
#[put("/tasks/update/{id}")]
pub async fn update_task(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<String>,
    payload: web::Json<TaskRequest>,
) -> ApiResult<web::Json<TaskOutcome>> {
    let owner = signed_in(&state, &session).await?;
    let id = task_id(&path)?;
    let task = state.tasks.update(&owner, id, draft(payload)?).await?;
    Ok(TaskOutcome::new(&task, "Task updated successfully!"))
}

#[utoipa::path(
    delete,
    path = "/tasks/delete/{id}",
    params(("id" = String, Path, description = "Task identifier")),
    responses(
        (status = 200, description = "Task deleted", body = TaskOutcome),
        (status = 401, description = "Login required", body = Error),
        (status = 404, description = "No such task for this user", body = Error)
    ),
    tags = ["tasks"],
    operation_id = "deleteTask"
)]
#[delete("/tasks/delete/{id}")]
pub async fn delete_task(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<String>,
) -> ApiResult<web::Json<TaskOutcome>> {
    let owner = signed_in(&state, &session).await?;
    let task = state.tasks.delete(&owner, task_id(&path)?).await?;
    Ok(TaskOutcome::new(&task, "Task deleted successfully!"))
}
