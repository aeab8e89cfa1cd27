use crate::{
    auth::{AdminIdentity, Identity},
    error::AppError,
    models::{AssignmentInput, Task, TaskInput, UserSummary},
    pagination::{Page, PageQuery},
    store,
};
use actix_web::{get, post, web, HttpRequest, HttpResponse, Responder};
use serde::Serialize;
use serde_json::json;
use sqlx::PgPool;
use validator::Validate;

/// Create a task
///
/// Admin only. The optional `user_id` field (single id or list) becomes the
/// task's initial assignee set; every id must reference an existing user or
/// the whole request is rejected and nothing is persisted.
///
/// ## Responses:
/// - `201 Created`: `{message, data}` where `data` is the task plus
///   `assigned_user_ids`.
/// - `400 Bad Request`: invalid payload or unknown user ids.
/// - `401 Unauthorized` / `403 Forbidden`: missing token / non-admin caller.
#[post("/task/")]
pub async fn create_task(
    pool: web::Data<PgPool>,
    payload: web::Json<TaskInput>,
    admin: AdminIdentity,
) -> Result<impl Responder, AppError> {
    payload.validate()?;

    let mut input = payload.into_inner();
    let user_ids = input
        .user_id
        .take()
        .map(|selector| selector.into_vec())
        .unwrap_or_default();

    let created = store::tasks::create(&pool, input, user_ids).await?;

    log::info!(
        "admin {} created task {} with {} assignee(s)",
        admin.0.user_id,
        created.task.id,
        created.assigned_user_ids.len()
    );

    Ok(HttpResponse::Created().json(json!({
        "message": "Task created successfully",
        "data": created
    })))
}

/// Assign users to a task
///
/// Admin only. Additive union over the existing assignee set; re-running the
/// same request is idempotent. Responds with the full post-union set.
///
/// ## Responses:
/// - `200 OK`: `{message, assigned_users}`.
/// - `400 Bad Request`: unknown user ids.
/// - `404 Not Found`: unknown task.
#[post("/tasks/{task_id}/assign/")]
pub async fn assign_users(
    pool: web::Data<PgPool>,
    task_id: web::Path<i32>,
    payload: web::Json<AssignmentInput>,
    _admin: AdminIdentity,
) -> Result<impl Responder, AppError> {
    let task_id = task_id.into_inner();
    let assigned = store::tasks::assign(&pool, task_id, &payload.user_ids).await?;

    Ok(HttpResponse::Ok().json(json!({
        "message": format!("Task {} assigned to {} users", task_id, assigned.len()),
        "assigned_users": assigned
    })))
}

/// The `results` half of the task-listing envelope.
#[derive(Debug, Serialize)]
struct UserTasks {
    user: UserSummary,
    tasks: Vec<Task>,
}

/// List the tasks assigned to a user
///
/// Any authenticated caller may view any user's task list. Paginated with
/// `page`/`page_size`, newest tasks first.
///
/// ## Responses:
/// - `200 OK`: `{count, next, previous, results: {user, tasks}}`.
/// - `401 Unauthorized`: missing or invalid token.
/// - `404 Not Found`: the user id does not exist (an unknown user is not an
///   empty list).
#[get("/users/{user_id}/tasks/")]
pub async fn list_user_tasks(
    pool: web::Data<PgPool>,
    user_id: web::Path<i32>,
    page: web::Query<PageQuery>,
    req: HttpRequest,
    _identity: Identity,
) -> Result<impl Responder, AppError> {
    let user_id = user_id.into_inner();

    let user = store::users::find_summary_by_id(&pool, user_id)
        .await?
        .ok_or_else(|| AppError::NotFound("user not found".into()))?;

    let (count, tasks) = store::tasks::list_for_user(&pool, user_id, &page).await?;
    let envelope = Page::paginate(req.path(), &page, count, UserTasks { user, tasks })?;

    Ok(HttpResponse::Ok().json(envelope))
}
