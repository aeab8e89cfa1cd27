//! Task store: persistence for tasks and their many-to-many user
//! assignments.
//!
//! Assignment writes are additive with union semantics: the join table has a
//! composite primary key and inserts use `ON CONFLICT DO NOTHING`, so
//! re-assigning the same users is idempotent. Multi-row writes run inside a
//! single transaction so a rejected user id never leaves a partial
//! assignment behind.

use sqlx::{PgConnection, PgPool};

use crate::error::AppError;
use crate::models::{Task, TaskInput, TaskWithAssignees};
use crate::pagination::PageQuery;

const TASK_COLUMNS: &str = "id, name, description, task_type, status, created_at, completed_at";

/// Returns the subset of `user_ids` that do not exist, sorted ascending.
async fn missing_user_ids(conn: &mut PgConnection, user_ids: &[i32]) -> Result<Vec<i32>, AppError> {
    let existing: Vec<i32> = sqlx::query_scalar("SELECT id FROM users WHERE id = ANY($1)")
        .bind(user_ids)
        .fetch_all(conn)
        .await?;
    let mut missing: Vec<i32> = user_ids
        .iter()
        .copied()
        .filter(|id| !existing.contains(id))
        .collect();
    missing.sort_unstable();
    missing.dedup();
    Ok(missing)
}

async fn add_assignments(
    conn: &mut PgConnection,
    task_id: i32,
    user_ids: &[i32],
) -> Result<(), AppError> {
    sqlx::query(
        "INSERT INTO task_assignments (task_id, user_id) \
         SELECT $1, UNNEST($2::int4[]) ON CONFLICT DO NOTHING",
    )
    .bind(task_id)
    .bind(user_ids)
    .execute(conn)
    .await?;
    Ok(())
}

/// The full assignee set of a task, sorted ascending.
async fn assigned_user_ids(conn: &mut PgConnection, task_id: i32) -> Result<Vec<i32>, AppError> {
    let ids = sqlx::query_scalar(
        "SELECT user_id FROM task_assignments WHERE task_id = $1 ORDER BY user_id",
    )
    .bind(task_id)
    .fetch_all(conn)
    .await?;
    Ok(ids)
}

/// Creates a task and its initial assignments in one transaction.
///
/// Every referenced user id must exist; otherwise the transaction rolls back
/// and nothing is persisted.
pub async fn create(
    pool: &PgPool,
    input: TaskInput,
    user_ids: Vec<i32>,
) -> Result<TaskWithAssignees, AppError> {
    let mut tx = pool.begin().await?;

    let sql = format!(
        "INSERT INTO tasks (name, description, task_type, status) \
         VALUES ($1, $2, $3, $4) RETURNING {}",
        TASK_COLUMNS
    );
    let task = sqlx::query_as::<_, Task>(&sql)
        .bind(&input.name)
        .bind(&input.description)
        .bind(&input.task_type)
        .bind(input.status)
        .fetch_one(&mut *tx)
        .await?;

    if !user_ids.is_empty() {
        let missing = missing_user_ids(&mut tx, &user_ids).await?;
        if !missing.is_empty() {
            return Err(AppError::Validation(format!(
                "users not found with ids: {:?}",
                missing
            )));
        }
        add_assignments(&mut tx, task.id, &user_ids).await?;
    }

    let assigned = assigned_user_ids(&mut tx, task.id).await?;
    tx.commit().await?;

    Ok(TaskWithAssignees {
        task,
        assigned_user_ids: assigned,
    })
}

/// Adds `user_ids` to a task's assignee set and returns the resulting set.
///
/// Union semantics: ids already assigned are silently kept, so repeating the
/// same call yields the same final set.
pub async fn assign(pool: &PgPool, task_id: i32, user_ids: &[i32]) -> Result<Vec<i32>, AppError> {
    let mut tx = pool.begin().await?;

    let exists: Option<i32> = sqlx::query_scalar("SELECT id FROM tasks WHERE id = $1")
        .bind(task_id)
        .fetch_optional(&mut *tx)
        .await?;
    if exists.is_none() {
        return Err(AppError::NotFound(format!("task {} not found", task_id)));
    }

    let missing = missing_user_ids(&mut tx, user_ids).await?;
    if !missing.is_empty() {
        return Err(AppError::Validation(format!(
            "users not found with ids: {:?}",
            missing
        )));
    }

    add_assignments(&mut tx, task_id, user_ids).await?;
    let assigned = assigned_user_ids(&mut tx, task_id).await?;
    tx.commit().await?;

    Ok(assigned)
}

/// One page of the tasks assigned to a user, newest first, together with the
/// total count. The caller is responsible for checking that the user exists.
pub async fn list_for_user(
    pool: &PgPool,
    user_id: i32,
    page: &PageQuery,
) -> Result<(i64, Vec<Task>), AppError> {
    let count: i64 = sqlx::query_scalar(
        "SELECT COUNT(*) FROM task_assignments WHERE user_id = $1",
    )
    .bind(user_id)
    .fetch_one(pool)
    .await?;

    let sql = format!(
        "SELECT {} FROM tasks t \
         JOIN task_assignments ta ON ta.task_id = t.id \
         WHERE ta.user_id = $1 \
         ORDER BY t.created_at DESC \
         LIMIT $2 OFFSET $3",
        TASK_COLUMNS
            .split(", ")
            .map(|c| format!("t.{}", c))
            .collect::<Vec<_>>()
            .join(", ")
    );
    let tasks = sqlx::query_as::<_, Task>(&sql)
        .bind(user_id)
        .bind(page.limit())
        .bind(page.offset())
        .fetch_all(pool)
        .await?;

    Ok((count, tasks))
}
