//! Identity store: persistence for user records.

use sqlx::{FromRow, PgPool};

use crate::error::AppError;
use crate::models::{User, UserSummary};

/// The columns returned to every caller except the credential check.
const USER_COLUMNS: &str = "id, name, email, phone, is_admin, date_joined, updated_date";

/// The row shape used only for credential verification. This is the single
/// place outside the insert where the password hash leaves the database.
#[derive(Debug, FromRow)]
pub struct AuthRow {
    pub id: i32,
    pub password_hash: String,
    pub is_admin: bool,
}

/// Inserts a new user. The caller provides the already-hashed password; the
/// raw password never reaches this module.
///
/// A duplicate email trips the unique index and is reported as a validation
/// failure rather than a database error.
pub async fn insert(
    pool: &PgPool,
    name: &str,
    email: &str,
    phone: Option<&str>,
    password_hash: &str,
    is_admin: bool,
) -> Result<User, AppError> {
    let sql = format!(
        "INSERT INTO users (name, email, phone, password_hash, is_admin) \
         VALUES ($1, $2, $3, $4, $5) RETURNING {}",
        USER_COLUMNS
    );
    sqlx::query_as::<_, User>(&sql)
        .bind(name)
        .bind(email)
        .bind(phone)
        .bind(password_hash)
        .bind(is_admin)
        .fetch_one(pool)
        .await
        .map_err(|e| match &e {
            sqlx::Error::Database(db) if db.is_unique_violation() => {
                AppError::Validation("a user with this email already exists".into())
            }
            _ => e.into(),
        })
}

/// Looks up the credential row for a login attempt.
pub async fn find_auth_by_email(pool: &PgPool, email: &str) -> Result<Option<AuthRow>, AppError> {
    let row = sqlx::query_as::<_, AuthRow>(
        "SELECT id, password_hash, is_admin FROM users WHERE email = $1",
    )
    .bind(email)
    .fetch_optional(pool)
    .await?;
    Ok(row)
}

pub async fn find_by_id(pool: &PgPool, user_id: i32) -> Result<Option<User>, AppError> {
    let sql = format!("SELECT {} FROM users WHERE id = $1", USER_COLUMNS);
    let user = sqlx::query_as::<_, User>(&sql)
        .bind(user_id)
        .fetch_optional(pool)
        .await?;
    Ok(user)
}

/// The abbreviated shape embedded in the task-listing envelope.
pub async fn find_summary_by_id(
    pool: &PgPool,
    user_id: i32,
) -> Result<Option<UserSummary>, AppError> {
    let summary = sqlx::query_as::<_, UserSummary>(
        "SELECT id, name, email, is_admin FROM users WHERE id = $1",
    )
    .bind(user_id)
    .fetch_optional(pool)
    .await?;
    Ok(summary)
}
