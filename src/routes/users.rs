use crate::{auth::hash_password, error::AppError, models::UserInput, store};
use actix_web::{put, web, HttpResponse, Responder};
use serde_json::json;
use sqlx::PgPool;
use validator::Validate;

/// Create a user account
///
/// Open endpoint: this is the only signup path, for both regular and admin
/// accounts (`is_admin` in the body). The verb is PUT rather than POST, a
/// quirk of the upstream API contract that clients depend on.
///
/// The password is hashed before it is handed to the store; the response
/// never echoes it.
#[put("/user/")]
pub async fn create_user(
    pool: web::Data<PgPool>,
    payload: web::Json<UserInput>,
) -> Result<impl Responder, AppError> {
    payload.validate()?;

    let password_hash = hash_password(&payload.password)?;
    let user = store::users::insert(
        &pool,
        &payload.name,
        &payload.email,
        payload.phone.as_deref(),
        &password_hash,
        payload.is_admin,
    )
    .await?;

    log::info!("created user {} (admin: {})", user.id, user.is_admin);

    Ok(HttpResponse::Created().json(json!({
        "message": "User created successfully",
        "data": user
    })))
}
