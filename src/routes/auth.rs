use crate::{
    auth::{
        generate_access_token, generate_refresh_token, verify_password, verify_refresh_token,
        AccessToken, RefreshRequest, TokenPair, TokenRequest,
    },
    error::AppError,
    store,
};
use actix_web::{post, web, HttpResponse, Responder};
use sqlx::PgPool;
use validator::Validate;

/// Issue a token pair
///
/// Verifies the email/password pair and returns `{refresh, access}`.
/// Unknown email and wrong password produce the same 401 so the endpoint
/// does not reveal which part failed.
#[post("/api/token/")]
pub async fn obtain_token_pair(
    pool: web::Data<PgPool>,
    payload: web::Json<TokenRequest>,
) -> Result<impl Responder, AppError> {
    payload.validate()?;

    let row = store::users::find_auth_by_email(&pool, &payload.email).await?;
    let row = match row {
        Some(row) => row,
        None => return Err(AppError::Unauthorized("invalid credentials".into())),
    };

    if !verify_password(&payload.password, &row.password_hash)? {
        return Err(AppError::Unauthorized("invalid credentials".into()));
    }

    Ok(HttpResponse::Ok().json(TokenPair {
        refresh: generate_refresh_token(row.id, row.is_admin)?,
        access: generate_access_token(row.id, row.is_admin)?,
    }))
}

/// Exchange a refresh token for a new access token
///
/// The refresh token is verified statelessly; the new access token carries
/// the same identity and admin flag.
#[post("/api/token/refresh/")]
pub async fn refresh_token(
    payload: web::Json<RefreshRequest>,
) -> Result<impl Responder, AppError> {
    let claims = verify_refresh_token(&payload.refresh)?;

    Ok(HttpResponse::Ok().json(AccessToken {
        access: generate_access_token(claims.sub, claims.is_admin)?,
    }))
}
