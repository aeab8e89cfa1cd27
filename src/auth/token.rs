use crate::error::AppError;
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

/// Access tokens authorize API requests; refresh tokens can only be exchanged
/// for a new access token at `/api/token/refresh/`.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum TokenKind {
    Access,
    Refresh,
}

/// Claims encoded within both halves of the token pair.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Claims {
    /// Subject of the token: the user's id.
    pub sub: i32,
    /// Flat admin flag, captured at issue time.
    pub is_admin: bool,
    /// Which half of the pair this token is. Verification rejects a token
    /// presented as the wrong kind.
    pub token_type: TokenKind,
    /// Expiration timestamp (seconds since epoch).
    pub exp: usize,
}

const ACCESS_TOKEN_MINUTES: i64 = 15;
const REFRESH_TOKEN_DAYS: i64 = 7;

fn secret() -> Result<String, AppError> {
    std::env::var("JWT_SECRET")
        .map_err(|_| AppError::Internal("JWT_SECRET not set".into()))
}

fn generate(user_id: i32, is_admin: bool, kind: TokenKind) -> Result<String, AppError> {
    let lifetime = match kind {
        TokenKind::Access => chrono::Duration::minutes(ACCESS_TOKEN_MINUTES),
        TokenKind::Refresh => chrono::Duration::days(REFRESH_TOKEN_DAYS),
    };
    let expiration = chrono::Utc::now()
        .checked_add_signed(lifetime)
        .ok_or_else(|| AppError::Internal("token expiry overflow".into()))?
        .timestamp() as usize;

    let claims = Claims {
        sub: user_id,
        is_admin,
        token_type: kind,
        exp: expiration,
    };

    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret()?.as_bytes()),
    )
    .map_err(|e| AppError::Internal(format!("Failed to generate token: {}", e)))
}

/// Generates the short-lived access token for a user.
pub fn generate_access_token(user_id: i32, is_admin: bool) -> Result<String, AppError> {
    generate(user_id, is_admin, TokenKind::Access)
}

/// Generates the longer-lived refresh token for a user.
pub fn generate_refresh_token(user_id: i32, is_admin: bool) -> Result<String, AppError> {
    generate(user_id, is_admin, TokenKind::Refresh)
}

fn verify(token: &str, expected: TokenKind) -> Result<Claims, AppError> {
    let claims = decode::<Claims>(
        token,
        &DecodingKey::from_secret(secret()?.as_bytes()),
        &Validation::default(),
    )
    .map(|data| data.claims)
    .map_err(|_| AppError::Unauthorized("invalid or expired token".into()))?;

    if claims.token_type != expected {
        return Err(AppError::Unauthorized("invalid or expired token".into()));
    }
    Ok(claims)
}

/// Verifies an access token and decodes its claims.
///
/// Requires the `JWT_SECRET` environment variable. Expiry is enforced purely
/// by timestamp comparison; there is no revocation list.
pub fn verify_access_token(token: &str) -> Result<Claims, AppError> {
    verify(token, TokenKind::Access)
}

/// Verifies a refresh token and decodes its claims.
pub fn verify_refresh_token(token: &str) -> Result<Claims, AppError> {
    verify(token, TokenKind::Refresh)
}
