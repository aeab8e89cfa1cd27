use actix_web::dev::Payload;
use actix_web::{Error as ActixError, FromRequest, HttpMessage, HttpRequest};
use std::future::{ready, Ready};

use crate::auth::token::Claims;
use crate::error::AppError;

/// The authenticated caller, extracted from the claims that `AuthMiddleware`
/// stored in request extensions.
///
/// If no claims are present (middleware not applied, or an internal logic
/// error after auth), extraction fails with 401.
#[derive(Debug, Clone, Copy)]
pub struct Identity {
    pub user_id: i32,
    pub is_admin: bool,
}

impl FromRequest for Identity {
    type Error = ActixError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        match req.extensions().get::<Claims>().cloned() {
            Some(claims) => ready(Ok(Identity {
                user_id: claims.sub,
                is_admin: claims.is_admin,
            })),
            None => {
                let err = AppError::Unauthorized("unauthenticated".to_string());
                ready(Err(err.into()))
            }
        }
    }
}

/// An authenticated caller that also holds the admin flag.
///
/// Task creation and assignment handlers take this extractor; a non-admin
/// caller is rejected with 403 before the handler body runs, regardless of
/// the request payload.
#[derive(Debug, Clone, Copy)]
pub struct AdminIdentity(pub Identity);

impl FromRequest for AdminIdentity {
    type Error = ActixError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        match req.extensions().get::<Claims>().cloned() {
            Some(claims) if claims.is_admin => ready(Ok(AdminIdentity(Identity {
                user_id: claims.sub,
                is_admin: true,
            }))),
            Some(_) => {
                let err = AppError::Forbidden("admin privileges required".to_string());
                ready(Err(err.into()))
            }
            None => {
                let err = AppError::Unauthorized("unauthenticated".to_string());
                ready(Err(err.into()))
            }
        }
    }
}
