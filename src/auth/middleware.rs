use actix_web::{
    body::EitherBody,
    dev::{forward_ready, Service, ServiceRequest, ServiceResponse, Transform},
    error::ResponseError,
    Error, HttpMessage,
};
use futures::future::{ready, LocalBoxFuture, Ready};

use crate::auth::token::verify_access_token;
use crate::error::AppError;

/// Application-level authentication gate.
///
/// Requests to public paths (health check, token issuance, user creation)
/// pass through untouched. Every other request must carry a valid
/// `Authorization: Bearer <access token>` header; on success the decoded
/// [`Claims`](crate::auth::token::Claims) are stored in request extensions
/// for the identity extractors to pick up.
pub struct AuthMiddleware;

impl<S, B> Transform<S, ServiceRequest> for AuthMiddleware
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error>,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Transform = AuthMiddlewareService<S>;
    type InitError = ();
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(AuthMiddlewareService { service }))
    }
}

pub struct AuthMiddlewareService<S> {
    service: S,
}

/// Paths that never require a token: health probe, the token endpoints
/// themselves, and user creation (the API has no other signup path).
fn is_public_path(path: &str) -> bool {
    path == "/health" || path.starts_with("/api/token") || path == "/user/"
}

impl<S, B> Service<ServiceRequest> for AuthMiddlewareService<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error>,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        if is_public_path(req.path()) {
            let fut = self.service.call(req);
            return Box::pin(async move { fut.await.map(ServiceResponse::map_into_left_body) });
        }

        let bearer = req
            .headers()
            .get("Authorization")
            .and_then(|value| value.to_str().ok())
            .and_then(|value| value.strip_prefix("Bearer "));

        match bearer {
            Some(token) => match verify_access_token(token) {
                Ok(claims) => {
                    req.extensions_mut().insert(claims);
                    let fut = self.service.call(req);
                    Box::pin(async move { fut.await.map(ServiceResponse::map_into_left_body) })
                }
                Err(app_err) => reject(req, app_err),
            },
            None => reject(req, AppError::Unauthorized("unauthenticated".into())),
        }
    }
}

/// Renders the rejection as the same response `ResponseError` would produce
/// if the error were propagated, so the wire contract is unchanged.
fn reject<B: 'static>(
    req: ServiceRequest,
    app_err: AppError,
) -> LocalBoxFuture<'static, Result<ServiceResponse<EitherBody<B>>, Error>> {
    let (request, _) = req.into_parts();
    let response = app_err.error_response().map_into_right_body();
    Box::pin(ready(Ok(ServiceResponse::new(request, response))))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_public_paths() {
        assert!(is_public_path("/health"));
        assert!(is_public_path("/api/token/"));
        assert!(is_public_path("/api/token/refresh/"));
        assert!(is_public_path("/user/"));

        assert!(!is_public_path("/task/"));
        assert!(!is_public_path("/tasks/1/assign/"));
        assert!(!is_public_path("/users/1/tasks/"));
    }
}
