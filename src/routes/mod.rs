pub mod auth;
pub mod health;
pub mod tasks;
pub mod users;

use actix_web::web;

/// Registers every API route. Paths keep their trailing slashes; the wire
/// contract is inherited from the upstream API and clients match it exactly.
pub fn config(cfg: &mut web::ServiceConfig) {
    cfg.service(auth::obtain_token_pair)
        .service(auth::refresh_token)
        .service(users::create_user)
        .service(tasks::create_task)
        .service(tasks::assign_users)
        .service(tasks::list_user_tasks);
}
