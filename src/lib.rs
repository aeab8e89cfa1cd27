#![doc = "The `taskboard` library crate."]
#![doc = ""]
#![doc = "Multi-tenant task tracking: users authenticate with email/password, admins"]
#![doc = "create tasks and assign them to users, and any authenticated user can list"]
#![doc = "the tasks assigned to a user. The binary (`main.rs`) wires these modules"]
#![doc = "into the running application."]

pub mod auth;
pub mod config;
pub mod error;
pub mod models;
pub mod pagination;
pub mod routes;
pub mod store;
