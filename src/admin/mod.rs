//! Admin Module
//!
//! Read-only store summary for users with the admin role.

pub mod handlers;
pub mod models;

pub use handlers::routes;
pub use models::AdminOverview;
