pub mod auth;
pub mod middleware;
pub mod tenant;
pub mod tracing;
pub mod users;
