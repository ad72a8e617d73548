//! HTTP API module for the demo, metrics, and docs endpoints.

pub mod handlers;
pub mod routes;
pub mod server;

pub use handlers::{greeting, AppState};
pub use routes::create_router;
pub use server::{bind, serve, serve_with_shutdown};
