//! DevOps CI/CD demo HTTP service.
//!
//! Serves three plain-text endpoints used to exercise a build and deploy
//! pipeline:
//!
//! ```text
//! GET /health              -> OK
//! GET /hello?name=Alice    -> Hello, Alice! Welcome to DevOps CI/CD Demo.
//! GET /version             -> 1.0.0
//! ```
//!
//! # Modules
//!
//! - [`config`]: Configuration loading from environment
//! - [`error`]: Unified error types
//! - [`api`]: Handlers, router and server lifecycle
//! - [`metrics`]: Prometheus request metrics
//! - [`utils`]: Utility functions

pub mod api;
pub mod config;
pub mod error;
pub mod metrics;
pub mod utils;

pub use config::Config;
pub use error::{Result, ServiceError};
