/// Blog Service Library
///
/// Server-rendered blog: posts with tags, comments and likes, listed by
/// popularity and recency.
///
/// # Modules
///
/// - `config`: environment driven configuration
/// - `db`: repository trait, post listing queries and PostgreSQL implementation
/// - `services`: page context assembly and serialization
/// - `templates`: HTML rendering
/// - `handlers`: HTTP endpoints
/// - `admin`: admin registrations and validated writes
pub mod admin;
pub mod config;
pub mod db;
pub mod error;
pub mod handlers;
pub mod models;
pub mod services;
pub mod templates;

pub use config::Config;
pub use error::{AppError, Result};
