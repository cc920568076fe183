//! Conduit API: the RealWorld blog backend as validated routes over axum.

pub mod auth;
pub mod config;
pub mod error;
pub mod extractors;
pub mod handlers;
pub mod models;
pub mod pages;
pub mod response;
pub mod routes;
pub mod state;
pub mod store;
pub mod validation;

pub use auth::{Claims, TokenSigner};
pub use config::AppConfig;
pub use error::{AppError, ConfigError};
pub use routes::{api_routes, app, common_routes};
pub use state::AppState;
pub use store::{connect, ensure_database_exists, ensure_tables};
pub use validation::{Schema, Validated, ValidationErrors};
