//! Request extractors: validated input and the authenticated user.

pub mod auth;
pub mod validated;

pub use auth::{auth_token, CurrentUser};
pub use validated::{ValidatedJson, ValidatedPath, ValidatedQuery};
