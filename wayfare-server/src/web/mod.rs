//! Web layer for the trip explorer.
//!
//! Serves the explorer page and a small JSON API over the shared query
//! session.

mod dto;
mod routes;
mod state;
pub mod templates;

pub use dto::*;
pub use routes::{AppError, create_router};
pub use state::AppState;
pub use templates::*;
