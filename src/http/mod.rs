//! Axum-based HTTP server for the dispatch desk.
//!
//! Feature-gated behind `http-server`. The surface mirrors the desk's
//! workflow: reference-data maintenance, the per-date board with derived
//! state, leg validation previews, template drafts and the program export.

pub mod dto;
pub mod error;
pub mod handlers;
pub mod router;
pub mod state;

pub use error::{ApiError, AppError};
pub use router::create_router;
pub use state::AppState;
