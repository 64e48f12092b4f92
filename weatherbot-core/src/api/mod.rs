//! HTTP surface: `POST /chat` and the `GET /` liveness check.

pub mod handlers;
pub mod router;
pub mod state;

pub use router::create_router;
pub use state::{AppState, SharedState};
