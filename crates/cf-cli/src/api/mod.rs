//! HTTP API for recording activities and reading summaries.

pub mod dto;
pub mod error;
pub mod routes;
pub mod server;
pub mod state;

pub use error::{ApiError, ApiResult};
pub use routes::create_router;
pub use server::run_server;
pub use state::AppState;
