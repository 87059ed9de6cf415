//! HTTP API module.
//!
//! Exposes the board over JSON (or form-encoded) requests under
//! `/api/threads/:board` and `/api/replies/:board`.

pub mod dto;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod router;
pub mod server;

pub use error::ApiError;
pub use router::create_router;
pub use server::WebServer;
