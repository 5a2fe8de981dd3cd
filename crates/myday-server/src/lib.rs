//! HTTP surface for the task list.
//!
//! - `GET /` liveness probe
//! - `GET /health` store round-trip
//! - `GET|POST /tasks`, `PUT|DELETE /tasks/{id}`

pub mod client;
pub mod dto;
pub mod error;
pub mod routes;
pub mod server;

pub use client::{ClientError, TaskClient};
pub use error::ApiError;
pub use server::{build_router, start, AppState, ServerConfig, ServerHandle};
