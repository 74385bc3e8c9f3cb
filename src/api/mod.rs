//! HTTP API for secret-relay.
//!
//! ## Endpoints
//!
//! - `ANY /secret` - List every secret loaded at startup as
//!   `{"secrets": [{"path": ..., "value": ...}]}`

mod routes;
mod secrets;

pub use routes::{router, serve, AppState};
