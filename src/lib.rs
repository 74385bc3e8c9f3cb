//! # secret-relay
//!
//! Serves secrets mounted on the local filesystem to other local processes.
//!
//! ## Startup Flow
//! 1. Read `HTTP_PORT` and `SECRETS_DIR` from the environment
//! 2. Walk `SECRETS_DIR` once and read every file into an immutable snapshot
//! 3. Bind the HTTP listener and serve the snapshot at `/secret`
//!
//! The walk always completes before the listener binds, so handlers only ever
//! see the finished snapshot.
//!
//! ## Modules
//! - `config`: Environment configuration
//! - `secrets`: Secret discovery and the snapshot type
//! - `api`: HTTP routes and server lifecycle

pub mod api;
pub mod config;
pub mod secrets;

pub use config::Config;
pub use secrets::{Secret, SecretSnapshot};
