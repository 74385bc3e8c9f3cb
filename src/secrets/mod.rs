//! Secrets discovered on the local filesystem.
//!
//! Secrets are files mounted under a single root directory, typically by a
//! secret-management sidecar:
//!
//! ```text
//! /secrets/
//! ├── api/
//! │   └── key            # -> Secret { path: "/secrets/api/key", .. }
//! └── db_password        # -> Secret { path: "/secrets/db_password", .. }
//! ```
//!
//! The tree is read exactly once, before the HTTP listener starts, into an
//! immutable [`SecretSnapshot`] that is shared with every request handler.
//!
//! ## Usage
//!
//! ```ignore
//! let snapshot = secrets::load(Path::new("/secrets"))?;
//! for secret in snapshot.iter() {
//!     println!("{}", secret.path);
//! }
//! ```

mod loader;
pub mod types;

pub use loader::{load, LoadError};
pub use types::*;
