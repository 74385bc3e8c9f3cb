//! Types for loaded secrets.

use std::ops::Deref;
use std::sync::Arc;

use serde::Serialize;

/// A single secret read from disk.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Secret {
    /// Path the content was found at, as walked from the configured root
    pub path: String,
    /// File content decoded as UTF-8 (lossy)
    pub value: String,
}

impl Secret {
    pub fn new(path: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            value: value.into(),
        }
    }
}

/// Immutable set of secrets taken at startup.
///
/// Cloning is cheap; every clone shares the same backing slice.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SecretSnapshot(Arc<[Secret]>);

impl SecretSnapshot {
    pub fn secrets(&self) -> &[Secret] {
        &self.0
    }
}

impl Default for SecretSnapshot {
    fn default() -> Self {
        Self::from(Vec::new())
    }
}

impl From<Vec<Secret>> for SecretSnapshot {
    fn from(secrets: Vec<Secret>) -> Self {
        Self(secrets.into())
    }
}

impl Deref for SecretSnapshot {
    type Target = [Secret];

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

/// Wire shape of the `/secret` response body.
#[derive(Debug, Serialize)]
pub struct SecretsResponse<'a> {
    pub secrets: &'a [Secret],
}
