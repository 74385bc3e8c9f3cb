//! One-shot discovery of secret files under a directory tree.

use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::{debug, info, warn};
use walkdir::{DirEntry, WalkDir};

use super::types::{Secret, SecretSnapshot};

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("Secrets directory {path} cannot be accessed: {source}")]
    RootInaccessible {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Secrets directory {0} is not a directory")]
    NotADirectory(PathBuf),

    #[error("Failed to walk secrets directory {path}: {source}")]
    Walk {
        path: PathBuf,
        #[source]
        source: walkdir::Error,
    },
}

/// Walk `root` recursively and read every file into a snapshot.
///
/// Entries are visited depth-first, sorted by file name within each
/// directory. Directories are not recorded. A file that cannot be read is
/// logged and kept with an empty value; only a failure at the root itself
/// is returned as an error.
pub fn load(root: &Path) -> Result<SecretSnapshot, LoadError> {
    let metadata = std::fs::metadata(root).map_err(|source| LoadError::RootInaccessible {
        path: root.to_path_buf(),
        source,
    })?;
    if !metadata.is_dir() {
        return Err(LoadError::NotADirectory(root.to_path_buf()));
    }

    let mut secrets = Vec::new();
    for entry in WalkDir::new(root).sort_by_file_name() {
        let entry = match entry {
            Ok(entry) => entry,
            Err(err) if err.depth() == 0 => {
                return Err(LoadError::Walk {
                    path: root.to_path_buf(),
                    source: err,
                });
            }
            Err(err) => {
                warn!(
                    path = %err.path().unwrap_or(root).display(),
                    error = %err,
                    "Failed to list directory, skipping it"
                );
                continue;
            }
        };

        if !holds_secret(&entry) {
            continue;
        }
        secrets.push(read_secret(entry.path()));
    }

    info!(
        count = secrets.len(),
        root = %root.display(),
        "Loaded secrets from disk"
    );
    Ok(SecretSnapshot::from(secrets))
}

/// Whether a walked entry should be read as a secret.
fn holds_secret(entry: &DirEntry) -> bool {
    let file_type = entry.file_type();
    if file_type.is_dir() {
        return false;
    }
    // Links are not followed by the walk; one that points at a directory
    // (e.g. the `..data` link of a projected volume) is not a secret.
    if file_type.is_symlink() {
        if let Ok(target) = std::fs::metadata(entry.path()) {
            if target.is_dir() {
                debug!(path = %entry.path().display(), "Skipping symlink to directory");
                return false;
            }
        }
    }
    true
}

fn read_secret(path: &Path) -> Secret {
    let path_str = path.to_string_lossy().into_owned();
    let value = match std::fs::read(path) {
        Ok(bytes) => {
            let value = String::from_utf8_lossy(&bytes).into_owned();
            debug!(
                path = %path_str,
                bytes = bytes.len(),
                secret_value = %value,
                "Read secret from disk"
            );
            value
        }
        Err(e) => {
            warn!(path = %path_str, error = %e, "Failed to read secret file from disk");
            String::new()
        }
    };
    Secret {
        path: path_str,
        value,
    }
}
