//! Project root resolution
//!
//! The launcher is installed next to the paper sources it operates on, so
//! the directory to mount into the container is derived from the
//! launcher's own location on disk — not from the current working
//! directory. Invocation through a symlink (the common packaging pattern)
//! must resolve to where the real file lives.

use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use thiserror::Error;

/// Failure to determine the project root.
#[derive(Debug, Error)]
pub enum ResolutionError {
    /// The path of the running executable could not be determined.
    #[error("could not determine the launcher's own path: {0}")]
    ExePath(#[source] std::io::Error),

    /// The working directory needed to absolutize a relative path is gone.
    #[error("could not determine the working directory: {0}")]
    WorkingDir(#[source] std::io::Error),

    /// Canonicalization failed: missing file, dangling symlink, or a
    /// symlink cycle (reported by the OS as ELOOP).
    #[error("could not resolve launcher path {path:?}: {source}")]
    Canonicalize {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The resolved launcher file has no parent directory.
    #[error("resolved launcher path {0:?} has no parent directory")]
    NoParent(PathBuf),

    /// The parent of the resolved launcher file is not a directory.
    #[error("project root {0:?} is not a directory")]
    NotADirectory(PathBuf),
}

/// Resolve the project root from the running executable's location.
///
/// Follows every layer of symlink indirection, so the root is computed
/// relative to the real file, not the symlink used to invoke it.
pub fn resolve() -> Result<PathBuf, ResolutionError> {
    let exe = env::current_exe().map_err(ResolutionError::ExePath)?;
    project_root_of(&exe)
}

/// Compute the project root for an arbitrary launcher path.
///
/// Split out from [`resolve`] so it can be exercised against synthetic
/// symlink trees.
pub fn project_root_of(path: &Path) -> Result<PathBuf, ResolutionError> {
    let absolute = if path.is_absolute() {
        path.to_path_buf()
    } else {
        env::current_dir()
            .map_err(ResolutionError::WorkingDir)?
            .join(path)
    };

    let real = fs::canonicalize(&absolute).map_err(|source| ResolutionError::Canonicalize {
        path: absolute.clone(),
        source,
    })?;

    let root = real
        .parent()
        .ok_or_else(|| ResolutionError::NoParent(real.clone()))?
        .to_path_buf();

    if !root.is_dir() {
        return Err(ResolutionError::NotADirectory(root));
    }

    Ok(root)
}
