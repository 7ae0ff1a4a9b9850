//! Target directory resolution.
//!
//! The target is where the application ends up. A plain name places it
//! under the working directory; no name (or `.`) scaffolds into the working
//! directory itself.

use std::path::{Path, PathBuf};

use crate::domain::error::DomainError;

/// The resolved destination of a scaffold run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TargetDirectory {
    path: PathBuf,
    cwd: PathBuf,
}

impl TargetDirectory {
    /// Resolve `name` against `cwd`.
    ///
    /// `Some(".")` and `None` both resolve to `cwd`.
    pub fn resolve(name: Option<&str>, cwd: impl Into<PathBuf>) -> Self {
        let cwd = cwd.into();
        let path = match name {
            Some(name) if !name.is_empty() && name != "." => cwd.join(name),
            _ => cwd.clone(),
        };
        Self { path, cwd }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn cwd(&self) -> &Path {
        &self.cwd
    }

    /// `true` when scaffolding into the working directory itself.
    pub fn is_cwd(&self) -> bool {
        self.path == self.cwd
    }

    /// Whether an existing directory at this location blocks the run.
    ///
    /// The working directory never conflicts; anything else that already
    /// exists does unless `force` is set.
    pub fn conflicts(&self, exists: bool, force: bool) -> bool {
        exists && !self.is_cwd() && !force
    }

    /// The last path component, used to derive the package slug.
    pub fn base_name(&self) -> Result<&str, DomainError> {
        self.path
            .file_name()
            .and_then(|n| n.to_str())
            .filter(|n| !n.is_empty())
            .ok_or_else(|| DomainError::UnnamedDirectory {
                path: self.path.clone(),
            })
    }

    /// Join a path relative to the target root.
    pub fn join(&self, relative: impl AsRef<Path>) -> PathBuf {
        self.path.join(relative)
    }
}
