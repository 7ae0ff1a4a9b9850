//! Application layer errors.
//!
//! These errors represent failures in orchestration and in the outside world
//! (network, archives, tools). Rule violations are `DomainError` from
//! `crate::domain`.

use std::path::PathBuf;
use thiserror::Error;

use crate::error::ErrorCategory;

/// Errors that occur while running the scaffold pipeline.
#[derive(Debug, Error, Clone)]
pub enum ApplicationError {
    /// Target directory exists and `--force` was not given.
    #[error("Application already exists at {path}")]
    AlreadyExists { path: PathBuf },

    /// Release metadata could not be read or lacked a download URL.
    #[error("Cannot determine the ZIP URL from {url}: {reason}")]
    Metadata { url: String, reason: String },

    /// HTTP request failed.
    #[error("Download failed for {url}: {reason}")]
    Network { url: String, reason: String },

    /// The downloaded archive could not be read.
    #[error("The zip file errored during extraction: {reason}")]
    CorruptArchive { path: PathBuf, reason: String },

    /// Filesystem operation failed.
    #[error("Filesystem error at {path}: {reason}")]
    Filesystem { path: PathBuf, reason: String },

    /// A required external tool is not on `PATH`.
    #[error("{tool} is not installed in your machine")]
    ToolNotFound { tool: &'static str },

    /// An external command ran but did not succeed.
    #[error("Command `{command}` failed: {reason}")]
    CommandFailed { command: String, reason: String },

    /// Dependency installation failed.
    #[error("Dependency installation failed: {reason}")]
    InstallFailed { reason: String },
}

impl ApplicationError {
    /// Get user-actionable suggestions.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::AlreadyExists { path } => vec![
                format!("The directory '{}' already exists", path.display()),
                "Use --force to install into it anyway".into(),
                "Choose a different application name".into(),
            ],
            Self::Metadata { url, .. } => vec![
                format!("Release metadata at {} was unusable", url),
                "GitHub may be rate limiting anonymous requests; try again later".into(),
                "Or install the developer version with --dev".into(),
            ],
            Self::Network { url, .. } => vec![
                format!("Could not reach {}", url),
                "Check your internet connection and proxy settings".into(),
            ],
            Self::CorruptArchive { path, .. } => vec![
                format!("The archive at {} is damaged or incomplete", path.display()),
                "Delete it and run the command again".into(),
            ],
            Self::Filesystem { path, .. } => vec![
                format!("Failed to access: {}", path.display()),
                "Check that you have write permissions".into(),
                "Check available disk space".into(),
            ],
            Self::ToolNotFound { tool } => vec![
                format!("Install {} and make sure it is on your PATH", tool),
                "Or run the command again without the option that needs it".into(),
            ],
            Self::CommandFailed { command, .. } => vec![
                format!("Try running `{}` yourself", command),
                "Check the command output above for details".into(),
            ],
            Self::InstallFailed { .. } => vec![
                "Check the composer output above for details".into(),
                "Fix the problem, then run `composer install` in the application directory"
                    .into(),
            ],
        }
    }

    /// Get error category.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::AlreadyExists { .. } => ErrorCategory::Validation,
            Self::ToolNotFound { .. } => ErrorCategory::NotFound,
            Self::Metadata { .. }
            | Self::Network { .. }
            | Self::CommandFailed { .. }
            | Self::InstallFailed { .. } => ErrorCategory::External,
            Self::CorruptArchive { .. } | Self::Filesystem { .. } => ErrorCategory::Internal,
        }
    }
}
