// ============================================================================
// domain/error.rs - DOMAIN RULE VIOLATIONS
// ============================================================================

use std::path::PathBuf;
use thiserror::Error;

/// Root domain error type.
///
/// All errors are:
/// - Cloneable (passed through observers and reports)
/// - Categorizable (for CLI display)
/// - Actionable (provides suggestions)
#[derive(Debug, Error, Clone, PartialEq)]
pub enum DomainError {
    // ========================================================================
    // Validation Errors
    // ========================================================================
    #[error("Cannot derive a package name from {path}")]
    UnnamedDirectory { path: PathBuf },

    // ========================================================================
    // Manifest Template Errors
    // ========================================================================
    #[error("Manifest template is not valid JSON: {0}")]
    MalformedManifest(String),

    #[error("Manifest template field '{field}' must be {expected}")]
    UnexpectedManifestShape {
        field: &'static str,
        expected: &'static str,
    },
}

impl DomainError {
    /// Get user-actionable suggestions for fixing this error.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::UnnamedDirectory { path } => vec![
                format!("'{}' has no usable directory name", path.display()),
                "Pass an explicit application name: sprig new my-app".into(),
            ],
            Self::MalformedManifest(_) | Self::UnexpectedManifestShape { .. } => vec![
                "The bundled composer.json template is corrupted".into(),
                "This is a bug in Sprig, please report it".into(),
            ],
        }
    }

    /// Error category for CLI display styling.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::UnnamedDirectory { .. } => ErrorCategory::Validation,
            Self::MalformedManifest(_) | Self::UnexpectedManifestShape { .. } => {
                ErrorCategory::Internal
            }
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Validation,
    Internal,
}
