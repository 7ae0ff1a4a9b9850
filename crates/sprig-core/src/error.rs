//! Unified error handling for Sprig Core.
//!
//! This module provides a unified error type that wraps domain and application
//! errors, with rich context and user-actionable suggestions.

use thiserror::Error;

use crate::application::ApplicationError;
use crate::domain::DomainError;

/// Root error type for Sprig Core operations.
#[derive(Debug, Error, Clone)]
pub enum SprigError {
    /// Errors from the domain layer (rule violations).
    #[error(transparent)]
    Domain(#[from] DomainError),

    /// Errors from the application layer (orchestration failures).
    #[error(transparent)]
    Application(#[from] ApplicationError),
}

impl SprigError {
    /// Get user-actionable suggestions for fixing this error.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::Domain(e) => e.suggestions(),
            Self::Application(e) => e.suggestions(),
        }
    }

    /// Get error category for display/styling purposes.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::Domain(e) => match e.category() {
                crate::domain::ErrorCategory::Validation => ErrorCategory::Validation,
                crate::domain::ErrorCategory::Internal => ErrorCategory::Internal,
            },
            Self::Application(e) => e.category(),
        }
    }

    /// `true` when a required external tool is missing.
    pub fn is_tool_not_found(&self) -> bool {
        matches!(
            self,
            Self::Application(ApplicationError::ToolNotFound { .. })
        )
    }
}

/// Error categories for UI display.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Validation,
    NotFound,
    /// Network, remote services, and external tools.
    External,
    Internal,
}

/// Convenient result type alias.
pub type SprigResult<T> = Result<T, SprigError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn categories_pass_through() {
        let missing: SprigError = ApplicationError::ToolNotFound { tool: "git" }.into();
        assert_eq!(missing.category(), ErrorCategory::NotFound);
        assert!(missing.is_tool_not_found());

        let unnamed: SprigError = DomainError::UnnamedDirectory { path: "/".into() }.into();
        assert_eq!(unnamed.category(), ErrorCategory::Validation);
        assert!(!unnamed.is_tool_not_found());

        let manifest: SprigError = DomainError::MalformedManifest("eof".into()).into();
        assert_eq!(manifest.category(), ErrorCategory::Internal);
    }

    #[test]
    fn transparent_messages() {
        let err: SprigError = ApplicationError::ToolNotFound { tool: "composer" }.into();
        assert_eq!(err.to_string(), "composer is not installed in your machine");
    }
}
