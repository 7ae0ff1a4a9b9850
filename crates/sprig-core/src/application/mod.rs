//! Application layer for Sprig.
//!
//! This layer contains:
//! - **Services**: Use case orchestration (ScaffoldService)
//! - **Ports**: Interface definitions (traits) for external dependencies
//! - **Assets**: Files bundled into the binary
//! - **Errors**: Application-specific error types
//!
//! The application layer coordinates the domain layer but contains no
//! business logic itself. All business rules live in `crate::domain`.

pub mod assets;
pub mod error;
pub mod ports;
pub mod services;

// Re-export main services
pub use services::{ScaffoldReport, ScaffoldRequest, ScaffoldService, Step};

// Re-export port traits (for adapter implementation)
pub use ports::{
    ArchiveExtractor, ArchiveFetcher, DependencyInstaller, Filesystem, ScaffoldObserver,
    VersionControl,
};

pub use error::ApplicationError;
