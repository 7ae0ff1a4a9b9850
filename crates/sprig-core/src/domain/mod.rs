// ============================================================================
//  CLEAN MODULE BOUNDARIES
// ============================================================================

//! Core domain layer for Sprig.
//!
//! This module contains pure rules with no I/O: where the target lives, how
//! a package is named, what goes into `composer.json`, and which files of a
//! CodeIgniter4 application get tailored. Filesystem, network, and process
//! concerns are handled via ports defined in the application layer.
//!
//! - **No I/O**: no filesystem, network, or external calls
//! - **Immutable values**: domain objects are Clone + PartialEq
//! - **Deterministic**: the same inputs always give the same output
//!
// Public API - what the world sees
pub mod entities;
pub mod error;
pub mod layout;
pub mod naming;
pub mod value_objects;

// Re-exports for convenience
pub use entities::{
    FRAMEWORK_REPOSITORY, InstallOptions, Manifest, ManifestInputs, ScaffoldOptions,
    TargetDirectory, VcsIdentity,
};

pub use error::{DomainError, ErrorCategory};

pub use value_objects::{Channel, PackageName};
