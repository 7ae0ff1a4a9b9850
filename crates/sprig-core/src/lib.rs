//! Sprig Core - Hexagonal Architecture Implementation
//!
//! This crate provides the domain and application layers for the Sprig
//! CodeIgniter4 application installer, following hexagonal (ports and
//! adapters) architecture.
//!
//! ## Architecture Overview
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │            sprig-cli (CLI)              │
//! │   (Drives the service, observes it)     │
//! └──────────────────┬──────────────────────┘
//!                    │ calls
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │         Application Services            │
//! │    (ScaffoldService + step pipeline)    │
//! └──────────────────┬──────────────────────┘
//!                    │ uses
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │       Application Ports (Traits)        │
//! │  (Fetcher, Extractor, Filesystem, Vcs,  │
//! │        Installer, Observer)             │
//! └──────────────────┬──────────────────────┘
//!                    │ implemented by
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │     sprig-adapters (Infrastructure)     │
//! │ (GithubFetcher, ZipExtractor, GitCli..) │
//! └─────────────────────────────────────────┘
//!                    │
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │        Domain Layer (Pure Logic)        │
//! │ (TargetDirectory, Manifest, naming)     │
//! │        No External Dependencies         │
//! └─────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//!
//! ```rust,ignore
//! use sprig_core::prelude::*;
//!
//! // Adapters come from sprig-adapters.
//! let service = ScaffoldService::new(fetcher, extractor, filesystem, vcs, installer);
//! let report = service.scaffold(
//!     ScaffoldRequest {
//!         options: ScaffoldOptions::new(Some("blog".into())),
//!         cwd: std::env::current_dir()?,
//!         os_user: None,
//!     },
//!     &observer,
//! )?;
//! ```

pub mod domain;

pub mod application;

pub mod error;

// Public API - what external crates should use
pub mod prelude {
    pub use crate::application::{
        ScaffoldReport, ScaffoldRequest, ScaffoldService, Step,
        ports::{
            ArchiveExtractor, ArchiveFetcher, DependencyInstaller, Filesystem, ScaffoldObserver,
            VersionControl,
        },
    };
    pub use crate::domain::{
        Channel, InstallOptions, Manifest, PackageName, ScaffoldOptions, TargetDirectory,
        VcsIdentity,
    };
    pub use crate::error::{SprigError, SprigResult};
}

// Version info
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
