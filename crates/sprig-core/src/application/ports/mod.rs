//! Application ports (traits) for external dependencies.
//!
//! Ports define the interfaces the pipeline needs from the outside world.
//! Adapters in `sprig-adapters` implement the driven ones; the CLI
//! implements the observer.
//!
//! ## Port Types
//!
//! - **Driven (Output) Ports**: called by the pipeline, implemented by infrastructure
//!   - `ArchiveFetcher`: release metadata + archive download
//!   - `ArchiveExtractor`: zip extraction
//!   - `Filesystem`: file operations
//!   - `VersionControl`: git and git-flow
//!   - `DependencyInstaller`: composer
//!   - `ScaffoldObserver`: progress and non-fatal failures

pub mod output;

pub use output::{
    ArchiveExtractor, ArchiveFetcher, DependencyInstaller, Filesystem, ScaffoldObserver,
    VersionControl,
};

#[cfg(test)]
pub use output::{
    MockArchiveExtractor, MockArchiveFetcher, MockDependencyInstaller, MockFilesystem,
    MockScaffoldObserver, MockVersionControl,
};
