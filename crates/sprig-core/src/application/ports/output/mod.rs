//! Driven (output) ports - implemented by infrastructure.
//!
//! These traits define what the scaffold pipeline needs from external
//! systems. The `sprig-adapters` crate provides implementations; the CLI
//! provides the [`ScaffoldObserver`].

use std::path::Path;

use crate::application::services::Step;
use crate::domain::{Channel, InstallOptions, VcsIdentity};
use crate::error::SprigResult;

/// Port for locating and downloading the template archive.
///
/// Implemented by:
/// - `sprig_adapters::http::GithubFetcher` (production)
#[cfg_attr(test, mockall::automock)]
pub trait ArchiveFetcher: Send + Sync {
    /// Resolve the archive URL for a channel.
    ///
    /// The stable channel consults release metadata; the dev channel uses a
    /// fixed branch archive.
    fn resolve_url(&self, channel: Channel) -> SprigResult<String>;

    /// Stream the body at `url` into `dest`.
    fn download(&self, url: &str, dest: &Path) -> SprigResult<()>;
}

/// Port for unpacking the template archive.
///
/// Implemented by:
/// - `sprig_adapters::archive::ZipExtractor` (production)
#[cfg_attr(test, mockall::automock)]
pub trait ArchiveExtractor: Send + Sync {
    /// Extract `archive` into `dest` and hoist the contents of the single
    /// wrapper folder into `dest` itself.
    ///
    /// Returns the wrapper folder name.
    fn extract(&self, archive: &Path, dest: &Path) -> SprigResult<String>;
}

/// Port for filesystem operations.
///
/// Implemented by:
/// - `sprig_adapters::filesystem::LocalFilesystem` (production)
#[cfg_attr(test, mockall::automock)]
pub trait Filesystem: Send + Sync {
    /// Check if path exists.
    fn exists(&self, path: &Path) -> bool;

    fn read_to_string(&self, path: &Path) -> SprigResult<String>;

    /// Write content to a file, creating parent directories.
    fn write_file(&self, path: &Path, content: &str) -> SprigResult<()>;

    /// Copy a file, overwriting the destination.
    fn copy_file(&self, from: &Path, to: &Path) -> SprigResult<()>;

    /// Remove a file or a directory tree. A missing path is not an error.
    fn remove(&self, path: &Path) -> SprigResult<()>;

    /// Set Unix permission bits, optionally on every descendant too.
    fn set_mode(&self, path: &Path, mode: u32, recursive: bool) -> SprigResult<()>;
}

/// Port for the version-control tool (git and git-flow).
///
/// Implemented by:
/// - `sprig_adapters::process::GitCli` (production)
#[cfg_attr(test, mockall::automock)]
pub trait VersionControl: Send + Sync {
    /// Read the user's configuration (`git config -l`).
    fn read_config(&self) -> SprigResult<VcsIdentity>;

    /// Initialise an empty repository in `dir`.
    ///
    /// Fails with `ToolNotFound` when git is not installed.
    fn init(&self, dir: &Path) -> SprigResult<()>;

    /// Whether the branching-model extension is installed.
    fn flow_available(&self) -> bool;

    /// Initialise the repository and the branching model in `dir`.
    fn flow_init(&self, dir: &Path) -> SprigResult<()>;
}

/// Port for the dependency manager (composer).
///
/// Implemented by:
/// - `sprig_adapters::process::ComposerInstaller` (production)
#[cfg_attr(test, mockall::automock)]
pub trait DependencyInstaller: Send + Sync {
    /// Install dependencies in `dir`, forwarding the tool's output live.
    fn install(&self, dir: &Path, options: InstallOptions) -> SprigResult<()>;
}

/// Port for reporting pipeline progress to the user.
///
/// Non-fatal failures are reported here and the pipeline carries on.
#[cfg_attr(test, mockall::automock)]
pub trait ScaffoldObserver {
    /// A step is about to run.
    fn step_started(&self, step: Step);

    /// Something worth telling the user that is not a problem.
    fn notice(&self, message: &str);

    /// Advice after a non-fatal failure.
    fn warning(&self, message: &str);

    /// A non-fatal failure.
    fn error(&self, message: &str);
}
