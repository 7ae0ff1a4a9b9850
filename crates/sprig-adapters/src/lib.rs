//! Infrastructure adapters for Sprig.
//!
//! This crate implements the ports defined in `sprig-core::application::ports`.
//! It contains all external dependencies and I/O operations: HTTP, zip
//! archives, the local filesystem, and the git and composer processes.

pub mod archive;
pub mod filesystem;
pub mod http;
pub mod process;
pub mod system;

// Re-export commonly used adapters
pub use archive::ZipExtractor;
pub use filesystem::LocalFilesystem;
pub use http::GithubFetcher;
pub use process::{ComposerInstaller, GitCli};
