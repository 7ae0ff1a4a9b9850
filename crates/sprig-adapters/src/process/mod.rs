//! External process adapters (git, git-flow, composer).
//!
//! Both tools are driven through the platform shell; see [`shell`].

mod composer;
mod git;
pub mod shell;

pub use composer::{ComposerInstaller, SUCCESS_MESSAGE};
pub use git::GitCli;
pub use shell::quote;

use std::time::Duration;

/// Default limit for long-running tool invocations.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(3600);
