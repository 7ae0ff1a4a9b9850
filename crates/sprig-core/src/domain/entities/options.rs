//! Typed scaffold options, populated once from the command line.

use crate::domain::value_objects::Channel;

/// What the user asked for.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScaffoldOptions {
    /// Directory name, relative to the working directory.
    pub name: Option<String>,
    pub channel: Channel,
    pub with_git: bool,
    /// Initialise git-flow as well. Implies [`Self::with_git`].
    pub with_gitflow: bool,
    /// Scaffold into an existing directory.
    pub force: bool,
    /// Pass `--ansi` (rather than `--no-ansi`) to composer.
    pub ansi: bool,
    /// Pass `--quiet` to composer.
    pub quiet: bool,
}

impl ScaffoldOptions {
    pub fn new(name: Option<String>) -> Self {
        Self {
            name,
            ansi: true,
            ..Self::default()
        }
    }

    pub fn wants_git(&self) -> bool {
        self.with_git || self.with_gitflow
    }

    pub fn install_options(&self) -> InstallOptions {
        InstallOptions {
            ansi: self.ansi,
            quiet: self.quiet,
        }
    }
}

/// Flags forwarded to the dependency manager.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InstallOptions {
    pub ansi: bool,
    pub quiet: bool,
}

impl Default for InstallOptions {
    fn default() -> Self {
        Self {
            ansi: true,
            quiet: false,
        }
    }
}
