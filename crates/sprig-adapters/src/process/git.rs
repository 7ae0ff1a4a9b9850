//! Git and git-flow through the user's installed binaries.

use std::path::{Path, PathBuf};
use std::process::Command;
use std::time::Duration;

use sprig_core::{
    application::{ApplicationError, ports::VersionControl},
    domain::VcsIdentity,
    error::{SprigError, SprigResult},
};
use tracing::{debug, instrument};

use super::shell::{self, ShellError, quote};

/// `git config -l` should be instant; anything slower is stuck.
const CONFIG_TIMEOUT: Duration = Duration::from_secs(30);

/// [`VersionControl`] backed by `git` and `git-flow` on `PATH`.
#[derive(Debug, Clone)]
pub struct GitCli {
    timeout: Option<Duration>,
}

impl GitCli {
    /// `timeout` bounds the git-flow setup.
    pub fn new(timeout: Option<Duration>) -> Self {
        Self { timeout }
    }

    fn binary(&self) -> SprigResult<PathBuf> {
        which::which("git").map_err(|_| ApplicationError::ToolNotFound { tool: "git" }.into())
    }

    /// The shell line that sets up the branching model.
    pub fn flow_command(git: &Path) -> String {
        let git = quote(git);
        format!("{git} init && {git} flow init -d -f --local")
    }
}

impl Default for GitCli {
    fn default() -> Self {
        Self::new(Some(super::DEFAULT_TIMEOUT))
    }
}

impl VersionControl for GitCli {
    #[instrument(skip(self))]
    fn read_config(&self) -> SprigResult<VcsIdentity> {
        let git = self.binary()?;
        let output = shell::run_captured(
            Command::new(&git).args(["config", "-l"]),
            Some(CONFIG_TIMEOUT),
        )
        .map_err(|e| command_failed("git config -l", e))?;

        Ok(VcsIdentity::parse(&String::from_utf8_lossy(&output.stdout)))
    }

    #[instrument(skip(self), fields(dir = %dir.display()))]
    fn init(&self, dir: &Path) -> SprigResult<()> {
        let line = format!("{} init", quote(self.binary()?));
        shell::run_captured(&mut shell::shell(&line, dir), None)
            .map(|output| debug!(stdout = %String::from_utf8_lossy(&output.stdout).trim(), "git init"))
            .map_err(|e| command_failed(&line, e))
    }

    fn flow_available(&self) -> bool {
        which::which("git-flow").is_ok()
    }

    #[instrument(skip(self), fields(dir = %dir.display()))]
    fn flow_init(&self, dir: &Path) -> SprigResult<()> {
        let line = Self::flow_command(&self.binary()?);
        shell::run_captured(&mut shell::shell(&line, dir), self.timeout)
            .map(|_| ())
            .map_err(|e| command_failed(&line, e))
    }
}

fn command_failed(command: &str, err: ShellError) -> SprigError {
    ApplicationError::CommandFailed {
        command: command.to_owned(),
        reason: err.to_string(),
    }
    .into()
}
