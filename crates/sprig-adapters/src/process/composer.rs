//! Dependency installation with composer.

use std::fs::{File, OpenOptions};
use std::io;
use std::path::{Path, PathBuf};
use std::process::Stdio;
use std::time::Duration;

use sprig_core::{
    application::{ApplicationError, ports::DependencyInstaller},
    domain::InstallOptions,
    error::{SprigError, SprigResult},
};
use tracing::{debug, info, instrument, warn};

use super::shell::{self, ShellError, quote};

/// Printed by the CLI once dependencies are in place.
pub const SUCCESS_MESSAGE: &str = "Application ready! Start building your craft now!";

const PHAR: &str = "composer.phar";

/// Runs `composer install` in the new application.
///
/// A `composer.phar` in the working directory wins over a global
/// `composer`.
#[derive(Debug, Clone)]
pub struct ComposerInstaller {
    cwd: PathBuf,
    timeout: Option<Duration>,
}

impl ComposerInstaller {
    pub fn new(cwd: impl Into<PathBuf>, timeout: Option<Duration>) -> Self {
        Self {
            cwd: cwd.into(),
            timeout,
        }
    }

    /// How composer itself is invoked.
    pub fn composer(&self) -> String {
        let phar = self.cwd.join(PHAR);
        if !phar.is_file() {
            return "composer".into();
        }

        let php = which::which("php").unwrap_or_else(|_| PathBuf::from("php"));
        format!("{} {}", quote(php), quote(phar))
    }

    /// The full install command line.
    pub fn command_line(&self, options: InstallOptions) -> String {
        build_command(&self.composer(), options)
    }
}

/// `<composer> install --ansi|--no-ansi [--quiet]`
pub fn build_command(composer: &str, options: InstallOptions) -> String {
    let mut line = format!(
        "{composer} install {}",
        if options.ansi { "--ansi" } else { "--no-ansi" }
    );
    if options.quiet {
        line.push_str(" --quiet");
    }
    line
}

impl DependencyInstaller for ComposerInstaller {
    #[instrument(skip(self), fields(dir = %dir.display()))]
    fn install(&self, dir: &Path, options: InstallOptions) -> SprigResult<()> {
        let line = self.command_line(options);
        info!(command = %line, "Installing dependencies");

        let result = match open_tty() {
            Some(tty) => {
                debug!("Attached to /dev/tty");
                run_on_tty(&line, dir, &tty, self.timeout)
            }
            None => {
                let merged = format!("{line} 2>&1");
                shell::run_forwarding(&mut shell::shell(&merged, dir), self.timeout, io::stdout())
            }
        };

        result.map_err(install_failed)
    }
}

/// The controlling terminal, when there is one to attach to.
fn open_tty() -> Option<File> {
    if cfg!(windows) {
        return None;
    }
    match OpenOptions::new().read(true).write(true).open("/dev/tty") {
        Ok(tty) => Some(tty),
        Err(e) => {
            warn!(error = %e, "Cannot attach to /dev/tty, output will be piped");
            None
        }
    }
}

fn run_on_tty(
    line: &str,
    dir: &Path,
    tty: &File,
    timeout: Option<Duration>,
) -> Result<(), ShellError> {
    let mut cmd = shell::shell(line, dir);
    cmd.stdin(Stdio::from(tty.try_clone()?))
        .stdout(Stdio::from(tty.try_clone()?))
        .stderr(Stdio::from(tty.try_clone()?));
    shell::run_attached(&mut cmd, timeout)
}

fn install_failed(err: ShellError) -> SprigError {
    ApplicationError::InstallFailed {
        reason: err.to_string(),
    }
    .into()
}
