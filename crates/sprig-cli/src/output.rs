//! Output management and formatting.

use std::cell::RefCell;
use std::io::{self, IsTerminal};
use std::time::Duration;

use console::Term;
use indicatif::{ProgressBar, ProgressStyle};
use owo_colors::OwoColorize;
use tracing::debug;

use sprig_core::application::{ScaffoldObserver, Step};

use crate::cli::global::GlobalArgs;
use crate::config::AppConfig;

/// Manages CLI output based on configuration.
pub struct OutputManager {
    quiet: bool,
    no_color: bool,
    animate: bool,
    term: Term,
}

impl OutputManager {
    /// Build an `OutputManager` from parsed CLI flags and loaded config.
    pub fn new(args: &GlobalArgs, config: &AppConfig) -> Self {
        Self {
            quiet: args.quiet,
            no_color: args.no_ansi || config.output.no_color,
            animate: !args.quiet && io::stderr().is_terminal(),
            term: Term::stdout(),
        }
    }

    // ── Public write methods ───────────────────────────────────────────────

    /// Generic message; suppressed in quiet mode.
    pub fn print(&self, msg: &str) -> io::Result<()> {
        if self.quiet {
            return Ok(());
        }
        self.term.write_line(msg)
    }

    /// Success indicator: `✓ <msg>`.
    pub fn success(&self, msg: &str) -> io::Result<()> {
        if self.quiet {
            return Ok(());
        }
        let line = if self.no_color {
            format!("\u{2713} {msg}") // ✓
        } else {
            format!("{} {}", "\u{2713}".green().bold(), msg.green())
        };
        self.term.write_line(&line)
    }

    /// Error indicator: `✗ <msg>`.  *Not* suppressed in quiet mode.
    pub fn error(&self, msg: &str) -> io::Result<()> {
        let line = if self.no_color {
            format!("\u{2717} {msg}") // ✗
        } else {
            format!("{} {}", "\u{2717}".red().bold(), msg.red())
        };
        self.term.write_line(&line)
    }

    /// Warning indicator: `⚠ <msg>`.
    pub fn warning(&self, msg: &str) -> io::Result<()> {
        if self.quiet {
            return Ok(());
        }
        let line = if self.no_color {
            format!("\u{26a0} {msg}") // ⚠
        } else {
            format!("{} {}", "\u{26a0}".yellow().bold(), msg.yellow())
        };
        self.term.write_line(&line)
    }

    /// Informational indicator: `ℹ <msg>`.
    pub fn info(&self, msg: &str) -> io::Result<()> {
        if self.quiet {
            return Ok(());
        }
        let line = if self.no_color {
            format!("\u{2139} {msg}") // ℹ
        } else {
            format!("{} {}", "\u{2139}".blue().bold(), msg.blue())
        };
        self.term.write_line(&line)
    }

    /// Bold cyan header line.
    pub fn header(&self, text: &str) -> io::Result<()> {
        if self.quiet {
            return Ok(());
        }
        let line = if self.no_color {
            text.to_owned()
        } else {
            text.cyan().bold().to_string()
        };
        self.term.write_line(&line)
    }

    // ── Accessors ─────────────────────────────────────────────────────────

    /// `true` if ANSI colours are enabled.
    pub fn supports_color(&self) -> bool {
        !self.no_color
    }

    /// `true` if quiet mode suppresses most output.
    pub fn is_quiet(&self) -> bool {
        self.quiet
    }

    /// `true` if spinners may be drawn.
    pub fn animates(&self) -> bool {
        self.animate
    }
}

// ── Pipeline progress ─────────────────────────────────────────────────────────

/// Renders scaffold progress: one line per step, plus a spinner while the
/// network-bound steps run.
pub struct ConsoleObserver<'a> {
    output: &'a OutputManager,
    spinner: RefCell<Option<ProgressBar>>,
}

impl<'a> ConsoleObserver<'a> {
    pub fn new(output: &'a OutputManager) -> Self {
        Self {
            output,
            spinner: RefCell::new(None),
        }
    }

    /// Clear any spinner left running.
    pub fn finish(&self) {
        if let Some(pb) = self.spinner.borrow_mut().take() {
            pb.finish_and_clear();
        }
    }

    fn spinner_for(&self, step: Step) -> Option<ProgressBar> {
        if !self.output.animates() || !matches!(step, Step::Download | Step::Extract) {
            return None;
        }
        let style = ProgressStyle::default_spinner()
            .template("{spinner:.green} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner());
        let pb = ProgressBar::new_spinner();
        pb.set_style(style);
        pb.set_message(step.description());
        pb.enable_steady_tick(Duration::from_millis(100));
        Some(pb)
    }

    /// Write a line without tearing an active spinner.
    fn emit(&self, write: impl FnOnce(&OutputManager) -> io::Result<()>) {
        let result = match self.spinner.borrow().as_ref() {
            Some(pb) => pb.suspend(|| write(self.output)),
            None => write(self.output),
        };
        if let Err(e) = result {
            debug!(error = %e, "Could not write progress line");
        }
    }
}

impl ScaffoldObserver for ConsoleObserver<'_> {
    fn step_started(&self, step: Step) {
        self.finish();
        self.emit(|out| out.print(step.description()));
        *self.spinner.borrow_mut() = self.spinner_for(step);
    }

    fn notice(&self, message: &str) {
        self.emit(|out| out.success(message));
    }

    fn warning(&self, message: &str) {
        self.emit(|out| out.warning(message));
    }

    fn error(&self, message: &str) {
        self.emit(|out| out.error(message));
    }
}

impl Drop for ConsoleObserver<'_> {
    fn drop(&mut self) {
        self.finish();
    }
}

// ── tests ─────────────────────────────────────────────────────────────────────
