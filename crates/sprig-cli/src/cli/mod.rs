//! CLI argument definitions using the clap derive API.
//!
//! This module is the *only* place that knows about argument names, aliases,
//! help text, and value enums.  No business logic lives here.

use clap::{Args, Parser, Subcommand, ValueEnum};

pub mod global;
pub use global::GlobalArgs;

// ── Top-level CLI ─────────────────────────────────────────────────────────────

/// Main CLI entry-point.
#[derive(Debug, Parser)]
#[command(
    name    = "sprig",
    bin_name = "sprig",
    version  = env!("CARGO_PKG_VERSION"),
    author   = env!("CARGO_PKG_AUTHORS"),
    about    = "Create a new CodeIgniter4 application",
    long_about = "Sprig downloads the CodeIgniter4 application starter, tailors it \
                  to your machine, and installs its dependencies with composer.",
    after_help = "EXAMPLES:\n\
        \x20 sprig new blog\n\
        \x20 sprig new blog --dev --with-gitflow\n\
        \x20 sprig new . --force\n\
        \x20 sprig completions bash > /usr/share/bash-completion/completions/sprig",
    arg_required_else_help = true,
    subcommand_required    = true,
)]
pub struct Cli {
    /// Flags available on every subcommand.
    #[command(flatten)]
    pub global: GlobalArgs,

    /// Subcommand to execute.
    #[command(subcommand)]
    pub command: Commands,
}

// ── Subcommands ───────────────────────────────────────────────────────────────

/// All available subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Create a new CodeIgniter4 application.
    #[command(
        visible_alias = "n",
        about = "Create a new CodeIgniter4 application",
        after_help = "EXAMPLES:\n\
            \x20 sprig new my-app                # ./my-app from the latest release\n\
            \x20 sprig new my-app --dev          # framework from the develop branch\n\
            \x20 sprig new my-app --with-git     # also run git init\n\
            \x20 sprig new                       # into the current directory"
    )]
    New(NewArgs),

    /// Initialise a Sprig configuration file.
    #[command(
        about = "Initialise configuration",
        after_help = "EXAMPLES:\n\
            \x20 sprig init           # default location\n\
            \x20 sprig init --force   # overwrite an existing file"
    )]
    Init(InitArgs),

    /// Generate shell completion scripts.
    #[command(
        about = "Generate shell completions",
        after_help = "EXAMPLES:\n\
            \x20 sprig completions bash > ~/.local/share/bash-completion/completions/sprig\n\
            \x20 sprig completions zsh  > ~/.zfunc/_sprig\n\
            \x20 sprig completions fish > ~/.config/fish/completions/sprig.fish"
    )]
    Completions(CompletionsArgs),

    /// Inspect the Sprig configuration.
    #[command(
        about = "Configuration management",
        subcommand,
        after_help = "EXAMPLES:\n\
            \x20 sprig config get process.timeout_secs\n\
            \x20 sprig config list\n\
            \x20 sprig config path"
    )]
    Config(ConfigCommands),
}

// ── new ───────────────────────────────────────────────────────────────────────

/// Arguments for `sprig new`.
#[derive(Debug, Args)]
pub struct NewArgs {
    /// Application directory.  A plain name creates `./name`; omit it (or
    /// pass `.`) to install into the current directory.
    #[arg(value_name = "NAME", help = "Application directory name")]
    pub name: Option<String>,

    /// Use the framework's development branch instead of the latest release.
    #[arg(long = "dev", help = "Install the developer version of the framework")]
    pub dev: bool,

    /// Run `git init` in the new application.
    #[arg(long = "with-git", help = "Initialize an empty Git repository")]
    pub with_git: bool,

    /// Set up git-flow (implies `--with-git`).
    #[arg(
        long = "with-gitflow",
        help = "Initialize Git Flow (implies --with-git)"
    )]
    pub with_gitflow: bool,

    /// Install even if the directory already exists.
    #[arg(
        short = 'f',
        long = "force",
        help = "Force install even if the directory already exists"
    )]
    pub force: bool,
}

// ── init ──────────────────────────────────────────────────────────────────────

/// Arguments for `sprig init`.
#[derive(Debug, Args)]
pub struct InitArgs {
    /// Overwrite an existing config file.
    #[arg(short = 'f', long = "force", help = "Overwrite existing configuration")]
    pub force: bool,
}

// ── completions ───────────────────────────────────────────────────────────────

/// Arguments for `sprig completions`.
#[derive(Debug, Args)]
pub struct CompletionsArgs {
    /// Target shell.
    #[arg(value_enum, help = "Shell to generate completions for")]
    pub shell: Shell,
}

/// Supported shells for completion generation.
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum Shell {
    Bash,
    Zsh,
    Fish,
    PowerShell,
    Elvish,
}

// ── config subcommands ────────────────────────────────────────────────────────

/// Subcommands for `sprig config`.
#[derive(Debug, Subcommand)]
pub enum ConfigCommands {
    /// Print the value of a configuration key.
    Get {
        /// Dotted key path, e.g. `sources.dev_archive`.
        key: String,
    },
    /// Print all configuration values.
    List,
    /// Print the path to the active configuration file.
    Path,
}

// ── tests ─────────────────────────────────────────────────────────────────────
