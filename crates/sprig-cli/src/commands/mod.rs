//! Subcommand handlers.  Each takes parsed arguments and returns a
//! [`CliResult`](crate::error::CliResult).

pub mod completions;
pub mod config;
pub mod init;
pub mod new;
