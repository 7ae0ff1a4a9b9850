//! Implementation of the `sprig new` command.
//!
//! Responsibility: translate CLI arguments into `ScaffoldOptions`, wire the
//! adapters into the core scaffold service, and display results. No business
//! logic lives here.

use std::path::Path;

use tracing::{debug, info, instrument};

use sprig_adapters::{
    ComposerInstaller, GitCli, GithubFetcher, LocalFilesystem, ZipExtractor,
    process::SUCCESS_MESSAGE, system,
};
use sprig_core::{
    application::{ScaffoldRequest, ScaffoldService},
    domain::{Channel, ScaffoldOptions},
};

use crate::{
    cli::{NewArgs, global::GlobalArgs},
    config::AppConfig,
    error::{CliResult, IntoCli},
    output::{ConsoleObserver, OutputManager},
};

/// Execute the `sprig new` command.
///
/// Dispatch sequence:
/// 1. Resolve options from flags and config
/// 2. Build the service from production adapters
/// 3. Run the pipeline, reporting progress as it goes
/// 4. Print next-steps guidance
#[instrument(skip_all, fields(name = args.name.as_deref().unwrap_or(".")))]
pub fn execute(
    args: NewArgs,
    global: GlobalArgs,
    config: AppConfig,
    output: OutputManager,
) -> CliResult<()> {
    let cwd = std::env::current_dir().with_cli_context(|| "Cannot read the current directory")?;

    // 1. Options
    let options = build_options(args, &global, &config);
    debug!(?options, "Options resolved");

    // 2. Adapters
    let timeout = config.process_timeout();
    let service = ScaffoldService::new(
        Box::new(GithubFetcher::new(
            &config.sources.releases_api,
            &config.sources.dev_archive,
        )),
        Box::new(ZipExtractor::new()),
        Box::new(LocalFilesystem::new()),
        Box::new(GitCli::new(timeout)),
        Box::new(ComposerInstaller::new(&cwd, timeout)),
    );

    output.header(match options.channel {
        Channel::Stable => "Creating a new CodeIgniter4 application",
        Channel::Dev => "Creating a new CodeIgniter4 application (developer version)",
    })?;

    // 3. Pipeline
    let observer = ConsoleObserver::new(&output);
    let result = service.scaffold(
        ScaffoldRequest {
            options,
            cwd: cwd.clone(),
            os_user: system::current_user(),
        },
        &observer,
    );
    observer.finish();
    let report = result?;

    info!(
        directory = %report.directory.display(),
        package = report.package.as_ref().map(|p| p.as_str()).unwrap_or("-"),
        "Application created"
    );

    // 4. Success + next steps
    output.success(SUCCESS_MESSAGE)?;
    print_next_steps(&report.directory, &cwd, &output)?;

    Ok(())
}

/// Flags win; config only contributes the colour default.
fn build_options(args: NewArgs, global: &GlobalArgs, config: &AppConfig) -> ScaffoldOptions {
    ScaffoldOptions {
        name: args.name,
        channel: if args.dev {
            Channel::Dev
        } else {
            Channel::Stable
        },
        with_git: args.with_git,
        with_gitflow: args.with_gitflow,
        force: args.force,
        ansi: !(global.no_ansi || config.output.no_color),
        quiet: global.quiet,
    }
}

fn print_next_steps(directory: &Path, cwd: &Path, output: &OutputManager) -> CliResult<()> {
    output.print("")?;
    output.print("Next steps:")?;
    if directory != cwd {
        let shown = directory.strip_prefix(cwd).unwrap_or(directory);
        output.print(&format!("  cd {}", shown.display()))?;
    }
    output.print("  php spark serve")?;
    Ok(())
}
