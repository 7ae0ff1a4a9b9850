//! Scaffold Service - main application orchestrator.
//!
//! A run is an explicit, ordered list of steps ([`PIPELINE`]). Each step is
//! a plain function over the [`ScaffoldContext`]; the service runs them in a
//! loop and stops at the first fatal error. Steps report non-fatal failures
//! to the [`ScaffoldObserver`] and return `Ok`.

use std::fmt;
use std::path::{Path, PathBuf};

use tracing::{debug, info, instrument, warn};
use uuid::Uuid;

use crate::{
    application::{
        ApplicationError,
        assets::{BUNDLED_FILES, MANIFEST_TEMPLATE},
        ports::{
            ArchiveExtractor, ArchiveFetcher, DependencyInstaller, Filesystem, ScaffoldObserver,
            VersionControl,
        },
    },
    domain::{
        Manifest, ManifestInputs, PackageName, ScaffoldOptions, TargetDirectory, VcsIdentity,
        layout, naming,
    },
    error::SprigResult,
};

/// Prefix of the temporary archive written to the working directory.
pub const ARCHIVE_PREFIX: &str = "codeigniter4_";

/// Everything a run needs besides the adapters.
#[derive(Debug, Clone)]
pub struct ScaffoldRequest {
    pub options: ScaffoldOptions,
    /// Working directory the target and the temporary archive resolve against.
    pub cwd: PathBuf,
    /// OS account name, used when git has no `github.user`.
    pub os_user: Option<String>,
}

/// State threaded through every step of one run.
#[derive(Debug, Clone)]
pub struct ScaffoldContext {
    pub options: ScaffoldOptions,
    pub target: TargetDirectory,
    pub archive: PathBuf,
    pub identity: VcsIdentity,
    pub os_user: Option<String>,
    /// Set once the manifest has been written.
    pub package: Option<PackageName>,
}

/// Outcome of a successful run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScaffoldReport {
    pub directory: PathBuf,
    pub package: Option<PackageName>,
}

/// One stage of the pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Step {
    CheckTarget,
    Download,
    Extract,
    RemoveExtraneous,
    CreateFiles,
    PrepareWritable,
    ConfigureSystemPath,
    CreateEnvFile,
    CleanUp,
    WriteManifest,
    InitGit,
    InitGitFlow,
    Install,
}

impl Step {
    /// Progress line shown when the step starts.
    pub const fn description(&self) -> &'static str {
        match self {
            Self::CheckTarget => "Checking the application directory...",
            Self::Download => "Downloading the zip file...",
            Self::Extract => "Extracting zip file...",
            Self::RemoveExtraneous => "Removing extraneous files and directories...",
            Self::CreateFiles => "Creating additional directories and files...",
            Self::PrepareWritable => "Preparing permissions on \"writable\" directory...",
            Self::ConfigureSystemPath => "Configuring the system path...",
            Self::CreateEnvFile => "Creating the .env file...",
            Self::CleanUp => "Cleaning up the zip file...",
            Self::WriteManifest => "Preparing composer.json...",
            Self::InitGit => "Initializing empty Git repository...",
            Self::InitGitFlow => "Initializing Git Flow...",
            Self::Install => "Installing dependencies...",
        }
    }

    /// Whether the step runs for these options.
    pub fn applies(&self, options: &ScaffoldOptions) -> bool {
        match self {
            Self::InitGit => options.wants_git(),
            Self::InitGitFlow => options.with_gitflow,
            _ => true,
        }
    }
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.description())
    }
}

type StepFn = fn(&ScaffoldService, &mut ScaffoldContext, &dyn ScaffoldObserver) -> SprigResult<()>;

/// The pipeline, in execution order.
pub const PIPELINE: &[(Step, StepFn)] = &[
    (Step::CheckTarget, ScaffoldService::check_target),
    (Step::Download, ScaffoldService::download),
    (Step::Extract, ScaffoldService::extract),
    (Step::RemoveExtraneous, ScaffoldService::remove_extraneous),
    (Step::CreateFiles, ScaffoldService::create_files),
    (Step::PrepareWritable, ScaffoldService::prepare_writable),
    (Step::ConfigureSystemPath, ScaffoldService::configure_system_path),
    (Step::CreateEnvFile, ScaffoldService::create_env_file),
    (Step::CleanUp, ScaffoldService::clean_up),
    (Step::WriteManifest, ScaffoldService::write_manifest),
    (Step::InitGit, ScaffoldService::init_git),
    (Step::InitGitFlow, ScaffoldService::init_gitflow),
    (Step::Install, ScaffoldService::install),
];

/// Main scaffolding service.
pub struct ScaffoldService {
    fetcher: Box<dyn ArchiveFetcher>,
    extractor: Box<dyn ArchiveExtractor>,
    filesystem: Box<dyn Filesystem>,
    vcs: Box<dyn VersionControl>,
    installer: Box<dyn DependencyInstaller>,
}

impl ScaffoldService {
    /// Create a new scaffold service with the given adapters.
    pub fn new(
        fetcher: Box<dyn ArchiveFetcher>,
        extractor: Box<dyn ArchiveExtractor>,
        filesystem: Box<dyn Filesystem>,
        vcs: Box<dyn VersionControl>,
        installer: Box<dyn DependencyInstaller>,
    ) -> Self {
        Self {
            fetcher,
            extractor,
            filesystem,
            vcs,
            installer,
        }
    }

    /// Scaffold a new application.
    ///
    /// The git identity is read once, up front, and carried in the context.
    #[instrument(
        skip_all,
        fields(
            name = request.options.name.as_deref().unwrap_or("."),
            channel = %request.options.channel,
        )
    )]
    pub fn scaffold(
        &self,
        request: ScaffoldRequest,
        observer: &dyn ScaffoldObserver,
    ) -> SprigResult<ScaffoldReport> {
        let mut ctx = self.prepare(request);
        info!(
            directory = %ctx.target.path().display(),
            archive = %ctx.archive.display(),
            "Scaffold started"
        );

        for (step, run) in PIPELINE {
            if !step.applies(&ctx.options) {
                debug!(?step, "Step skipped");
                continue;
            }

            observer.step_started(*step);
            debug!(?step, "Step started");

            if let Err(e) = run(self, &mut ctx, observer) {
                warn!(?step, error = %e, "Step failed");
                self.discard_archive(&ctx.archive);
                return Err(e);
            }
        }

        info!("Scaffold completed successfully");
        Ok(ScaffoldReport {
            directory: ctx.target.path().to_path_buf(),
            package: ctx.package,
        })
    }

    /// Build the context for a run.
    pub fn prepare(&self, request: ScaffoldRequest) -> ScaffoldContext {
        let target = TargetDirectory::resolve(request.options.name.as_deref(), &request.cwd);
        let archive = request.cwd.join(archive_file_name());

        ScaffoldContext {
            identity: self.read_identity(),
            options: request.options,
            target,
            archive,
            os_user: request.os_user,
            package: None,
        }
    }

    fn read_identity(&self) -> VcsIdentity {
        match self.vcs.read_config() {
            Ok(identity) => {
                debug!(entries = identity.len(), "Git configuration read");
                identity
            }
            Err(e) => {
                debug!(error = %e, "Git configuration unavailable, continuing without identity");
                VcsIdentity::new()
            }
        }
    }

    // -------------------------------------------------------------------------
    // Steps
    // -------------------------------------------------------------------------

    fn check_target(
        &self,
        ctx: &mut ScaffoldContext,
        _observer: &dyn ScaffoldObserver,
    ) -> SprigResult<()> {
        let exists = self.filesystem.exists(ctx.target.path());
        if ctx.target.conflicts(exists, ctx.options.force) {
            return Err(ApplicationError::AlreadyExists {
                path: ctx.target.path().to_path_buf(),
            }
            .into());
        }
        Ok(())
    }

    fn download(
        &self,
        ctx: &mut ScaffoldContext,
        _observer: &dyn ScaffoldObserver,
    ) -> SprigResult<()> {
        let url = self.fetcher.resolve_url(ctx.options.channel)?;
        info!(%url, "Archive URL resolved");
        self.fetcher.download(&url, &ctx.archive)
    }

    fn extract(&self, ctx: &mut ScaffoldContext, observer: &dyn ScaffoldObserver) -> SprigResult<()> {
        let wrapper = self.extractor.extract(&ctx.archive, ctx.target.path())?;
        debug!(%wrapper, "Archive extracted");

        if ctx.options.channel.is_dev() {
            self.remove_all(ctx, layout::DEV_ONLY_PATHS, observer);
        }
        Ok(())
    }

    fn remove_extraneous(
        &self,
        ctx: &mut ScaffoldContext,
        observer: &dyn ScaffoldObserver,
    ) -> SprigResult<()> {
        self.remove_all(ctx, layout::EXTRANEOUS_PATHS, observer);
        Ok(())
    }

    fn create_files(
        &self,
        ctx: &mut ScaffoldContext,
        observer: &dyn ScaffoldObserver,
    ) -> SprigResult<()> {
        for file in BUNDLED_FILES {
            let path = ctx.target.join(file.destination);
            if let Err(e) = self.filesystem.write_file(&path, file.contents) {
                report(observer, &e.to_string());
            }
        }
        Ok(())
    }

    fn prepare_writable(
        &self,
        ctx: &mut ScaffoldContext,
        observer: &dyn ScaffoldObserver,
    ) -> SprigResult<()> {
        let writable = ctx.target.join(layout::WRITABLE_DIR);
        if let Err(e) = self
            .filesystem
            .set_mode(&writable, layout::WRITABLE_MODE, true)
        {
            report(observer, &e.to_string());
            observer.warning(
                "You should verify that you have permissions on the \"writable\" directory.",
            );
        }
        Ok(())
    }

    fn configure_system_path(
        &self,
        ctx: &mut ScaffoldContext,
        observer: &dyn ScaffoldObserver,
    ) -> SprigResult<()> {
        for relative in layout::SYSTEM_PATH_FILES {
            let path = ctx.target.join(relative);
            if !self.filesystem.exists(&path) {
                continue;
            }

            let configured = self
                .filesystem
                .read_to_string(&path)
                .map(|contents| layout::configure_system_path(&contents, ctx.options.channel))
                .and_then(|contents| self.filesystem.write_file(&path, &contents));

            if let Err(e) = configured {
                report(observer, &e.to_string());
            }
        }
        Ok(())
    }

    fn create_env_file(
        &self,
        ctx: &mut ScaffoldContext,
        observer: &dyn ScaffoldObserver,
    ) -> SprigResult<()> {
        let template = ctx.target.join(layout::ENV_TEMPLATE);
        let env = ctx.target.join(layout::ENV_FILE);

        if self.filesystem.exists(&template) && !self.filesystem.exists(&env) {
            if let Err(e) = self.filesystem.copy_file(&template, &env) {
                report(observer, &e.to_string());
            }
        }
        Ok(())
    }

    fn clean_up(&self, ctx: &mut ScaffoldContext, observer: &dyn ScaffoldObserver) -> SprigResult<()> {
        let removed = self
            .filesystem
            .set_mode(&ctx.archive, layout::ARCHIVE_CLEANUP_MODE, false)
            .and_then(|()| self.filesystem.remove(&ctx.archive));

        if let Err(e) = removed {
            report(observer, &e.to_string());
            observer.warning("Cannot clean up the zip file. Please delete it yourself.");
        }
        Ok(())
    }

    fn write_manifest(
        &self,
        ctx: &mut ScaffoldContext,
        _observer: &dyn ScaffoldObserver,
    ) -> SprigResult<()> {
        let path = ctx.target.join(layout::MANIFEST_FILE);
        if self.filesystem.exists(&path) {
            // Overwritten below either way.
            if let Err(e) = self.filesystem.remove(&path) {
                debug!(error = %e, "Could not remove shipped composer.json");
            }
        }

        let package = naming::package_name(
            ctx.target.base_name()?,
            &ctx.identity,
            ctx.os_user.as_deref(),
        );
        let manifest = Manifest::build(
            MANIFEST_TEMPLATE,
            ManifestInputs {
                channel: ctx.options.channel,
                package: &package,
                identity: &ctx.identity,
            },
        )?;

        self.filesystem.write_file(&path, &manifest.render()?)?;
        info!(package = %package, "composer.json written");
        ctx.package = Some(package);
        Ok(())
    }

    fn init_git(&self, ctx: &mut ScaffoldContext, observer: &dyn ScaffoldObserver) -> SprigResult<()> {
        let dir = ctx.target.path();
        match self.vcs.init(dir) {
            Ok(()) => {
                observer.notice(&format!(
                    "Empty Git repository initialized at {}",
                    dir.display()
                ));
                Ok(())
            }
            Err(e) if e.is_tool_not_found() => Err(e),
            Err(e) => {
                debug!(error = %e, "git init failed");
                observer.error("Git initialization failed. Please run \"git init\" by yourself.");
                Ok(())
            }
        }
    }

    fn init_gitflow(
        &self,
        ctx: &mut ScaffoldContext,
        observer: &dyn ScaffoldObserver,
    ) -> SprigResult<()> {
        if !self.vcs.flow_available() {
            observer.error("Git Flow is not installed in your machine.");
            return Ok(());
        }

        let dir = ctx.target.path();
        match self.vcs.flow_init(dir) {
            Ok(()) => observer.notice(&format!("Git Flow initialized at {}", dir.display())),
            Err(e) => {
                debug!(error = %e, "git flow init failed");
                observer.error(
                    "Git Flow initialization failed. Please run \"git flow init\" by yourself.",
                );
            }
        }
        Ok(())
    }

    fn install(&self, ctx: &mut ScaffoldContext, _observer: &dyn ScaffoldObserver) -> SprigResult<()> {
        self.installer
            .install(ctx.target.path(), ctx.options.install_options())
    }

    // -------------------------------------------------------------------------
    // Internal Helpers
    // -------------------------------------------------------------------------

    fn remove_all(&self, ctx: &ScaffoldContext, paths: &[&str], observer: &dyn ScaffoldObserver) {
        for relative in paths {
            if let Err(e) = self.filesystem.remove(&ctx.target.join(relative)) {
                report(observer, &e.to_string());
            }
        }
    }

    /// Best-effort removal of the archive after a fatal error.
    fn discard_archive(&self, archive: &Path) {
        if !self.filesystem.exists(archive) {
            return;
        }
        if let Err(e) = self.filesystem.remove(archive) {
            warn!(error = %e, path = %archive.display(), "Could not remove temporary archive");
        }
    }
}

fn report(observer: &dyn ScaffoldObserver, message: &str) {
    warn!("{message}");
    observer.error(message);
}

/// A fresh, collision-free archive name.
pub fn archive_file_name() -> String {
    format!("{ARCHIVE_PREFIX}{}.zip", Uuid::new_v4().simple())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::ports::{
        MockArchiveExtractor, MockArchiveFetcher, MockDependencyInstaller, MockFilesystem,
        MockScaffoldObserver, MockVersionControl,
    };
    use crate::domain::{Channel, InstallOptions};
    use crate::error::SprigError;
    use mockall::predicate::*;
    use std::sync::{Arc, Mutex};

    // ── harness ───────────────────────────────────────────────────────────

    struct Mocks {
        fetcher: MockArchiveFetcher,
        extractor: MockArchiveExtractor,
        filesystem: MockFilesystem,
        vcs: MockVersionControl,
        installer: MockDependencyInstaller,
    }

    impl Mocks {
        /// Mocks for a clean stable run into a fresh directory.
        fn happy() -> Self {
            let mut fetcher = MockArchiveFetcher::new();
            fetcher
                .expect_resolve_url()
                .returning(|_| Ok("https://example.test/app.zip".into()));
            fetcher.expect_download().returning(|_, _| Ok(()));

            let mut extractor = MockArchiveExtractor::new();
            extractor
                .expect_extract()
                .returning(|_, _| Ok("appstarter-abc123/".into()));

            let mut filesystem = MockFilesystem::new();
            filesystem
                .expect_exists()
                .returning(|p| p.ends_with("env") || p.ends_with("Paths.php"));
            filesystem
                .expect_read_to_string()
                .returning(|_| Ok("{path}".into()));
            filesystem.expect_write_file().returning(|_, _| Ok(()));
            filesystem.expect_copy_file().returning(|_, _| Ok(()));
            filesystem.expect_remove().returning(|_| Ok(()));
            filesystem.expect_set_mode().returning(|_, _, _| Ok(()));

            let mut vcs = MockVersionControl::new();
            vcs.expect_read_config().returning(|| {
                Ok([
                    ("user.name", "Jane Doe"),
                    ("user.email", "jane@example.com"),
                    ("github.user", "janedoe"),
                ]
                .into_iter()
                .collect())
            });

            let mut installer = MockDependencyInstaller::new();
            installer.expect_install().returning(|_, _| Ok(()));

            Self {
                fetcher,
                extractor,
                filesystem,
                vcs,
                installer,
            }
        }

        fn service(self) -> ScaffoldService {
            ScaffoldService::new(
                Box::new(self.fetcher),
                Box::new(self.extractor),
                Box::new(self.filesystem),
                Box::new(self.vcs),
                Box::new(self.installer),
            )
        }
    }

    /// Observer that records every call in order.
    #[derive(Default, Clone)]
    struct Recorder {
        lines: Arc<Mutex<Vec<String>>>,
    }

    impl Recorder {
        fn lines(&self) -> Vec<String> {
            self.lines.lock().unwrap().clone()
        }

        fn has(&self, prefix: &str, needle: &str) -> bool {
            self.lines()
                .iter()
                .any(|l| l.starts_with(prefix) && l.contains(needle))
        }
    }

    impl ScaffoldObserver for Recorder {
        fn step_started(&self, step: Step) {
            self.lines.lock().unwrap().push(format!("step:{step:?}"));
        }
        fn notice(&self, message: &str) {
            self.lines.lock().unwrap().push(format!("notice:{message}"));
        }
        fn warning(&self, message: &str) {
            self.lines.lock().unwrap().push(format!("warning:{message}"));
        }
        fn error(&self, message: &str) {
            self.lines.lock().unwrap().push(format!("error:{message}"));
        }
    }

    fn request(options: ScaffoldOptions) -> ScaffoldRequest {
        ScaffoldRequest {
            options,
            cwd: PathBuf::from("/work"),
            os_user: Some("osuser".into()),
        }
    }

    fn named(name: &str) -> ScaffoldOptions {
        ScaffoldOptions::new(Some(name.into()))
    }

    // ── pipeline shape ────────────────────────────────────────────────────

    #[test]
    fn pipeline_checks_target_before_download() {
        let check = PIPELINE.iter().position(|(s, _)| *s == Step::CheckTarget);
        let download = PIPELINE.iter().position(|(s, _)| *s == Step::Download);
        assert!(check < download);
        assert_eq!(PIPELINE.last().map(|(s, _)| *s), Some(Step::Install));
    }

    #[test]
    fn git_steps_apply_only_when_requested() {
        let plain = named("app");
        assert!(!Step::InitGit.applies(&plain));
        assert!(!Step::InitGitFlow.applies(&plain));

        let flow = ScaffoldOptions {
            with_gitflow: true,
            ..named("app")
        };
        assert!(Step::InitGit.applies(&flow));
        assert!(Step::InitGitFlow.applies(&flow));
    }

    #[test]
    fn archive_names_are_unique_and_prefixed() {
        let a = archive_file_name();
        let b = archive_file_name();
        assert_ne!(a, b);
        assert!(a.starts_with(ARCHIVE_PREFIX));
        assert!(a.ends_with(".zip"));
    }

    // ── happy path ────────────────────────────────────────────────────────

    #[test]
    fn scaffold_runs_every_default_step() {
        let service = Mocks::happy().service();
        let observer = Recorder::default();

        let report = service.scaffold(request(named("MyApp")), &observer).unwrap();

        assert_eq!(report.directory, PathBuf::from("/work/MyApp"));
        assert_eq!(
            report.package.as_ref().map(PackageName::as_str),
            Some("janedoe/my-app")
        );

        let steps: Vec<_> = observer
            .lines()
            .into_iter()
            .filter(|l| l.starts_with("step:"))
            .collect();
        assert_eq!(steps.len(), PIPELINE.len() - 2);
        assert!(!observer.has("error:", ""));
    }

    #[test]
    fn archive_lives_in_cwd() {
        let service = Mocks::happy().service();
        let ctx = service.prepare(request(named("app")));
        assert_eq!(ctx.archive.parent(), Some(Path::new("/work")));
        assert_eq!(ctx.identity.github_user(), Some("janedoe"));
    }

    #[test]
    fn manifest_is_written_with_identity() {
        let mut mocks = Mocks::happy();
        let written = Arc::new(Mutex::new(String::new()));
        let sink = Arc::clone(&written);

        mocks.filesystem = MockFilesystem::new();
        mocks.filesystem.expect_exists().returning(|_| false);
        mocks.filesystem.expect_remove().returning(|_| Ok(()));
        mocks.filesystem.expect_set_mode().returning(|_, _, _| Ok(()));
        mocks
            .filesystem
            .expect_write_file()
            .returning(move |path, content| {
                if path.ends_with("composer.json") {
                    *sink.lock().unwrap() = content.to_string();
                }
                Ok(())
            });

        mocks
            .service()
            .scaffold(request(named("HTTPServer")), &Recorder::default())
            .unwrap();

        let json: serde_json::Value = serde_json::from_str(&written.lock().unwrap()).unwrap();
        assert_eq!(json["name"], "janedoe/http-server");
        assert_eq!(json["authors"][0]["name"], "Jane Doe");
        assert_eq!(json["require"]["codeigniter4/framework"], "^4");
        assert_eq!(json["minimum-stability"], "stable");
    }

    #[test]
    fn missing_git_gives_os_user_namespace() {
        let mut mocks = Mocks::happy();
        mocks.vcs = MockVersionControl::new();
        mocks.vcs.expect_read_config().returning(|| {
            Err(ApplicationError::ToolNotFound { tool: "git" }.into())
        });

        let report = mocks
            .service()
            .scaffold(request(named("blog")), &Recorder::default())
            .unwrap();
        assert_eq!(report.package.unwrap().as_str(), "osuser/blog");
    }

    // ── target check ──────────────────────────────────────────────────────

    #[test]
    fn existing_target_aborts_before_any_network_call() {
        let mut mocks = Mocks::happy();
        mocks.fetcher = MockArchiveFetcher::new();
        mocks.fetcher.expect_resolve_url().never();
        mocks.fetcher.expect_download().never();
        mocks.filesystem = MockFilesystem::new();
        mocks
            .filesystem
            .expect_exists()
            .with(eq(Path::new("/work/app")))
            .returning(|_| true);
        mocks.filesystem.expect_exists().returning(|_| false);
        mocks.filesystem.expect_remove().never();
        mocks.filesystem.expect_write_file().never();

        let err = mocks
            .service()
            .scaffold(request(named("app")), &Recorder::default())
            .unwrap_err();
        assert!(matches!(
            err,
            SprigError::Application(ApplicationError::AlreadyExists { .. })
        ));
    }

    #[test]
    fn force_allows_existing_target() {
        let mut mocks = Mocks::happy();
        mocks.filesystem = MockFilesystem::new();
        mocks.filesystem.expect_exists().returning(|_| true);
        mocks
            .filesystem
            .expect_read_to_string()
            .returning(|_| Ok(String::new()));
        mocks.filesystem.expect_write_file().returning(|_, _| Ok(()));
        mocks.filesystem.expect_remove().returning(|_| Ok(()));
        mocks.filesystem.expect_set_mode().returning(|_, _, _| Ok(()));

        let opts = ScaffoldOptions {
            force: true,
            ..named("app")
        };
        assert!(
            mocks
                .service()
                .scaffold(request(opts), &Recorder::default())
                .is_ok()
        );
    }

    #[test]
    fn cwd_target_is_allowed_even_though_it_exists() {
        let mut mocks = Mocks::happy();
        mocks.filesystem = MockFilesystem::new();
        mocks
            .filesystem
            .expect_exists()
            .with(eq(Path::new("/work")))
            .returning(|_| true);
        mocks.filesystem.expect_exists().returning(|_| false);
        mocks.filesystem.expect_write_file().returning(|_, _| Ok(()));
        mocks.filesystem.expect_remove().returning(|_| Ok(()));
        mocks.filesystem.expect_set_mode().returning(|_, _, _| Ok(()));

        let report = mocks
            .service()
            .scaffold(request(ScaffoldOptions::new(None)), &Recorder::default())
            .unwrap();
        assert_eq!(report.package.unwrap().as_str(), "janedoe/work");
    }

    // ── fatal failures ────────────────────────────────────────────────────

    #[test]
    fn metadata_failure_is_fatal_and_discards_archive() {
        let mut mocks = Mocks::happy();
        mocks.fetcher = MockArchiveFetcher::new();
        mocks.fetcher.expect_resolve_url().returning(|_| {
            Err(ApplicationError::Metadata {
                url: "https://api.example.test".into(),
                reason: "no zipball_url".into(),
            }
            .into())
        });
        mocks.extractor = MockArchiveExtractor::new();
        mocks.extractor.expect_extract().never();
        mocks.installer = MockDependencyInstaller::new();
        mocks.installer.expect_install().never();

        let err = mocks
            .service()
            .scaffold(request(named("app")), &Recorder::default())
            .unwrap_err();
        assert!(matches!(
            err,
            SprigError::Application(ApplicationError::Metadata { .. })
        ));
    }

    #[test]
    fn corrupt_archive_stops_pipeline() {
        let mut mocks = Mocks::happy();
        mocks.extractor = MockArchiveExtractor::new();
        mocks.extractor.expect_extract().returning(|archive, _| {
            Err(ApplicationError::CorruptArchive {
                path: archive.to_path_buf(),
                reason: "invalid Zip archive".into(),
            }
            .into())
        });
        mocks.installer = MockDependencyInstaller::new();
        mocks.installer.expect_install().never();

        assert!(
            mocks
                .service()
                .scaffold(request(named("app")), &Recorder::default())
                .is_err()
        );
    }

    #[test]
    fn install_failure_is_fatal() {
        let mut mocks = Mocks::happy();
        mocks.installer = MockDependencyInstaller::new();
        mocks.installer.expect_install().returning(|_, _| {
            Err(ApplicationError::InstallFailed {
                reason: "exit status 1".into(),
            }
            .into())
        });

        let err = mocks
            .service()
            .scaffold(request(named("app")), &Recorder::default())
            .unwrap_err();
        assert!(matches!(
            err,
            SprigError::Application(ApplicationError::InstallFailed { .. })
        ));
    }

    #[test]
    fn install_receives_ansi_and_quiet_flags() {
        let mut mocks = Mocks::happy();
        mocks.installer = MockDependencyInstaller::new();
        mocks
            .installer
            .expect_install()
            .with(
                eq(Path::new("/work/app")),
                eq(InstallOptions {
                    ansi: false,
                    quiet: true,
                }),
            )
            .times(1)
            .returning(|_, _| Ok(()));

        let opts = ScaffoldOptions {
            ansi: false,
            quiet: true,
            ..named("app")
        };
        mocks
            .service()
            .scaffold(request(opts), &Recorder::default())
            .unwrap();
    }

    // ── non-fatal failures ────────────────────────────────────────────────

    #[test]
    fn permission_and_cleanup_failures_are_reported_not_fatal() {
        let mut mocks = Mocks::happy();
        mocks.filesystem = MockFilesystem::new();
        mocks.filesystem.expect_exists().returning(|_| false);
        mocks.filesystem.expect_write_file().returning(|_, _| Ok(()));
        mocks.filesystem.expect_remove().returning(|_| Ok(()));
        mocks.filesystem.expect_set_mode().returning(|path, _, _| {
            Err(ApplicationError::Filesystem {
                path: path.to_path_buf(),
                reason: "Operation not permitted".into(),
            }
            .into())
        });

        let observer = Recorder::default();
        mocks
            .service()
            .scaffold(request(named("app")), &observer)
            .unwrap();

        assert!(observer.has("warning:", "\"writable\" directory"));
        assert!(observer.has("warning:", "Please delete it yourself"));
    }

    #[test]
    fn dev_channel_removes_dev_only_directories() {
        let mut mocks = Mocks::happy();
        let removed = Arc::new(Mutex::new(Vec::<PathBuf>::new()));
        let sink = Arc::clone(&removed);

        mocks.fetcher = MockArchiveFetcher::new();
        mocks
            .fetcher
            .expect_resolve_url()
            .with(eq(Channel::Dev))
            .returning(|_| Ok("https://example.test/develop.zip".into()));
        mocks.fetcher.expect_download().returning(|_, _| Ok(()));

        mocks.filesystem = MockFilesystem::new();
        mocks.filesystem.expect_exists().returning(|_| false);
        mocks.filesystem.expect_write_file().returning(|_, _| Ok(()));
        mocks.filesystem.expect_set_mode().returning(|_, _, _| Ok(()));
        mocks.filesystem.expect_remove().returning(move |p| {
            sink.lock().unwrap().push(p.to_path_buf());
            Ok(())
        });

        let opts = ScaffoldOptions {
            channel: Channel::Dev,
            ..named("app")
        };
        mocks
            .service()
            .scaffold(request(opts), &Recorder::default())
            .unwrap();

        let removed = removed.lock().unwrap();
        for dir in layout::DEV_ONLY_PATHS {
            assert!(removed.contains(&PathBuf::from("/work/app").join(dir)), "{dir}");
        }
    }

    #[test]
    fn dev_directory_removal_failure_is_not_fatal() {
        let mut mocks = Mocks::happy();
        mocks.filesystem = MockFilesystem::new();
        mocks.filesystem.expect_exists().returning(|_| false);
        mocks.filesystem.expect_write_file().returning(|_, _| Ok(()));
        mocks.filesystem.expect_set_mode().returning(|_, _, _| Ok(()));
        mocks.filesystem.expect_remove().returning(|p| {
            if p.ends_with("system") {
                Err(ApplicationError::Filesystem {
                    path: p.to_path_buf(),
                    reason: "busy".into(),
                }
                .into())
            } else {
                Ok(())
            }
        });

        let observer = Recorder::default();
        let opts = ScaffoldOptions {
            channel: Channel::Dev,
            ..named("app")
        };
        assert!(mocks.service().scaffold(request(opts), &observer).is_ok());
        assert!(observer.has("error:", "busy"));
    }

    // ── git ───────────────────────────────────────────────────────────────

    #[test]
    fn with_git_initialises_repository() {
        let mut mocks = Mocks::happy();
        mocks
            .vcs
            .expect_init()
            .with(eq(Path::new("/work/app")))
            .times(1)
            .returning(|_| Ok(()));

        let observer = Recorder::default();
        let opts = ScaffoldOptions {
            with_git: true,
            ..named("app")
        };
        mocks.service().scaffold(request(opts), &observer).unwrap();
        assert!(observer.has("notice:", "Empty Git repository initialized"));
    }

    #[test]
    fn with_git_but_no_git_binary_is_fatal() {
        let mut mocks = Mocks::happy();
        mocks
            .vcs
            .expect_init()
            .returning(|_| Err(ApplicationError::ToolNotFound { tool: "git" }.into()));
        mocks.installer = MockDependencyInstaller::new();
        mocks.installer.expect_install().never();

        let opts = ScaffoldOptions {
            with_git: true,
            ..named("app")
        };
        let err = mocks
            .service()
            .scaffold(request(opts), &Recorder::default())
            .unwrap_err();
        assert!(err.is_tool_not_found());
    }

    #[test]
    fn git_init_failure_is_reported_not_fatal() {
        let mut mocks = Mocks::happy();
        mocks.vcs.expect_init().returning(|_| {
            Err(ApplicationError::CommandFailed {
                command: "git init".into(),
                reason: "exit status 128".into(),
            }
            .into())
        });

        let observer = Recorder::default();
        let opts = ScaffoldOptions {
            with_git: true,
            ..named("app")
        };
        assert!(mocks.service().scaffold(request(opts), &observer).is_ok());
        assert!(observer.has("error:", "Please run \"git init\" by yourself"));
    }

    #[test]
    fn gitflow_without_tool_still_initialises_git() {
        let mut mocks = Mocks::happy();
        mocks.vcs.expect_init().times(1).returning(|_| Ok(()));
        mocks.vcs.expect_flow_available().returning(|| false);
        mocks.vcs.expect_flow_init().never();

        let observer = Recorder::default();
        let opts = ScaffoldOptions {
            with_gitflow: true,
            ..named("app")
        };
        assert!(mocks.service().scaffold(request(opts), &observer).is_ok());
        assert!(observer.has("notice:", "Empty Git repository initialized"));
        assert!(observer.has("error:", "Git Flow is not installed"));
    }

    #[test]
    fn gitflow_runs_when_available() {
        let mut mocks = Mocks::happy();
        mocks.vcs.expect_init().returning(|_| Ok(()));
        mocks.vcs.expect_flow_available().returning(|| true);
        mocks.vcs.expect_flow_init().times(1).returning(|_| Ok(()));

        let observer = Recorder::default();
        let opts = ScaffoldOptions {
            with_gitflow: true,
            ..named("app")
        };
        mocks.service().scaffold(request(opts), &observer).unwrap();
        assert!(observer.has("notice:", "Git Flow initialized"));
    }

    #[test]
    fn observer_mock_sees_step_order() {
        let mut observer = MockScaffoldObserver::new();
        let mut seq = mockall::Sequence::new();
        observer
            .expect_step_started()
            .with(eq(Step::CheckTarget))
            .times(1)
            .in_sequence(&mut seq)
            .return_const(());
        observer
            .expect_step_started()
            .with(eq(Step::Download))
            .times(1)
            .in_sequence(&mut seq)
            .return_const(());
        observer.expect_step_started().return_const(());
        observer.expect_notice().return_const(());
        observer.expect_warning().return_const(());
        observer.expect_error().return_const(());

        Mocks::happy()
            .service()
            .scaffold(request(named("app")), &observer)
            .unwrap();
    }
}
