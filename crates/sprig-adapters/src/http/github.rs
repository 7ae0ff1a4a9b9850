//! Template archive retrieval from GitHub.
//!
//! The stable channel asks the releases API for the latest appstarter
//! release and downloads its zipball. The dev channel downloads a fixed
//! branch archive of the framework repository.

use std::fs::File;
use std::io;
use std::path::Path;

use serde_json::Value;
use sprig_core::{
    application::{ApplicationError, ports::ArchiveFetcher},
    domain::Channel,
    error::{SprigError, SprigResult},
};
use tracing::{debug, instrument};

/// Latest appstarter release metadata.
pub const DEFAULT_RELEASES_API: &str =
    "https://api.github.com/repos/codeigniter4/appstarter/releases/latest";

/// Branch archive of the framework's development line.
pub const DEFAULT_DEV_ARCHIVE: &str =
    "https://github.com/codeigniter4/CodeIgniter4/archive/refs/heads/develop.zip";

/// Sent with every request; the GitHub API rejects anonymous agents.
pub const USER_AGENT: &str = concat!("sprig/", env!("CARGO_PKG_VERSION"));

/// Fetches template archives over HTTPS using `ureq`.
#[derive(Debug, Clone)]
pub struct GithubFetcher {
    releases_api: String,
    dev_archive: String,
    agent: ureq::Agent,
}

impl GithubFetcher {
    pub fn new(releases_api: impl Into<String>, dev_archive: impl Into<String>) -> Self {
        let config = ureq::Agent::config_builder()
            .http_status_as_error(true)
            .build();
        Self {
            releases_api: releases_api.into(),
            dev_archive: dev_archive.into(),
            agent: ureq::Agent::new_with_config(config),
        }
    }

    pub fn releases_api(&self) -> &str {
        &self.releases_api
    }

    pub fn dev_archive(&self) -> &str {
        &self.dev_archive
    }

    fn get(&self, url: &str) -> Result<ureq::http::Response<ureq::Body>, ureq::Error> {
        self.agent
            .get(url)
            .header("User-Agent", USER_AGENT)
            .call()
    }

    fn latest_release_url(&self) -> SprigResult<String> {
        let url = self.releases_api.as_str();
        let metadata_error = |reason: String| -> SprigError {
            ApplicationError::Metadata {
                url: url.to_owned(),
                reason,
            }
            .into()
        };

        let body = self
            .get(url)
            .map_err(|e| metadata_error(describe(&e)))?
            .into_body()
            .read_to_string()
            .map_err(|e| metadata_error(e.to_string()))?;

        zipball_url(&body).map_err(metadata_error)
    }
}

impl Default for GithubFetcher {
    fn default() -> Self {
        Self::new(DEFAULT_RELEASES_API, DEFAULT_DEV_ARCHIVE)
    }
}

impl ArchiveFetcher for GithubFetcher {
    #[instrument(skip(self))]
    fn resolve_url(&self, channel: Channel) -> SprigResult<String> {
        match channel {
            Channel::Stable => self.latest_release_url(),
            Channel::Dev => Ok(self.dev_archive.clone()),
        }
    }

    #[instrument(skip(self), fields(dest = %dest.display()))]
    fn download(&self, url: &str, dest: &Path) -> SprigResult<()> {
        let response = self.get(url).map_err(|e| map_ureq_error(url, &e))?;

        let mut file = File::create(dest).map_err(|e| io_error(dest, &e))?;
        let bytes = io::copy(&mut response.into_body().as_reader(), &mut file).map_err(|e| {
            SprigError::from(ApplicationError::Network {
                url: url.to_owned(),
                reason: e.to_string(),
            })
        })?;

        debug!(bytes, "Archive downloaded");
        Ok(())
    }
}

/// Pull `zipball_url` out of a release metadata document.
fn zipball_url(body: &str) -> Result<String, String> {
    let document: Value = serde_json::from_str(body).map_err(|e| e.to_string())?;
    match document.get("zipball_url") {
        Some(Value::String(url)) if !url.is_empty() => Ok(url.clone()),
        Some(_) => Err("\"zipball_url\" is not a string".into()),
        None => Err("no \"zipball_url\" in the response".into()),
    }
}

fn describe(err: &ureq::Error) -> String {
    match err {
        ureq::Error::StatusCode(404) => "not found (HTTP 404)".into(),
        ureq::Error::StatusCode(403) => "access denied (HTTP 403)".into(),
        ureq::Error::StatusCode(code) => format!("server responded with HTTP {code}"),
        other => other.to_string(),
    }
}

fn map_ureq_error(url: &str, err: &ureq::Error) -> SprigError {
    ApplicationError::Network {
        url: url.to_owned(),
        reason: describe(err),
    }
    .into()
}

fn io_error(path: &Path, err: &io::Error) -> SprigError {
    ApplicationError::Filesystem {
        path: path.to_path_buf(),
        reason: format!("Failed to create file: {err}"),
    }
    .into()
}
