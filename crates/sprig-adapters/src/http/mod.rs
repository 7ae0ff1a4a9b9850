//! HTTP adapters.

mod github;

pub use github::{DEFAULT_DEV_ARCHIVE, DEFAULT_RELEASES_API, GithubFetcher, USER_AGENT};
