//! Package naming rules.
//!
//! Composer package names are `owner/slug`, lowercase, hyphen-separated. The
//! slug comes from the target directory name; the owner comes from the
//! user's identity.

use std::sync::LazyLock;

use regex::Regex;

use crate::domain::{entities::VcsIdentity, value_objects::PackageName};

/// Lowercase→uppercase boundaries, and the last capital of an uppercase run
/// that is followed by a lowercase letter.
static WORD_BOUNDARY: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?:([a-z])([A-Z])|([A-Z])([A-Z][a-z]))").expect("Invalid word boundary regex")
});

/// Convert a directory name into a package slug.
///
/// A hyphen is inserted at every word boundary, then everything is
/// lowercased.
///
/// ```
/// use sprig_core::domain::naming::package_slug;
///
/// assert_eq!(package_slug("MyApp"), "my-app");
/// assert_eq!(package_slug("HTTPServer"), "http-server");
/// assert_eq!(package_slug("myApp123"), "my-app123");
/// ```
pub fn package_slug(name: &str) -> String {
    WORD_BOUNDARY
        .replace_all(name, "${1}${3}-${2}${4}")
        .to_lowercase()
}

/// Pick the owner namespace for the package.
///
/// Priority: `github.user` from git config, then the OS user, then the slug
/// itself (giving `slug/slug`).
pub fn owner_namespace<'a>(
    identity: &'a VcsIdentity,
    os_user: Option<&'a str>,
    slug: &'a str,
) -> &'a str {
    identity
        .github_user()
        .filter(|u| !u.is_empty())
        .or(os_user.filter(|u| !u.is_empty()))
        .unwrap_or(slug)
}

/// Full package name for a directory.
pub fn package_name(dir_name: &str, identity: &VcsIdentity, os_user: Option<&str>) -> PackageName {
    let slug = package_slug(dir_name);
    let owner = owner_namespace(identity, os_user, &slug);
    PackageName::new(owner, &slug)
}
