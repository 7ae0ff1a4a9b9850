//! Where things live inside a CodeIgniter4 application.
//!
//! Every path here is relative to the target directory.

use crate::domain::value_objects::Channel;

/// Directory the framework writes caches, logs, and sessions into.
pub const WRITABLE_DIR: &str = "writable";

/// Mode applied recursively to [`WRITABLE_DIR`].
pub const WRITABLE_MODE: u32 = 0o755;

/// Mode set on the temporary archive before it is deleted.
pub const ARCHIVE_CLEANUP_MODE: u32 = 0o777;

/// The manifest composer reads.
pub const MANIFEST_FILE: &str = "composer.json";

/// Shipped environment template and the live file copied from it.
pub const ENV_TEMPLATE: &str = "env";
pub const ENV_FILE: &str = ".env";

/// Upstream files replaced by bundled versions.
pub const EXTRANEOUS_PATHS: &[&str] = &[".github", "tests", "README.md", "phpunit.xml.dist"];

/// Contributor-only directories in a `develop` branch checkout.
pub const DEV_ONLY_PATHS: &[&str] = &[".github", "system", "tests", "user_guide_src"];

/// Files that reference the framework's vendor path.
pub const SYSTEM_PATH_FILES: &[&str] = &["app/Config/Paths.php", "phpunit.xml.dist"];

/// Placeholder the bundled test config uses for the framework path.
pub const PATH_PLACEHOLDER: &str = "{path}";

/// How the framework repository's `app/Config/Paths.php` reaches its own
/// `system/`, which is removed from a dev checkout.
pub const IN_TREE_SYSTEM_DIR: &str = "/../../system";

/// Point a file at the framework's vendor directory for `channel`.
///
/// The stable channel only fills the placeholder. The dev channel also
/// rewrites stable vendor paths and the in-tree `system/` reference.
pub fn configure_system_path(contents: &str, channel: Channel) -> String {
    match channel {
        Channel::Stable => contents.replace(PATH_PLACEHOLDER, Channel::Stable.system_path()),
        Channel::Dev => contents
            .replace(Channel::Stable.system_path(), Channel::Dev.system_path())
            .replace(PATH_PLACEHOLDER, Channel::Dev.system_path())
            .replace(
                IN_TREE_SYSTEM_DIR,
                &format!("/../../{}/system", Channel::Dev.system_path()),
            ),
    }
}
