//! Domain value objects: [`Channel`] and [`PackageName`].
//!
//! These are pure value types with equality-by-value and no identity. The
//! string forms here are the ones written into `composer.json`.

use serde::{Deserialize, Serialize};
use std::fmt;

// ── Channel ──────────────────────────────────────────────────────────────────

/// Which flavour of the framework a new application is built against.
///
/// `Stable` pulls the latest appstarter release and requires the tagged
/// `codeigniter4/framework` package. `Dev` pulls the framework's `develop`
/// branch and requires `codeigniter4/codeigniter4` from source.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Channel {
    #[default]
    Stable,
    Dev,
}

impl Channel {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Stable => "stable",
            Self::Dev => "dev",
        }
    }

    pub const fn is_dev(&self) -> bool {
        matches!(self, Self::Dev)
    }

    /// Value written to the manifest's `minimum-stability` key.
    pub const fn minimum_stability(&self) -> &'static str {
        self.as_str()
    }

    /// The framework package and constraint merged into `require`.
    pub const fn framework_requirement(&self) -> (&'static str, &'static str) {
        match self {
            Self::Stable => ("codeigniter4/framework", "^4"),
            Self::Dev => ("codeigniter4/codeigniter4", "dev-develop"),
        }
    }

    /// Vendor path the application's `Paths.php` must point at.
    pub const fn system_path(&self) -> &'static str {
        match self {
            Self::Stable => "vendor/codeigniter4/framework",
            Self::Dev => "vendor/codeigniter4/codeigniter4",
        }
    }
}

impl fmt::Display for Channel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ── PackageName ──────────────────────────────────────────────────────────────

/// A composer package name, always `owner/slug` in lowercase.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PackageName(String);

impl PackageName {
    /// Build a package name from an owner namespace and a slug.
    ///
    /// Both halves are lowercased.
    pub fn new(owner: &str, slug: &str) -> Self {
        Self(format!("{owner}/{slug}").to_lowercase())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The owner half, before the `/`.
    pub fn owner(&self) -> &str {
        self.0.split_once('/').map_or(self.0.as_str(), |(o, _)| o)
    }
}

impl fmt::Display for PackageName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for PackageName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
