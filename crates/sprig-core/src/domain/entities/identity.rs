//! Version-control identity read from `git config -l`.

use std::collections::BTreeMap;

/// Key/value pairs from the user's git configuration.
///
/// Read once at the start of a run and passed explicitly to the steps that
/// need it. An empty identity is valid: it just means no author details.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VcsIdentity {
    entries: BTreeMap<String, String>,
}

impl VcsIdentity {
    pub const USER_NAME: &'static str = "user.name";
    pub const USER_EMAIL: &'static str = "user.email";
    pub const GITHUB_USER: &'static str = "github.user";

    pub fn new() -> Self {
        Self::default()
    }

    /// Parse the output of `git config -l`.
    ///
    /// Each line is `key=value`, split at the first `=`. Lines without a key
    /// are skipped. Later lines win, matching git's own precedence (system,
    /// then global, then local).
    pub fn parse(output: &str) -> Self {
        let entries = output
            .lines()
            .filter_map(|line| {
                let line = line.trim_end_matches('\r');
                let (key, value) = line.split_once('=')?;
                (!key.is_empty()).then(|| (key.to_string(), value.to_string()))
            })
            .collect();
        Self { entries }
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }

    pub fn user_name(&self) -> Option<&str> {
        self.get(Self::USER_NAME)
    }

    pub fn user_email(&self) -> Option<&str> {
        self.get(Self::USER_EMAIL)
    }

    pub fn github_user(&self) -> Option<&str> {
        self.get(Self::GITHUB_USER)
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }
}

impl<K, V> FromIterator<(K, V)> for VcsIdentity
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            entries: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}
