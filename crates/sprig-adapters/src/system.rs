//! Facts about the machine the installer runs on.

use std::env;

/// Login name of the current user, from `USER` or `USERNAME`.
///
/// Empty values are treated as unset.
pub fn current_user() -> Option<String> {
    user_from(|key| env::var(key).ok())
}

fn user_from(lookup: impl Fn(&str) -> Option<String>) -> Option<String> {
    ["USER", "USERNAME"]
        .into_iter()
        .filter_map(lookup)
        .map(|name| name.trim().to_owned())
        .find(|name| !name.is_empty())
}
