//! Live identity adapter reading the login name from the environment.

use std::env;

use crate::ports::identity::UserIdentity;
use crate::report::DEFAULT_USERNAME;

/// Environment variables consulted in order for the login name.
const USER_VARS: [&str; 3] = ["LOGNAME", "USER", "USERNAME"];

/// Resolves the current user from `LOGNAME`, `USER` or `USERNAME`.
///
/// Falls back to `"anonymous"` when none of them holds a non-empty value.
pub struct LiveIdentity;

impl UserIdentity for LiveIdentity {
    fn current_user(&self) -> String {
        USER_VARS
            .iter()
            .filter_map(|var| env::var(var).ok())
            .find(|name| !name.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_USERNAME.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn never_returns_an_empty_name() {
        assert!(!LiveIdentity.current_user().is_empty());
    }
}
