//! Identity that always reports the same user.

use crate::ports::identity::UserIdentity;

/// Identity adapter returning a fixed login name.
pub struct FixedIdentity(pub String);

impl FixedIdentity {
    /// Creates an identity that reports `name`.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }
}

impl UserIdentity for FixedIdentity {
    fn current_user(&self) -> String {
        self.0.clone()
    }
}
