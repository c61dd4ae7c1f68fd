//! Identity port supplying the default submitter name.

/// Supplies the name of the user running the test harness.
///
/// A test case asks for the name once, at construction, and uses it as
/// the default `submitter`.
pub trait UserIdentity: Send + Sync {
    /// Returns the current user's login name.
    fn current_user(&self) -> String;
}
