//! Clock port used to stamp achievement dates.

use chrono::{DateTime, Utc};

/// Provides the current time.
///
/// Achievements stamp their `test-date` through this trait so that tests
/// can pin the timestamp and compare documents byte for byte.
pub trait Clock: Send + Sync {
    /// Returns the current UTC time.
    fn now(&self) -> DateTime<Utc>;
}
