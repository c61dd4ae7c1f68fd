//! Service context bundling all port trait objects.

use std::sync::Arc;

use crate::adapters::fixed::{FixedClock, FixedIdentity, MemoryFileSystem, ScriptedTransport};
use crate::adapters::live::{HttpTransport, LiveClock, LiveFileSystem, LiveIdentity};
use crate::ports::clock::Clock;
use crate::ports::filesystem::FileSystem;
use crate::ports::identity::UserIdentity;
use crate::ports::transport::Transport;

/// Bundles all port trait objects into a single context.
///
/// Test cases keep clones of the clock and filesystem handles, so the
/// context can be dropped once the reports are built.
#[derive(Clone)]
pub struct ServiceContext {
    /// Clock used to stamp achievement dates.
    pub clock: Arc<dyn Clock>,
    /// Supplier of the default submitter name.
    pub identity: Arc<dyn UserIdentity>,
    /// Filesystem used to embed report files.
    pub fs: Arc<dyn FileSystem>,
    /// Transport used to deliver documents.
    pub transport: Arc<dyn Transport>,
}

impl ServiceContext {
    /// Creates a live context backed by the system clock, environment,
    /// disk and HTTP.
    #[must_use]
    pub fn live() -> Self {
        Self {
            clock: Arc::new(LiveClock),
            identity: Arc::new(LiveIdentity),
            fs: Arc::new(LiveFileSystem),
            transport: Arc::new(HttpTransport::new()),
        }
    }

    /// Creates a deterministic context: pinned clock and identity, an empty
    /// in-memory filesystem and a transport that accepts every post.
    #[must_use]
    pub fn fixed(clock: Arc<FixedClock>, user: &str) -> Self {
        Self {
            clock,
            identity: Arc::new(FixedIdentity::new(user)),
            fs: Arc::new(MemoryFileSystem::new()),
            transport: Arc::new(ScriptedTransport::new()),
        }
    }

    /// Replaces the filesystem adapter.
    #[must_use]
    pub fn with_fs(mut self, fs: Arc<dyn FileSystem>) -> Self {
        self.fs = fs;
        self
    }

    /// Replaces the transport adapter.
    #[must_use]
    pub fn with_transport(mut self, transport: Arc<dyn Transport>) -> Self {
        self.transport = transport;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    #[test]
    fn fixed_context_reports_pinned_values() {
        let at = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        let ctx = ServiceContext::fixed(Arc::new(FixedClock::new(at)), "ci-bot");

        assert_eq!(ctx.clock.now(), at);
        assert_eq!(ctx.identity.current_user(), "ci-bot");
        assert!(!ctx.fs.is_file(std::path::Path::new("/anything")));
    }

    #[test]
    fn adapters_can_be_swapped() {
        let at = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        let fs = Arc::new(MemoryFileSystem::new());
        fs.insert("/a.txt", "a");

        let ctx = ServiceContext::fixed(Arc::new(FixedClock::new(at)), "ci-bot").with_fs(fs);
        assert!(ctx.fs.is_file(std::path::Path::new("/a.txt")));
    }
}
