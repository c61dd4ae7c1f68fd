//! Deterministic adapters for reproducible reports and tests.
//!
//! These stand in for the live adapters when a caller needs byte-stable
//! documents (pinned clock and identity), in-memory files, or a transport
//! whose answers are scripted in advance.

pub mod clock;
pub mod filesystem;
pub mod identity;
pub mod transport;

pub use clock::FixedClock;
pub use filesystem::MemoryFileSystem;
pub use identity::FixedIdentity;
pub use transport::{RecordedPost, ScriptedTransport};
