//! Port traits defining external boundaries.
//!
//! Each trait represents a boundary between the report model and the
//! surrounding environment (time, user identity, file storage, network).
//! Implementations live in `src/adapters/`.

pub mod clock;
pub mod filesystem;
pub mod identity;
pub mod transport;

pub use clock::Clock;
pub use filesystem::FileSystem;
pub use identity::UserIdentity;
pub use transport::{Transport, TransportFuture, TransportReceipt};
