//! Live adapters for real external interactions.

pub mod clock;
pub mod filesystem;
pub mod identity;
pub mod transport;

pub use clock::LiveClock;
pub use filesystem::LiveFileSystem;
pub use identity::LiveIdentity;
pub use transport::HttpTransport;
