//! Diagnostic logging setup.

use tracing_subscriber::EnvFilter;
use tracing_subscriber::FmtSubscriber;

/// Environment variable holding the log filter directives.
pub const LOG_VAR: &str = "HIPPOD_LOG";

const DEFAULT_FILTER: &str = "warn";

/// Installs a stderr subscriber filtered by `HIPPOD_LOG`, `warn` by default.
///
/// Does nothing if a global subscriber is already installed.
pub fn init_tracing() {
    let filter =
        EnvFilter::try_from_env(LOG_VAR).unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .finish();
    let _ = tracing::subscriber::set_global_default(subscriber);
}
