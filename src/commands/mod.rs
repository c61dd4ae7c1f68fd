//! Command dispatch and handlers.

pub mod render;
pub mod submit;

use crate::cli::Command;
use crate::context::ServiceContext;

/// Dispatch a parsed command to its handler using live adapters.
///
/// # Errors
///
/// Returns an error string if the selected command handler fails.
pub fn dispatch(command: &Command) -> Result<(), String> {
    let ctx = ServiceContext::live();
    dispatch_with_context(command, &ctx)
}

/// Dispatch a command with the given service context.
fn dispatch_with_context(command: &Command, ctx: &ServiceContext) -> Result<(), String> {
    match command {
        Command::Render { file } => render::run(ctx, file),
        Command::Submit { files, url, timeout, dry_run } => {
            submit::run(ctx, files, url.as_deref(), timeout.as_deref(), *dry_run)
        }
    }
}
