//! `hippod-client render` command.

use std::path::Path;

use crate::context::ServiceContext;
use crate::descriptor::load_test_case;

/// Execute the `render` command, printing the document to stdout.
///
/// # Errors
///
/// Returns an error string if the descriptor cannot be loaded or the
/// document cannot be built.
pub fn run(ctx: &ServiceContext, file: &Path) -> Result<(), String> {
    let document = run_with_context(ctx, file)?;
    println!("{document}");
    Ok(())
}

/// Build the canonical document for `file` and return it.
///
/// # Errors
///
/// Returns an error string if the descriptor cannot be loaded or the
/// document cannot be built.
pub fn run_with_context(ctx: &ServiceContext, file: &Path) -> Result<String, String> {
    let test = load_test_case(ctx, file).map_err(|e| e.to_string())?;
    let document = test.to_document().map_err(|e| format!("{}: {e}", file.display()))?;
    Ok(document.as_str().to_string())
}
