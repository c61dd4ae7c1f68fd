//! `hippod-client submit` command.

use std::path::PathBuf;

use tracing::info;

use crate::config::ClientConfig;
use crate::container::SubmissionContainer;
use crate::context::ServiceContext;
use crate::descriptor::load_test_case;
use crate::report::TestCase;

/// Per-item report lines and the number of failed items.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct SubmitSummary {
    /// One status line per descriptor, plus headers.
    pub lines: Vec<String>,
    /// How many descriptors failed to build or submit.
    pub failed: usize,
}

/// Execute the `submit` command.
///
/// Configuration comes from the environment, overridden by `url` and `timeout`.
///
/// # Errors
///
/// Returns an error string for invalid configuration, a missing URL, or when
/// at least one report failed.
pub fn run(
    ctx: &ServiceContext,
    files: &[PathBuf],
    url: Option<&str>,
    timeout: Option<&str>,
    dry_run: bool,
) -> Result<(), String> {
    let config = ClientConfig::from_env()
        .and_then(|config| config.with_overrides(url, timeout))
        .map_err(|e| e.to_string())?;
    let summary = run_with_context(ctx, &config, files, dry_run)?;
    for line in &summary.lines {
        println!("{line}");
    }
    if summary.failed > 0 {
        return Err(format!("{} of {} reports failed", summary.failed, files.len()));
    }
    Ok(())
}

/// Load every descriptor and submit the resulting reports through `ctx`.
///
/// Descriptors that cannot be loaded are reported as failed and skipped; the
/// rest are still submitted.
///
/// # Errors
///
/// Returns an error string if no URL is configured for a real submission.
pub fn run_with_context(
    ctx: &ServiceContext,
    config: &ClientConfig,
    files: &[PathBuf],
    dry_run: bool,
) -> Result<SubmitSummary, String> {
    let mut summary = SubmitSummary::default();
    let mut container = SubmissionContainer::from_config(config);
    for file in files {
        match load_test_case(ctx, file) {
            Ok(test) => container.add(test),
            Err(err) => {
                summary.lines.push(format!("[FAIL] {}: {err}", file.display()));
                summary.failed += 1;
            }
        }
    }

    if dry_run {
        dry_run_lines(&container, &mut summary);
        return Ok(summary);
    }

    let outcomes = container
        .submit_all_blocking(ctx.transport.as_ref())
        .map_err(|e| e.to_string())?;
    for (test, outcome) in container.tests().iter().zip(outcomes) {
        match outcome.error {
            None if outcome.success => summary.lines.push(format!("[ OK ] {}", label(test))),
            Some(err) => {
                summary.lines.push(format!("[FAIL] {}: {err}", label(test)));
                summary.failed += 1;
            }
            None => {
                summary.lines.push(format!("[FAIL] {}: rejected", label(test)));
                summary.failed += 1;
            }
        }
    }
    info!(submitted = container.tests().len(), failed = summary.failed, "submission finished");
    Ok(summary)
}

fn dry_run_lines(container: &SubmissionContainer, summary: &mut SubmitSummary) {
    let endpoint = container.endpoint().unwrap_or_else(|_| "(no URL configured)".into());
    summary.lines.insert(0, format!("endpoint: {endpoint}"));
    for test in container.tests() {
        match test.to_document() {
            Ok(document) => summary
                .lines
                .push(format!("[DRY ] {} ({} bytes)", label(test), document.as_bytes().len())),
            Err(err) => {
                summary.lines.push(format!("[FAIL] {}: {err}", label(test)));
                summary.failed += 1;
            }
        }
    }
}

fn label(test: &TestCase) -> &str {
    test.title().filter(|t| !t.is_empty()).unwrap_or("<untitled>")
}
