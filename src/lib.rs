//! Client library for building test-result reports and uploading them to a
//! hippod results service.
//!
//! A [`TestCase`] collects a title, categories, embedded files, an
//! [`Attachment`] and an [`Achievement`]; [`TestCase::to_document`] turns it
//! into the canonical JSON the service expects. A [`SubmissionContainer`]
//! posts a batch of test cases and reports one outcome per item.

pub mod adapters;
pub mod cli;
pub mod commands;
pub mod config;
pub mod container;
pub mod context;
pub mod descriptor;
pub mod error;
pub mod logging;
pub mod ports;
pub mod report;

pub use config::ClientConfig;
pub use container::{SubmissionContainer, SubmitOutcome};
pub use context::ServiceContext;
pub use descriptor::{load_test_case, ReportDescriptor};
pub use error::{ClientError, ClientResult, TransportError};
pub use report::{
    Achievement, Attachment, DescriptionFormat, Document, TestCase, TestResult,
    SNIPPET_MATPLOT_PNG,
};

use clap::Parser;

/// Run the CLI with the provided arguments.
///
/// # Errors
///
/// Returns an error string when argument parsing fails or command execution fails.
pub fn run<I, T>(args: I) -> Result<(), String>
where
    I: IntoIterator<Item = T>,
    T: Into<std::ffi::OsString> + Clone,
{
    let cli = match cli::Cli::try_parse_from(args) {
        Ok(cli) => cli,
        Err(err) if !err.use_stderr() => {
            // --help and --version
            return err.print().map_err(|e| e.to_string());
        }
        Err(err) => return Err(err.to_string()),
    };
    commands::dispatch(&cli.command)
}
