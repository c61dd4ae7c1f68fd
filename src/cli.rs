//! CLI argument definitions.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Top-level CLI parser for `hippod-client`.
#[derive(Debug, Parser)]
#[command(name = "hippod-client", version, about = "Build and upload test result reports")]
pub struct Cli {
    /// The command to execute.
    #[command(subcommand)]
    pub command: Command,
}

/// Supported top-level subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Print the canonical JSON document of a report descriptor.
    Render {
        /// YAML report descriptor.
        file: PathBuf,
    },
    /// Upload one or more report descriptors.
    Submit {
        /// YAML report descriptors, submitted in order.
        #[arg(required = true)]
        files: Vec<PathBuf>,
        /// Base URL of the results service (overrides HIPPOD_URL).
        #[arg(long)]
        url: Option<String>,
        /// Request timeout in seconds (overrides HIPPOD_TIMEOUT_SECS).
        #[arg(long)]
        timeout: Option<String>,
        /// Build and list the reports without sending them.
        #[arg(long)]
        dry_run: bool,
    },
}

#[cfg(test)]
mod tests {
    use super::{Cli, Command};
    use clap::Parser;

    #[test]
    fn parses_render_subcommand() {
        let cli = Cli::parse_from(["hippod-client", "render", "report.yaml"]);
        assert!(matches!(cli.command, Command::Render { file } if file.ends_with("report.yaml")));
    }

    #[test]
    fn parses_submit_with_flags() {
        let cli = Cli::parse_from([
            "hippod-client",
            "submit",
            "a.yaml",
            "b.yaml",
            "--url",
            "http://hippod",
            "--timeout",
            "1.5",
            "--dry-run",
        ]);
        let Command::Submit { files, url, timeout, dry_run } = cli.command else {
            panic!("expected submit");
        };
        assert_eq!(files.len(), 2);
        assert_eq!(url.as_deref(), Some("http://hippod"));
        assert_eq!(timeout.as_deref(), Some("1.5"));
        assert!(dry_run);
    }

    #[test]
    fn submit_requires_a_file() {
        assert!(Cli::try_parse_from(["hippod-client", "submit"]).is_err());
    }
}
