//! YAML report descriptors consumed by the command line.
//!
//! A descriptor describes one test case:
//!
//! ```yaml
//! title: TCP window scaling
//! categories: [team:net, tcp]
//! description:
//!   text: |
//!     Checks RFC 7323 window scaling.
//!   format: markdown
//! files:
//!   - path: capture.pcap
//! attachment:
//!   responsible: net-team
//!   tags: [tcp, regression]
//! achievement:
//!   result: passed
//!   anchor: build-4711
//! ```
//!
//! Relative paths resolve against the descriptor's own directory.

use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::Deserialize;

use crate::context::ServiceContext;
use crate::error::{ClientError, ClientResult};
use crate::report::{DescriptionFormat, TestCase, TestResult};

/// Top-level descriptor document.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ReportDescriptor {
    /// Test case title.
    pub title: String,
    /// Category path, most general first.
    #[serde(default)]
    pub categories: Vec<String>,
    /// Submitter override; defaults to the current user.
    #[serde(default)]
    pub submitter: Option<String>,
    /// Optional description.
    #[serde(default)]
    pub description: Option<DescriptionSpec>,
    /// Files embedded in the test case.
    #[serde(default)]
    pub files: Vec<FileSpec>,
    /// Snippets embedded in the test case.
    #[serde(default)]
    pub snippets: Vec<SnippetSpec>,
    /// Attachment metadata.
    #[serde(default)]
    pub attachment: AttachmentSpec,
    /// Outcome record.
    #[serde(default)]
    pub achievement: AchievementSpec,
}

/// Description text and its format.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DescriptionSpec {
    /// Description body.
    pub text: String,
    /// `plain` (default) or `markdown`.
    #[serde(default)]
    pub format: DescriptionFormat,
    /// Strip shared indentation before encoding.
    #[serde(default)]
    pub dedent: bool,
}

/// A file to embed.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FileSpec {
    /// Location of the file.
    pub path: PathBuf,
    /// MIME type; guessed from the extension when absent.
    #[serde(default)]
    pub mime_type: Option<String>,
}

/// A plot snippet to embed.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SnippetSpec {
    /// Location of the snippet output.
    pub path: PathBuf,
    /// Snippet kind.
    pub mime_type: String,
    /// Optional display name.
    #[serde(default)]
    pub name: Option<String>,
}

/// Attachment section.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AttachmentSpec {
    /// Responsible party.
    #[serde(default)]
    pub responsible: Option<String>,
    /// Tags.
    #[serde(default)]
    pub tags: Vec<String>,
    /// References.
    #[serde(default)]
    pub references: Vec<String>,
}

/// Achievement section.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AchievementSpec {
    /// Outcome; `nonapplicable` when absent.
    #[serde(default)]
    pub result: Option<TestResult>,
    /// Explicit test date.
    #[serde(default)]
    pub test_date: Option<DateTime<Utc>>,
    /// External anchor.
    #[serde(default)]
    pub anchor: Option<String>,
    /// Evidence files.
    #[serde(default)]
    pub files: Vec<FileSpec>,
    /// Evidence snippets.
    #[serde(default)]
    pub snippets: Vec<SnippetSpec>,
}

impl ReportDescriptor {
    /// Parses a descriptor from YAML text.
    ///
    /// # Errors
    ///
    /// Returns a descriptor error if the YAML is malformed or has unknown fields.
    pub fn parse(yaml: &str) -> ClientResult<Self> {
        serde_yaml::from_str(yaml).map_err(|e| ClientError::Descriptor(e.to_string()))
    }

    /// Reads and parses a descriptor through the context's filesystem.
    ///
    /// # Errors
    ///
    /// Returns a descriptor error if the file cannot be read or parsed.
    pub fn load(ctx: &ServiceContext, path: &Path) -> ClientResult<Self> {
        let yaml = ctx.fs.read_to_string(path).map_err(|e| {
            ClientError::Descriptor(format!("failed to read {}: {e}", path.display()))
        })?;
        Self::parse(&yaml).map_err(|e| match e {
            ClientError::Descriptor(msg) => {
                ClientError::Descriptor(format!("{}: {msg}", path.display()))
            }
            other => other,
        })
    }

    /// Builds a test case, resolving relative file paths against `base_dir`.
    ///
    /// # Errors
    ///
    /// Returns the first argument error raised by the test case setters.
    pub fn build(&self, ctx: &ServiceContext, base_dir: &Path) -> ClientResult<TestCase> {
        let mut test = TestCase::new(ctx);
        test.set_title(self.title.as_str());
        test.set_categories(&self.categories)?;
        if let Some(submitter) = &self.submitter {
            test.set_submitter(submitter.as_str())?;
        }
        if let Some(description) = &self.description {
            test.set_description(&description.text, description.format, description.dedent);
        }
        for file in &self.files {
            test.add_data_file(base_dir.join(&file.path), file.mime_type.as_deref())?;
        }
        for snippet in &self.snippets {
            test.add_snippet_file(
                base_dir.join(&snippet.path),
                &snippet.mime_type,
                snippet.name.as_deref(),
            )?;
        }

        let attachment = test.attachment_mut();
        if let Some(responsible) = &self.attachment.responsible {
            attachment.set_responsible(responsible.as_str());
        }
        attachment.set_tags(&self.attachment.tags)?;
        attachment.set_references(&self.attachment.references)?;

        let spec = &self.achievement;
        let achievement = test.achievement_mut();
        if spec.result.is_some() || spec.test_date.is_some() {
            let result = spec.result.unwrap_or_else(|| achievement.result());
            achievement.set_result(result, spec.test_date);
        }
        if let Some(anchor) = &spec.anchor {
            achievement.set_anchor(anchor.as_str())?;
        }
        for file in &spec.files {
            achievement.add_data_file(base_dir.join(&file.path), file.mime_type.as_deref())?;
        }
        for snippet in &spec.snippets {
            achievement.add_snippet_file(
                base_dir.join(&snippet.path),
                &snippet.mime_type,
                snippet.name.as_deref(),
            )?;
        }
        Ok(test)
    }
}

/// Loads the descriptor at `path` and builds its test case.
///
/// # Errors
///
/// Returns a descriptor error for unreadable or malformed files and an
/// argument error for invalid field values.
pub fn load_test_case(ctx: &ServiceContext, path: &Path) -> ClientResult<TestCase> {
    let descriptor = ReportDescriptor::load(ctx, path)?;
    let base_dir = path.parent().unwrap_or_else(|| Path::new("."));
    descriptor.build(ctx, base_dir)
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use chrono::TimeZone;
    use serde_json::Value;

    use super::*;
    use crate::adapters::fixed::{FixedClock, MemoryFileSystem};
    use crate::report::SNIPPET_MATPLOT_PNG;

    fn context(fs: Arc<MemoryFileSystem>) -> ServiceContext {
        let clock = FixedClock::new(Utc.with_ymd_and_hms(2024, 7, 1, 9, 30, 0).unwrap());
        ServiceContext::fixed(Arc::new(clock), "builder").with_fs(fs)
    }

    #[test]
    fn builds_a_full_test_case() {
        let fs = Arc::new(MemoryFileSystem::new());
        let yaml = format!(
            r#"title: TCP window scaling
categories: [team:net, tcp]
description:
  text: "  # Title\n  body\n"
  format: markdown
  dedent: true
files:
  - path: capture.pcap
snippets:
  - path: plots/rtt.png
    mime_type: {SNIPPET_MATPLOT_PNG}
    name: rtt
attachment:
  responsible: net-team
  tags: [tcp, tcp, regression]
  references: [RFC 7323]
achievement:
  result: failed
  anchor: build-4711
  files:
    - path: /abs/log.txt
"#
        );
        fs.insert("/reports/tcp.yaml", yaml);
        fs.insert("/reports/capture.pcap", vec![1, 2]);
        fs.insert("/reports/plots/rtt.png", vec![3]);
        fs.insert("/abs/log.txt", "log");
        let ctx = context(fs);

        let test = load_test_case(&ctx, Path::new("/reports/tcp.yaml")).unwrap();
        assert_eq!(test.title(), Some("TCP window scaling"));
        assert_eq!(test.categories(), ["team:net", "tcp"]);
        assert_eq!(test.attachment().tags(), ["tcp", "regression"]);
        assert_eq!(test.achievement().result(), TestResult::Failed);

        let json: Value = serde_json::from_str(test.to_document().unwrap().as_str()).unwrap();
        assert_eq!(json["submitter"], "builder");
        assert_eq!(json["object-item"]["data"].as_array().unwrap().len(), 3);
        assert_eq!(json["object-item"]["data"][1]["mime-type"], "application/vnd.tcpdump.pcap");
        assert_eq!(json["achievements"][0]["anchor"], "build-4711");
        assert_eq!(json["achievements"][0]["data"][0]["name"], "log.txt");
        assert_eq!(json["attachment"]["responsible"], "net-team");
    }

    #[test]
    fn explicit_date_is_kept() {
        let descriptor = ReportDescriptor::parse(
            "title: t\ncategories: [a]\nachievement:\n  test_date: 2020-01-02T03:04:05Z\n",
        )
        .unwrap();
        let ctx = context(Arc::new(MemoryFileSystem::new()));

        let test = descriptor.build(&ctx, Path::new("/")).unwrap();
        assert_eq!(test.achievement().result(), TestResult::NonApplicable);
        assert_eq!(
            test.achievement().test_date(),
            Utc.with_ymd_and_hms(2020, 1, 2, 3, 4, 5).unwrap()
        );
    }

    #[test]
    fn unknown_result_is_a_descriptor_error() {
        let err = ReportDescriptor::parse("title: t\nachievement:\n  result: bogus\n").unwrap_err();
        assert!(matches!(err, ClientError::Descriptor(_)));
    }

    #[test]
    fn unknown_fields_are_rejected() {
        let err = ReportDescriptor::parse("title: t\ncolour: blue\n").unwrap_err();
        assert!(err.to_string().contains("colour"));
    }

    #[test]
    fn invalid_category_is_an_argument_error() {
        let descriptor = ReportDescriptor::parse("title: t\ncategories: [Team:Foo]\n").unwrap();
        let ctx = context(Arc::new(MemoryFileSystem::new()));

        let err = descriptor.build(&ctx, Path::new("/")).unwrap_err();
        assert!(matches!(err, ClientError::Argument(_)));
    }

    #[test]
    fn missing_descriptor_names_the_path() {
        let ctx = context(Arc::new(MemoryFileSystem::new()));
        let err = load_test_case(&ctx, Path::new("/nowhere/report.yaml")).unwrap_err();

        assert!(matches!(err, ClientError::Descriptor(_)));
        assert!(err.to_string().contains("/nowhere/report.yaml"));
    }
}
