//! The test case aggregate and its report document.

use std::fmt;
use std::path::Path;
use std::sync::Arc;

use serde::Serialize;

use super::achievement::{Achievement, AchievementDoc};
use super::attachment::{Attachment, AttachmentDoc};
use super::canonical::to_canonical_string;
use super::dedup::check_label;
use super::entry::{DataEntry, DescriptionEntry, DescriptionFormat, FileEntry, SnippetEntry};
use super::WIRE_VERSION;
use crate::context::ServiceContext;
use crate::error::{ClientError, ClientResult};
use crate::ports::filesystem::FileSystem;

/// One reportable unit: title, categories, description, evidence, plus its
/// [`Attachment`] and [`Achievement`].
pub struct TestCase {
    fs: Arc<dyn FileSystem>,
    submitter: String,
    title: Option<String>,
    categories: Vec<String>,
    data: Vec<DataEntry>,
    attachment: Attachment,
    achievement: Achievement,
}

impl fmt::Debug for TestCase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TestCase")
            .field("submitter", &self.submitter)
            .field("title", &self.title)
            .field("categories", &self.categories)
            .field("data", &self.data.len())
            .field("attachment", &self.attachment)
            .field("achievement", &self.achievement)
            .finish_non_exhaustive()
    }
}

impl TestCase {
    /// Creates an untitled test case submitted by the context's current user.
    #[must_use]
    pub fn new(ctx: &ServiceContext) -> Self {
        Self {
            fs: Arc::clone(&ctx.fs),
            submitter: ctx.identity.current_user(),
            title: None,
            categories: Vec::new(),
            data: Vec::new(),
            attachment: Attachment::new(),
            achievement: Achievement::new(Arc::clone(&ctx.clock), Arc::clone(&ctx.fs)),
        }
    }

    /// Overrides the submitter.
    ///
    /// # Errors
    ///
    /// Returns an argument error if `submitter` is blank.
    pub fn set_submitter(&mut self, submitter: impl Into<String>) -> ClientResult<()> {
        let submitter = submitter.into();
        if submitter.trim().is_empty() {
            return Err(ClientError::Argument("submitter must be a non-empty string".into()));
        }
        self.submitter = submitter;
        Ok(())
    }

    /// Sets the title.
    pub fn set_title(&mut self, title: impl Into<String>) {
        self.title = Some(title.into());
    }

    /// Replaces the categories. Duplicates are kept as given.
    ///
    /// # Errors
    ///
    /// Returns an argument error if any category contains characters outside
    /// `[a-z0-9-:]`; the previous categories are kept.
    pub fn set_categories<I, S>(&mut self, categories: I) -> ClientResult<()>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let categories: Vec<String> = categories.into_iter().map(Into::into).collect();
        for category in &categories {
            check_label("category", category)?;
        }
        self.categories = categories;
        Ok(())
    }

    /// Sets the description, replacing any earlier one.
    ///
    /// With `dedent` the indentation shared by all lines is removed first, so
    /// indented multi-line literals can be passed as written.
    pub fn set_description(&mut self, text: &str, format: DescriptionFormat, dedent: bool) {
        self.data.retain(|entry| !entry.is_description());
        self.data.push(DataEntry::Description(DescriptionEntry::new(text, format, dedent)));
    }

    /// Sets a dedented markdown description.
    pub fn set_description_markdown(&mut self, text: &str) {
        self.set_description(text, DescriptionFormat::Markdown, true);
    }

    /// Sets a plain-text description as written.
    pub fn set_description_plain(&mut self, text: &str) {
        self.set_description(text, DescriptionFormat::Plain, false);
    }

    /// Embeds a file in the test case data.
    ///
    /// # Errors
    ///
    /// Returns an argument error if `path` is not a readable regular file.
    pub fn add_data_file(
        &mut self,
        path: impl AsRef<Path>,
        mime_type: Option<&str>,
    ) -> ClientResult<()> {
        let entry = FileEntry::from_path(self.fs.as_ref(), path.as_ref(), mime_type)?;
        self.data.push(DataEntry::File(entry));
        Ok(())
    }

    /// Embeds generated plot output in the test case data.
    ///
    /// # Errors
    ///
    /// Returns an argument error if `path` is not a readable regular file or
    /// `mime_type` is not a supported snippet type.
    pub fn add_snippet_file(
        &mut self,
        path: impl AsRef<Path>,
        mime_type: &str,
        name: Option<&str>,
    ) -> ClientResult<()> {
        let entry = SnippetEntry::from_path(self.fs.as_ref(), path.as_ref(), mime_type, name)?;
        self.data.push(DataEntry::Snippet(entry));
        Ok(())
    }

    /// The submitter.
    #[must_use]
    pub fn submitter(&self) -> &str {
        &self.submitter
    }

    /// The title, if set.
    #[must_use]
    pub fn title(&self) -> Option<&str> {
        self.title.as_deref()
    }

    /// The categories, in the order given.
    #[must_use]
    pub fn categories(&self) -> &[String] {
        &self.categories
    }

    /// Description, file and snippet entries.
    #[must_use]
    pub fn data(&self) -> &[DataEntry] {
        &self.data
    }

    /// The attachment metadata.
    #[must_use]
    pub fn attachment(&self) -> &Attachment {
        &self.attachment
    }

    /// Mutable access to the attachment metadata.
    pub fn attachment_mut(&mut self) -> &mut Attachment {
        &mut self.attachment
    }

    /// The outcome record.
    #[must_use]
    pub fn achievement(&self) -> &Achievement {
        &self.achievement
    }

    /// Mutable access to the outcome record.
    pub fn achievement_mut(&mut self) -> &mut Achievement {
        &mut self.achievement
    }

    /// Builds the canonical report document.
    ///
    /// Building does not change the test case; two calls without mutation in
    /// between return identical documents.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::State`] if the title is unset or empty, or no
    /// category is set.
    pub fn to_document(&self) -> ClientResult<Document> {
        let title = match self.title.as_deref() {
            Some(title) if !title.is_empty() => title,
            _ => return Err(ClientError::State("test case has no title".into())),
        };
        if self.categories.is_empty() {
            return Err(ClientError::State(
                "categories missing, at least one category level is required".into(),
            ));
        }

        let doc = ReportDoc {
            submitter: &self.submitter,
            achievements: vec![self.achievement.transform()],
            attachment: self.attachment.transform(),
            object_item: ObjectItemDoc {
                title,
                categories: &self.categories,
                version: WIRE_VERSION,
                data: &self.data,
            },
        };
        Ok(Document { json: to_canonical_string(&doc)? })
    }
}

/// A report serialized in the canonical wire layout.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    json: String,
}

impl Document {
    /// The document as JSON text.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.json
    }

    /// The document as bytes, ready for transport.
    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        self.json.as_bytes()
    }

    /// Consumes the document, returning its bytes.
    #[must_use]
    pub fn into_bytes(self) -> Vec<u8> {
        self.json.into_bytes()
    }
}

impl fmt::Display for Document {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.json)
    }
}

#[derive(Serialize)]
struct ReportDoc<'a> {
    submitter: &'a str,
    achievements: Vec<AchievementDoc<'a>>,
    attachment: AttachmentDoc<'a>,
    #[serde(rename = "object-item")]
    object_item: ObjectItemDoc<'a>,
}

#[derive(Serialize)]
struct ObjectItemDoc<'a> {
    title: &'a str,
    categories: &'a [String],
    version: u32,
    #[serde(skip_serializing_if = "<[DataEntry]>::is_empty")]
    data: &'a [DataEntry],
}
