//! Bookkeeping metadata attached to a test case.

use serde::Serialize;

use super::dedup::{Charset, DedupList};
use super::DEFAULT_USERNAME;
use crate::error::ClientResult;

/// Responsible party, tags and references of a test case.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attachment {
    responsible: String,
    tags: DedupList,
    references: DedupList,
}

impl Default for Attachment {
    fn default() -> Self {
        Self::new()
    }
}

impl Attachment {
    /// Creates an attachment owned by `"anonymous"` with no tags or references.
    #[must_use]
    pub fn new() -> Self {
        Self {
            responsible: DEFAULT_USERNAME.to_string(),
            tags: DedupList::new("tag", Charset::Label),
            references: DedupList::new("reference", Charset::Any),
        }
    }

    /// Sets the party responsible for the test.
    pub fn set_responsible(&mut self, name: impl Into<String>) {
        self.responsible = name.into();
    }

    /// Replaces all tags.
    ///
    /// # Errors
    ///
    /// Returns an argument error if a tag contains characters outside
    /// `[a-z0-9-:]`; the previous tags are kept.
    pub fn set_tags<I, S>(&mut self, tags: I) -> ClientResult<()>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tags.set_all(tags)
    }

    /// Adds tags not already present.
    ///
    /// # Errors
    ///
    /// Returns an argument error if a tag contains characters outside
    /// `[a-z0-9-:]`; no tag of the batch is added.
    pub fn add_tags<I, S>(&mut self, tags: I) -> ClientResult<()>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tags.add(tags)
    }

    /// Replaces all references.
    ///
    /// # Errors
    ///
    /// References are free-form; this currently always succeeds.
    pub fn set_references<I, S>(&mut self, references: I) -> ClientResult<()>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.references.set_all(references)
    }

    /// Adds references not already present.
    ///
    /// # Errors
    ///
    /// References are free-form; this currently always succeeds.
    pub fn add_references<I, S>(&mut self, references: I) -> ClientResult<()>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.references.add(references)
    }

    /// The responsible party.
    #[must_use]
    pub fn responsible(&self) -> &str {
        &self.responsible
    }

    /// Tags in first-occurrence order.
    #[must_use]
    pub fn tags(&self) -> &[String] {
        self.tags.as_slice()
    }

    /// References in first-occurrence order.
    #[must_use]
    pub fn references(&self) -> &[String] {
        self.references.as_slice()
    }

    pub(crate) fn transform(&self) -> AttachmentDoc<'_> {
        AttachmentDoc {
            tags: self.tags.as_slice(),
            references: self.references.as_slice(),
            responsible: &self.responsible,
        }
    }
}

/// The `attachment` object of a report document.
#[derive(Debug, Serialize)]
pub(crate) struct AttachmentDoc<'a> {
    #[serde(skip_serializing_if = "<[String]>::is_empty")]
    tags: &'a [String],
    #[serde(skip_serializing_if = "<[String]>::is_empty")]
    references: &'a [String],
    responsible: &'a str,
}
