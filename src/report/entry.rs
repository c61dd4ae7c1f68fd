//! Embedded data entries: files, plot snippets and descriptions.

use std::path::Path;
use std::str::FromStr;

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use serde::{Deserialize, Serialize};

use super::mime::guess_mime_type;
use crate::error::{ClientError, ClientResult};
use crate::ports::filesystem::FileSystem;

/// The only MIME type accepted for snippet entries.
pub const SNIPPET_MATPLOT_PNG: &str = "x-snippet-python3-matplot-png";

/// One item of a `data` array in the report document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum DataEntry {
    /// An attached file.
    File(FileEntry),
    /// Generated plot output.
    Snippet(SnippetEntry),
    /// The free-form test description.
    Description(DescriptionEntry),
}

impl DataEntry {
    /// Returns `true` for description entries.
    #[must_use]
    pub fn is_description(&self) -> bool {
        matches!(self, Self::Description(_))
    }

    /// Returns the MIME type carried by the entry.
    #[must_use]
    pub fn mime_type(&self) -> &str {
        match self {
            Self::File(e) => &e.mime_type,
            Self::Snippet(e) => &e.mime_type,
            Self::Description(e) => &e.mime_type,
        }
    }

    /// Returns the base64 payload.
    #[must_use]
    pub fn data(&self) -> &str {
        match self {
            Self::File(e) => &e.data,
            Self::Snippet(e) => &e.data,
            Self::Description(e) => &e.data,
        }
    }
}

/// A file read from storage and embedded as base64.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FileEntry {
    /// Base name of the source file.
    pub name: String,
    /// Explicit or guessed MIME type.
    #[serde(rename = "mime-type")]
    pub mime_type: String,
    /// Base64-encoded file contents.
    pub data: String,
}

impl FileEntry {
    /// Reads `path` through `fs` and packages it as a file entry.
    ///
    /// Without `mime_type` the type is guessed from the file extension.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Argument`] if `path` is not a readable regular file.
    pub fn from_path(
        fs: &dyn FileSystem,
        path: &Path,
        mime_type: Option<&str>,
    ) -> ClientResult<Self> {
        let data = read_encoded(fs, path)?;
        let mime_type = mime_type.map_or_else(|| guess_mime_type(path), String::from);
        let name = path.file_name().map(|n| n.to_string_lossy().into_owned()).unwrap_or_default();
        Ok(Self { name, mime_type, data })
    }
}

/// Generated plot output embedded as base64.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SnippetEntry {
    /// Always [`SNIPPET_MATPLOT_PNG`].
    #[serde(rename = "mime-type")]
    pub mime_type: String,
    /// Base64-encoded snippet output.
    pub data: String,
    /// Optional display name; omitted from the document when absent.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

impl SnippetEntry {
    /// Reads `path` through `fs` and packages it as a snippet entry.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Argument`] if `path` is not a readable regular
    /// file or `mime_type` is not [`SNIPPET_MATPLOT_PNG`].
    pub fn from_path(
        fs: &dyn FileSystem,
        path: &Path,
        mime_type: &str,
        name: Option<&str>,
    ) -> ClientResult<Self> {
        ensure_file(fs, path)?;
        if mime_type != SNIPPET_MATPLOT_PNG {
            return Err(ClientError::Argument(format!(
                "unsupported snippet type {mime_type:?}, only {SNIPPET_MATPLOT_PNG} is supported"
            )));
        }
        let data = read_encoded(fs, path)?;
        Ok(Self { mime_type: mime_type.to_string(), data, name: name.map(String::from) })
    }
}

/// Markup used by a description.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DescriptionFormat {
    /// Plain text.
    #[default]
    Plain,
    /// Markdown.
    Markdown,
}

impl DescriptionFormat {
    /// Returns the MIME type used for this format.
    #[must_use]
    pub fn mime_type(self) -> &'static str {
        match self {
            Self::Plain => "text/plain",
            Self::Markdown => "text/markdown",
        }
    }
}

impl FromStr for DescriptionFormat {
    type Err = ClientError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "plain" => Ok(Self::Plain),
            "markdown" => Ok(Self::Markdown),
            other => Err(ClientError::Argument(format!(
                "description format must be plain or markdown, not {other:?}"
            ))),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
enum EntryType {
    Description,
}

/// The test description, base64-encoded with a text MIME type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DescriptionEntry {
    #[serde(rename = "type")]
    entry_type: EntryType,
    /// `text/plain` or `text/markdown`.
    #[serde(rename = "mime-type")]
    pub mime_type: String,
    /// Base64-encoded description text.
    pub data: String,
}

impl DescriptionEntry {
    /// Encodes `text`, optionally stripping common leading indentation first.
    #[must_use]
    pub fn new(text: &str, format: DescriptionFormat, dedent: bool) -> Self {
        let data = if dedent { STANDARD.encode(dedent_text(text)) } else { STANDARD.encode(text) };
        Self { entry_type: EntryType::Description, mime_type: format.mime_type().to_string(), data }
    }
}

fn ensure_file(fs: &dyn FileSystem, path: &Path) -> ClientResult<()> {
    if fs.is_file(path) {
        Ok(())
    } else {
        Err(ClientError::Argument(format!("file {:?} is not available", path.display())))
    }
}

fn read_encoded(fs: &dyn FileSystem, path: &Path) -> ClientResult<String> {
    ensure_file(fs, path)?;
    let bytes = fs.read_bytes(path).map_err(|e| {
        ClientError::Argument(format!("file {:?} is not readable: {e}", path.display()))
    })?;
    Ok(STANDARD.encode(bytes))
}

/// Removes the whitespace prefix shared by all non-blank lines.
///
/// Whitespace-only lines are emptied and do not take part in the prefix.
pub(crate) fn dedent_text(text: &str) -> String {
    let mut margin: Option<&str> = None;
    for line in text.lines() {
        let trimmed = line.trim_start_matches([' ', '\t']);
        if trimmed.trim().is_empty() {
            continue;
        }
        let indent = &line[..line.len() - trimmed.len()];
        margin = Some(match margin {
            None => indent,
            Some(current) => common_prefix(current, indent),
        });
    }
    let margin = margin.unwrap_or("");

    text.split_inclusive('\n')
        .map(|line| {
            let body = line.trim_end_matches(['\n', '\r']);
            let ending = &line[body.len()..];
            if body.trim().is_empty() {
                ending.to_string()
            } else {
                format!("{}{ending}", body.strip_prefix(margin).unwrap_or(body))
            }
        })
        .collect()
}

fn common_prefix<'a>(a: &'a str, b: &str) -> &'a str {
    let len = a.bytes().zip(b.bytes()).take_while(|(x, y)| x == y).count();
    &a[..len]
}
