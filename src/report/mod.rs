//! Report data model and its canonical wire encoding.
//!
//! A [`TestCase`] owns one [`Attachment`] and one [`Achievement`] and
//! flattens all three into a [`Document`]:
//!
//! ```text
//! {
//!   "achievements": [ { "result", "test-date", "data"?, "anchor"? } ],
//!   "attachment":   { "tags"?, "references"?, "responsible" },
//!   "object-item":  { "title", "categories", "version", "data"? },
//!   "submitter":    "..."
//! }
//! ```

mod achievement;
mod attachment;
pub mod canonical;
mod dedup;
mod entry;
pub mod mime;
mod test_case;

pub use achievement::{Achievement, TestResult};
pub use attachment::Attachment;
pub use dedup::{is_label, Charset, DedupList, LABEL_CHARSET};
pub use entry::{
    DataEntry, DescriptionEntry, DescriptionFormat, FileEntry, SnippetEntry, SNIPPET_MATPLOT_PNG,
};
pub use test_case::{Document, TestCase};

/// Name used when no responsible party or user name is known.
pub const DEFAULT_USERNAME: &str = "anonymous";

/// Wire-format version emitted in every `object-item`.
pub const WIRE_VERSION: u32 = 0;
