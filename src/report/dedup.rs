//! Ordered, duplicate-free string lists used for tags and references.

use crate::error::{ClientError, ClientResult};

/// Character class accepted for labels (tags and categories).
pub const LABEL_CHARSET: &str = "[a-z0-9-:]";

/// Validation rule applied to every value entering a [`DedupList`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Charset {
    /// Any string is accepted.
    Any,
    /// Only non-empty strings made of `[a-z0-9-:]`.
    Label,
}

/// Returns `true` if `value` is a non-empty string of `[a-z0-9-:]` characters.
#[must_use]
pub fn is_label(value: &str) -> bool {
    !value.is_empty()
        && value
            .bytes()
            .all(|b| b.is_ascii_lowercase() || b.is_ascii_digit() || b == b'-' || b == b':')
}

/// Fails with an argument error naming `field` unless `value` is a label.
pub(crate) fn check_label(field: &str, value: &str) -> ClientResult<()> {
    if is_label(value) {
        Ok(())
    } else {
        Err(ClientError::Argument(format!(
            "{field} contains characters outside {LABEL_CHARSET}: {value:?}"
        )))
    }
}

/// An insertion-ordered list that silently drops repeated values.
///
/// Batches are validated as a whole before anything is committed: a single
/// bad value leaves the list untouched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DedupList {
    field: &'static str,
    charset: Charset,
    values: Vec<String>,
}

impl DedupList {
    /// Creates an empty list whose values are checked against `charset`.
    #[must_use]
    pub fn new(field: &'static str, charset: Charset) -> Self {
        Self { field, charset, values: Vec::new() }
    }

    /// Replaces the whole list with `values`, keeping first occurrences.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Argument`] if any value fails validation; the
    /// list keeps its previous contents in that case.
    pub fn set_all<I, S>(&mut self, values: I) -> ClientResult<()>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let incoming = self.validated(values)?;
        self.values.clear();
        self.push_unique(incoming);
        Ok(())
    }

    /// Appends `values`, skipping any already present.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Argument`] if any value fails validation; the
    /// list is left unchanged in that case.
    pub fn add<I, S>(&mut self, values: I) -> ClientResult<()>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let incoming = self.validated(values)?;
        self.push_unique(incoming);
        Ok(())
    }

    /// Returns the values in first-occurrence order.
    #[must_use]
    pub fn as_slice(&self) -> &[String] {
        &self.values
    }

    /// Returns `true` if the list holds no values.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Returns the number of distinct values.
    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    fn validated<I, S>(&self, values: I) -> ClientResult<Vec<String>>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let incoming: Vec<String> = values.into_iter().map(Into::into).collect();
        if self.charset == Charset::Label {
            for value in &incoming {
                check_label(self.field, value)?;
            }
        }
        Ok(incoming)
    }

    fn push_unique(&mut self, incoming: Vec<String>) {
        for value in incoming {
            if !self.values.contains(&value) {
                self.values.push(value);
            }
        }
    }
}
