//! The flat form: an insertion-ordered `key -> value` map.

use indexmap::IndexMap;

use crate::error::CodecError;
use crate::value::{FileBlob, FormValue};

/// An ordered collection of `(dotted/indexed key, value)` pairs
/// representing a serialized object graph.
///
/// Keys look like `Name`, `Tags[1]`, or `Addresses[0].City`. Order is
/// the order values were appended during encoding, which also fixes the
/// order of parts in the multipart payload.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FlatForm {
    entries: IndexMap<String, FormValue>,
}

impl FlatForm {
    /// Create an empty form.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a value under `key`, replacing any previous value at that
    /// key (keys are unique in a well-formed flat form).
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<FormValue>) {
        self.entries.insert(key.into(), value.into());
    }

    /// Look up the value at `key`.
    pub fn get(&self, key: &str) -> Option<&FormValue> {
        self.entries.get(key)
    }

    /// Remove the value at `key`, returning it if present.
    pub fn remove(&mut self, key: &str) -> Option<FormValue> {
        self.entries.shift_remove(key)
    }

    /// Whether any key exists at or under `path`: the root path matches
    /// any non-empty form, a member path matches keys starting with
    /// `{path}.` (the probe custom-type decoding uses before
    /// constructing an instance).
    pub fn contains_member(&self, path: &str) -> bool {
        if path.is_empty() {
            return !self.entries.is_empty();
        }
        let dotted = format!("{path}.");
        self.entries.keys().any(|k| k.starts_with(&dotted))
    }

    /// The text value at `path`.
    ///
    /// Absent keys report [`CodecError::Missing`]; file values report
    /// [`CodecError::UnexpectedValueKind`].
    pub fn text(&self, path: &str) -> Result<&str, CodecError> {
        match self.get(path) {
            None => Err(CodecError::Missing { path: path.into() }),
            Some(FormValue::Text(s)) => Ok(s),
            Some(FormValue::File(_)) => Err(CodecError::UnexpectedValueKind {
                path: path.into(),
                expected: "text",
            }),
        }
    }

    /// The file value at `path`, with the same error contract as
    /// [`FlatForm::text`].
    pub fn file(&self, path: &str) -> Result<&FileBlob, CodecError> {
        match self.get(path) {
            None => Err(CodecError::Missing { path: path.into() }),
            Some(FormValue::File(blob)) => Ok(blob),
            Some(FormValue::Text(_)) => Err(CodecError::UnexpectedValueKind {
                path: path.into(),
                expected: "file",
            }),
        }
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the form holds no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate entries in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &FormValue)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Iterate keys in insertion order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }
}

impl FromIterator<(String, FormValue)> for FlatForm {
    fn from_iter<I: IntoIterator<Item = (String, FormValue)>>(iter: I) -> Self {
        Self {
            entries: iter.into_iter().collect(),
        }
    }
}
