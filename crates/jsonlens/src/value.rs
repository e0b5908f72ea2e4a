//! Value kinds and the borrowed value descriptor returned by the scanner.

use core::fmt;

/// Shape of a JSON value as recognized by the scanner.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ValueKind {
    /// The addressed path does not exist in the document.
    #[default]
    NotExist,
    String,
    Number,
    Object,
    Array,
    Boolean,
    Null,
    /// The first value byte matched no JSON shape.
    Unknown,
}

impl fmt::Display for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let word = match self {
            ValueKind::NotExist => "non-existent",
            ValueKind::String => "string",
            ValueKind::Number => "number",
            ValueKind::Object => "object",
            ValueKind::Array => "array",
            ValueKind::Boolean => "boolean",
            ValueKind::Null => "null",
            ValueKind::Unknown => "unknown",
        };
        f.write_str(word)
    }
}

/// A value located in a scanned buffer.
///
/// `raw` borrows from the buffer the value was found in and stays valid until
/// that buffer is dropped or rewritten. For [`ValueKind::String`] the slice
/// excludes the surrounding quotes and is still escaped; for every other kind
/// it is the verbatim literal.
///
/// `end` is the offset one past the last byte of the value's raw form in the
/// scanned buffer: one past the closing quote for strings, one past the
/// closing bracket for containers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Value<'a> {
    pub raw: &'a [u8],
    pub kind: ValueKind,
    pub end: usize,
}

impl<'a> Value<'a> {
    /// Returns `true` if the value is a JSON `null` literal.
    ///
    /// # Examples
    ///
    /// ```
    /// let doc = br#"{"a":null,"b":1}"#;
    ///
    /// assert!(jsonlens::get(doc, &["a"]).unwrap().is_null());
    /// assert!(!jsonlens::get(doc, &["b"]).unwrap().is_null());
    /// ```
    #[must_use]
    pub fn is_null(&self) -> bool {
        self.kind == ValueKind::Null
    }
}
