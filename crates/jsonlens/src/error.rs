use thiserror::Error;

use crate::value::ValueKind;

/// Everything that can go wrong while scanning or rewriting a document.
///
/// The `Malformed*` variants indicate structural problems detected at the
/// point the scanner gave up; [`Error::KeyPathNotFound`] is a well-formed
/// absence, not a failure, and [`set`](crate::set) consumes it internally to
/// drive path creation.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    #[error("key path not found")]
    KeyPathNotFound,
    #[error("malformed JSON")]
    MalformedJson,
    #[error("value is a string, but has no closing '\"'")]
    MalformedString,
    #[error("value is an array, but has no closing ']'")]
    MalformedArray,
    #[error("value is an object, but has no closing '}}'")]
    MalformedObject,
    #[error("value looks like a number, boolean or null, but does not parse as one")]
    MalformedValue,
    #[error("invalid escape sequence in a string")]
    MalformedStringEscape,
    #[error("unknown value type")]
    UnknownValueType,
    #[error("value is not a {expected}, got {found}")]
    TypeMismatch {
        expected: ValueKind,
        found: ValueKind,
    },
}
