//! Zero-copy, path-indexed accessors for JSON documents held in byte buffers.
//!
//! `jsonlens` never builds a document tree. Every accessor re-scans the
//! original buffer and returns either a sub-slice of that buffer or a decoded
//! scalar. A key-path, a sequence of object keys and bracketed array indices
//! such as `["user", "emails", "[0]"]`, addresses nested values.
//!
//! ```
//! let doc = br#"{"user":{"name":"ann","logins":[3,7]}}"#;
//!
//! let name = jsonlens::get_string(doc, &["user", "name"]).unwrap();
//! assert_eq!(name, "ann");
//!
//! let last = jsonlens::get_int(doc, &["user", "logins", "[1]"]).unwrap();
//! assert_eq!(last, 7);
//! ```
//!
//! Reads borrow from the input; the returned [`Value`] is valid for as long
//! as the buffer it was scanned from. Writes ([`set`], [`delete`]) splice a
//! fresh buffer and leave the input untouched.

#![no_std]
#![allow(missing_docs)]
extern crate alloc;

#[cfg(test)]
extern crate std;

mod each;
mod error;
mod path;
mod reader;
mod scanner;
mod search;
mod unescape;
mod value;
mod writer;

pub use each::{array_each, each_key, object_each, MAX_EACH_KEY_PATHS};
pub use error::Error;
pub use reader::{
    get, get_boolean, get_float, get_int, get_raw_str, get_string, parse_boolean, parse_float,
    parse_int, parse_string,
};
pub use value::{Value, ValueKind};
pub use writer::{delete, set};
