//! Value classification and the public read API.

use alloc::borrow::Cow;
use alloc::borrow::ToOwned;
use alloc::string::String;

use memchr::memchr;

use crate::error::Error;
use crate::scanner::{block_end, next_token, string_end, token_end};
use crate::search::search_keys;
use crate::unescape::{unescape, Scratch};
use crate::value::{Value, ValueKind};

/// Classifies the value whose first byte sits at `data[offset]`.
///
/// Returns the raw slice (quotes included for strings), its kind, and the
/// offset one past the value's last byte.
pub(crate) fn get_type(data: &[u8], offset: usize) -> Result<(&[u8], ValueKind, usize), Error> {
    match data[offset] {
        b'"' => {
            let (idx, _) = string_end(&data[offset + 1..]);
            let idx = idx.ok_or(Error::MalformedString)?;
            let end = offset + idx + 1;
            Ok((&data[offset..end], ValueKind::String, end))
        }
        b'[' => {
            let len = block_end(&data[offset..], b'[', b']').ok_or(Error::MalformedArray)?;
            let end = offset + len;
            Ok((&data[offset..end], ValueKind::Array, end))
        }
        b'{' => {
            let len = block_end(&data[offset..], b'{', b'}').ok_or(Error::MalformedObject)?;
            let end = offset + len;
            Ok((&data[offset..end], ValueKind::Object, end))
        }
        first => {
            // number, boolean or null
            let len = token_end(&data[offset..]);
            let value = &data[offset..offset + len];
            let kind = match first {
                b't' | b'f' => {
                    if value == b"true" || value == b"false" {
                        ValueKind::Boolean
                    } else {
                        return Err(Error::UnknownValueType);
                    }
                }
                // 'u' tolerated alongside 'n' for historical reasons
                b'u' | b'n' => {
                    if value == b"null" {
                        ValueKind::Null
                    } else {
                        return Err(Error::UnknownValueType);
                    }
                }
                b'0'..=b'9' | b'-' => ValueKind::Number,
                _ => return Err(Error::UnknownValueType),
            };
            Ok((value, kind, offset + len))
        }
    }
}

/// Resolves `keys` and classifies the value, returning the descriptor and
/// the offset of the value's first byte.
pub(crate) fn internal_get<'a>(
    data: &'a [u8],
    keys: &[&str],
) -> Result<(Value<'a>, usize), Error> {
    let mut offset = 0usize;
    if !keys.is_empty() {
        offset = search_keys(data, keys).ok_or(Error::KeyPathNotFound)?;
    }

    let skip = next_token(data.get(offset..).ok_or(Error::MalformedJson)?)
        .ok_or(Error::MalformedJson)?;
    offset += skip;

    let (raw, kind, end) = get_type(data, offset)?;
    let raw = if kind == ValueKind::String {
        &raw[1..raw.len() - 1]
    } else {
        raw
    };
    Ok((Value { raw, kind, end }, offset))
}

/// Extracts the value addressed by `keys`.
///
/// With an empty path the closest value in `data` is returned, which is what
/// the iterators build on. String values have their surrounding quotes
/// stripped but remain escaped.
///
/// ```
/// use jsonlens::ValueKind;
///
/// let doc = br#"{"a":{"b":{"c":42}}}"#;
/// let v = jsonlens::get(doc, &["a", "b", "c"]).unwrap();
/// assert_eq!(v.raw, b"42");
/// assert_eq!(v.kind, ValueKind::Number);
/// ```
pub fn get<'a>(data: &'a [u8], keys: &[&str]) -> Result<Value<'a>, Error> {
    internal_get(data, keys).map(|(v, _)| v)
}

/// Extracts a string value, unescaping it when necessary.
///
/// Borrows from `data` when the raw value carries no backslash; allocates
/// only when escapes must be decoded.
pub fn get_string<'a>(data: &'a [u8], keys: &[&str]) -> Result<Cow<'a, str>, Error> {
    let v = get(data, keys)?;
    if v.kind != ValueKind::String {
        return Err(Error::TypeMismatch {
            expected: ValueKind::String,
            found: v.kind,
        });
    }
    if memchr(b'\\', v.raw).is_none() {
        return core::str::from_utf8(v.raw)
            .map(Cow::Borrowed)
            .map_err(|_| Error::MalformedValue);
    }
    parse_string(v.raw).map(Cow::Owned)
}

/// Extracts any value as its raw text, borrowed from `data`.
///
/// No unescaping and no kind check: a string value comes back still escaped
/// and without quotes. The zero-allocation counterpart of [`get_string`].
pub fn get_raw_str<'a>(data: &'a [u8], keys: &[&str]) -> Result<&'a str, Error> {
    let v = get(data, keys)?;
    core::str::from_utf8(v.raw).map_err(|_| Error::MalformedValue)
}

/// Extracts a number value as an `i64`.
pub fn get_int(data: &[u8], keys: &[&str]) -> Result<i64, Error> {
    let v = get(data, keys)?;
    if v.kind != ValueKind::Number {
        return Err(Error::TypeMismatch {
            expected: ValueKind::Number,
            found: v.kind,
        });
    }
    parse_int(v.raw)
}

/// Extracts a number value as an `f64`.
pub fn get_float(data: &[u8], keys: &[&str]) -> Result<f64, Error> {
    let v = get(data, keys)?;
    if v.kind != ValueKind::Number {
        return Err(Error::TypeMismatch {
            expected: ValueKind::Number,
            found: v.kind,
        });
    }
    parse_float(v.raw)
}

/// Extracts a boolean value.
pub fn get_boolean(data: &[u8], keys: &[&str]) -> Result<bool, Error> {
    let v = get(data, keys)?;
    if v.kind != ValueKind::Boolean {
        return Err(Error::TypeMismatch {
            expected: ValueKind::Boolean,
            found: v.kind,
        });
    }
    parse_boolean(v.raw)
}

/// Decodes the raw bytes of a boolean value.
pub fn parse_boolean(bytes: &[u8]) -> Result<bool, Error> {
    match bytes {
        b"true" => Ok(true),
        b"false" => Ok(false),
        _ => Err(Error::MalformedValue),
    }
}

/// Decodes the raw (quote-stripped, still escaped) bytes of a string value.
pub fn parse_string(bytes: &[u8]) -> Result<String, Error> {
    let mut scratch = Scratch::new();
    let unescaped = unescape(bytes, &mut scratch).map_err(|_| Error::MalformedValue)?;
    core::str::from_utf8(unescaped)
        .map(ToOwned::to_owned)
        .map_err(|_| Error::MalformedValue)
}

/// Decodes the raw bytes of a number value as an `i64`.
///
/// Rejects anything but an optional leading minus followed by digits;
/// overflow is an error.
pub fn parse_int(bytes: &[u8]) -> Result<i64, Error> {
    let (neg, digits) = match bytes.split_first() {
        Some((b'-', rest)) => (true, rest),
        _ => (false, bytes),
    };
    if digits.is_empty() {
        return Err(Error::MalformedValue);
    }

    // accumulate in negative space so i64::MIN round-trips
    let mut acc: i64 = 0;
    for &c in digits {
        if !c.is_ascii_digit() {
            return Err(Error::MalformedValue);
        }
        acc = acc
            .checked_mul(10)
            .and_then(|a| a.checked_sub(i64::from(c - b'0')))
            .ok_or(Error::MalformedValue)?;
    }

    if neg {
        Ok(acc)
    } else {
        acc.checked_neg().ok_or(Error::MalformedValue)
    }
}

/// Decodes the raw bytes of a number value as an `f64`.
pub fn parse_float(bytes: &[u8]) -> Result<f64, Error> {
    core::str::from_utf8(bytes)
        .ok()
        .and_then(|s| s.parse::<f64>().ok())
        .ok_or(Error::MalformedValue)
}
