//! Surgical buffer rewriting: `set` and `delete` splice the original bytes
//! around the edit instead of reserializing, so the document's formatting is
//! preserved everywhere but the edited region.

use alloc::vec::Vec;

use crate::each::array_each;
use crate::error::Error;
use crate::path::{index_segment, IndexSegment};
use crate::reader::internal_get;
use crate::scanner::{block_end, find_token_start, last_token, next_token, token_end};
use crate::search::find_key_start;

fn splice(data: &[u8], start: usize, end: usize, insert: &[u8]) -> Vec<u8> {
    let mut out = Vec::with_capacity(data.len() - (end - start) + insert.len());
    out.extend_from_slice(&data[..start]);
    out.extend_from_slice(insert);
    out.extend_from_slice(&data[end..]);
    out
}

/// Builds the text inserted by [`set`]: one `{"key":` or `[` (plus `null,`
/// padding) per remaining segment, the value, then the matching closers in
/// reverse. The surrounding comma is the caller's to request.
fn create_insert_component(
    keys: &[&str],
    set_value: &[u8],
    start_comma: bool,
    end_comma: bool,
    is_object: bool,
) -> Vec<u8> {
    if keys.is_empty() {
        let mut out = Vec::with_capacity(set_value.len() + 1);
        if start_comma {
            out.push(b',');
        }
        out.extend_from_slice(set_value);
        if end_comma {
            out.push(b',');
        }
        return out;
    }

    let mut out = Vec::new();
    let first_index = index_segment(keys[0]);

    if start_comma {
        out.push(b',');
    }
    match first_index {
        Some(idx) => {
            out.push(b'[');
            for _ in 0..idx.pad_count() {
                out.extend_from_slice(b"null,");
            }
        }
        None => {
            if is_object {
                out.push(b'{');
            }
            out.push(b'"');
            out.extend_from_slice(keys[0].as_bytes());
            out.extend_from_slice(b"\":");
        }
    }

    for key in &keys[1..] {
        match index_segment(key) {
            Some(idx) => {
                out.push(b'[');
                for _ in 0..idx.pad_count() {
                    out.extend_from_slice(b"null,");
                }
            }
            None => {
                out.extend_from_slice(b"{\"");
                out.extend_from_slice(key.as_bytes());
                out.extend_from_slice(b"\":");
            }
        }
    }

    out.extend_from_slice(set_value);

    for key in keys[1..].iter().rev() {
        out.push(if index_segment(key).is_some() {
            b']'
        } else {
            b'}'
        });
    }
    if first_index.is_some() {
        out.push(b']');
    } else if is_object {
        out.push(b'}');
    }
    if end_comma {
        out.push(b',');
    }
    out
}

/// Installs `set_value` (raw JSON text) at `keys`, creating intermediate
/// containers as needed, and returns the rewritten buffer.
///
/// When the full path exists its value is replaced in place. Otherwise the
/// deepest existing prefix anchors an insertion: non-empty objects grow a
/// new member before their closing brace, arrays accept `[N]` (padding with
/// `null` past the current length), `[+]` (append) and `[-]` (prepend), and
/// anything else is overwritten by a freshly synthesized container chain.
///
/// Fails with [`Error::KeyPathNotFound`] when a top-level member would have
/// to be created but the document root is not an object.
///
/// ```
/// let doc = br#"{"a":[1,2]}"#;
/// let out = jsonlens::set(doc, b"9", &["a", "[5]"]).unwrap();
/// assert_eq!(out, br#"{"a":[1,2,null,null,null,9]}"#);
/// ```
pub fn set(data: &[u8], set_value: &[u8], keys: &[&str]) -> Result<Vec<u8>, Error> {
    if keys.is_empty() {
        return Err(Error::KeyPathNotFound);
    }

    match internal_get(data, keys) {
        Ok((v, start)) => Ok(splice(data, start, v.end, set_value)),
        Err(Error::KeyPathNotFound) => set_create(data, set_value, keys),
        Err(e) => Err(e),
    }
}

/// The create path of [`set`]: the full path does not exist yet.
fn set_create(data: &[u8], set_value: &[u8], keys: &[&str]) -> Result<Vec<u8>, Error> {
    // deepest existing prefix
    let mut depth = 0usize;
    let mut start_offset = 0usize;
    let mut prefix_end: Option<usize> = None;
    for i in 0..keys.len() {
        match internal_get(data, &keys[..=i]) {
            Ok((v, start)) => {
                start_offset = start;
                prefix_end = Some(v.end);
                depth += 1;
            }
            Err(_) => break,
        }
    }

    let mut start_comma = true;
    let end_comma = false;
    let mut object = false;

    let end_offset = match prefix_end {
        Some(end) => end,
        None => {
            // a top-level member can only be created on an object root
            let first = next_token(data).ok_or(Error::KeyPathNotFound)?;
            if data[first] != b'{' {
                return Err(Error::KeyPathNotFound);
            }
            // an empty object needs no separating comma
            let inner = next_token(&data[first + 1..]).ok_or(Error::MalformedJson)?;
            if data[first + 1 + inner] == b'}' {
                start_comma = false;
            }
            // insert before the closing brace, past any trailing whitespace
            last_token(data).ok_or(Error::MalformedJson)?
        }
    };

    let mut depth_offset = end_offset;
    if depth != 0 {
        let inner = next_token(&data[start_offset + 1..]).ok_or(Error::MalformedJson)?;
        let inner_byte = data[start_offset + 1 + inner];

        if data[start_offset] == b'{' && inner_byte != b'}' {
            // non-empty object prefix: grow it before its closing brace
            depth_offset -= 1;
            start_offset = depth_offset;
        } else if data[start_offset] == b'[' && inner_byte != b']' {
            if let Some(seg) = index_segment(keys[depth]) {
                return set_into_array(data, set_value, keys, depth, seg, start_offset, end_offset);
            }
            start_comma = false;
            object = true;
        } else {
            // empty containers and scalars are overwritten whole
            start_comma = false;
            object = true;
        }
    } else {
        start_offset = depth_offset;
    }

    let component =
        create_insert_component(&keys[depth..], set_value, start_comma, end_comma, object);
    Ok(splice(data, start_offset, depth_offset, &component))
}

/// Insertion into a non-empty array prefix whose next segment is an index.
fn set_into_array(
    data: &[u8],
    set_value: &[u8],
    keys: &[&str],
    depth: usize,
    seg: IndexSegment,
    start_offset: usize,
    end_offset: usize,
) -> Result<Vec<u8>, Error> {
    let mut start_comma = true;
    let mut end_comma = false;
    let mut array_offset = 0usize;
    let mut component = Vec::new();

    match seg {
        IndexSegment::At(want) => {
            // count elements to know how much null padding reaches `want`
            let mut element_count = 0usize;
            let _ = array_each(
                &data[start_offset..end_offset],
                |v, _| {
                    element_count += 1;
                    array_offset = v.end;
                },
                &[],
            );
            for _ in 0..want.saturating_sub(element_count) {
                component.extend_from_slice(b",null");
            }
        }
        IndexSegment::Append => {
            if let Some(end) = block_end(&data[start_offset..end_offset], b'[', b']') {
                array_offset = end - 1;
            }
        }
        IndexSegment::Prepend => {
            array_offset = 1;
            end_comma = true;
            start_comma = false;
        }
    }

    let insert_at = start_offset + array_offset;
    let next_depth = depth + 1;
    let object = next_depth < keys.len() && index_segment(keys[next_depth]).is_none();

    component.extend_from_slice(&create_insert_component(
        &keys[next_depth..],
        set_value,
        start_comma,
        end_comma,
        object,
    ));
    Ok(splice(data, insert_at, insert_at, &component))
}

/// Removes the value at `keys`, splicing out the key (or element) and fixing
/// the surrounding comma. Total: any failure to resolve the path returns the
/// input unchanged. An empty path empties the buffer.
///
/// ```
/// let doc = br#"{"x":1,"y":2}"#;
/// assert_eq!(jsonlens::delete(doc, &["x"]), br#"{"y":2}"#);
/// assert_eq!(jsonlens::delete(doc, &["z"]), doc);
/// ```
pub fn delete(data: &[u8], keys: &[&str]) -> Vec<u8> {
    let Some((&last, parents)) = keys.split_last() else {
        return Vec::new();
    };

    let mut key_offset;
    let mut end_offset;

    if index_segment(last).is_some() {
        match internal_get(data, keys) {
            Ok((v, start)) => {
                key_offset = start;
                end_offset = v.end;
            }
            Err(_) => return data.to_vec(),
        }

        let tok_end = token_end(&data[end_offset..]);
        match data.get(end_offset + tok_end) {
            Some(b',') => end_offset += tok_end + 1,
            // end of buffer counts as the closing bracket
            Some(b']') | None => {
                if let Some(comma) = find_token_start(&data[..key_offset], b',') {
                    key_offset = comma;
                }
            }
            _ => {}
        }
    } else {
        let mut parent_start = 0usize;
        let mut parent_end = data.len();
        if !parents.is_empty() {
            match internal_get(data, parents) {
                Ok((v, start)) => {
                    parent_start = start;
                    parent_end = v.end;
                }
                Err(_) => return data.to_vec(),
            }
        }

        let Some(key_in_parent) = find_key_start(&data[parent_start..parent_end], last) else {
            return data.to_vec();
        };
        key_offset = parent_start + key_in_parent;

        match internal_get(&data[parent_start..parent_end], &[last]) {
            Ok((v, _)) => end_offset = parent_start + v.end,
            Err(_) => return data.to_vec(),
        }

        let tok_end = token_end(&data[end_offset..]);
        match data.get(end_offset + tok_end) {
            Some(b',') => end_offset += tok_end + 1,
            // end of buffer counts as the closing brace
            Some(b'}') | None => {
                if let Some(comma) = find_token_start(&data[..key_offset], b',') {
                    key_offset = comma;
                }
            }
            _ => {}
        }
    }

    let mut out = Vec::with_capacity(data.len() - (end_offset - key_offset));
    out.extend_from_slice(&data[..key_offset]);
    out.extend_from_slice(&data[end_offset..]);
    out
}
