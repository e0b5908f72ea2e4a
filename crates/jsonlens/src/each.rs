//! Callback-driven iteration: array elements, object members, and the
//! one-pass multi-path scan.

use alloc::vec;
use alloc::vec::Vec;

use crate::error::Error;
use crate::path::{index_segment, numeric_index};
use crate::reader::{get, internal_get};
use crate::scanner::{block_end, next_token, string_end};
use crate::search::search_keys;
use crate::unescape::{unescape, Scratch};
use crate::value::{Value, ValueKind};

/// Walks the elements of the array addressed by `keys` (or of `data` itself
/// when `keys` is empty), invoking `cb` once per element.
///
/// The callback receives the element's [`Value`] (with `end` relative to
/// `data`) and the offset of the first byte of the element's raw form, including
/// the opening quote for strings.
///
/// Returns the offset of the closing `]`.
pub fn array_each<'a, F>(data: &'a [u8], mut cb: F, keys: &[&str]) -> Result<usize, Error>
where
    F: FnMut(Value<'a>, usize),
{
    if data.is_empty() {
        return Err(Error::MalformedObject);
    }

    let mut offset = 1usize;

    if !keys.is_empty() {
        offset = search_keys(data, keys).ok_or(Error::KeyPathNotFound)?;

        let skip = next_token(&data[offset..]).ok_or(Error::MalformedJson)?;
        offset += skip;

        if data[offset] != b'[' {
            return Err(Error::MalformedArray);
        }
        offset += 1;
    }

    let skip = next_token(data.get(offset..).ok_or(Error::MalformedJson)?)
        .ok_or(Error::MalformedJson)?;
    offset += skip;

    if data[offset] == b']' {
        return Ok(offset);
    }

    loop {
        let (v, start) = internal_get(&data[offset..], &[])?;
        cb(
            Value {
                raw: v.raw,
                kind: v.kind,
                end: offset + v.end,
            },
            offset + start,
        );
        offset += v.end;

        let skip = next_token(&data[offset..]).ok_or(Error::MalformedArray)?;
        offset += skip;

        if data[offset] == b']' {
            break;
        }
        if data[offset] != b',' {
            return Err(Error::MalformedArray);
        }
        offset += 1;
    }

    Ok(offset)
}

/// Walks the members of the object addressed by `keys` (or of `data` itself
/// when `keys` is empty), invoking `cb` with each key and value.
///
/// The key is unescaped when it carries escapes; the value is classifier
/// output with string quotes stripped and `end` relative to `data`. A
/// callback error stops iteration and is returned verbatim.
pub fn object_each<'a, F>(data: &'a [u8], mut cb: F, keys: &[&str]) -> Result<(), Error>
where
    F: FnMut(&[u8], Value<'a>) -> Result<(), Error>,
{
    let mut scratch = Scratch::new();
    let mut offset = 0usize;

    if !keys.is_empty() {
        offset = search_keys(data, keys).ok_or(Error::KeyPathNotFound)?;
    }

    // validate and step past the opening brace
    let skip = next_token(data.get(offset..).ok_or(Error::MalformedObject)?)
        .ok_or(Error::MalformedObject)?;
    offset += skip;
    if data[offset] != b'{' {
        return Err(Error::MalformedObject);
    }
    offset += 1;

    // first token inside, or the empty object
    let skip = next_token(&data[offset..]).ok_or(Error::MalformedJson)?;
    offset += skip;
    if data[offset] == b'}' {
        return Ok(());
    }

    // loop pre-condition: data[offset] is a member key or the closing brace
    while offset < data.len() {
        match data[offset] {
            b'"' => offset += 1,
            b'}' => return Ok(()),
            _ => return Err(Error::MalformedObject),
        }

        let (se, escaped) = string_end(&data[offset..]);
        let se = se.ok_or(Error::MalformedJson)?;
        let key = &data[offset..offset + se - 1];
        offset += se;

        let key: &[u8] = if escaped {
            unescape(key, &mut scratch).map_err(|_| Error::MalformedStringEscape)?
        } else {
            key
        };

        let skip = next_token(&data[offset..]).ok_or(Error::MalformedJson)?;
        offset += skip;
        if data[offset] != b':' {
            return Err(Error::MalformedJson);
        }
        offset += 1;

        let (v, _) = internal_get(&data[offset..], &[])?;
        cb(
            key,
            Value {
                raw: v.raw,
                kind: v.kind,
                end: offset + v.end,
            },
        )?;
        offset += v.end;

        let skip = next_token(&data[offset..]).ok_or(Error::MalformedArray)?;
        offset += skip;
        match data[offset] {
            b'}' => return Ok(()),
            b',' => offset += 1,
            _ => return Err(Error::MalformedObject),
        }

        let skip = next_token(&data[offset..]).ok_or(Error::MalformedArray)?;
        offset += skip;
    }

    // the closing brace should have ended the loop
    Err(Error::MalformedObject)
}

/// Upper bound on the number of paths [`each_key`] can track: one bit per
/// path in a 64-bit word, with the bottom bit reserved.
pub const MAX_EACH_KEY_PATHS: usize = 62;

/// Resolves many paths in a single pass over the document.
///
/// `cb` is invoked at most once per path, in document order, with the path's
/// index and either the located value or the error produced while reading
/// it. Paths that never match produce no callback.
///
/// Returns the offset where the scan stopped once every path was satisfied;
/// [`Error::KeyPathNotFound`] when the scan exhausted the document with
/// paths still unmatched.
///
/// # Panics
///
/// Panics when more than [`MAX_EACH_KEY_PATHS`] paths are supplied.
pub fn each_key<'a, F>(data: &'a [u8], mut cb: F, paths: &[&[&str]]) -> Result<usize, Error>
where
    F: FnMut(usize, Result<(&'a [u8], ValueKind), Error>),
{
    assert!(
        paths.len() <= MAX_EACH_KEY_PATHS,
        "each_key supports at most {MAX_EACH_KEY_PATHS} paths"
    );

    let mut path_flags: u64 = 0;
    let mut level: isize = 0;
    let mut paths_matched = 0usize;
    let mut i = 0usize;
    let ln = data.len();

    let max_path = paths.iter().map(|p| p.len()).max().unwrap_or(0);
    let mut scratch = Scratch::new();
    // the key sequence currently descended; slot `level - 1` is the key of
    // the innermost open object
    let mut paths_buf: Vec<Vec<u8>> = vec![Vec::new(); max_path];

    while i < ln {
        match data[i] {
            b'"' => {
                i += 1;
                let key_begin = i;

                let (se, escaped) = string_end(&data[i..]);
                let se = se.ok_or(Error::MalformedJson)?;
                i += se;
                let key_end = i - 1;

                let skip = next_token(&data[i..]).ok_or(Error::MalformedJson)?;
                i += skip;

                if data[i] == b':' {
                    let key = &data[key_begin..key_end];
                    let key_unesc: &[u8] = if escaped {
                        unescape(key, &mut scratch).map_err(|_| Error::MalformedStringEscape)?
                    } else {
                        key
                    };

                    if max_path as isize >= level {
                        if level < 1 {
                            return Err(Error::MalformedJson);
                        }
                        paths_buf[(level - 1) as usize] = key_unesc.to_vec();

                        for (pi, p) in paths.iter().enumerate() {
                            if p.len() as isize != level
                                || path_flags & (1 << (pi + 1)) != 0
                                || p[(level - 1) as usize].as_bytes() != key_unesc
                                || !same_tree(p, &paths_buf[..level as usize])
                            {
                                continue;
                            }

                            i += 1;
                            paths_matched += 1;
                            path_flags |= 1 << (pi + 1);

                            match get(&data[i..], &[]) {
                                Ok(v) => {
                                    cb(pi, Ok((v.raw, v.kind)));
                                    i += v.end;
                                }
                                Err(e) => cb(pi, Err(e)),
                            }

                            if paths_matched == paths.len() {
                                break;
                            }
                        }
                        if paths_matched == paths.len() {
                            return Ok(i);
                        }
                    }

                    // re-examine a structural byte the value consumption
                    // landed on
                    if let Some(&c) = data.get(i) {
                        if matches!(c, b'{' | b'}' | b'[' | b'"') {
                            i -= 1;
                        }
                    }
                } else {
                    i -= 1;
                }
            }
            b'{' => level += 1,
            b'}' => level -= 1,
            b'[' => {
                if level < 0 {
                    return Err(Error::MalformedJson);
                }

                // which element indices does any unsatisfied path need here?
                let mut arr_idx_flags: u64 = 0;
                let mut p_idx_flags: u64 = 0;

                for (pi, p) in paths.iter().enumerate() {
                    if (p.len() as isize) < level + 1
                        || path_flags & (1 << (pi + 1)) != 0
                        || index_segment(p[level as usize]).is_none()
                        || !same_tree(p, &paths_buf[..level as usize])
                    {
                        continue;
                    }
                    let want = numeric_index(p[level as usize]).unwrap_or(0);
                    if want + 1 >= 64 {
                        // beyond the interest word; cannot be tracked
                        continue;
                    }
                    arr_idx_flags |= 1 << (want + 1);
                    p_idx_flags |= 1 << (pi + 1);
                }

                if arr_idx_flags > 0 {
                    level += 1;
                    let arr_start = i;
                    let mut cur_idx = 0usize;

                    let arr_off = array_each(
                        &data[i..],
                        |v: Value<'a>, off: usize| {
                            let interested = cur_idx + 1 < 64
                                && arr_idx_flags & (1 << (cur_idx + 1)) != 0;
                            if interested {
                                for (pi, p) in paths.iter().enumerate() {
                                    if p_idx_flags & (1 << (pi + 1)) == 0 {
                                        continue;
                                    }
                                    let want =
                                        numeric_index(p[(level - 1) as usize]).unwrap_or(0);
                                    if cur_idx != want {
                                        continue;
                                    }

                                    let elem = &data[arr_start + off..arr_start + v.end];
                                    paths_matched += 1;
                                    path_flags |= 1 << (pi + 1);

                                    if let Some(of) =
                                        search_keys(elem, &p[level as usize..])
                                    {
                                        match get(&elem[of..], &[]) {
                                            Ok(sub) => cb(pi, Ok((sub.raw, sub.kind))),
                                            Err(e) => cb(pi, Err(e)),
                                        }
                                    }
                                }
                            }
                            cur_idx += 1;
                        },
                        &[],
                    )?;

                    if paths_matched == paths.len() {
                        return Ok(i);
                    }
                    i += arr_off - 1;
                } else {
                    let skip = block_end(&data[i..], b'[', b']').ok_or(Error::MalformedJson)?;
                    i += skip - 1;
                }
            }
            b']' => level -= 1,
            _ => {}
        }
        i += 1;
    }

    Err(Error::KeyPathNotFound)
}

/// `true` iff `path` and the descended key sequence agree on their common
/// prefix. A shorter side never disagrees, so sibling scans do not reset
/// match state.
fn same_tree(path: &[&str], descended: &[Vec<u8>]) -> bool {
    path.iter()
        .zip(descended.iter())
        .all(|(p, d)| p.as_bytes() == d.as_slice())
}

#[cfg(test)]
mod tests {
    use super::same_tree;
    use alloc::vec;
    use alloc::vec::Vec;

    #[test]
    fn same_tree_compares_common_prefix() {
        let descended: Vec<Vec<u8>> = vec![b"a".to_vec(), b"b".to_vec()];
        assert!(same_tree(&["a", "b", "c"], &descended));
        assert!(same_tree(&["a"], &descended));
        assert!(!same_tree(&["a", "x"], &descended));
        assert!(same_tree(&[], &descended));
    }
}
