//! Single-pass key-path resolution.
//!
//! [`search_keys`] walks the document once, tracking two counters:
//! `level` (current object nesting depth) and `key_level` (path segments
//! matched so far). A key candidate only counts when it sits at the
//! currently-needed depth and is followed by a `:`. Non-matching keys back
//! the cursor up one byte so the delimiter that ended them is re-examined as
//! structure on the next step.
//!
//! Arrays are never searched for keys; an array is either addressed by an
//! index segment (elements walked, the remainder of the path resolved
//! recursively inside the chosen element) or skipped whole via `block_end`.

use crate::each::array_each;
use crate::path::{index_segment, IndexSegment};
use crate::scanner::{block_end, next_token, string_end};
use crate::unescape::{unescape, Scratch};
use crate::value::Value;

/// Resolves `keys` against `data`.
///
/// Returns the offset just past the `:` of the final matched key; callers
/// skip whitespace and classify the value themselves. The empty path
/// resolves to offset 0. `None` means the path does not exist or the
/// document is malformed enough that the scan could not proceed.
pub(crate) fn search_keys(data: &[u8], keys: &[&str]) -> Option<usize> {
    let lk = keys.len() as isize;
    if lk == 0 {
        return Some(0);
    }

    let mut key_level: isize = 0;
    let mut level: isize = 0;
    let mut i = 0usize;
    let ln = data.len();
    let mut scratch = Scratch::new();

    while i < ln {
        match data[i] {
            b'"' => {
                i += 1;
                let key_begin = i;

                let (se, key_escaped) = string_end(&data[i..]);
                let se = se?;
                i += se;
                let key_end = i - 1;

                let value_offset = next_token(&data[i..])?;
                i += value_offset;

                // a string is a key candidate when a ':' follows and the
                // depth is the one the next path segment needs
                if data[i] == b':' && key_level == level - 1 {
                    let key = &data[key_begin..key_end];
                    let key_unesc: &[u8] = if key_escaped {
                        match unescape(key, &mut scratch) {
                            Ok(k) => k,
                            Err(_) => return None,
                        }
                    } else {
                        key
                    };

                    if key_unesc == keys[key_level as usize].as_bytes() {
                        key_level += 1;
                        if key_level == lk {
                            return Some(i + 1);
                        }
                        // more segments to match: the value must open a
                        // container
                        let next_off = next_token(&data[i + 1..])?;
                        let c = data[i + 1 + next_off];
                        if c != b'{' && c != b'[' {
                            return None;
                        }
                    }
                } else {
                    i -= 1;
                }
            }
            b'{' => level += 1,
            b'}' => {
                level -= 1;
                // leaving a matched subtree without finding the sub-key; a
                // sibling of the matched key may still carry it
                if level == key_level {
                    key_level -= 1;
                }
            }
            b'[' => {
                if key_level == level
                    && level >= 0
                    && index_segment(keys[level as usize]).is_some()
                {
                    match index_segment(keys[level as usize]) {
                        Some(IndexSegment::At(want)) => {
                            let mut cur_idx = 0usize;
                            let mut found: Option<(usize, usize)> = None;
                            let _ = array_each(
                                &data[i..],
                                |v: Value<'_>, off: usize| {
                                    if cur_idx == want {
                                        found = Some((i + off, i + v.end));
                                    }
                                    cur_idx += 1;
                                },
                                &[],
                            );
                            let (elem_start, elem_end) = found?;
                            let sub =
                                search_keys(&data[elem_start..elem_end], &keys[level as usize + 1..])?;
                            return Some(elem_start + sub);
                        }
                        // `[+]`/`[-]` address insertion points, not values
                        _ => return None,
                    }
                } else {
                    let skip = block_end(&data[i..], b'[', b']')?;
                    i += skip - 1;
                }
            }
            _ => {}
        }
        i += 1;
    }

    None
}

/// Locates the opening quote of `key` within an object body.
///
/// The scan is flat: it does not track nesting, so it is only meaningful on
/// the extent of a single object. The needle is unescaped before comparison,
/// as are candidate keys that carry escapes. `None` is the distinguished
/// not-found marker.
pub(crate) fn find_key_start(data: &[u8], key: &str) -> Option<usize> {
    let mut needle_scratch = Scratch::new();
    let needle: &[u8] =
        unescape(key.as_bytes(), &mut needle_scratch).unwrap_or(key.as_bytes());

    let mut scratch = Scratch::new();
    let mut i = 0usize;
    let ln = data.len();

    while i < ln {
        if data[i] == b'"' {
            i += 1;
            let key_begin = i;

            let (se, escaped) = string_end(&data[i..]);
            let se = se?;
            i += se;
            let key_end = i - 1;

            let value_offset = next_token(&data[i..])?;
            i += value_offset;

            let candidate = &data[key_begin..key_end];
            let candidate: &[u8] = if escaped {
                match unescape(candidate, &mut scratch) {
                    Ok(c) => c,
                    Err(_) => {
                        i += 1;
                        continue;
                    }
                }
            } else {
                candidate
            };

            if data[i] == b':' && candidate == needle {
                return Some(key_begin - 1);
            }
        }
        i += 1;
    }

    None
}
