#![no_main]
//! Drives the read and mutation APIs over arbitrary bytes: whatever the
//! input, the accessors must return without panicking or reading out of
//! bounds, and any slice they hand back must lie inside the input.

use libfuzzer_sys::fuzz_target;

const PATHS: &[&[&str]] = &[
    &[],
    &["a"],
    &["a", "b"],
    &["a", "[0]"],
    &["a", "[2]", "b"],
    &["\u{1f600}", "key with spaces"],
];

fuzz_target!(|data: &[u8]| {
    for path in PATHS {
        if let Ok(v) = jsonlens::get(data, path) {
            assert!(v.end <= data.len());
            assert!(v.raw.len() <= data.len());
        }
        let _ = jsonlens::get_string(data, path);
        let _ = jsonlens::get_int(data, path);
        let _ = jsonlens::get_float(data, path);
        let _ = jsonlens::get_boolean(data, path);

        let out = jsonlens::delete(data, path);
        assert!(out.len() <= data.len());

        if let Ok(out) = jsonlens::set(data, b"42", path) {
            let _ = jsonlens::get(&out, path);
        }
    }

    let _ = jsonlens::array_each(data, |v, offset| {
        assert!(offset < data.len());
        assert!(v.end <= data.len());
    }, &[]);

    let _ = jsonlens::object_each(data, |_, v| {
        assert!(v.end <= data.len());
        Ok(())
    }, &[]);

    let _ = jsonlens::each_key(data, |_, _| {}, &[&["a"], &["a", "b"], &["c", "[1]"]]);

    let _ = jsonlens::parse_string(data);
    let _ = jsonlens::parse_int(data);
    let _ = jsonlens::parse_float(data);
    let _ = jsonlens::parse_boolean(data);
});
