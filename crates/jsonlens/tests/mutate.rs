//! Buffer rewriting: `set` and `delete`.

use jsonlens::Error;

#[test]
fn set_replaces_an_existing_value() {
    let doc = br#"{"a":{"b":1}}"#;
    let out = jsonlens::set(doc, b"2", &["a", "b"]).unwrap();
    assert_eq!(out, br#"{"a":{"b":2}}"#);
}

#[test]
fn set_replaces_a_string_with_its_quotes() {
    let doc = br#"{"s":"old","t":1}"#;
    let out = jsonlens::set(doc, br#""new""#, &["s"]).unwrap();
    assert_eq!(out, br#"{"s":"new","t":1}"#);
}

#[test]
fn set_creates_nested_path_in_empty_object() {
    let out = jsonlens::set(b"{}", br#""v""#, &["a", "b"]).unwrap();
    assert_eq!(out, br#"{"a":{"b":"v"}}"#);
}

#[test]
fn set_adds_a_member_to_a_populated_object() {
    let doc = br#"{"x":1}"#;
    let out = jsonlens::set(doc, b"2", &["y"]).unwrap();
    assert_eq!(out, br#"{"x":1,"y":2}"#);
}

#[test]
fn set_grows_a_nested_object_prefix() {
    let doc = br#"{"a":{"x":1}}"#;
    let out = jsonlens::set(doc, b"2", &["a", "y"]).unwrap();
    assert_eq!(out, br#"{"a":{"x":1,"y":2}}"#);
}

#[test]
fn set_pads_an_array_to_the_requested_index() {
    let doc = br#"{"a":[1,2]}"#;
    let out = jsonlens::set(doc, b"9", &["a", "[5]"]).unwrap();
    assert_eq!(out, br#"{"a":[1,2,null,null,null,9]}"#);
}

#[test]
fn set_appends_with_plus() {
    let doc = br#"{"a":[1,2]}"#;
    let out = jsonlens::set(doc, b"3", &["a", "[+]"]).unwrap();
    assert_eq!(out, br#"{"a":[1,2,3]}"#);
}

#[test]
fn set_prepends_with_minus() {
    let doc = br#"{"a":[1,2]}"#;
    let out = jsonlens::set(doc, b"0", &["a", "[-]"]).unwrap();
    assert_eq!(out, br#"{"a":[0,1,2]}"#);
}

#[test]
fn set_builds_objects_inside_new_array_elements() {
    let doc = br#"{"a":[1]}"#;
    let out = jsonlens::set(doc, b"9", &["a", "[+]", "b"]).unwrap();
    assert_eq!(out, br#"{"a":[1,{"b":9}]}"#);
}

#[test]
fn set_overwrites_a_scalar_prefix_with_a_container() {
    let doc = br#"{"a":1}"#;
    let out = jsonlens::set(doc, b"2", &["a", "b"]).unwrap();
    assert_eq!(out, br#"{"a":{"b":2}}"#);
}

#[test]
fn set_overwrites_an_empty_array_prefix() {
    let doc = br#"{"a":[]}"#;
    let out = jsonlens::set(doc, b"1", &["a", "[+]"]).unwrap();
    assert_eq!(out, br#"{"a":[1]}"#);
}

#[test]
fn set_replaces_an_existing_array_element() {
    let doc = br#"{"a":[1,2,3]}"#;
    let out = jsonlens::set(doc, b"9", &["a", "[1]"]).unwrap();
    assert_eq!(out, br#"{"a":[1,9,3]}"#);
}

#[test]
fn set_requires_an_object_root_for_new_members() {
    assert_eq!(jsonlens::set(b"", b"1", &["a"]), Err(Error::KeyPathNotFound));
    assert_eq!(jsonlens::set(b"[]", b"1", &["a"]), Err(Error::KeyPathNotFound));
    assert_eq!(jsonlens::set(b"3", b"1", &["a"]), Err(Error::KeyPathNotFound));
}

#[test]
fn set_rejects_an_empty_path() {
    assert_eq!(jsonlens::set(b"{}", b"1", &[]), Err(Error::KeyPathNotFound));
}

#[test]
fn set_respects_trailing_whitespace() {
    let doc = b"{\"a\":1}  \n";
    let out = jsonlens::set(doc, b"2", &["b"]).unwrap();
    assert_eq!(out, b"{\"a\":1,\"b\":2}  \n");
}

#[test]
fn set_then_get_round_trips() {
    let doc = br#"{"a":{"b":[1,2]},"c":3}"#;
    let paths: &[&[&str]] = &[
        &["a", "b", "[0]"],
        &["a", "b", "[5]"],
        &["a", "new"],
        &["fresh", "deep", "deeper"],
        &["c"],
    ];
    for path in paths {
        let out = jsonlens::set(doc, b"777", path).unwrap();
        let v = jsonlens::get(&out, path).unwrap();
        assert_eq!(v.raw, b"777", "path {:?} produced {:?}", path, out);
    }
}

#[test]
fn delete_first_and_last_members() {
    let doc = br#"{"x":1,"y":2}"#;
    let out = jsonlens::delete(doc, &["x"]);
    assert_eq!(out, br#"{"y":2}"#);
    let out = jsonlens::delete(&out, &["y"]);
    assert_eq!(out, br#"{}"#);
}

#[test]
fn delete_missing_key_is_a_no_op() {
    let doc = br#"{"x":1,"y":2}"#;
    assert_eq!(jsonlens::delete(doc, &["z"]), doc);
    assert_eq!(jsonlens::delete(doc, &["x", "nested"]), doc);
}

#[test]
fn delete_is_idempotent() {
    let doc = br#"{"a":1,"b":{"c":2},"d":[3]}"#;
    let once = jsonlens::delete(doc, &["b"]);
    let twice = jsonlens::delete(&once, &["b"]);
    assert_eq!(once, twice);
    assert_eq!(once, br#"{"a":1,"d":[3]}"#);
}

#[test]
fn delete_a_nested_key() {
    let doc = br#"{"a":{"b":1,"c":2}}"#;
    let out = jsonlens::delete(doc, &["a", "b"]);
    assert_eq!(out, br#"{"a":{"c":2}}"#);
}

#[test]
fn delete_array_elements() {
    let doc = br#"{"a":[1,2,3]}"#;
    assert_eq!(jsonlens::delete(doc, &["a", "[0]"]), br#"{"a":[2,3]}"#);
    assert_eq!(jsonlens::delete(doc, &["a", "[1]"]), br#"{"a":[1,3]}"#);
    // deleting the last element rewinds over the preceding comma
    assert_eq!(jsonlens::delete(doc, &["a", "[2]"]), br#"{"a":[1,2]}"#);
    assert_eq!(jsonlens::delete(doc, &["a", "[9]"]), doc);
}

#[test]
fn delete_the_only_member() {
    assert_eq!(jsonlens::delete(br#"{"a":1}"#, &["a"]), br#"{}"#);
    assert_eq!(jsonlens::delete(br#"{"a":[1]}"#, &["a", "[0]"]), br#"{"a":[]}"#);
}

#[test]
fn delete_with_empty_path_empties_the_buffer() {
    assert_eq!(jsonlens::delete(br#"{"a":1}"#, &[]), b"");
}

#[test]
fn delete_value_running_to_end_of_buffer() {
    // no closing brace after the deleted value: end of input plays the role
    // of the closing bracket
    let doc = br#"{"a":1,"b":2"#;
    let out = jsonlens::delete(doc, &["b"]);
    assert_eq!(out, br#"{"a":1"#);
}

#[test]
fn delete_keeps_surrounding_formatting() {
    let doc = b"{ \"a\" : 1 , \"b\" : 2 }";
    let out = jsonlens::delete(doc, &["a"]);
    let v = jsonlens::get_int(&out, &["b"]).unwrap();
    assert_eq!(v, 2);
    assert_eq!(jsonlens::get(&out, &["a"]), Err(Error::KeyPathNotFound));
}
