use std::path::Path;

use super::{compose, words};
use crate::dict::binary::{lower_bound, search_bytes};
use crate::dict::{
    BinaryDictionary, BinaryDictionaryBuilder, DictEntry, DictError, Dictionary, MAX_MATCHES,
};

fn sample_builder() -> BinaryDictionaryBuilder {
    let mut b = BinaryDictionaryBuilder::new();
    b.extend([
        ("zoo", "zoo"),
        ("the", "the"),
        ("they", "they"),
        ("then", "then"),
        ("there", "there"),
        ("apple", "apple"),
    ])
    .unwrap();
    b
}

fn write_dict(dir: &Path, builder: &BinaryDictionaryBuilder) -> BinaryDictionary {
    let path = dir.join("main.dict");
    builder.save(&path).unwrap();
    BinaryDictionary::open(&path).unwrap()
}

#[test]
fn layout_is_big_endian_with_padded_keys() {
    let mut b = BinaryDictionaryBuilder::new();
    b.push("AB", "ab").unwrap();
    let bytes = b.build().unwrap();
    assert_eq!(&bytes[..4], &[0, 0, 0, 1]);
    assert_eq!(&bytes[4..9], b"ab   ");
    assert_eq!(&bytes[9..13], &[0, 0, 0, 0]);
    assert_eq!(&bytes[13..], b"ab\n");
}

#[test]
fn prefix_search_returns_run_in_disk_order() {
    let dir = tempfile::tempdir().unwrap();
    let dict = write_dict(dir.path(), &sample_builder());
    assert_eq!(dict.item_count().unwrap(), 6);

    let entries = dict.search("the").unwrap();
    assert_eq!(
        entries,
        vec![
            DictEntry::new("the", 4),
            DictEntry::new("then", 3),
            DictEntry::new("there", 2),
            DictEntry::new("they", 1),
        ]
    );
    assert_eq!(words(dict.search("ther").unwrap()), vec!["there"]);
    assert!(dict.search("x").unwrap().is_empty());
}

#[test]
fn same_key_keeps_push_order() {
    let mut b = BinaryDictionaryBuilder::new();
    b.push("a", "alpha").unwrap();
    b.push("b", "beta").unwrap();
    b.push("a", "able").unwrap();
    let dir = tempfile::tempdir().unwrap();
    let dict = write_dict(dir.path(), &b);
    assert_eq!(
        dict.search("a").unwrap(),
        vec![DictEntry::new("alpha", 2), DictEntry::new("able", 1)]
    );
}

#[test]
fn query_longer_than_key_matches_nothing() {
    let mut b = BinaryDictionaryBuilder::new();
    b.push("abcdefg", "abcdefg").unwrap();
    b.push("abcdexy", "abcdexy").unwrap();
    b.push("abcdezz", "abcdezz").unwrap();
    let dir = tempfile::tempdir().unwrap();
    let dict = write_dict(dir.path(), &b);
    assert_eq!(
        dict.search("abcde").unwrap(),
        vec![
            DictEntry::new("abcdefg", 3),
            DictEntry::new("abcdexy", 2),
            DictEntry::new("abcdezz", 1),
        ]
    );
    assert!(dict.search("abcdez").unwrap().is_empty());
    assert!(dict.lookup_entries(&compose("abcdefg")).is_empty());
}

#[test]
fn full_width_key_run_is_capped() {
    let mut b = BinaryDictionaryBuilder::new();
    for i in 0..120 {
        b.push("inter", &format!("intera{i:03}")).unwrap();
    }
    b.push("inter", "interzone").unwrap();
    let dir = tempfile::tempdir().unwrap();
    let dict = write_dict(dir.path(), &b);
    let entries = dict.search("inter").unwrap();
    assert_eq!(entries.len(), MAX_MATCHES);
    assert_eq!(entries[0], DictEntry::new("intera000", MAX_MATCHES as u32));
    assert!(entries.iter().all(|e| e.word != "interzone"));
    assert!(dict.search("interz").unwrap().is_empty());
}

#[test]
fn matches_are_capped() {
    let mut b = BinaryDictionaryBuilder::new();
    for i in 0..150 {
        b.push("aa", &format!("aa{i:03}")).unwrap();
    }
    let bytes = b.build().unwrap();
    let entries = search_bytes(&bytes, b"aa").unwrap();
    assert_eq!(entries.len(), MAX_MATCHES);
    assert_eq!(entries[0].frequency, MAX_MATCHES as u32);
    assert_eq!(entries[0].word, "aa000");
    assert_eq!(entries[MAX_MATCHES - 1].frequency, 1);
}

#[test]
fn lower_bound_finds_first_occurrence() {
    let mut b = BinaryDictionaryBuilder::new();
    for key in ["b", "a", "c", "b", "b", "d"] {
        b.push(key, key).unwrap();
    }
    let bytes = b.build().unwrap();
    assert_eq!(lower_bound(&bytes, 6, b"a").unwrap(), 0);
    assert_eq!(lower_bound(&bytes, 6, b"b").unwrap(), 1);
    assert_eq!(lower_bound(&bytes, 6, b"c").unwrap(), 4);
    assert_eq!(lower_bound(&bytes, 6, b"bb").unwrap(), 4);
    assert_eq!(lower_bound(&bytes, 6, b"z").unwrap(), 6);
}

#[test]
fn lookup_lowercases_query() {
    let dir = tempfile::tempdir().unwrap();
    let dict = write_dict(dir.path(), &sample_builder());
    let found = words(dict.lookup_entries(&compose("THER")));
    assert_eq!(found, vec!["there"]);
    assert!(!dict.is_valid_word("the"));
}

#[test]
fn truncated_body_yields_no_candidates() {
    let bytes = sample_builder().build().unwrap();
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("broken.dict");
    std::fs::write(&path, &bytes[..bytes.len() - 3]).unwrap();

    let dict = BinaryDictionary::open(&path).unwrap();
    assert!(matches!(
        dict.search("zoo"),
        Err(DictError::Truncated { .. })
    ));
    assert!(dict.lookup_entries(&compose("zoo")).is_empty());
    // groups before the damage still read fine
    assert_eq!(words(dict.search("app").unwrap()), vec!["apple"]);
}

#[test]
fn truncated_index_yields_no_candidates() {
    let bytes = sample_builder().build().unwrap();
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("broken.dict");
    std::fs::write(&path, &bytes[..20]).unwrap();

    let dict = BinaryDictionary::open(&path).unwrap();
    assert!(dict.lookup_entries(&compose("the")).is_empty());
}

#[test]
fn empty_file_opens_and_finds_nothing() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("empty.dict");
    std::fs::write(&path, b"").unwrap();

    let dict = BinaryDictionary::open(&path).unwrap();
    assert!(dict.lookup_entries(&compose("a")).is_empty());
}

#[test]
fn open_missing_file_fails() {
    let dir = tempfile::tempdir().unwrap();
    let result = BinaryDictionary::open(&dir.path().join("nope.dict"));
    assert!(matches!(result, Err(DictError::Io(_))));
}

#[test]
fn close_is_idempotent() {
    let dir = tempfile::tempdir().unwrap();
    let dict = write_dict(dir.path(), &sample_builder());
    dict.close();
    dict.close();
    assert!(dict.is_closed());
    assert!(matches!(dict.search("the"), Err(DictError::Closed)));
    assert!(dict.lookup_entries(&compose("the")).is_empty());
}

#[test]
fn newline_in_word_is_rejected() {
    let mut b = BinaryDictionaryBuilder::new();
    assert!(matches!(b.push("a", "a\nb"), Err(DictError::Parse(_))));
    assert!(b.is_empty());
}

#[test]
fn saving_over_open_file_keeps_old_mapping() {
    let dir = tempfile::tempdir().unwrap();
    let dict = write_dict(dir.path(), &sample_builder());

    let mut replacement = BinaryDictionaryBuilder::new();
    replacement.push("thx", "thx").unwrap();
    replacement.save(&dir.path().join("main.dict")).unwrap();

    assert_eq!(words(dict.search("ther").unwrap()), vec!["there"]);
    let reopened = BinaryDictionary::open(&dir.path().join("main.dict")).unwrap();
    assert!(reopened.search("ther").unwrap().is_empty());
    assert_eq!(words(reopened.search("thx").unwrap()), vec!["thx"]);
}
