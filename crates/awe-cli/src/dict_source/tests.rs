use std::path::Path;

use awe_core::dict::BinaryDictionary;

use super::*;

const SAMPLE_CIN: &str = "\
# sample table
%gen_inp
%ename sample
%keyname begin
a 日
b 月
%keyname end
%chardef begin
a 日
a 曰
ab 昌
b 月
%chardef end
";

#[test]
fn cin_reads_only_chardef() {
    let pairs = CinSource.parse(SAMPLE_CIN).unwrap();
    assert_eq!(
        pairs,
        vec![
            ("a".to_string(), "日".to_string()),
            ("a".to_string(), "曰".to_string()),
            ("ab".to_string(), "昌".to_string()),
            ("b".to_string(), "月".to_string()),
        ]
    );
}

#[test]
fn cin_errors() {
    assert!(CinSource.parse("%chardef begin\na 日\n").is_err());
    assert!(CinSource.parse("a 日\n").is_err());
    let err = CinSource.parse("%chardef begin\nlonely\n%chardef end\n").unwrap_err();
    assert!(matches!(err, DictSourceError::Parse { line: 2, .. }));
}

#[test]
fn tsv_orders_by_frequency() {
    let pairs = TsvSource.parse("then\t5\nthe\t90\n# comment\n\nthey\n").unwrap();
    let words: Vec<&str> = pairs.iter().map(|(_, w)| w.as_str()).collect();
    assert_eq!(words, vec!["the", "then", "they"]);
    assert!(pairs.iter().all(|(k, w)| k == w));
}

#[test]
fn tsv_rejects_bad_frequency() {
    let err = TsvSource.parse("the\tlots\n").unwrap_err();
    assert!(matches!(err, DictSourceError::Parse { line: 1, .. }));
}

#[test]
fn build_and_search_cin_table() {
    let dir = tempfile::tempdir().unwrap();
    let src = dir.path().join("sample.cin");
    std::fs::write(&src, SAMPLE_CIN).unwrap();
    let out = dir.path().join("sample.dict");

    let source = from_name(format_for_path(&src)).unwrap();
    build_from_file(source.as_ref(), &src).unwrap().save(&out).unwrap();

    let dict = BinaryDictionary::open(&out).unwrap();
    let words: Vec<String> = dict.search("a").unwrap().into_iter().map(|e| e.word).collect();
    assert_eq!(words, vec!["日", "曰", "昌"]);
}

#[test]
fn unknown_format() {
    assert!(from_name("xml").is_none());
    assert_eq!(format_for_path(Path::new("words.txt")), "tsv");
}
