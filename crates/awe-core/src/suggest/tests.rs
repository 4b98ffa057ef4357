use std::sync::Arc;

use super::*;
use crate::dict::{BinaryDictionary, BinaryDictionaryBuilder, FrequencyDictionary};

/// Emits the same words for any query.
struct Fixed(Vec<(&'static str, u32)>);

impl Dictionary for Fixed {
    fn lookup(&self, _word: &WordComposer, emit: &mut dyn FnMut(&str, u32)) {
        for &(w, s) in &self.0 {
            emit(w, s);
        }
    }
}

fn compose(word: &str) -> WordComposer {
    let mut c = WordComposer::new();
    for ch in word.chars() {
        c.add(ch, &[]);
    }
    c
}

fn freq_dict(words: &[(&str, u32)]) -> Arc<FrequencyDictionary> {
    let dict = FrequencyDictionary::new();
    for &(w, f) in words {
        dict.add_word(w, f);
    }
    Arc::new(dict)
}

fn suggest_with_main(words: &[(&str, u32)], mode: CorrectionMode) -> Suggest {
    let mut s = Suggest::new();
    s.add_dictionary(freq_dict(words));
    s.set_correction_mode(mode);
    s
}

#[test]
fn empty_composer_yields_nothing() {
    let mut s = suggest_with_main(&[("hello", 10)], CorrectionMode::Full);
    assert!(s.get_suggestions(&WordComposer::new()).is_empty());
    assert!(!s.has_minimal_correction());
}

#[test]
fn no_dictionaries_yields_nothing() {
    let mut s = Suggest::new();
    s.set_correction_mode(CorrectionMode::Full);
    assert!(s.get_suggestions(&compose("hel")).is_empty());
    assert!(!s.has_minimal_correction());
}

#[test]
fn typed_word_first_then_by_score() {
    let mut s = suggest_with_main(&[("help", 5), ("hello", 10), ("world", 7)], CorrectionMode::Full);
    assert_eq!(s.get_suggestions(&compose("hel")), vec!["hel", "hello", "help"]);
    assert!(s.has_minimal_correction());
}

#[test]
fn short_query_is_not_searched() {
    let mut s = suggest_with_main(&[("help", 10)], CorrectionMode::Full);
    assert!(s.get_suggestions(&compose("h")).is_empty());
    s.set_min_query_len(1);
    assert_eq!(s.get_suggestions(&compose("h")), vec!["h", "help"]);
}

#[test]
fn completions_stop_at_three_letters_per_keystroke() {
    let mut s = suggest_with_main(&[("hello", 20), ("help", 10)], CorrectionMode::Full);
    s.set_min_query_len(1);
    // one keystroke reaches four-letter words only
    assert_eq!(s.get_suggestions(&compose("h")), vec!["h", "help"]);
    assert_eq!(s.get_suggestions(&compose("he")), vec!["he", "hello", "help"]);
}

#[test]
fn mostly_caps_never_corrects() {
    for mode in [CorrectionMode::None, CorrectionMode::Basic, CorrectionMode::Full] {
        let mut s = suggest_with_main(&[("hello", 10)], mode);
        s.set_quick_fixes([("hel".to_string(), "hello".to_string())]);
        let words = s.get_suggestions(&compose("HEL"));
        assert!(words.iter().any(|w| w == "hello"), "{mode:?}");
        assert!(!s.has_minimal_correction(), "{mode:?}");
    }
}

#[test]
fn none_mode_lists_without_correction() {
    let mut s = suggest_with_main(&[("hello", 10)], CorrectionMode::None);
    assert_eq!(s.get_suggestions(&compose("hel")), vec!["hel", "hello"]);
    assert!(!s.has_minimal_correction());
}

#[test]
fn basic_mode_corrects_only_quick_fixes() {
    let mut s = suggest_with_main(&[("hello", 10)], CorrectionMode::Basic);
    s.get_suggestions(&compose("hel"));
    assert!(!s.has_minimal_correction());

    s.set_quick_fixes([("TEH".to_string(), "the".to_string())]);
    assert_eq!(s.get_suggestions(&compose("teh")), vec!["teh", "the"]);
    assert!(s.has_minimal_correction());
}

#[test]
fn quick_fix_follows_capitalization() {
    let mut s = Suggest::new();
    s.set_correction_mode(CorrectionMode::Full);
    s.set_quick_fixes([("teh".to_string(), "the".to_string())]);
    let mut c = compose("Teh");
    c.set_capitalized(true);
    assert_eq!(s.get_suggestions(&c), vec!["Teh", "The"]);
    assert!(s.has_minimal_correction());
}

#[test]
fn capitalized_composer_capitalizes_candidates() {
    let mut s = suggest_with_main(&[("hello", 10), ("help", 5)], CorrectionMode::Full);
    let mut c = compose("Hel");
    c.set_capitalized(true);
    assert_eq!(s.get_suggestions(&c), vec!["Hel", "Hello", "Help"]);
}

#[test]
fn equal_scores_prefer_shorter_words() {
    let mut s = suggest_with_main(&[("abcd", 5), ("abc", 5)], CorrectionMode::Full);
    assert_eq!(s.get_suggestions(&compose("ab")), vec!["ab", "abc", "abcd"]);
}

#[test]
fn list_is_bounded() {
    let words: Vec<(String, u32)> = (0..20).map(|i| (format!("ab{i:02}"), i + 1)).collect();
    let refs: Vec<(&str, u32)> = words.iter().map(|(w, f)| (w.as_str(), *f)).collect();
    let mut s = suggest_with_main(&refs, CorrectionMode::Full);
    s.set_max_suggestions(3);
    assert_eq!(s.get_suggestions(&compose("ab")), vec!["ab", "ab19", "ab18", "ab17"]);
}

#[test]
fn duplicates_keep_highest_score() {
    let mut s = suggest_with_main(&[("hello", 100), ("help", 50)], CorrectionMode::Full);
    s.set_user_dictionary(Some(freq_dict(&[("hello", 1)])));
    assert_eq!(s.get_suggestions(&compose("hel")), vec!["hel", "hello", "help"]);
}

#[test]
fn case_variant_of_typed_word_goes_first() {
    let mut s = suggest_with_main(&[("help", 100), ("Hello", 1)], CorrectionMode::Full);
    let words = s.get_suggestions(&compose("hello"));
    assert_eq!(words[..2], ["hello", "Hello"]);
}

#[test]
fn dissimilar_candidate_is_not_a_correction() {
    let mut s = Suggest::new();
    s.add_dictionary(Arc::new(Fixed(vec![("uvwxyz", 10)])));
    s.set_correction_mode(CorrectionMode::Full);
    assert_eq!(s.get_suggestions(&compose("abcdef")), vec!["abcdef", "uvwxyz"]);
    assert!(!s.has_minimal_correction());
}

#[test]
fn user_hit_on_valid_word_is_a_correction() {
    let mut s = Suggest::new();
    s.set_correction_mode(CorrectionMode::Basic);
    s.set_user_dictionary(Some(freq_dict(&[("cat", 5), ("cats", 5)])));
    s.get_suggestions(&compose("cat"));
    assert!(s.has_minimal_correction());
}

#[test]
fn mode_change_applies_to_next_query() {
    let mut s = suggest_with_main(&[("hello", 10)], CorrectionMode::Full);
    s.get_suggestions(&compose("hel"));
    s.set_correction_mode(CorrectionMode::None);
    assert!(s.has_minimal_correction());
    s.get_suggestions(&compose("hel"));
    assert!(!s.has_minimal_correction());
}

#[test]
fn validity_checks_every_source() {
    let mut s = Suggest::new();
    assert!(!s.is_valid_word("hello"));
    s.set_auto_dictionary(Some(freq_dict(&[("hello", 1)])));
    s.set_contacts_dictionary(Some(freq_dict(&[("Alice", 1)])));
    assert!(s.is_valid_word("hello"));
    assert!(s.is_valid_word("Alice"));
    assert!(!s.is_valid_word(""));
}

#[test]
fn commonality_thresholds() {
    assert!(have_sufficient_commonality("ab", "xy"));
    assert!(have_sufficient_commonality("teh", "the"));
    assert!(!have_sufficient_commonality("abc", "xyz"));
    assert!(have_sufficient_commonality("hellp", "hello"));
    assert!(!have_sufficient_commonality("abcdef", "uvwxyz"));
}

#[test]
fn table_suggestions_come_from_main_dictionaries_only() {
    let mut b = BinaryDictionaryBuilder::new();
    b.extend([("a", "日"), ("a", "曰"), ("ab", "昌"), ("b", "月")]).unwrap();
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("table.dict");
    b.save(&path).unwrap();

    let mut s = Suggest::new();
    s.add_dictionary(Arc::new(BinaryDictionary::open(&path).unwrap()));
    s.set_user_dictionary(Some(freq_dict(&[("abc", 10)])));
    assert_eq!(s.table_suggestions(&compose("a")), vec!["日", "曰", "昌"]);
    assert!(s.table_suggestions(&compose("c")).is_empty());
}
