use std::sync::Arc;

use crate::dict::{AutoDictionary, Dictionary, LearningPolicy, FREQUENCY_FOR_PICKED};
use crate::user_dict::UserDictionary;

fn with_user() -> (AutoDictionary, Arc<UserDictionary>) {
    let user = Arc::new(UserDictionary::new());
    let auto = AutoDictionary::new(LearningPolicy::default(), Some(Arc::clone(&user)));
    (auto, user)
}

#[test]
fn thresholds_follow_pick_weight() {
    let policy = LearningPolicy::default();
    assert_eq!(policy.validity_threshold(), 6);
    assert_eq!(policy.promotion_threshold(), 15);
}

#[test]
fn two_picks_make_valid_without_promoting() {
    let (auto, user) = with_user();
    auto.add_word("hello", FREQUENCY_FOR_PICKED);
    assert!(!auto.is_valid_word("hello"));
    auto.add_word("hello", FREQUENCY_FOR_PICKED);
    assert!(auto.is_valid_word("hello"));
    assert!(!user.contains("hello"));
}

#[test]
fn five_picks_promote_exactly_once() {
    let (auto, user) = with_user();
    for _ in 0..5 {
        auto.add_word("hello", FREQUENCY_FOR_PICKED);
    }
    assert!(user.contains("hello"));
    assert_eq!(user.word_frequency("hello"), 250);

    user.remove_word("hello");
    auto.add_word("hello", FREQUENCY_FOR_PICKED);
    assert!(!user.contains("hello"));
    assert_eq!(auto.word_frequency("hello"), 18);
}

#[test]
fn short_words_are_not_learned() {
    let (auto, _) = with_user();
    assert_eq!(auto.add_word("a", 3), None);
    assert!(auto.is_empty());
    assert_eq!(auto.add_word("an", 3), Some(3));
}

#[test]
fn long_words_follow_policy_limit() {
    let policy = LearningPolicy {
        max_word_length: 4,
        ..LearningPolicy::default()
    };
    let auto = AutoDictionary::new(policy, None);
    assert_eq!(auto.add_word("hello", 3), None);
    assert_eq!(auto.add_word("help", 3), Some(3));
}

#[test]
fn promotion_without_user_dictionary_is_skipped() {
    let auto = AutoDictionary::new(LearningPolicy::default(), None);
    for _ in 0..6 {
        auto.add_word("hello", FREQUENCY_FOR_PICKED);
    }
    assert_eq!(auto.word_frequency("hello"), 18);
    assert_eq!(auto.len(), 1);
}
