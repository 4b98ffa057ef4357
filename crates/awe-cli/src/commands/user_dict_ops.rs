use std::path::Path;

use awe_core::dict::FREQUENCY_FOR_EXPLICIT_ADD;
use awe_core::user_dict::UserDictionary;

pub fn default_user_dict_path() -> String {
    let home = std::env::var("HOME").unwrap_or_else(|_| "/tmp".to_string());
    format!("{home}/.local/share/awe/user_dict.awud")
}

pub fn user_dict_add(path: &Path, word: &str, frequency: Option<u32>) {
    let dict = die!(
        UserDictionary::open(path),
        "Error opening user dictionary: {}"
    );
    if dict.add_word(word, frequency.unwrap_or(FREQUENCY_FOR_EXPLICIT_ADD)) {
        die!(dict.save(path), "Error saving user dictionary: {}");
        println!("Added: {word}");
    } else {
        println!("Already exists: {word}");
    }
}

pub fn user_dict_remove(path: &Path, word: &str) {
    let dict = die!(
        UserDictionary::open(path),
        "Error opening user dictionary: {}"
    );
    if dict.remove_word(word) {
        die!(dict.save(path), "Error saving user dictionary: {}");
        println!("Removed: {word}");
    } else {
        println!("Not found: {word}");
    }
}

pub fn user_dict_list(path: &Path) {
    let dict = die!(
        UserDictionary::open(path),
        "Error opening user dictionary: {}"
    );
    let entries = dict.list();
    if entries.is_empty() {
        println!("(empty)");
    } else {
        for e in &entries {
            println!("{}\t{}", e.word, e.frequency);
        }
        println!("---");
        println!("{} entries", entries.len());
    }
}
