mod auto;
mod binary;

use crate::composer::WordComposer;

pub(super) fn compose(word: &str) -> WordComposer {
    let mut c = WordComposer::new();
    for ch in word.chars() {
        c.add(ch, &[]);
    }
    c
}

pub(super) fn words(entries: Vec<crate::dict::DictEntry>) -> Vec<String> {
    entries.into_iter().map(|e| e.word).collect()
}
