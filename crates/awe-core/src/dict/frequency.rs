use std::sync::{PoisonError, RwLock};

use tracing::{debug, debug_span};

use super::{DictEntry, Dictionary};
use crate::composer::{Keystroke, WordComposer};
use crate::text::fold_case;

/// Longest word (in characters) a frequency dictionary will track.
pub const MAX_WORD_LENGTH: usize = 32;

const PRIMARY_MULTIPLIER: u32 = 3;
const NEARBY_MULTIPLIER: u32 = 1;
const FULL_WORD_MULTIPLIER: u32 = 2;
const QUOTE: char = '\'';

#[derive(Debug)]
struct Node {
    ch: char,
    frequency: u32,
    terminal: bool,
    children: Vec<Node>,
}

impl Node {
    fn new(ch: char) -> Self {
        Self {
            ch,
            frequency: 0,
            terminal: false,
            children: Vec::new(),
        }
    }
}

#[derive(Debug, Default)]
struct Trie {
    roots: Vec<Node>,
    words: usize,
}

/// In-memory word → frequency trie with key-proximity lookup.
///
/// Interior mutability lets sessions learn words while other readers query
/// the same instance.
#[derive(Debug)]
pub struct FrequencyDictionary {
    trie: RwLock<Trie>,
    max_word_length: usize,
}

impl Default for FrequencyDictionary {
    fn default() -> Self {
        Self::new()
    }
}

impl FrequencyDictionary {
    pub fn new() -> Self {
        Self::with_max_word_length(MAX_WORD_LENGTH)
    }

    pub fn with_max_word_length(max_word_length: usize) -> Self {
        Self {
            trie: RwLock::new(Trie::default()),
            max_word_length,
        }
    }

    pub fn max_word_length(&self) -> usize {
        self.max_word_length
    }

    /// Increase the frequency of `word` by `frequency`, inserting it if absent.
    ///
    /// Returns the accumulated frequency, or `None` when the word is empty or
    /// longer than the tracked maximum.
    pub fn add_word(&self, word: &str, frequency: u32) -> Option<u32> {
        let len = word.chars().count();
        if len == 0 || len > self.max_word_length {
            debug!(word, len, "ignoring word outside tracked length");
            return None;
        }
        let mut guard = self.trie.write().unwrap_or_else(PoisonError::into_inner);
        let Trie { roots, words } = &mut *guard;
        let mut level = roots;
        let mut chars = word.chars().peekable();
        while let Some(ch) = chars.next() {
            let idx = match level.iter().position(|n| n.ch == ch) {
                Some(i) => i,
                None => {
                    level.push(Node::new(ch));
                    level.len() - 1
                }
            };
            if chars.peek().is_none() {
                let node = &mut level[idx];
                if !node.terminal {
                    node.terminal = true;
                    *words += 1;
                }
                node.frequency = node.frequency.saturating_add(frequency);
                return Some(node.frequency);
            }
            level = &mut level[idx].children;
        }
        None
    }

    /// Accumulated frequency of `word`, 0 if absent.
    pub fn word_frequency(&self, word: &str) -> u32 {
        let trie = self.trie.read().unwrap_or_else(PoisonError::into_inner);
        find(&trie.roots, word).map_or(0, |n| n.frequency)
    }

    pub fn contains(&self, word: &str) -> bool {
        let trie = self.trie.read().unwrap_or_else(PoisonError::into_inner);
        find(&trie.roots, word).is_some()
    }

    /// Remove `word`. Returns `true` if it was present.
    pub fn remove(&self, word: &str) -> bool {
        let chars: Vec<char> = word.chars().collect();
        if chars.is_empty() {
            return false;
        }
        let mut trie = self.trie.write().unwrap_or_else(PoisonError::into_inner);
        let removed = remove_rec(&mut trie.roots, &chars);
        if removed {
            trie.words -= 1;
        }
        removed
    }

    pub fn clear(&self) {
        let mut trie = self.trie.write().unwrap_or_else(PoisonError::into_inner);
        *trie = Trie::default();
    }

    pub fn len(&self) -> usize {
        self.trie
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .words
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Words starting with `prefix` (case-insensitive), by descending
    /// frequency with ties in lexical order.
    pub fn predict(&self, prefix: &str, max_results: usize) -> Vec<DictEntry> {
        let trie = self.trie.read().unwrap_or_else(PoisonError::into_inner);
        let prefix: Vec<char> = prefix.chars().map(fold_case).collect();
        let mut out = Vec::new();
        let mut buf = String::new();
        collect_prefixed(&trie.roots, &prefix, &mut buf, &mut out);
        drop(trie);
        out.sort_by(|a, b| b.frequency.cmp(&a.frequency).then_with(|| a.word.cmp(&b.word)));
        out.truncate(max_results);
        out
    }

    /// Every stored word, in lexical order.
    pub fn words(&self) -> Vec<DictEntry> {
        let trie = self.trie.read().unwrap_or_else(PoisonError::into_inner);
        let mut out = Vec::with_capacity(trie.words);
        let mut buf = String::new();
        collect_all(&trie.roots, &mut buf, &mut out);
        drop(trie);
        out.sort_by(|a, b| a.word.cmp(&b.word));
        out
    }
}

impl Dictionary for FrequencyDictionary {
    fn lookup(&self, word: &WordComposer, emit: &mut dyn FnMut(&str, u32)) {
        if word.is_empty() {
            return;
        }
        let _span = debug_span!("frequency_lookup", typed = word.typed_word()).entered();
        let trie = self.trie.read().unwrap_or_else(PoisonError::into_inner);
        let mut walk = ProximityWalk {
            keys: word.keystrokes(),
            typed: word.typed_word(),
            max_depth: word.len() * 3,
            buf: String::new(),
            emit,
        };
        walk.matching(&trie.roots, 0, 0, 1);
    }

    fn is_valid_word(&self, word: &str) -> bool {
        self.contains(word)
    }
}

struct ProximityWalk<'a, 'e> {
    keys: &'a [Keystroke],
    typed: &'a str,
    max_depth: usize,
    buf: String,
    emit: &'e mut dyn FnMut(&str, u32),
}

impl ProximityWalk<'_, '_> {
    /// Match `nodes` against keystroke `input` while typed positions remain.
    fn matching(&mut self, nodes: &[Node], depth: usize, input: usize, multiplier: u32) {
        if depth > self.max_depth {
            return;
        }
        let keys = self.keys;
        let key = &keys[input];
        for node in nodes {
            if node.ch == QUOTE && key.primary != QUOTE {
                self.buf.push(node.ch);
                self.matching(&node.children, depth + 1, input, multiplier);
                self.buf.pop();
                continue;
            }
            let lower = fold_case(node.ch);
            for (j, code) in key.codes().enumerate() {
                if code != lower && code != node.ch {
                    continue;
                }
                let weight = if j == 0 {
                    PRIMARY_MULTIPLIER
                } else {
                    NEARBY_MULTIPLIER
                };
                let score = multiplier.saturating_mul(weight);
                self.buf.push(node.ch);
                if input + 1 == keys.len() {
                    if node.terminal && self.buf != self.typed {
                        let freq = node
                            .frequency
                            .saturating_mul(score)
                            .saturating_mul(FULL_WORD_MULTIPLIER);
                        (self.emit)(&self.buf, freq);
                    }
                    self.completions(&node.children, depth + 1, score);
                } else {
                    self.matching(&node.children, depth + 1, input + 1, score);
                }
                self.buf.pop();
                // first matching code wins
                break;
            }
        }
    }

    /// Emit every word below `nodes` once all typed positions are matched.
    fn completions(&mut self, nodes: &[Node], depth: usize, multiplier: u32) {
        if depth > self.max_depth {
            return;
        }
        for node in nodes {
            self.buf.push(node.ch);
            if node.terminal {
                (self.emit)(&self.buf, node.frequency.saturating_mul(multiplier));
            }
            self.completions(&node.children, depth + 1, multiplier);
            self.buf.pop();
        }
    }
}

fn find<'a>(mut nodes: &'a [Node], word: &str) -> Option<&'a Node> {
    let mut found = None;
    for ch in word.chars() {
        let node = nodes.iter().find(|n| n.ch == ch)?;
        nodes = &node.children;
        found = Some(node);
    }
    found.filter(|n| n.terminal)
}

fn remove_rec(nodes: &mut Vec<Node>, chars: &[char]) -> bool {
    let Some(idx) = nodes.iter().position(|n| n.ch == chars[0]) else {
        return false;
    };
    let removed = if chars.len() == 1 {
        let node = &mut nodes[idx];
        let was = node.terminal;
        node.terminal = false;
        node.frequency = 0;
        was
    } else {
        remove_rec(&mut nodes[idx].children, &chars[1..])
    };
    if removed && !nodes[idx].terminal && nodes[idx].children.is_empty() {
        nodes.remove(idx);
    }
    removed
}

fn collect_all(nodes: &[Node], buf: &mut String, out: &mut Vec<DictEntry>) {
    for node in nodes {
        buf.push(node.ch);
        if node.terminal {
            out.push(DictEntry::new(buf.clone(), node.frequency));
        }
        collect_all(&node.children, buf, out);
        buf.pop();
    }
}

fn collect_prefixed(nodes: &[Node], prefix: &[char], buf: &mut String, out: &mut Vec<DictEntry>) {
    let Some((&first, rest)) = prefix.split_first() else {
        collect_all(nodes, buf, out);
        return;
    };
    for node in nodes.iter().filter(|n| fold_case(n.ch) == first) {
        buf.push(node.ch);
        if rest.is_empty() && node.terminal {
            out.push(DictEntry::new(buf.clone(), node.frequency));
        }
        collect_prefixed(&node.children, rest, buf, out);
        buf.pop();
    }
}
