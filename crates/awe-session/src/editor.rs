//! Host text-editing surface.
//!
//! The session never talks to a concrete text field; it drives an
//! [`EditorConnection`]. [`TextBuffer`] is an in-memory implementation used
//! by the CLI replay tool and the tests.

/// Operations the session needs from the focused text field.
///
/// Offsets and counts are in characters. Writes replace the composing region
/// when one exists, otherwise the selection.
pub trait EditorConnection {
    fn commit_text(&mut self, text: &str);
    /// Replace (or start) the composing region with `text`.
    fn set_composing_text(&mut self, text: &str);
    /// Keep the composing text as-is and end the composing region.
    fn finish_composing_text(&mut self);
    fn delete_surrounding_text(&mut self, before: usize, after: usize);
    fn text_before_cursor(&self, n: usize) -> String;
    fn text_after_cursor(&self, n: usize) -> String;
    /// Whether the next character typed at the cursor starts a sentence.
    fn cursor_caps_mode(&self) -> bool;
    fn begin_batch_edit(&mut self) {}
    fn end_batch_edit(&mut self) {}
}

/// The editor the session is attached to, if any. Every operation is a
/// no-op (or returns an empty value) while detached.
pub(crate) struct Host<E>(Option<E>);

impl<E: EditorConnection> Host<E> {
    pub(crate) fn detached() -> Self {
        Self(None)
    }

    pub(crate) fn attach(&mut self, editor: E) -> Option<E> {
        self.0.replace(editor)
    }

    pub(crate) fn detach(&mut self) -> Option<E> {
        self.0.take()
    }

    pub(crate) fn is_attached(&self) -> bool {
        self.0.is_some()
    }

    pub(crate) fn get(&self) -> Option<&E> {
        self.0.as_ref()
    }

    pub(crate) fn get_mut(&mut self) -> Option<&mut E> {
        self.0.as_mut()
    }

    pub(crate) fn commit_text(&mut self, text: &str) {
        if let Some(e) = &mut self.0 {
            e.commit_text(text);
        }
    }

    pub(crate) fn send_char(&mut self, c: char) {
        let mut buf = [0u8; 4];
        self.commit_text(c.encode_utf8(&mut buf));
    }

    /// A single delete key press.
    pub(crate) fn send_delete(&mut self) {
        self.delete_before(1);
    }

    pub(crate) fn set_composing_text(&mut self, text: &str) {
        if let Some(e) = &mut self.0 {
            e.set_composing_text(text);
        }
    }

    pub(crate) fn finish_composing_text(&mut self) {
        if let Some(e) = &mut self.0 {
            e.finish_composing_text();
        }
    }

    pub(crate) fn delete_before(&mut self, n: usize) {
        if let Some(e) = &mut self.0 {
            e.delete_surrounding_text(n, 0);
        }
    }

    pub(crate) fn text_before_cursor(&self, n: usize) -> String {
        self.0
            .as_ref()
            .map(|e| e.text_before_cursor(n))
            .unwrap_or_default()
    }

    pub(crate) fn text_after_cursor(&self, n: usize) -> String {
        self.0
            .as_ref()
            .map(|e| e.text_after_cursor(n))
            .unwrap_or_default()
    }

    pub(crate) fn char_before_cursor(&self) -> Option<char> {
        self.text_before_cursor(1).chars().next()
    }

    pub(crate) fn char_after_cursor(&self) -> Option<char> {
        self.text_after_cursor(1).chars().next()
    }

    pub(crate) fn cursor_caps_mode(&self) -> bool {
        self.0.as_ref().is_some_and(|e| e.cursor_caps_mode())
    }

    pub(crate) fn begin_batch_edit(&mut self) {
        if let Some(e) = &mut self.0 {
            e.begin_batch_edit();
        }
    }

    pub(crate) fn end_batch_edit(&mut self) {
        if let Some(e) = &mut self.0 {
            e.end_batch_edit();
        }
    }
}

/// In-memory editable text with a selection and an optional composing
/// region.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TextBuffer {
    text: Vec<char>,
    selection: (usize, usize),
    composing: Option<(usize, usize)>,
    batch_depth: usize,
    batches: usize,
}

impl TextBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    /// A buffer holding `text` with the cursor at the end.
    pub fn with_text(text: &str) -> Self {
        let text: Vec<char> = text.chars().collect();
        let end = text.len();
        Self {
            text,
            selection: (end, end),
            ..Self::default()
        }
    }

    pub fn text(&self) -> String {
        self.text.iter().collect()
    }

    /// Caret position (start of the selection).
    pub fn cursor(&self) -> usize {
        self.selection.0
    }

    pub fn selection(&self) -> (usize, usize) {
        self.selection
    }

    pub fn composing(&self) -> Option<(usize, usize)> {
        self.composing
    }

    pub fn composing_text(&self) -> String {
        self.composing
            .map(|(s, e)| self.text[s..e].iter().collect())
            .unwrap_or_default()
    }

    /// Number of batch edits currently open.
    pub fn batch_depth(&self) -> usize {
        self.batch_depth
    }

    /// Number of batch edits closed so far.
    pub fn completed_batches(&self) -> usize {
        self.batches
    }

    /// Move the selection, clamped to the text. The composing region is kept.
    pub fn set_selection(&mut self, start: usize, end: usize) {
        let len = self.text.len();
        let (start, end) = (start.min(len), end.min(len));
        self.selection = (start.min(end), start.max(end));
    }

    /// Replace `start..end` with `with`, shifting the selection and the
    /// composing region. Returns the end of the inserted text.
    fn splice(&mut self, start: usize, end: usize, with: &str) -> usize {
        let inserted: Vec<char> = with.chars().collect();
        let added = inserted.len();
        let removed = end - start;
        self.text.splice(start..end, inserted);
        let shift = |pos: usize| {
            if pos >= end {
                pos + added - removed
            } else if pos > start {
                start
            } else {
                pos
            }
        };
        self.selection = (shift(self.selection.0), shift(self.selection.1));
        self.composing = self
            .composing
            .map(|(s, e)| (shift(s), shift(e)))
            .filter(|(s, e)| s < e);
        start + added
    }

    /// Region that writes replace.
    fn target(&self) -> (usize, usize) {
        self.composing.unwrap_or(self.selection)
    }
}

impl EditorConnection for TextBuffer {
    fn commit_text(&mut self, text: &str) {
        let (start, end) = self.target();
        self.composing = None;
        let caret = self.splice(start, end, text);
        self.selection = (caret, caret);
    }

    fn set_composing_text(&mut self, text: &str) {
        let (start, end) = self.target();
        self.composing = None;
        let caret = self.splice(start, end, text);
        self.selection = (caret, caret);
        if caret > start {
            self.composing = Some((start, caret));
        }
    }

    fn finish_composing_text(&mut self) {
        self.composing = None;
    }

    fn delete_surrounding_text(&mut self, before: usize, after: usize) {
        let (start, end) = self.selection;
        let after_end = (end + after).min(self.text.len());
        self.splice(end, after_end, "");
        self.splice(start.saturating_sub(before), start, "");
    }

    fn text_before_cursor(&self, n: usize) -> String {
        let end = self.selection.0;
        self.text[end.saturating_sub(n)..end].iter().collect()
    }

    fn text_after_cursor(&self, n: usize) -> String {
        let start = self.selection.1;
        let end = (start + n).min(self.text.len());
        self.text[start..end].iter().collect()
    }

    fn cursor_caps_mode(&self) -> bool {
        let before = &self.text[..self.selection.0];
        let trimmed = before
            .iter()
            .rposition(|c| !matches!(c, ' ' | '\t'))
            .map(|i| &before[..=i]);
        match trimmed {
            None => true,
            Some(t) => match t.last() {
                Some('\n') => true,
                Some('.' | '!' | '?') => t.len() < before.len(),
                _ => false,
            },
        }
    }

    fn begin_batch_edit(&mut self) {
        self.batch_depth += 1;
    }

    fn end_batch_edit(&mut self) {
        if self.batch_depth > 0 {
            self.batch_depth -= 1;
            self.batches += 1;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn composing_then_commit_replaces_region() {
        let mut b = TextBuffer::with_text("say ");
        b.set_composing_text("hel");
        assert_eq!(b.composing(), Some((4, 7)));
        b.set_composing_text("hell");
        assert_eq!(b.text(), "say hell");
        b.commit_text("hello");
        assert_eq!(b.text(), "say hello");
        assert_eq!(b.composing(), None);
        assert_eq!(b.cursor(), 9);
    }

    #[test]
    fn empty_composing_text_ends_region() {
        let mut b = TextBuffer::new();
        b.set_composing_text("a");
        b.set_composing_text("");
        assert_eq!(b.text(), "");
        assert_eq!(b.composing(), None);
    }

    #[test]
    fn finish_keeps_text() {
        let mut b = TextBuffer::new();
        b.set_composing_text("word");
        b.finish_composing_text();
        assert_eq!(b.text(), "word");
        b.commit_text("!");
        assert_eq!(b.text(), "word!");
    }

    #[test]
    fn delete_surrounding_is_clamped() {
        let mut b = TextBuffer::with_text("abcdef");
        b.set_selection(3, 3);
        b.delete_surrounding_text(10, 1);
        assert_eq!(b.text(), "ef");
        assert_eq!(b.cursor(), 0);
    }

    #[test]
    fn delete_shifts_composing_region() {
        let mut b = TextBuffer::with_text("x ");
        b.set_composing_text("yz");
        b.set_selection(1, 1);
        b.delete_surrounding_text(1, 0);
        assert_eq!(b.text(), " yz");
        assert_eq!(b.composing(), Some((1, 3)));
    }

    #[test]
    fn text_around_cursor_counts_chars() {
        let mut b = TextBuffer::with_text("héllo wörld");
        b.set_selection(5, 5);
        assert_eq!(b.text_before_cursor(3), "llo");
        assert_eq!(b.text_after_cursor(3), " wö");
        assert_eq!(b.text_before_cursor(100), "héllo");
    }

    #[test]
    fn caps_mode_at_sentence_start() {
        assert!(TextBuffer::new().cursor_caps_mode());
        assert!(TextBuffer::with_text("Done. ").cursor_caps_mode());
        assert!(TextBuffer::with_text("Really?  ").cursor_caps_mode());
        assert!(TextBuffer::with_text("line\n").cursor_caps_mode());
        assert!(!TextBuffer::with_text("Done.").cursor_caps_mode());
        assert!(!TextBuffer::with_text("hello ").cursor_caps_mode());
    }

    #[test]
    fn batches_nest() {
        let mut b = TextBuffer::new();
        b.begin_batch_edit();
        b.begin_batch_edit();
        b.end_batch_edit();
        assert_eq!(b.batch_depth(), 1);
        b.end_batch_edit();
        b.end_batch_edit();
        assert_eq!(b.batch_depth(), 0);
        assert_eq!(b.completed_batches(), 2);
    }

    #[test]
    fn detached_host_is_inert() {
        let mut host: Host<TextBuffer> = Host::detached();
        host.commit_text("x");
        host.send_delete();
        assert_eq!(host.text_before_cursor(5), "");
        assert!(!host.cursor_caps_mode());
        assert!(!host.is_attached());
    }
}
