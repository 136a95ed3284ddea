use std::fmt;
use std::sync::OnceLock;
use std::sync::atomic::{AtomicBool, Ordering};

use bumpalo::Bump;

use crate::phrase::SubPhrase;
use crate::span::Span;

/// One translatable source span of the sentence.
///
/// Paths are allocated in the sentence arena and only ever handed out as
/// `&'a InputPath`. The two pieces of state the search touches, the option
/// slots and the used flag, are write-once and safe to set through a shared
/// reference from several workers.
pub struct InputPath<'a, T: ?Sized = ()> {
    span: Span,
    sub_phrase: SubPhrase<'a>,
    prefix: Option<&'a InputPath<'a, T>>,
    options: &'a [OnceLock<&'a T>],
    used: AtomicBool,
}

impl<'a, T: ?Sized> InputPath<'a, T> {
    pub(crate) fn new(
        span: Span,
        sub_phrase: SubPhrase<'a>,
        prefix: Option<&'a InputPath<'a, T>>,
        num_tables: usize,
        arena: &'a Bump,
    ) -> Self {
        debug_assert!(prefix.is_none_or(|p| {
            p.span.start == span.start && p.span.end + 1 == span.end
        }));
        Self {
            span,
            sub_phrase,
            prefix,
            options: arena.alloc_slice_fill_with(num_tables, |_| OnceLock::new()),
            used: AtomicBool::new(false),
        }
    }

    pub fn span(&self) -> Span { self.span }

    pub fn sub_phrase(&self) -> SubPhrase<'a> { self.sub_phrase }

    /// The path one token shorter with the same start, if any.
    pub fn prefix(&self) -> Option<&'a InputPath<'a, T>> { self.prefix }

    /// Walks the prefix chain, longest prefix first.
    pub fn prefixes(&self) -> impl Iterator<Item = &'a InputPath<'a, T>> {
        std::iter::successors(self.prefix, |p| p.prefix)
    }

    pub fn num_words(&self) -> usize { self.span.num_words() }

    pub fn is_blank(&self) -> bool { self.span.is_undefined() }

    pub fn is_used(&self) -> bool {
        self.used.load(Ordering::Relaxed)
    }

    /// Flags the path as consulted by the search. Returns `true` only for the
    /// call that actually flipped the flag.
    pub fn mark_used(&self) -> bool {
        !self.used.swap(true, Ordering::Relaxed)
    }

    pub fn num_tables(&self) -> usize { self.options.len() }

    pub fn options(&self, table: usize) -> Option<&'a T> {
        self.options.get(table)?.get().copied()
    }

    /// Fills the option slot of `table`. A slot is filled at most once;
    /// returns `false` if it was already set.
    ///
    /// Panics if `table` is not below [`InputPath::num_tables`].
    pub fn set_options(&self, table: usize, options: &'a T) -> bool {
        self.options[table].set(options).is_ok()
    }
}

impl<T: ?Sized> fmt::Debug for InputPath<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("InputPath")
            .field("span", &self.span)
            .field("phrase", &self.sub_phrase.to_string())
            .field("prefix", &self.prefix.map(|p| p.span))
            .field("num_tables", &self.options.len())
            .field("used", &self.is_used())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::phrase::Sentence;

    #[test]
    fn used_flag_flips_once() {
        let arena = Bump::new();
        let sentence = Sentence::new(b"a b", &arena);
        let span = Span::new(0, 0);
        let path: InputPath<'_> = InputPath::new(span, sentence.sub_phrase(span), None, 1, &arena);
        assert!(!path.is_used());
        assert!(path.mark_used());
        assert!(path.is_used());
        assert!(!path.mark_used());
        assert!(path.is_used());
    }

    #[test]
    fn option_slots_are_write_once() {
        let arena = Bump::new();
        let sentence = Sentence::new(b"das Haus", &arena);
        let span = Span::new(0, 1);
        let path: InputPath<'_, str> = InputPath::new(span, sentence.sub_phrase(span), None, 2, &arena);
        assert_eq!(path.num_tables(), 2);
        assert_eq!(path.options(0), None);

        assert!(path.set_options(1, "the house"));
        assert!(!path.set_options(1, "the home"));
        assert_eq!(path.options(1), Some("the house"));
        assert_eq!(path.options(0), None);
        assert_eq!(path.options(2), None);
    }

    #[test]
    fn blank_path() {
        let arena = Bump::new();
        let sentence = Sentence::new(b"a", &arena);
        let span = Span::undefined();
        let path: InputPath<'_> = InputPath::new(span, sentence.sub_phrase(span), None, 0, &arena);
        assert!(path.is_blank());
        assert_eq!(path.num_words(), 0);
        assert!(path.sub_phrase().is_empty());
        assert_eq!(path.prefixes().count(), 0);
    }

    #[test]
    fn debug_shows_prefix_span_only() {
        let arena = Bump::new();
        let sentence = Sentence::new(b"a b", &arena);
        let first: &InputPath<'_> = arena.alloc(InputPath::new(
            Span::new(0, 0),
            sentence.sub_phrase(Span::new(0, 0)),
            None,
            0,
            &arena,
        ));
        let second = InputPath::new(Span::new(0, 1), sentence.sub_phrase(Span::new(0, 1)), Some(first), 0, &arena);
        let debug = format!("{second:?}");
        assert!(debug.contains("phrase: \"a b\""));
        assert!(debug.contains("prefix: Some(Span { start: 0, end: 0 })"));
    }
}
