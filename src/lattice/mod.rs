//! Span lattice for one input sentence.
//!
//! [`InputPaths::build`] allocates one [`InputPath`] per contiguous span of
//! at most `min(sentence length, max phrase length)` tokens, links every path
//! to its one-token-shorter prefix and indexes all of them by
//! `(start, length - 1)` in a dense [`SpanMatrix`]. A blank path with the
//! undefined span stands for the initial state and is kept outside both the
//! matrix and the path list.
//!
//! Everything is allocated in the caller's [`Bump`]; nothing is freed until
//! the arena goes away. [`InputPaths::prune_unused`] therefore only drops
//! paths from the iteration list: matrix cells keep pointing at pruned paths,
//! which stay valid for as long as the arena is borrowed.
//!
//! `InputPaths` is `Sync`, so search workers can share it and mark paths
//! used concurrently. Building and pruning need `&mut` access.

pub mod format;
pub mod matrix;
pub mod path;

use bumpalo::Bump;
use bumpalo::collections::Vec as BumpVec;
use serde::Serialize;
use tracing::{debug, trace};

use crate::config::DecodeConfig;
use crate::phrase::Sentence;
use crate::span::Span;

pub use format::LatticeFormatter;
pub use matrix::SpanMatrix;
pub use path::InputPath;

/// Number of spans of at most `max_span_length` tokens in a sentence of
/// `sentence_len` tokens: `sum over s of min(max_span_length, sentence_len - s)`.
pub fn num_spans(sentence_len: usize, max_span_length: usize) -> usize {
    let m = max_span_length.min(sentence_len);
    if m == 0 {
        return 0;
    }
    m * (sentence_len - m + 1) + m * (m - 1) / 2
}

pub struct InputPaths<'a, T: ?Sized = ()> {
    sentence_len: usize,
    blank: &'a InputPath<'a, T>,
    matrix: SpanMatrix<'a, &'a InputPath<'a, T>>,
    // Live paths are `paths[..len]`; pruning compacts in place.
    paths: &'a mut [&'a InputPath<'a, T>],
    len: usize,
}

impl<'a, T: ?Sized> InputPaths<'a, T> {
    pub fn build(input: &Sentence<'a>, config: &DecodeConfig, arena: &'a Bump) -> Self {
        debug_assert!(config.validate().is_ok(), "invalid decode config: {config:?}");

        let size = input.len();
        let max_length = config.max_span_length(size);
        let num_tables = config.num_translation_tables;

        let mut matrix = SpanMatrix::new_in(size, max_length, arena);

        let blank_span = Span::undefined();
        let blank: &'a InputPath<'a, T> = arena.alloc(InputPath::new(
            blank_span,
            input.sub_phrase(blank_span),
            None,
            num_tables,
            arena,
        ));

        let mut paths = BumpVec::with_capacity_in(num_spans(size, max_length), arena);
        for start in 0..size {
            let mut prefix = None;

            for length in 1..=max_length {
                let end = start + length - 1;
                if end >= size {
                    break;
                }

                let span = Span::new(start, end);
                let path: &'a InputPath<'a, T> = arena.alloc(InputPath::new(
                    span,
                    input.sub_phrase(span),
                    prefix,
                    num_tables,
                    arena,
                ));
                trace!(%span, "input path");
                paths.push(path);
                prefix = Some(path);
                matrix.set(start, length - 1, path);
            }
        }

        debug!(
            sentence_len = size,
            max_span_length = max_length,
            num_paths = paths.len(),
            "built input paths"
        );

        let paths = paths.into_bump_slice_mut();
        Self {
            sentence_len: size,
            blank,
            matrix,
            len: paths.len(),
            paths,
        }
    }

    /// Path of the initial state: undefined span, no prefix.
    pub fn blank(&self) -> &'a InputPath<'a, T> { self.blank }

    /// Path covering `[start, start + len_minus_1]`, if that span was built.
    /// Pruned paths are still returned.
    pub fn get(&self, start: usize, len_minus_1: usize) -> Option<&'a InputPath<'a, T>> {
        self.matrix.get(start, len_minus_1)
    }

    /// Same as [`InputPaths::get`], addressed by span. The undefined span has
    /// no matrix cell; use [`InputPaths::blank`] for it. Reversed or
    /// half-undefined spans read as empty.
    pub fn get_span(&self, span: Span) -> Option<&'a InputPath<'a, T>> {
        if span.is_undefined() {
            return None;
        }
        span.end
            .checked_sub(span.start)
            .and_then(|len_minus_1| self.get(span.start, len_minus_1))
    }

    pub fn matrix(&self) -> &SpanMatrix<'a, &'a InputPath<'a, T>> { &self.matrix }

    /// Paths still live, ordered by start then length.
    pub fn paths(&self) -> &[&'a InputPath<'a, T>] { &self.paths[..self.len] }

    pub fn iter(&self) -> impl Iterator<Item = &'a InputPath<'a, T>> + '_ {
        self.paths().iter().copied()
    }

    pub fn len(&self) -> usize { self.len }

    pub fn is_empty(&self) -> bool { self.len == 0 }

    pub fn sentence_len(&self) -> usize { self.sentence_len }

    pub fn max_span_length(&self) -> usize { self.matrix.cols() }

    pub fn num_used(&self) -> usize {
        self.iter().filter(|p| p.is_used()).count()
    }

    /// Drops every path the search never marked as used from the path list,
    /// keeping the order of the rest. Matrix cells are left alone. Returns
    /// the number of paths dropped.
    pub fn prune_unused(&mut self) -> usize {
        let mut kept = 0;
        for i in 0..self.len {
            let path = self.paths[i];
            if path.is_used() {
                self.paths[kept] = path;
                kept += 1;
            }
        }
        let removed = self.len - kept;
        self.len = kept;
        debug!(removed, remaining = kept, "pruned unused input paths");
        removed
    }

    pub fn summary(&self) -> LatticeSummary {
        let used: std::vec::Vec<Span> = self.iter().filter(|p| p.is_used()).map(|p| p.span()).collect();
        LatticeSummary {
            sentence_len: self.sentence_len,
            max_span_length: self.max_span_length(),
            num_paths: self.len(),
            num_used: used.len(),
            used,
        }
    }
}

impl<'a, 'b, T: ?Sized> IntoIterator for &'b InputPaths<'a, T> {
    type Item = &'a InputPath<'a, T>;
    type IntoIter = std::iter::Copied<std::slice::Iter<'b, &'a InputPath<'a, T>>>;

    fn into_iter(self) -> Self::IntoIter {
        self.paths().iter().copied()
    }
}

/// Serializable trace of which spans a search touched.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LatticeSummary {
    pub sentence_len: usize,
    pub max_span_length: usize,
    pub num_paths: usize,
    pub num_used: usize,
    pub used: std::vec::Vec<Span>,
}
