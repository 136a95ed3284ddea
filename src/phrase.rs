use std::fmt;

use bumpalo::Bump;
use bumpalo::collections::Vec as BumpVec;

use crate::lexer::token::Token;
use crate::lexer::{Lexer, LexerOptions};
use crate::span::Span;

/// A tokenized input sentence. The token table lives in the sentence's arena
/// and the text is borrowed, so every view handed out is a plain borrow.
#[derive(Debug, Clone, Copy)]
pub struct Sentence<'a> {
    source: &'a [u8],
    tokens: &'a [Token],
}

impl<'a> Sentence<'a> {
    pub fn new(source: &'a [u8], arena: &'a Bump) -> Self {
        Self::with_options(source, LexerOptions::default(), arena)
    }

    pub fn with_options(source: &'a [u8], options: LexerOptions, arena: &'a Bump) -> Self {
        let tokens = BumpVec::from_iter_in(Lexer::with_options(source, options), arena);
        Self {
            source,
            tokens: tokens.into_bump_slice(),
        }
    }

    pub fn len(&self) -> usize { self.tokens.len() }

    pub fn is_empty(&self) -> bool { self.tokens.is_empty() }

    pub fn source(&self) -> &'a [u8] { self.source }

    pub fn token(&self, pos: usize) -> Option<&'a Token> { self.tokens.get(pos) }

    pub fn word(&self, pos: usize) -> Option<&'a [u8]> {
        self.token(pos).map(|t| t.text(self.source))
    }

    /// View over the tokens covered by `span`. The undefined span yields the
    /// empty view.
    ///
    /// Panics if `span.end` is not a position of this sentence.
    pub fn sub_phrase(&self, span: Span) -> SubPhrase<'a> {
        if span.is_undefined() {
            return SubPhrase { source: self.source, tokens: &[] };
        }
        assert!(
            span.end < self.tokens.len(),
            "span {span} out of range for sentence of length {}",
            self.tokens.len()
        );
        SubPhrase {
            source: self.source,
            tokens: &self.tokens[span.start..=span.end],
        }
    }

    pub fn whole(&self) -> SubPhrase<'a> {
        SubPhrase { source: self.source, tokens: self.tokens }
    }
}

/// Lines of `source`, without the `\n` and any trailing `\r`. A trailing
/// newline does not start another sentence.
pub fn split_sentences(source: &[u8]) -> Vec<&[u8]> {
    let mut sentences = Vec::new();
    let mut start = 0;
    for newline in memchr::memchr_iter(b'\n', source) {
        sentences.push(trim_cr(&source[start..newline]));
        start = newline + 1;
    }
    if start < source.len() {
        sentences.push(trim_cr(&source[start..]));
    }
    sentences
}

fn trim_cr(line: &[u8]) -> &[u8] {
    line.strip_suffix(b"\r").unwrap_or(line)
}

/// Read-only window onto a run of sentence tokens.
#[derive(Debug, Clone, Copy)]
pub struct SubPhrase<'a> {
    source: &'a [u8],
    tokens: &'a [Token],
}

impl<'a> SubPhrase<'a> {
    pub fn len(&self) -> usize { self.tokens.len() }

    pub fn is_empty(&self) -> bool { self.tokens.is_empty() }

    pub fn tokens(&self) -> &'a [Token] { self.tokens }

    pub fn word(&self, i: usize) -> Option<&'a [u8]> {
        self.tokens.get(i).map(|t| t.text(self.source))
    }

    pub fn words(self) -> impl Iterator<Item = &'a [u8]> + 'a {
        let source = self.source;
        self.tokens.iter().map(move |t| t.text(source))
    }
}

impl PartialEq for SubPhrase<'_> {
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len() && self.words().eq(other.words())
    }
}

impl Eq for SubPhrase<'_> {}

impl fmt::Display for SubPhrase<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, word) in self.words().enumerate() {
            if i > 0 {
                f.write_str(" ")?;
            }
            write!(f, "{}", String::from_utf8_lossy(word))?;
        }
        Ok(())
    }
}
