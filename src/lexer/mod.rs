pub mod token;

use token::{Token, TokenKind};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LexerOptions {
    /// Emit ASCII punctuation as one-byte tokens of its own. When off, only
    /// whitespace separates tokens.
    pub split_punctuation: bool,
}

impl Default for LexerOptions {
    fn default() -> Self {
        Self { split_punctuation: true }
    }
}

/// Splits one input sentence into tokens. Offsets are byte offsets into the
/// input; bytes >= 0x80 are treated as word bytes so UTF-8 text stays intact.
pub struct Lexer<'src> {
    input: &'src [u8],
    cursor: usize,
    options: LexerOptions,
}

impl<'src> Lexer<'src> {
    pub fn new(input: &'src [u8]) -> Self {
        Self::with_options(input, LexerOptions::default())
    }

    pub fn with_options(input: &'src [u8], options: LexerOptions) -> Self {
        Self { input, cursor: 0, options }
    }

    fn peek(&self) -> Option<u8> {
        self.peek_at(0)
    }

    fn peek_at(&self, n: usize) -> Option<u8> {
        self.input.get(self.cursor + n).copied()
    }

    fn advance(&mut self) {
        self.cursor += 1;
    }

    fn skip_whitespace(&mut self) {
        while let Some(c) = self.peek() {
            if c.is_ascii_whitespace() {
                self.advance();
            } else {
                break;
            }
        }
    }

    fn is_split_punct(&self, c: u8) -> bool {
        self.options.split_punctuation && c.is_ascii_punctuation()
    }

    fn is_word_byte(&self, c: u8) -> bool {
        !c.is_ascii_whitespace() && !self.is_split_punct(c)
    }

    // Digits, with `.` or `,` allowed between digit groups: 3.14, 1,000
    fn read_number(&mut self) {
        loop {
            while let Some(c) = self.peek() {
                if c.is_ascii_digit() {
                    self.advance();
                } else {
                    break;
                }
            }
            match (self.peek(), self.peek_at(1)) {
                (Some(b'.' | b','), Some(d)) if d.is_ascii_digit() => {
                    self.advance();
                }
                _ => break,
            }
        }
    }

    fn read_word(&mut self) {
        while let Some(c) = self.peek() {
            if self.is_word_byte(c) {
                self.advance();
            } else if matches!(c, b'-' | b'\'')
                && self.peek_at(1).is_some_and(|next| self.is_word_byte(next))
            {
                // don't, state-of-the-art
                self.advance();
            } else {
                break;
            }
        }
    }
}

impl<'src> Iterator for Lexer<'src> {
    type Item = Token;

    fn next(&mut self) -> Option<Self::Item> {
        self.skip_whitespace();
        let c = self.peek()?;
        let start = self.cursor;

        if c.is_ascii_digit() {
            self.read_number();
            match self.peek() {
                // 3rd, 42nd
                Some(next) if self.is_word_byte(next) => {
                    self.read_word();
                    Some(Token::new(TokenKind::Word, start, self.cursor))
                }
                _ => Some(Token::new(TokenKind::Number, start, self.cursor)),
            }
        } else if self.is_split_punct(c) {
            self.advance();
            Some(Token::new(TokenKind::Punct, start, self.cursor))
        } else {
            self.read_word();
            Some(Token::new(TokenKind::Word, start, self.cursor))
        }
    }
}
