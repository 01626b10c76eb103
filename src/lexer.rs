use std::ops::Range;

/// A numeric literal as it appears in the source.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Token<'a> {
    pub slice: &'a str,
    pub offset: usize,
}

impl Token<'_> {
    pub fn span(&self) -> Range<usize> {
        self.offset..self.offset + self.slice.len()
    }
}

/// Character cursor over an expression.
///
/// The cursor only moves forward. `byte` is always the offset of the
/// first character of `rest` inside `source`.
#[derive(Debug)]
pub struct Lexer<'a> {
    source: &'a str,
    rest: &'a str,
    byte: usize,
}

impl<'a> Lexer<'a> {
    pub fn new(input: &'a str) -> Self {
        Self {
            source: input,
            rest: input,
            byte: 0,
        }
    }

    pub fn source(&self) -> &'a str {
        self.source
    }

    pub fn offset(&self) -> usize {
        self.byte
    }

    /// Character under the cursor, without skipping whitespace.
    pub fn peek(&self) -> Option<char> {
        self.rest.chars().next()
    }

    pub fn skip_whitespace(&mut self) {
        let trimmed = self.rest.trim_start();
        self.byte += self.rest.len() - trimmed.len();
        self.rest = trimmed;
    }

    /// Next non-whitespace character. Whitespace is consumed, the
    /// character itself is not.
    pub fn peek_token(&mut self) -> Option<char> {
        self.skip_whitespace();
        self.peek()
    }

    /// Consumes `expected` if it is the next non-whitespace character.
    pub fn eat(&mut self, expected: char) -> bool {
        if self.peek_token() == Some(expected) {
            self.bump();
            true
        } else {
            false
        }
    }

    fn bump(&mut self) -> Option<char> {
        let mut chars = self.rest.chars();
        let c = chars.next()?;
        self.rest = chars.as_str();
        self.byte += c.len_utf8();
        Some(c)
    }

    /// Greedily takes digits and `.` starting exactly at the cursor.
    ///
    /// Returns `None` without moving when the cursor is not on a digit
    /// or `.`. The slice is not validated here.
    pub fn number(&mut self) -> Option<Token<'a>> {
        let end = self
            .rest
            .find(|c: char| !matches!(c, '0'..='9' | '.'))
            .unwrap_or(self.rest.len());

        if end == 0 {
            return None;
        }

        let token = Token {
            slice: &self.rest[..end],
            offset: self.byte,
        };
        self.byte += end;
        self.rest = &self.rest[end..];
        Some(token)
    }
}
