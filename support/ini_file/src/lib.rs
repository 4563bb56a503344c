//! A parser for the simplest form of the ini files: `key = value` lines.
//!
//! The input is ASCII. Everything after `#` up to the end of the line is a
//! comment. A value is either a bare literal or a double-quoted string that
//! doesn't span lines. Section headers are not supported. A NUL byte ends
//! the input, so a file read into a zero-filled buffer parses as is.
//!
//! ```ignore
//! for entry in ini_file::Parser::new(bytes) {
//!     let ini_file::KeyValue { key, value } = entry?;
//!     match key {
//!         b"log_level" => { /* ... */ }
//!         _ => continue,
//!     }
//! }
//! ```
//!
//! The semantics checks are done by the calling code.

#![cfg_attr(not(test), no_std)]

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct Location {
    pub line: usize,
    pub col: usize,
}

impl Default for Location {
    fn default() -> Self {
        Self { line: 1, col: 1 }
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Error {
    ExpectedAssign(Location),
    ExpectedValue(Location),
    InvalidKeyName(Location),
    UnexpectedToken(Location),
    UnmatchedQuote(Location),
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct KeyValue<'a> {
    pub key: &'a [u8],
    pub value: &'a [u8],
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
enum Token<'a> {
    Assign,
    Literal(&'a [u8]),
    Quoted(&'a [u8]),
    EndOfLine,
    EndOfInput,
}

fn literal_byte(b: u8) -> bool {
    b.is_ascii_alphanumeric() || matches!(b, b'_' | b'.' | b'-' | b'@' | b'/' | b':')
}

/// Yields key-value pairs until the end of the input or the first error.
pub struct Parser<'a> {
    input: &'a [u8],
    pos: usize,
    location: Location,
    failed: bool,
}

impl<'a> Parser<'a> {
    pub fn new(input: &'a [u8]) -> Self {
        let len = input.iter().position(|&b| b == 0).unwrap_or(input.len());
        Self {
            input: &input[..len],
            pos: 0,
            location: Location::default(),
            failed: false,
        }
    }

    fn peek(&self) -> Option<u8> {
        self.input.get(self.pos).copied()
    }

    fn advance(&mut self) {
        if self.peek() == Some(b'\n') {
            self.location.line += 1;
            self.location.col = 1;
        } else {
            self.location.col += 1;
        }
        self.pos += 1;
    }

    fn skip_blanks_and_comments(&mut self) {
        while let Some(b) = self.peek() {
            match b {
                b'#' => {
                    while !matches!(self.peek(), None | Some(b'\n')) {
                        self.advance();
                    }
                }
                b'\n' => break,
                _ if b.is_ascii_whitespace() => self.advance(),
                _ => break,
            }
        }
    }

    fn next_token(&mut self) -> Result<(Location, Token<'a>), Error> {
        self.skip_blanks_and_comments();
        let start = self.location;

        let Some(b) = self.peek() else {
            return Ok((start, Token::EndOfInput));
        };
        match b {
            b'\n' => {
                self.advance();
                Ok((start, Token::EndOfLine))
            }
            b'=' => {
                self.advance();
                Ok((start, Token::Assign))
            }
            b'"' => {
                self.advance();
                let from = self.pos;
                loop {
                    match self.peek() {
                        Some(b'"') => break,
                        None | Some(b'\n') => return Err(Error::UnmatchedQuote(start)),
                        Some(_) => self.advance(),
                    }
                }
                let quoted = &self.input[from..self.pos];
                self.advance();
                Ok((start, Token::Quoted(quoted)))
            }
            _ if literal_byte(b) => {
                let from = self.pos;
                while self.peek().is_some_and(literal_byte) {
                    self.advance();
                }
                Ok((start, Token::Literal(&self.input[from..self.pos])))
            }
            _ => Err(Error::UnexpectedToken(start)),
        }
    }

    fn parse_line(&mut self) -> Result<Option<KeyValue<'a>>, Error> {
        let key = loop {
            match self.next_token()? {
                (_, Token::EndOfInput) => return Ok(None),
                (_, Token::EndOfLine) => continue,
                (location, Token::Literal(key)) => {
                    if !key[0].is_ascii_alphabetic() {
                        return Err(Error::InvalidKeyName(location));
                    }
                    break key;
                }
                (location, _) => return Err(Error::UnexpectedToken(location)),
            }
        };

        match self.next_token()? {
            (_, Token::Assign) => {}
            (location, _) => return Err(Error::ExpectedAssign(location)),
        }

        let value = match self.next_token()? {
            (_, Token::Literal(value)) | (_, Token::Quoted(value)) => value,
            (location, _) => return Err(Error::ExpectedValue(location)),
        };

        match self.next_token()? {
            (_, Token::EndOfLine) | (_, Token::EndOfInput) => Ok(Some(KeyValue { key, value })),
            (location, _) => Err(Error::UnexpectedToken(location)),
        }
    }
}

impl<'a> Iterator for Parser<'a> {
    type Item = Result<KeyValue<'a>, Error>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.failed {
            return None;
        }
        let result = self.parse_line().transpose();
        self.failed = matches!(result, Some(Err(_)));
        result
    }
}
