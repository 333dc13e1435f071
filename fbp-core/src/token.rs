//! Compressed stream wire format.
//!
//! A compressed stream is a sequence of byte-aligned tokens:
//!
//! | Byte(s)                      | Token       | Expands to                 |
//! |------------------------------|-------------|----------------------------|
//! | `0x00`                       | End         | terminates the stream      |
//! | `0x01`, `count`, `count` raw | LiteralRun  | `count` (1-255) raw bytes  |
//! | `0x02`, raw                  | LiteralChar | one raw byte               |
//! | `3..=255`                    | DictEntry   | 1-3 bytes of a dictionary  |
//!
//! Literal bytes are text, so they never contain `0x00`.

use crate::error::{FbpError, Result};

/// Stream terminator.
pub const END: u8 = 0x00;

/// Escape for a literal run with an explicit count byte.
pub const LITERAL_RUN: u8 = 0x01;

/// Escape for a single literal byte.
pub const LITERAL_CHAR: u8 = 0x02;

/// First code available to dictionary entries; `0..FIRST_CODE` are reserved.
pub const FIRST_CODE: u8 = 3;

/// Maximum number of dictionary entries (codes `3..=255`).
pub const MAX_ENTRIES: usize = 256 - FIRST_CODE as usize;

/// Longest literal run expressible by one `LiteralRun` token.
pub const MAX_LITERAL_RUN: usize = u8::MAX as usize;

/// Longest dictionary entry in bytes.
pub const MAX_ENTRY_LEN: usize = 3;

/// A single token of a compressed stream.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Token<'a> {
    /// Stream terminator.
    End,
    /// Verbatim bytes, 1 to [`MAX_LITERAL_RUN`] long.
    ///
    /// Written as `LiteralChar` when one byte long and `LiteralRun` otherwise.
    Literal(&'a [u8]),
    /// A dictionary code in `3..=255`.
    Entry(u8),
}

impl Token<'_> {
    /// Number of stream bytes this token occupies.
    pub fn encoded_len(&self) -> usize {
        match self {
            Token::End | Token::Entry(_) => 1,
            Token::Literal(bytes) if bytes.len() == 1 => 2,
            Token::Literal(bytes) => 2 + bytes.len(),
        }
    }

    /// Write the token to the start of `out`, returning the bytes written.
    ///
    /// `out` must hold at least [`Token::encoded_len`] bytes.
    pub fn write_to(&self, out: &mut [u8]) -> usize {
        match *self {
            Token::End => {
                out[0] = END;
                1
            }
            Token::Entry(code) => {
                out[0] = code;
                1
            }
            Token::Literal(bytes) if bytes.len() == 1 => {
                out[0] = LITERAL_CHAR;
                out[1] = bytes[0];
                2
            }
            Token::Literal(bytes) => {
                debug_assert!(bytes.len() <= MAX_LITERAL_RUN);
                out[0] = LITERAL_RUN;
                out[1] = bytes.len() as u8;
                out[2..2 + bytes.len()].copy_from_slice(bytes);
                2 + bytes.len()
            }
        }
    }

    /// Append the token to a growable buffer.
    pub fn push_to(&self, out: &mut Vec<u8>) {
        match *self {
            Token::End => out.push(END),
            Token::Entry(code) => out.push(code),
            Token::Literal(bytes) if bytes.len() == 1 => {
                out.push(LITERAL_CHAR);
                out.push(bytes[0]);
            }
            Token::Literal(bytes) => {
                out.push(LITERAL_RUN);
                out.push(bytes.len() as u8);
                out.extend_from_slice(bytes);
            }
        }
    }
}

/// Parses tokens out of a compressed stream.
///
/// Every read is bounds-checked against the input; a token that runs past
/// the end of the input is reported as [`FbpError::MalformedStream`]. The
/// reader yields [`Token::End`] once and then stops.
#[derive(Debug, Clone)]
pub struct TokenReader<'a> {
    input: &'a [u8],
    pos: usize,
    done: bool,
}

impl<'a> TokenReader<'a> {
    /// Create a reader over a compressed stream.
    pub fn new(input: &'a [u8]) -> Self {
        Self {
            input,
            pos: 0,
            done: false,
        }
    }

    /// Offset of the next unread byte.
    pub fn offset(&self) -> usize {
        self.pos
    }

    /// Read the next token.
    ///
    /// Returns `Ok(None)` after the `End` token has been produced.
    pub fn next_token(&mut self) -> Result<Option<Token<'a>>> {
        if self.done {
            return Ok(None);
        }

        let start = self.pos;
        let Some(&byte) = self.input.get(start) else {
            self.done = true;
            return Err(FbpError::malformed(start, "missing end-of-stream marker"));
        };

        let token = match byte {
            END => {
                self.pos += 1;
                self.done = true;
                Token::End
            }
            LITERAL_RUN => {
                let Some(&count) = self.input.get(start + 1) else {
                    self.done = true;
                    return Err(FbpError::malformed(start, "literal run without count"));
                };
                if count == 0 {
                    self.done = true;
                    return Err(FbpError::malformed(start + 1, "literal run of length zero"));
                }
                let body = start + 2;
                let Some(bytes) = self.input.get(body..body + count as usize) else {
                    self.done = true;
                    return Err(FbpError::malformed(start, "literal run past end of input"));
                };
                if let Some(nul) = bytes.iter().position(|&b| b == END) {
                    self.done = true;
                    return Err(FbpError::malformed(body + nul, "NUL byte inside literal"));
                }
                self.pos = body + count as usize;
                Token::Literal(bytes)
            }
            LITERAL_CHAR => {
                let Some(bytes) = self.input.get(start + 1..start + 2) else {
                    self.done = true;
                    return Err(FbpError::malformed(start, "literal char past end of input"));
                };
                if bytes[0] == END {
                    self.done = true;
                    return Err(FbpError::malformed(start + 1, "NUL byte inside literal"));
                }
                self.pos = start + 2;
                Token::Literal(bytes)
            }
            code => {
                self.pos += 1;
                Token::Entry(code)
            }
        };

        Ok(Some(token))
    }
}

impl<'a> Iterator for TokenReader<'a> {
    type Item = Result<Token<'a>>;

    fn next(&mut self) -> Option<Self::Item> {
        self.next_token().transpose()
    }
}
