//! Greedy dictionary encoder.

use fbp_core::error::{FbpError, Result};
use fbp_core::token::{END, MAX_LITERAL_RUN, Token};
use fbp_core::{DictionaryDescriptor, MatchLookup};

/// Splits text into dictionary and literal tokens.
///
/// At every position the longest dictionary entry (3, then 2, then 1 bytes)
/// wins. Unmatched bytes accumulate into a literal run that is flushed when
/// the next match is found, when it reaches [`MAX_LITERAL_RUN`] bytes, or at
/// the end of the text. The terminating `End` token is not produced.
#[derive(Debug, Clone)]
pub struct Tokenizer<'a, L> {
    lookup: L,
    text: &'a [u8],
    pos: usize,
    /// Dictionary match found while a literal run was pending.
    queued: Option<Token<'a>>,
}

impl<'a, L: MatchLookup> Tokenizer<'a, L> {
    /// Tokenize `text` up to its first NUL byte (or its end).
    pub fn new(lookup: L, text: &'a [u8]) -> Self {
        let end = text.iter().position(|&b| b == END).unwrap_or(text.len());
        Self {
            lookup,
            text: &text[..end],
            pos: 0,
            queued: None,
        }
    }
}

impl<'a, L: MatchLookup> Iterator for Tokenizer<'a, L> {
    type Item = Token<'a>;

    fn next(&mut self) -> Option<Token<'a>> {
        if let Some(token) = self.queued.take() {
            return Some(token);
        }

        let literal_start = self.pos;
        while self.pos < self.text.len() {
            if let Some((code, len)) = self.lookup.longest_match(&self.text[self.pos..]) {
                let literal_end = self.pos;
                self.pos += len;
                if literal_end == literal_start {
                    return Some(Token::Entry(code));
                }
                self.queued = Some(Token::Entry(code));
                return Some(Token::Literal(&self.text[literal_start..literal_end]));
            }

            self.pos += 1;
            if self.pos - literal_start == MAX_LITERAL_RUN {
                return Some(Token::Literal(&self.text[literal_start..self.pos]));
            }
        }

        (self.pos > literal_start).then(|| Token::Literal(&self.text[literal_start..self.pos]))
    }
}

/// Encoder bound to one dictionary.
#[derive(Debug, Clone, Copy)]
pub struct Encoder<'d> {
    dict: &'d DictionaryDescriptor,
}

impl<'d> Encoder<'d> {
    /// Create an encoder for the given dictionary.
    pub fn new(dict: &'d DictionaryDescriptor) -> Self {
        Self { dict }
    }

    /// Token stream for `text`, excluding the terminator.
    pub fn tokens<'a>(&self, text: &'a [u8]) -> Tokenizer<'a, &'d DictionaryDescriptor> {
        Tokenizer::new(self.dict, text)
    }

    /// Size of the complete encoding of `text`, including the terminator.
    pub fn encoded_len(&self, text: &[u8]) -> usize {
        self.tokens(text).map(|t| t.encoded_len()).sum::<usize>() + 1
    }

    /// Encode `text` into a new buffer, including the terminator.
    pub fn encode(&self, text: &[u8]) -> Vec<u8> {
        let mut out = Vec::with_capacity(text.len() + 1);
        for token in self.tokens(text) {
            tracing::trace!(?token, "emit");
            token.push_to(&mut out);
        }
        out.push(END);
        out
    }

    /// Encode `text` into `dst`, never writing more than `dst.len()` bytes.
    ///
    /// Returns the number of bytes written, including the terminator.
    ///
    /// # Truncation
    ///
    /// When the encoding does not fit, `dst` receives as many whole tokens
    /// as fit (plus the leading part of a literal run that straddles the
    /// limit) followed by the terminator, and
    /// [`FbpError::CapacityExhausted`] reports both the bytes written and
    /// the bytes required. The truncated stream decodes to a prefix of
    /// `text`. An empty `dst` receives nothing.
    pub fn encode_into(&self, dst: &mut [u8], text: &[u8]) -> Result<usize> {
        let Some(limit) = dst.len().checked_sub(1) else {
            return Err(FbpError::capacity_exhausted(0, self.encoded_len(text)));
        };

        let mut written = 0;
        for token in self.tokens(text) {
            if written + token.encoded_len() <= limit {
                tracing::trace!(?token, "emit");
                written += token.write_to(&mut dst[written..]);
                continue;
            }

            if let Token::Literal(bytes) = token {
                let fit = match limit - written {
                    0 | 1 => 0,
                    2 => 1,
                    room => (room - 2).min(bytes.len()),
                };
                if fit > 0 {
                    written += Token::Literal(&bytes[..fit]).write_to(&mut dst[written..]);
                }
            }
            dst[written] = END;

            let required = self.encoded_len(text);
            tracing::debug!(written = written + 1, required, "encode truncated");
            return Err(FbpError::capacity_exhausted(written + 1, required));
        }

        dst[written] = END;
        Ok(written + 1)
    }
}
