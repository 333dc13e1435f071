//! Dictionary decoder.
//!
//! The decoder never allocates in [`Decoder::decode_into`]: it walks the
//! compressed stream once, resolves dictionary codes arithmetically and
//! copies bytes straight into the caller's buffer. Every read from the
//! stream is bounds-checked, so a malformed stream is reported instead of
//! read past its end.

use fbp_core::DictionaryDescriptor;
use fbp_core::error::{FbpError, Result};
use fbp_core::token::{END, Token, TokenReader};

/// Decoder bound to one dictionary.
#[derive(Debug, Clone, Copy)]
pub struct Decoder<'d> {
    dict: &'d DictionaryDescriptor,
}

impl<'d> Decoder<'d> {
    /// Create a decoder for the given dictionary.
    pub fn new(dict: &'d DictionaryDescriptor) -> Self {
        Self { dict }
    }

    /// Expand the next token into the bytes it stands for.
    ///
    /// Returns `None` at the end of the stream.
    fn next_chunk<'s>(&self, reader: &mut TokenReader<'s>) -> Result<Option<&'s [u8]>>
    where
        'd: 's,
    {
        match reader.next_token()? {
            None | Some(Token::End) => Ok(None),
            Some(Token::Literal(bytes)) => Ok(Some(bytes)),
            Some(Token::Entry(code)) => match self.dict.entry(code) {
                Some(bytes) => Ok(Some(bytes)),
                None => Err(FbpError::malformed(
                    reader.offset() - 1,
                    "code past last dictionary entry",
                )),
            },
        }
    }

    /// Size of the complete decoded text, including the terminator.
    pub fn decoded_len(&self, stream: &[u8]) -> Result<usize> {
        let mut reader = TokenReader::new(stream);
        let mut len = 1;
        while let Some(chunk) = self.next_chunk(&mut reader)? {
            len += chunk.len();
        }
        Ok(len)
    }

    /// Decode `stream` into a new buffer, without the terminator.
    pub fn decode(&self, stream: &[u8]) -> Result<Vec<u8>> {
        let mut reader = TokenReader::new(stream);
        let mut out = Vec::with_capacity(stream.len() * 2);
        while let Some(chunk) = self.next_chunk(&mut reader)? {
            out.extend_from_slice(chunk);
        }
        Ok(out)
    }

    /// Decode `stream` into `dst`, never writing more than `dst.len()` bytes.
    ///
    /// Returns the number of bytes written, including the terminator.
    ///
    /// # Truncation
    ///
    /// When one byte of capacity remains the decoder writes the terminator
    /// and stops, even in the middle of a token. [`FbpError::CapacityExhausted`]
    /// then reports the bytes written and the bytes required; `dst` holds a
    /// terminated prefix of the text. An empty `dst` receives nothing.
    ///
    /// Filling in `required` walks the rest of the stream. If the stream is
    /// malformed past the truncation point the call returns
    /// [`FbpError::MalformedStream`] instead, with `dst` already holding the
    /// terminated prefix.
    pub fn decode_into(&self, dst: &mut [u8], stream: &[u8]) -> Result<usize> {
        let Some(limit) = dst.len().checked_sub(1) else {
            return Err(FbpError::capacity_exhausted(0, self.decoded_len(stream)?));
        };

        let mut reader = TokenReader::new(stream);
        let mut written = 0;
        while let Some(chunk) = self.next_chunk(&mut reader)? {
            let room = limit - written;
            if chunk.len() > room {
                dst[written..limit].copy_from_slice(&chunk[..room]);
                dst[limit] = END;

                let required = self.decoded_len(stream)?;
                tracing::debug!(written = dst.len(), required, "decode truncated");
                return Err(FbpError::capacity_exhausted(dst.len(), required));
            }

            tracing::trace!(len = chunk.len(), "expand");
            dst[written..written + chunk.len()].copy_from_slice(chunk);
            written += chunk.len();
        }

        dst[written] = END;
        Ok(written + 1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use fbp_core::DictionaryLayout;
    use fbp_core::token::{LITERAL_CHAR, LITERAL_RUN};

    /// 3="e", 4="th", 5="the"
    fn dict() -> DictionaryDescriptor {
        DictionaryDescriptor::new(b"eththe".to_vec(), DictionaryLayout::packed(1, 1)).unwrap()
    }

    #[test]
    fn test_decode_entries_and_literals() {
        let dict = dict();
        let decoder = Decoder::new(&dict);
        let stream = [5, LITERAL_CHAR, b' ', LITERAL_RUN, 3, b'c', b'a', b't', 4, 3, END];
        assert_eq!(decoder.decode(&stream).unwrap(), b"the catthe");
        assert_eq!(decoder.decoded_len(&stream).unwrap(), 11);
    }

    #[test]
    fn test_decode_empty() {
        let dict = dict();
        let decoder = Decoder::new(&dict);
        assert_eq!(decoder.decode(&[END]).unwrap(), b"");
        let mut buf = [0xFF; 4];
        assert_eq!(decoder.decode_into(&mut buf, &[END]).unwrap(), 1);
        assert_eq!(buf[0], END);
    }

    #[test]
    fn test_decode_into_exact_fit() {
        let dict = dict();
        let decoder = Decoder::new(&dict);
        let mut buf = [0xFF; 4];
        assert_eq!(decoder.decode_into(&mut buf, &[5, END]).unwrap(), 4);
        assert_eq!(&buf, b"the\0");
    }

    #[test]
    fn test_decode_into_truncates_mid_token() {
        let dict = dict();
        let decoder = Decoder::new(&dict);
        let mut buf = [0xFF; 3];
        let err = decoder.decode_into(&mut buf, &[5, 5, END]).unwrap_err();
        assert!(matches!(
            err,
            FbpError::CapacityExhausted {
                written: 3,
                required: 7
            }
        ));
        assert_eq!(&buf, b"th\0");
    }

    #[test]
    fn test_decode_into_malformed_tail_after_truncation() {
        let dict = dict();
        let decoder = Decoder::new(&dict);
        let mut buf = [0xFF; 3];
        let stream = [5, 5, LITERAL_RUN, 9, b'a'];
        let err = decoder.decode_into(&mut buf, &stream).unwrap_err();
        assert!(matches!(err, FbpError::MalformedStream { offset: 2, .. }));
        assert_eq!(&buf, b"th\0");
    }

    #[test]
    fn test_decode_into_zero_capacity() {
        let dict = dict();
        let decoder = Decoder::new(&dict);
        let err = decoder.decode_into(&mut [], &[5, END]).unwrap_err();
        assert!(matches!(
            err,
            FbpError::CapacityExhausted {
                written: 0,
                required: 4
            }
        ));
    }

    #[test]
    fn test_unassigned_code_is_malformed() {
        let dict = dict();
        let decoder = Decoder::new(&dict);
        let err = decoder.decode(&[3, 200, END]).unwrap_err();
        assert!(matches!(err, FbpError::MalformedStream { offset: 1, .. }));
    }

    #[test]
    fn test_literal_run_past_input_is_malformed() {
        let dict = dict();
        let decoder = Decoder::new(&dict);
        let stream = [LITERAL_RUN, 9, b'a', b'b'];
        assert!(matches!(
            decoder.decode(&stream),
            Err(FbpError::MalformedStream { .. })
        ));
        let mut buf = [0u8; 64];
        assert!(matches!(
            decoder.decode_into(&mut buf, &stream),
            Err(FbpError::MalformedStream { .. })
        ));
    }

    #[test]
    fn test_missing_terminator_is_malformed() {
        let dict = dict();
        let decoder = Decoder::new(&dict);
        assert!(matches!(
            decoder.decode(&[3, 4]),
            Err(FbpError::MalformedStream { offset: 2, .. })
        ));
        assert!(decoder.decode(&[]).is_err());
    }

    #[test]
    fn test_trailing_bytes_after_end_ignored() {
        let dict = dict();
        let decoder = Decoder::new(&dict);
        assert_eq!(decoder.decode(&[3, END, 0xAA, 0xBB]).unwrap(), b"e");
    }
}
