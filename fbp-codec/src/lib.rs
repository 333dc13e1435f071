//! # FBP Codec: Fixed Byte-Pair Dictionary Text Compression
//!
//! This crate compresses short, known-vocabulary strings (UI text, log
//! messages, protocol string tables) against a dictionary of at most 253
//! common 1-, 2- and 3-byte substrings, and expands them again with a
//! decoder small enough for a microcontroller.
//!
//! ## Features
//!
//! - **Greedy matching**: the longest dictionary entry wins at every position
//! - **Bounded output**: both directions write into caller-sized buffers,
//!   always terminated, never overrun
//! - **Allocation-free decoding**: [`Decoder::decode_into`] only reads the
//!   stream and the dictionary table
//! - **Dictionary construction**: [`DictionaryBuilder`] derives a dictionary
//!   from sample text
//!
//! ## Stream Format
//!
//! | Byte(s)                      | Meaning                         |
//! |------------------------------|---------------------------------|
//! | `0x00`                       | end of string                   |
//! | `0x01`, `count`, `count` raw | literal run (1-255 bytes)       |
//! | `0x02`, raw                  | single literal byte             |
//! | `3..=255`                    | dictionary entry (1-3 bytes)    |
//!
//! ## Example
//!
//! ```rust
//! use fbp_codec::{compress, decompress};
//!
//! let original = b"the network is ready";
//! let compressed = compress(original);
//! assert!(compressed.len() < original.len());
//!
//! let decompressed = decompress(&compressed).unwrap();
//! assert_eq!(decompressed, original);
//! ```
//!
//! ## Bounded Buffers
//!
//! ```rust
//! use fbp_codec::{DictionaryDescriptor, FbpError, encode_into, decode_into};
//!
//! let dict = DictionaryDescriptor::builtin();
//! let mut packed = [0u8; 4];
//! let err = encode_into(dict, &mut packed, b"the quick brown fox").unwrap_err();
//!
//! // The buffer still holds a valid, terminated stream.
//! let FbpError::CapacityExhausted { written, required } = err else { panic!() };
//! assert_eq!(packed[written - 1], 0);
//! assert!(required > packed.len());
//!
//! let mut text = [0u8; 32];
//! let n = decode_into(dict, &mut text, &packed[..written]).unwrap();
//! assert!(b"the quick brown fox".starts_with(&text[..n - 1]));
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![forbid(unsafe_code)]

mod builder;
mod decoder;
mod encoder;
mod registry;

pub use builder::DictionaryBuilder;
pub use decoder::Decoder;
pub use encoder::{Encoder, Tokenizer};
pub use fbp_core::{
    DictionaryDescriptor, DictionaryLayout, FbpError, MatchIndex, MatchLookup, Result, Token,
};
pub use registry::{BUILTIN_NAME, DictionaryRegistry};

/// Encode text into a new buffer, including the `0x00` terminator.
///
/// Encoding stops at the first NUL byte of `text`, if any.
///
/// # Example
///
/// ```rust
/// use fbp_codec::{DictionaryDescriptor, encode};
///
/// let dict = DictionaryDescriptor::builtin();
/// assert_eq!(encode(dict, b""), [0x00]);
/// ```
pub fn encode(dict: &DictionaryDescriptor, text: &[u8]) -> Vec<u8> {
    Encoder::new(dict).encode(text)
}

/// Encode text into `dst`, returning the bytes written (terminator included).
///
/// See [`Encoder::encode_into`] for the truncation contract.
pub fn encode_into(dict: &DictionaryDescriptor, dst: &mut [u8], text: &[u8]) -> Result<usize> {
    Encoder::new(dict).encode_into(dst, text)
}

/// Size of the complete encoding of `text`, terminator included.
pub fn encoded_len(dict: &DictionaryDescriptor, text: &[u8]) -> usize {
    Encoder::new(dict).encoded_len(text)
}

/// Decode a compressed stream into a new buffer, without the terminator.
pub fn decode(dict: &DictionaryDescriptor, stream: &[u8]) -> Result<Vec<u8>> {
    Decoder::new(dict).decode(stream)
}

/// Decode a stream into `dst`, returning the bytes written (terminator included).
///
/// See [`Decoder::decode_into`] for the truncation contract.
pub fn decode_into(dict: &DictionaryDescriptor, dst: &mut [u8], stream: &[u8]) -> Result<usize> {
    Decoder::new(dict).decode_into(dst, stream)
}

/// Size of the complete decoded text, terminator included.
pub fn decoded_len(dict: &DictionaryDescriptor, stream: &[u8]) -> Result<usize> {
    Decoder::new(dict).decoded_len(stream)
}

/// Compress text with the built-in dictionary (convenience function).
///
/// This is equivalent to `encode(DictionaryDescriptor::builtin(), text)`.
pub fn compress(text: &[u8]) -> Vec<u8> {
    encode(DictionaryDescriptor::builtin(), text)
}

/// Decompress a stream produced with the built-in dictionary (convenience function).
///
/// This is equivalent to `decode(DictionaryDescriptor::builtin(), stream)`.
pub fn decompress(stream: &[u8]) -> Result<Vec<u8>> {
    decode(DictionaryDescriptor::builtin(), stream)
}

/// Encode many strings, one compressed stream each.
///
/// With the `parallel` feature the strings are encoded on the rayon thread
/// pool; the dictionary's match index is still built exactly once.
pub fn encode_all<T>(dict: &DictionaryDescriptor, texts: &[T]) -> Vec<Vec<u8>>
where
    T: AsRef<[u8]> + Sync,
{
    let encoder = Encoder::new(dict);

    #[cfg(feature = "parallel")]
    {
        use rayon::prelude::*;
        texts.par_iter().map(|t| encoder.encode(t.as_ref())).collect()
    }

    #[cfg(not(feature = "parallel"))]
    {
        texts.iter().map(|t| encoder.encode(t.as_ref())).collect()
    }
}
