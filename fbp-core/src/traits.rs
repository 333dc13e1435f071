//! Core traits for dictionary matching.

use crate::token::MAX_ENTRY_LEN;

/// Substring-to-code lookup used by the encoder.
///
/// Implemented by [`MatchIndex`](crate::index::MatchIndex) and by
/// [`DictionaryDescriptor`](crate::descriptor::DictionaryDescriptor), which
/// delegates to its cached index.
pub trait MatchLookup {
    /// Find the code assigned to exactly `bytes` (1 to 3 bytes long).
    fn lookup(&self, bytes: &[u8]) -> Option<u8>;

    /// Find the longest dictionary entry that prefixes `text`.
    ///
    /// Tries 3, then 2, then 1 bytes. Returns the code and the entry length.
    fn longest_match(&self, text: &[u8]) -> Option<(u8, usize)> {
        let longest = text.len().min(MAX_ENTRY_LEN);
        (1..=longest)
            .rev()
            .find_map(|len| self.lookup(&text[..len]).map(|code| (code, len)))
    }
}

impl<T: MatchLookup + ?Sized> MatchLookup for &T {
    fn lookup(&self, bytes: &[u8]) -> Option<u8> {
        (**self).lookup(bytes)
    }

    fn longest_match(&self, text: &[u8]) -> Option<(u8, usize)> {
        (**self).longest_match(text)
    }
}
