//! Substring-to-code match index.
//!
//! The index is derived from a [`DictionaryDescriptor`] once and never
//! mutated afterwards. Keys pack the entry length and its (up to three) bytes
//! into a single `u32`, so lookups hash one integer instead of a byte string.

use crate::descriptor::DictionaryDescriptor;
use crate::token::MAX_ENTRY_LEN;
use crate::traits::MatchLookup;
use std::collections::HashMap;

/// Lookup table from dictionary substrings to their codes.
#[derive(Debug, Clone, Default)]
pub struct MatchIndex {
    codes: HashMap<u32, u8>,
}

/// Pack a 1-3 byte substring into a collision-free key.
fn pack(bytes: &[u8]) -> u32 {
    bytes
        .iter()
        .fold(bytes.len() as u32, |key, &b| (key << 8) | u32::from(b))
}

impl MatchIndex {
    /// Build the index for every code the descriptor assigns.
    ///
    /// When two codes carry the same substring the higher code wins.
    pub fn build(dict: &DictionaryDescriptor) -> Self {
        let mut codes = HashMap::with_capacity(dict.entry_count());
        for (code, entry) in dict.entries() {
            if let Some(previous) = codes.insert(pack(entry), code) {
                tracing::warn!(
                    previous,
                    code,
                    entry = ?String::from_utf8_lossy(entry),
                    "duplicate dictionary entry"
                );
            }
        }
        tracing::debug!(entries = codes.len(), "built match index");
        Self { codes }
    }

    /// Number of distinct substrings in the index.
    pub fn len(&self) -> usize {
        self.codes.len()
    }

    /// Whether the index holds no substrings.
    pub fn is_empty(&self) -> bool {
        self.codes.is_empty()
    }
}

impl MatchLookup for MatchIndex {
    fn lookup(&self, bytes: &[u8]) -> Option<u8> {
        if bytes.is_empty() || bytes.len() > MAX_ENTRY_LEN {
            return None;
        }
        self.codes.get(&pack(bytes)).copied()
    }
}
