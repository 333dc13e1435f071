//! Dictionary construction from sample text.
//!
//! The builder counts every 1-, 2- and 3-byte substring of each sample
//! line, ranks all of them together by occurrence count, keeps the most
//! frequent ones and lays them out as a [`DictionaryDescriptor`]. Lines are
//! treated independently, so substrings never span a line break.
//!
//! # Example
//!
//! ```rust
//! use fbp_codec::DictionaryBuilder;
//!
//! let dict = DictionaryBuilder::new()
//!     .add_text(b"# status strings\nready\nready to send\nsend failed\n")
//!     .comment_prefix(Some("#"))
//!     .max_entries(32)
//!     .build()
//!     .unwrap();
//!
//! assert!(dict.entry_count() <= 32);
//! ```

use fbp_core::error::Result;
use fbp_core::token::{END, MAX_ENTRIES, MAX_ENTRY_LEN};
use fbp_core::{DictionaryDescriptor, DictionaryLayout};
use std::collections::HashMap;

/// Builds a dictionary from sample lines.
#[derive(Debug, Clone)]
pub struct DictionaryBuilder {
    lines: Vec<Vec<u8>>,
    max_entries: usize,
    trim: bool,
    comment: Option<Vec<u8>>,
}

impl Default for DictionaryBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl DictionaryBuilder {
    /// Create a builder using every available code, trimming whitespace and
    /// with no comment prefix.
    pub fn new() -> Self {
        Self {
            lines: Vec::new(),
            max_entries: MAX_ENTRIES,
            trim: true,
            comment: None,
        }
    }

    /// Limit the number of dictionary entries (at most 253).
    ///
    /// Fewer entries mean a smaller table on the device but a worse ratio.
    pub fn max_entries(mut self, max: usize) -> Self {
        self.max_entries = max.min(MAX_ENTRIES);
        self
    }

    /// Whether to strip leading and trailing whitespace from each line.
    pub fn trim(mut self, trim: bool) -> Self {
        self.trim = trim;
        self
    }

    /// Skip lines starting with `prefix` (checked before trimming).
    pub fn comment_prefix(mut self, prefix: Option<&str>) -> Self {
        self.comment = prefix
            .filter(|p| !p.is_empty())
            .map(|p| p.as_bytes().to_vec());
        self
    }

    /// Add a single sample line.
    pub fn add_line(mut self, line: &[u8]) -> Self {
        self.lines.push(line.to_vec());
        self
    }

    /// Add every line of a block of text.
    pub fn add_text(mut self, text: &[u8]) -> Self {
        self.lines.extend(
            text.split(|&b| b == b'\n')
                .map(|line| line.strip_suffix(b"\r").unwrap_or(line).to_vec()),
        );
        self
    }

    /// Add sample lines from an iterator.
    pub fn add_lines_iter<I, T>(mut self, lines: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: AsRef<[u8]>,
    {
        for line in lines {
            self.lines.push(line.as_ref().to_vec());
        }
        self
    }

    /// Sample lines that survive comment filtering and trimming.
    fn samples(&self) -> impl Iterator<Item = &[u8]> {
        self.lines
            .iter()
            .filter(|line| match &self.comment {
                Some(prefix) => !line.starts_with(prefix),
                None => true,
            })
            .map(|line| {
                if self.trim {
                    line.trim_ascii()
                } else {
                    line.as_slice()
                }
            })
    }

    /// Rank substrings by occurrence, most frequent first.
    ///
    /// Ties are broken by byte order, descending, so the result is stable
    /// across runs.
    pub fn ranked(&self) -> Vec<(Vec<u8>, usize)> {
        let mut counts: HashMap<&[u8], usize> = HashMap::new();
        for line in self.samples() {
            for len in 1..=MAX_ENTRY_LEN {
                for window in line.windows(len) {
                    if !window.contains(&END) {
                        *counts.entry(window).or_default() += 1;
                    }
                }
            }
        }

        let mut ranked: Vec<_> = counts
            .into_iter()
            .map(|(bytes, count)| (bytes.to_vec(), count))
            .collect();
        ranked.sort_unstable_by(|a, b| b.1.cmp(&a.1).then_with(|| b.0.cmp(&a.0)));
        ranked
    }

    /// Build the dictionary.
    pub fn build(&self) -> Result<DictionaryDescriptor> {
        let mut chosen = self.ranked();
        chosen.truncate(self.max_entries);
        chosen.sort_by_key(|(bytes, _)| bytes.len());

        let mut table = Vec::with_capacity(chosen.len() * MAX_ENTRY_LEN);
        let mut per_len = [0u16; MAX_ENTRY_LEN + 1];
        for (bytes, _) in &chosen {
            table.extend_from_slice(bytes);
            per_len[bytes.len()] += 1;
        }

        tracing::debug!(
            samples = self.lines.len(),
            singles = per_len[1],
            pairs = per_len[2],
            triples = per_len[3],
            "built dictionary"
        );

        DictionaryDescriptor::new(table, DictionaryLayout::packed(per_len[1], per_len[2]))
    }
}
