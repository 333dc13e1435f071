//! Dictionary descriptor.
//!
//! A dictionary is one flat byte table holding every entry back to back,
//! grouped by length: all 1-byte entries, then all 2-byte entries, then all
//! 3-byte entries. Codes are assigned in table order starting at
//! [`FIRST_CODE`], so resolving a code is pure arithmetic:
//!
//! ```text
//! code >= code3_start  ->  table[three_byte_start + (code - code3_start) * 3 ..][..3]
//! code >= code2_start  ->  table[two_byte_start   + (code - code2_start) * 2 ..][..2]
//! otherwise            ->  table[one_byte_start   + (code - 3)               ..][..1]
//! ```
//!
//! Bytes before `one_byte_start` are ignored, which allows tables generated
//! with a reserved prefix.

use crate::error::{FbpError, Result};
use crate::index::MatchIndex;
use crate::token::{END, FIRST_CODE, MAX_ENTRIES};
use crate::traits::MatchLookup;
use std::borrow::Cow;
use std::fmt;
use std::sync::OnceLock;

/// Boundaries of the three length groups of a dictionary table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DictionaryLayout {
    /// Offset of the first 1-byte entry.
    pub one_byte_start: u16,
    /// Offset of the first 2-byte entry.
    pub two_byte_start: u16,
    /// Offset of the first 3-byte entry.
    pub three_byte_start: u16,
    /// First code of the 2-byte group.
    pub code2_start: u16,
    /// First code of the 3-byte group. `256` when the group is empty
    /// and the lower groups use every code.
    pub code3_start: u16,
}

impl DictionaryLayout {
    /// Layout of a table with no reserved prefix holding `one_byte`
    /// single-byte entries followed by `two_byte` pairs; the remainder of
    /// the table is triples.
    pub const fn packed(one_byte: u16, two_byte: u16) -> Self {
        Self {
            one_byte_start: 0,
            two_byte_start: one_byte,
            three_byte_start: one_byte + two_byte * 2,
            code2_start: FIRST_CODE as u16 + one_byte,
            code3_start: FIRST_CODE as u16 + one_byte + two_byte,
        }
    }
}

/// Immutable catalog of 1-3 byte substrings addressed by single-byte codes.
///
/// The descriptor owns a lazily built [`MatchIndex`]; the first encode call
/// builds it exactly once, even when several threads race for it.
#[derive(Clone)]
pub struct DictionaryDescriptor {
    table: Cow<'static, [u8]>,
    layout: DictionaryLayout,
    /// One past the last assigned code.
    end_code: u16,
    index: OnceLock<MatchIndex>,
}

impl fmt::Debug for DictionaryDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DictionaryDescriptor")
            .field("entries", &self.entry_count())
            .field("bytes", &self.byte_count())
            .field("layout", &self.layout)
            .field("indexed", &self.index.get().is_some())
            .finish()
    }
}

impl PartialEq for DictionaryDescriptor {
    fn eq(&self, other: &Self) -> bool {
        self.layout == other.layout && self.table == other.table
    }
}

impl Eq for DictionaryDescriptor {}

impl DictionaryDescriptor {
    /// Create a descriptor, validating the layout against the table.
    pub fn new(table: impl Into<Cow<'static, [u8]>>, layout: DictionaryLayout) -> Result<Self> {
        let table = table.into();
        let end_code = validate(&table, &layout)?;
        Ok(Self {
            table,
            layout,
            end_code,
            index: OnceLock::new(),
        })
    }

    /// Create a descriptor over a static table without validation.
    ///
    /// `end_code` must be one past the last code the layout assigns. Used
    /// for compiled-in dictionaries, which are checked by their unit tests.
    pub(crate) const fn from_static(
        table: &'static [u8],
        layout: DictionaryLayout,
        end_code: u16,
    ) -> Self {
        Self {
            table: Cow::Borrowed(table),
            layout,
            end_code,
            index: OnceLock::new(),
        }
    }

    /// The compiled-in general-purpose English dictionary.
    pub fn builtin() -> &'static DictionaryDescriptor {
        &crate::builtin::BUILTIN
    }

    /// Raw table bytes.
    pub fn table(&self) -> &[u8] {
        &self.table
    }

    /// Group boundaries and code starts.
    pub fn layout(&self) -> DictionaryLayout {
        self.layout
    }

    /// Total number of assigned codes.
    pub fn entry_count(&self) -> usize {
        (self.end_code - FIRST_CODE as u16) as usize
    }

    /// Total number of bytes in the table.
    pub fn byte_count(&self) -> usize {
        self.table.len()
    }

    /// One past the last assigned code.
    pub fn end_code(&self) -> u16 {
        self.end_code
    }

    /// Resolve a code to its entry bytes.
    ///
    /// Returns `None` for reserved codes and codes past the last entry.
    pub fn entry(&self, code: u8) -> Option<&[u8]> {
        let code = u16::from(code);
        if code < u16::from(FIRST_CODE) || code >= self.end_code {
            return None;
        }

        let layout = &self.layout;
        let (offset, len) = if code >= layout.code3_start {
            (
                layout.three_byte_start as usize + (code - layout.code3_start) as usize * 3,
                3,
            )
        } else if code >= layout.code2_start {
            (
                layout.two_byte_start as usize + (code - layout.code2_start) as usize * 2,
                2,
            )
        } else {
            (
                layout.one_byte_start as usize + (code - u16::from(FIRST_CODE)) as usize,
                1,
            )
        };

        self.table.get(offset..offset + len)
    }

    /// Iterate over every assigned code and its bytes, in code order.
    pub fn entries(&self) -> impl Iterator<Item = (u8, &[u8])> + '_ {
        (u16::from(FIRST_CODE)..self.end_code).filter_map(move |code| {
            let code = code as u8;
            self.entry(code).map(|bytes| (code, bytes))
        })
    }

    /// The cached match index, built on first use.
    pub fn match_index(&self) -> &MatchIndex {
        self.index.get_or_init(|| MatchIndex::build(self))
    }

    /// Whether the match index has been built.
    pub fn is_indexed(&self) -> bool {
        self.index.get().is_some()
    }
}

impl MatchLookup for DictionaryDescriptor {
    fn lookup(&self, bytes: &[u8]) -> Option<u8> {
        self.match_index().lookup(bytes)
    }
}

/// Check a layout against its table, returning one past the last code.
fn validate(table: &[u8], layout: &DictionaryLayout) -> Result<u16> {
    let DictionaryLayout {
        one_byte_start,
        two_byte_start,
        three_byte_start,
        code2_start,
        code3_start,
    } = *layout;

    if table.len() > usize::from(u16::MAX) {
        return Err(FbpError::invalid_dictionary(format!(
            "table of {} bytes exceeds {} bytes",
            table.len(),
            u16::MAX
        )));
    }
    if !(one_byte_start <= two_byte_start
        && two_byte_start <= three_byte_start
        && usize::from(three_byte_start) <= table.len())
    {
        return Err(FbpError::invalid_dictionary(format!(
            "group offsets {one_byte_start}/{two_byte_start}/{three_byte_start} \
             out of order for a {}-byte table",
            table.len()
        )));
    }
    if code2_start < u16::from(FIRST_CODE) || code2_start > code3_start {
        return Err(FbpError::invalid_dictionary(format!(
            "code starts {code2_start}/{code3_start} out of order"
        )));
    }

    let singles = two_byte_start - one_byte_start;
    if code2_start - u16::from(FIRST_CODE) != singles {
        return Err(FbpError::invalid_dictionary(format!(
            "{singles} single-byte entries but code2 start is {code2_start}"
        )));
    }

    let pair_bytes = three_byte_start - two_byte_start;
    if usize::from(pair_bytes) != usize::from(code3_start - code2_start) * 2 {
        return Err(FbpError::invalid_dictionary(format!(
            "{pair_bytes} bytes of pairs do not fill codes {code2_start}..{code3_start}"
        )));
    }

    let triple_bytes = table.len() - usize::from(three_byte_start);
    if triple_bytes % 3 != 0 {
        return Err(FbpError::invalid_dictionary(format!(
            "{triple_bytes} trailing bytes are not whole triples"
        )));
    }

    let end_code = usize::from(code3_start) + triple_bytes / 3;
    if end_code > usize::from(FIRST_CODE) + MAX_ENTRIES {
        return Err(FbpError::invalid_dictionary(format!(
            "{} entries exceed the {MAX_ENTRIES} available codes",
            end_code - usize::from(FIRST_CODE)
        )));
    }

    if let Some(pos) = table[usize::from(one_byte_start)..]
        .iter()
        .position(|&b| b == END)
    {
        return Err(FbpError::invalid_dictionary(format!(
            "NUL byte at table offset {}",
            usize::from(one_byte_start) + pos
        )));
    }

    Ok(end_code as u16)
}

#[cfg(feature = "serde")]
mod file {
    use super::{DictionaryDescriptor, DictionaryLayout};
    use crate::error::Result;
    use serde::{Deserialize, Serialize};
    use std::fs;
    use std::path::Path;

    /// On-disk form of a dictionary descriptor.
    #[derive(Debug, Clone, Serialize, Deserialize)]
    pub struct DictionaryFile {
        /// Human-readable name.
        #[serde(default)]
        pub name: Option<String>,
        /// Group boundaries and code starts.
        #[serde(flatten)]
        pub layout: DictionaryLayout,
        /// Number of entries, informational only.
        #[serde(default)]
        pub entries: usize,
        /// Flat entry table.
        pub table: Vec<u8>,
    }

    impl DictionaryDescriptor {
        /// Convert to the on-disk form.
        pub fn to_file(&self, name: Option<&str>) -> DictionaryFile {
            DictionaryFile {
                name: name.map(str::to_owned),
                layout: self.layout,
                entries: self.entry_count(),
                table: self.table.to_vec(),
            }
        }

        /// Validate and convert from the on-disk form.
        pub fn from_file(file: DictionaryFile) -> Result<Self> {
            Self::new(file.table, file.layout)
        }

        /// Load a dictionary from a JSON file.
        pub fn load(path: impl AsRef<Path>) -> Result<Self> {
            let text = fs::read_to_string(path.as_ref())?;
            let file: DictionaryFile = serde_json::from_str(&text)?;
            tracing::debug!(path = %path.as_ref().display(), "loaded dictionary");
            Self::from_file(file)
        }

        /// Save the dictionary as pretty-printed JSON.
        pub fn save(&self, path: impl AsRef<Path>, name: Option<&str>) -> Result<()> {
            let json = serde_json::to_string_pretty(&self.to_file(name))?;
            fs::write(path, json)?;
            Ok(())
        }
    }
}

#[cfg(feature = "serde")]
pub use file::DictionaryFile;
