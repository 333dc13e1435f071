//! Compiled-in general-purpose English dictionary.
//!
//! Single bytes cover letters, digits and common punctuation so that most
//! text never needs a literal escape; the remaining codes hold the most
//! frequent English bigrams and trigrams.

use crate::descriptor::{DictionaryDescriptor, DictionaryLayout};

macro_rules! one_byte_entries {
    () => {
        "etaoinsrhldcumfpgwybvkxjqzETAOINSRHLDCUMFPGWYBVKXJQZ0123456789 .,:;!?-'\"()/%=_[]<>+*#@&"
    };
}

macro_rules! two_byte_entries {
    () => {
        concat!(
            "thheineranreonatenndtiesorteofedisitalarsttontngsehaasouiolevecomedehiriroic",
            "neearacelichllbemasiomurcaeltalansdifohopeecprnoctusacotiltrlyncetutsssorsun",
            "lowageiewheewiemadolrtpowenaulnitsmoowpaimmiaishirsuidosiviaamficivipligtuev",
            "ldrympfeblabghtyopwosaay",
        )
    };
}

macro_rules! three_byte_entries {
    () => {
        concat!(
            "theandingiontioentatiforherterhatthaereatehisconresverallonsncemenithtederspro",
            "thiwitareessnotivewasectreacomeveperintest",
        )
    };
}

const TABLE: &str = concat!(
    one_byte_entries!(),
    two_byte_entries!(),
    three_byte_entries!()
);

const ONE_BYTE: u16 = one_byte_entries!().len() as u16;
const TWO_BYTE: u16 = (two_byte_entries!().len() / 2) as u16;
const THREE_BYTE: u16 = (three_byte_entries!().len() / 3) as u16;

const LAYOUT: DictionaryLayout = DictionaryLayout::packed(ONE_BYTE, TWO_BYTE);

pub(crate) static BUILTIN: DictionaryDescriptor = DictionaryDescriptor::from_static(
    TABLE.as_bytes(),
    LAYOUT,
    LAYOUT.code3_start + THREE_BYTE,
);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::traits::MatchLookup;
    use std::collections::HashSet;

    #[test]
    fn test_builtin_layout_is_valid() {
        let checked = DictionaryDescriptor::new(TABLE.as_bytes(), LAYOUT).unwrap();
        assert_eq!(checked.end_code(), BUILTIN.end_code());
        assert_eq!(BUILTIN.entry_count(), 253);
        assert_eq!(LAYOUT.code2_start, 90);
        assert_eq!(LAYOUT.code3_start, 216);
    }

    #[test]
    fn test_builtin_entries_unique() {
        let mut seen = HashSet::new();
        for (code, entry) in BUILTIN.entries() {
            assert!(seen.insert(entry), "code {code} duplicates {entry:?}");
        }
    }

    #[test]
    fn test_builtin_common_words() {
        let dict = DictionaryDescriptor::builtin();
        assert_eq!(dict.lookup(b"the"), Some(216));
        assert_eq!(dict.lookup(b"th"), Some(90));
        assert_eq!(dict.lookup(b"e"), Some(3));
        assert_eq!(dict.entry(255), Some(&b"est"[..]));
    }
}
