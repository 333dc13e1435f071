//! Info command implementation.

use fbp_codec::DictionaryDescriptor;
use fbp_core::token::MAX_ENTRY_LEN;
use std::io::Write;

/// Print dictionary statistics and, optionally, every entry.
pub fn cmd_info(
    dict: &DictionaryDescriptor,
    name: &str,
    entries: bool,
    out: &mut impl Write,
) -> Result<(), Box<dyn std::error::Error>> {
    let layout = dict.layout();
    let mut per_len = [0usize; MAX_ENTRY_LEN + 1];
    for (_, entry) in dict.entries() {
        per_len[entry.len()] += 1;
    }

    writeln!(out, "Dictionary Information")?;
    writeln!(out, "======================")?;
    writeln!(out, "Name: {}", name)?;
    writeln!(out, "Entries: {} of 253", dict.entry_count())?;
    writeln!(out, "Table size: {} bytes", dict.byte_count())?;
    writeln!(out)?;
    writeln!(out, "Groups:")?;
    writeln!(
        out,
        "  1-byte: {:>3} entries, codes from {}, table offset {}",
        per_len[1], 3, layout.one_byte_start
    )?;
    writeln!(
        out,
        "  2-byte: {:>3} entries, codes from {}, table offset {}",
        per_len[2], layout.code2_start, layout.two_byte_start
    )?;
    writeln!(
        out,
        "  3-byte: {:>3} entries, codes from {}, table offset {}",
        per_len[3], layout.code3_start, layout.three_byte_start
    )?;
    writeln!(out, "  Codes end at: {}", dict.end_code())?;

    if entries {
        writeln!(out)?;
        writeln!(out, "{:>6}  Bytes", "Code")?;
        writeln!(out, "{}", "-".repeat(24))?;
        for (code, entry) in dict.entries() {
            writeln!(out, "  0x{:02x}  '{}'", code, entry.escape_ascii())?;
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use fbp_codec::DictionaryLayout;

    #[test]
    fn test_info_builtin() {
        let mut out = Vec::new();
        cmd_info(DictionaryDescriptor::builtin(), "default", false, &mut out).unwrap();
        let out = String::from_utf8(out).unwrap();
        assert!(out.contains("Name: default\n"));
        assert!(out.contains("Entries: 253 of 253\n"));
        assert!(!out.contains("0x03"));
    }

    #[test]
    fn test_info_entries() {
        let dict =
            DictionaryDescriptor::new(b"\teth".to_vec(), DictionaryLayout::packed(2, 1)).unwrap();
        let mut out = Vec::new();
        cmd_info(&dict, "tiny", true, &mut out).unwrap();
        let out = String::from_utf8(out).unwrap();
        assert!(out.contains("  1-byte:   2 entries"));
        assert!(out.contains("  2-byte:   1 entries, codes from 5"));
        assert!(out.contains("  0x03  '\\t'\n"));
        assert!(out.contains("  0x05  'th'\n"));
    }
}
