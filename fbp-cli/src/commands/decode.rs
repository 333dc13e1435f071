//! Decode command implementation.

use crate::utils::{parse_byte_list, savings};
use fbp_codec::{DictionaryDescriptor, decode};
use fbp_core::token::END;
use std::io::Write;

/// Parse a hex byte list, decode it and print the text with its expansion.
///
/// A list without a trailing `0x00` is terminated implicitly.
pub fn cmd_decode(
    dict: &DictionaryDescriptor,
    input: &str,
    separator: &str,
    prefix: bool,
    out: &mut impl Write,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut stream = parse_byte_list(input, separator, prefix)?;
    if stream.last() != Some(&END) {
        tracing::debug!(len = stream.len(), "appending missing terminator");
        stream.push(END);
    }

    let text = decode(dict, &stream)?;
    let src_len = stream.iter().position(|&b| b == END).map_or(stream.len(), |p| p + 1);
    let dst_len = text.len() + 1;

    writeln!(
        out,
        "expanded by {:.2}%, {} -> {} characters",
        -savings(src_len, dst_len),
        src_len,
        dst_len
    )?;
    writeln!(out, "{}", String::from_utf8_lossy(&text))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use fbp_codec::DictionaryLayout;

    fn dict() -> DictionaryDescriptor {
        DictionaryDescriptor::new(b"eth".to_vec(), DictionaryLayout::packed(1, 1)).unwrap()
    }

    #[test]
    fn test_decode_output() {
        let mut out = Vec::new();
        cmd_decode(&dict(), "0x04, 0x03, 0x00", ", ", true, &mut out).unwrap();
        assert_eq!(
            String::from_utf8(out).unwrap(),
            "expanded by 33.33%, 3 -> 4 characters\nthe\n"
        );
    }

    #[test]
    fn test_decode_without_prefix_or_terminator() {
        let mut out = Vec::new();
        cmd_decode(&dict(), "04 03", " ", false, &mut out).unwrap();
        assert!(String::from_utf8(out).unwrap().ends_with("\nthe\n"));
    }

    #[test]
    fn test_decode_rejects_bad_input() {
        let mut out = Vec::new();
        assert!(cmd_decode(&dict(), "0x04, zz", ", ", true, &mut out).is_err());
        assert!(cmd_decode(&dict(), "0x01, 0x05, 0x41", ", ", true, &mut out).is_err());
    }
}
