//! Encode command implementation.

use crate::utils::{c_array, savings};
use fbp_codec::{DictionaryDescriptor, encode};
use std::io::Write;

/// Encode one string and print it as a C array with a ratio comment.
pub fn cmd_encode(
    dict: &DictionaryDescriptor,
    text: &str,
    name: &str,
    postfix: &str,
    out: &mut impl Write,
) -> Result<(), Box<dyn std::error::Error>> {
    let packed = encode(dict, text.as_bytes());
    let src_len = text.len() + 1;

    writeln!(out, "// '{}'", text)?;
    writeln!(
        out,
        "// compressed by {:.2}%, {} -> {} characters",
        savings(src_len, packed.len()),
        src_len,
        packed.len()
    )?;
    writeln!(out, "{}", c_array(name, postfix, &packed))?;
    Ok(())
}
