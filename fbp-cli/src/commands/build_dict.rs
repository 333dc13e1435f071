//! Build-dict command implementation.

use crate::utils::hex_list;
use clap::ValueEnum;
use fbp_codec::{DictionaryBuilder, DictionaryDescriptor};
use std::io::Write;
use std::path::Path;

/// Output format for a built dictionary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum, Default)]
pub enum DictFormat {
    /// JSON descriptor, loadable with `--dict`
    #[default]
    Json,
    /// C source with the table and layout constants
    C,
}

/// Render a dictionary as C source.
///
/// Identifiers are derived from `name` in upper case.
pub fn render_c(dict: &DictionaryDescriptor, name: &str) -> String {
    let ident: String = name
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() {
                c.to_ascii_uppercase()
            } else {
                '_'
            }
        })
        .collect();
    let layout = dict.layout();

    let mut out = format!(
        "// dictionary '{}': {} entries, {} bytes\n",
        name,
        dict.entry_count(),
        dict.byte_count()
    );
    let defines = [
        ("ONE_BYTE_START", layout.one_byte_start),
        ("TWO_BYTE_START", layout.two_byte_start),
        ("THREE_BYTE_START", layout.three_byte_start),
        ("CODE2_START", layout.code2_start),
        ("CODE3_START", layout.code3_start),
        ("END_CODE", dict.end_code()),
    ];
    for (suffix, value) in defines {
        out.push_str(&format!("#define {}_{} {}\n", ident, suffix, value));
    }
    out.push('\n');
    out.push_str(&format!("const unsigned char {}_TABLE[] = {{\n", ident));
    for chunk in dict.table().chunks(12) {
        out.push_str(&format!("    {},\n", hex_list(chunk)));
    }
    out.push_str("};\n");
    out
}

/// Build a dictionary from the lines of `input` and write it to `output`
/// (stdout when `None`).
#[allow(clippy::too_many_arguments)]
pub fn cmd_build_dict(
    input: &Path,
    output: Option<&Path>,
    format: DictFormat,
    name: Option<&str>,
    max_entries: usize,
    comment: &str,
    trim: bool,
    out: &mut impl Write,
) -> Result<(), Box<dyn std::error::Error>> {
    let text = std::fs::read(input)?;
    let dict = DictionaryBuilder::new()
        .add_text(&text)
        .comment_prefix(Some(comment))
        .trim(trim)
        .max_entries(max_entries)
        .build()?;

    let name = name
        .map(str::to_string)
        .or_else(|| input.file_stem().map(|s| s.to_string_lossy().into_owned()))
        .unwrap_or_else(|| "dictionary".to_string());

    let rendered = match format {
        DictFormat::Json => serde_json::to_string_pretty(&dict.to_file(Some(&name)))? + "\n",
        DictFormat::C => render_c(&dict, &name),
    };

    match output {
        Some(path) => {
            std::fs::write(path, rendered)?;
            writeln!(
                out,
                "Built dictionary '{}': {} entries, {} bytes -> {}",
                name,
                dict.entry_count(),
                dict.byte_count(),
                path.display()
            )?;
        }
        None => out.write_all(rendered.as_bytes())?,
    }

    tracing::info!(
        input = %input.display(),
        entries = dict.entry_count(),
        "dictionary built"
    );
    Ok(())
}
