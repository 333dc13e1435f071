//! Utility functions for the CLI.

use fbp_codec::{BUILTIN_NAME, DictionaryDescriptor, DictionaryRegistry};
use fbp_core::DictionaryFile;
use indicatif::{ProgressBar, ProgressStyle};
use std::path::Path;
use std::sync::Arc;

/// Create a progress bar with standard styling.
pub fn create_progress_bar(len: u64, enable: bool) -> ProgressBar {
    if !enable {
        return ProgressBar::hidden();
    }

    let pb = ProgressBar::new(len);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("[{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} {msg}")
            .expect("progress bar template is valid")
            .progress_chars("█▓▒░ "),
    );
    pb
}

/// Registry holding the built-in dictionary and, when `path` is given, the
/// dictionary stored there as the default.
///
/// A loaded dictionary is registered under the name recorded in its file,
/// falling back to the file stem.
pub fn load_registry(path: Option<&Path>) -> Result<DictionaryRegistry, Box<dyn std::error::Error>> {
    let mut registry = DictionaryRegistry::with_builtin();
    let Some(path) = path else {
        return Ok(registry);
    };

    let text = std::fs::read_to_string(path)?;
    let file: DictionaryFile = serde_json::from_str(&text)?;
    let name = file
        .name
        .clone()
        .filter(|n| !n.is_empty() && n != BUILTIN_NAME)
        .or_else(|| path.file_stem().map(|s| s.to_string_lossy().into_owned()))
        .unwrap_or_else(|| "custom".to_string());

    let dict = DictionaryDescriptor::from_file(file)?;
    tracing::info!(
        path = %path.display(),
        name = %name,
        entries = dict.entry_count(),
        "loaded dictionary"
    );
    registry.register(name.as_str(), dict);
    registry.set_default(&name)?;
    Ok(registry)
}

/// Resolve the active dictionary and its name.
pub fn active_dictionary(
    path: Option<&Path>,
) -> Result<(String, Arc<DictionaryDescriptor>), Box<dyn std::error::Error>> {
    let registry = load_registry(path)?;
    let name = registry.default_name().unwrap_or(BUILTIN_NAME).to_string();
    let dict = registry.resolve(&name)?;
    Ok((name, dict))
}

/// Percentage saved going from `before` to `after` bytes.
///
/// Negative when the output grew.
pub fn savings(before: usize, after: usize) -> f64 {
    if before == 0 {
        return 0.0;
    }
    100.0 - (after as f64 / before as f64) * 100.0
}

/// Render bytes as a C initializer list body: `0x04, 0x03, 0x00`.
pub fn hex_list(bytes: &[u8]) -> String {
    bytes
        .iter()
        .map(|b| format!("0x{:02x}", b))
        .collect::<Vec<_>>()
        .join(", ")
}

/// Render a `const char` array declaration.
///
/// `postfix` is placed between the declarator and the initializer, e.g.
/// `PROGMEM`.
pub fn c_array(name: &str, postfix: &str, bytes: &[u8]) -> String {
    let postfix = postfix.trim();
    if postfix.is_empty() {
        format!("const char {}[] = {{ {} }};", name, hex_list(bytes))
    } else {
        format!("const char {}[] {} = {{ {} }};", name, postfix, hex_list(bytes))
    }
}

/// Parse a list of hex bytes such as `0x04, 0x03, 0x00`.
///
/// Surrounding braces and a trailing semicolon are ignored, so a C
/// initializer can be pasted as is. With `prefix` every value must carry
/// `0x`; otherwise values are bare hex digits.
pub fn parse_byte_list(input: &str, separator: &str, prefix: bool) -> Result<Vec<u8>, String> {
    let body = input.trim().trim_end_matches(';').trim();
    let body = body
        .strip_prefix('{')
        .and_then(|b| b.strip_suffix('}'))
        .unwrap_or(body)
        .trim();

    if body.is_empty() {
        return Ok(Vec::new());
    }

    let separator = if separator.trim().is_empty() {
        None
    } else {
        Some(separator.trim())
    };
    let items: Vec<&str> = match separator {
        Some(sep) => body.split(sep).collect(),
        None => body.split_whitespace().collect(),
    };

    items
        .into_iter()
        .map(str::trim)
        .filter(|item| !item.is_empty())
        .map(|item| {
            let digits = if prefix {
                item.strip_prefix("0x")
                    .or_else(|| item.strip_prefix("0X"))
                    .ok_or_else(|| format!("expected 0x prefix: '{}'", item))?
            } else {
                item
            };
            u8::from_str_radix(digits, 16).map_err(|_| format!("invalid byte: '{}'", item))
        })
        .collect()
}
