//! Batch command implementation.
//!
//! Turns a line-oriented text file into a C string table: one compressed
//! array per line plus an array of pointers to all of them.

use crate::utils::{c_array, create_progress_bar, savings};
use fbp_codec::{DictionaryDescriptor, Encoder, FbpError, encode_all};
use std::io::Write;

/// Options for [`cmd_batch`].
#[derive(Debug, Clone)]
pub struct BatchOptions {
    /// Base variable name; lines become `NAME_0`, `NAME_1`, ... and the
    /// table `NAMEs`.
    pub name: String,
    /// Emit `PROGMEM` on every declaration.
    pub progmem: bool,
    /// Lines starting with this prefix are skipped.
    pub comment: String,
    /// Per-line buffer size on the target; longer lines are reported.
    pub line_max: usize,
    /// Encode each line into a `line_max` byte buffer, cutting off what
    /// does not fit. Otherwise lines are never truncated.
    pub truncate: bool,
    /// Encode lines on the rayon thread pool.
    pub parallel: bool,
    /// Show a progress bar on stderr.
    pub progress: bool,
}

impl Default for BatchOptions {
    fn default() -> Self {
        Self {
            name: "String".to_string(),
            progmem: false,
            comment: "#".to_string(),
            line_max: 255,
            truncate: false,
            parallel: false,
            progress: false,
        }
    }
}

/// Lines worth encoding: not blank, not comments.
fn source_lines<'a>(
    input: &'a str,
    comment: &'a str,
) -> impl Iterator<Item = (usize, &'a str)> + 'a {
    input
        .lines()
        .enumerate()
        .map(|(i, line)| (i + 1, line))
        .filter(move |(_, line)| {
            !line.trim().is_empty() && (comment.is_empty() || !line.starts_with(comment))
        })
}

/// Encode every line of `input` and write the C string table.
///
/// `source` names the input in warnings.
pub fn cmd_batch(
    dict: &DictionaryDescriptor,
    input: &str,
    source: &str,
    options: &BatchOptions,
    out: &mut impl Write,
) -> Result<(), Box<dyn std::error::Error>> {
    let lines: Vec<(usize, &str)> = source_lines(input, &options.comment).collect();

    for &(line_no, line) in &lines {
        if line.len() > options.line_max {
            tracing::warn!(
                "{}:{} - line > {} characters",
                source,
                line_no,
                options.line_max
            );
        }
    }

    let pb = create_progress_bar(lines.len() as u64, options.progress);
    let mut encoded: Vec<Vec<u8>> = if options.parallel {
        let texts: Vec<&str> = lines.iter().map(|(_, line)| *line).collect();
        let encoded = encode_all(dict, &texts);
        pb.inc(encoded.len() as u64);
        encoded
    } else {
        let encoder = Encoder::new(dict);
        lines
            .iter()
            .map(|(_, line)| {
                let packed = encoder.encode(line.as_bytes());
                pb.inc(1);
                packed
            })
            .collect()
    };
    pb.finish_and_clear();

    if options.truncate {
        let encoder = Encoder::new(dict);
        let capacity = options.line_max.max(1);
        for ((line_no, line), packed) in lines.iter().zip(encoded.iter_mut()) {
            if packed.len() <= capacity {
                continue;
            }
            let mut buf = vec![0u8; capacity];
            let written = match encoder.encode_into(&mut buf, line.as_bytes()) {
                Ok(written) | Err(FbpError::CapacityExhausted { written, .. }) => written,
                Err(err) => return Err(err.into()),
            };
            buf.truncate(written);
            tracing::warn!(
                "{}:{} - truncated to {} of {} bytes",
                source,
                line_no,
                written,
                packed.len()
            );
            *packed = buf;
        }
    }

    let postfix = if options.progmem { "PROGMEM" } else { "" };
    let mut total_bytes = 0usize;
    let mut compressed_bytes = 0usize;

    for (i, ((_, line), packed)) in lines.iter().zip(&encoded).enumerate() {
        let src_len = line.len() + 1;
        total_bytes += src_len;
        compressed_bytes += packed.len();

        writeln!(out, "// '{}'", line)?;
        writeln!(
            out,
            "// compressed {:.2}%, {} -> {} characters",
            savings(src_len, packed.len()),
            src_len,
            packed.len()
        )?;
        writeln!(
            out,
            "{}",
            c_array(&format!("{}_{}", options.name, i), postfix, packed)
        )?;
    }

    let with_dict = compressed_bytes + dict.byte_count();
    writeln!(out)?;
    writeln!(
        out,
        "// total compression: {:.2}%, {} -> {} bytes",
        savings(total_bytes, compressed_bytes),
        total_bytes,
        compressed_bytes
    )?;
    writeln!(
        out,
        "// w/ dictionary: {:.2}%, {} -> {} bytes",
        savings(total_bytes, with_dict),
        total_bytes,
        with_dict
    )?;
    writeln!(out)?;

    let table_postfix = if options.progmem { " PROGMEM" } else { "" };
    writeln!(
        out,
        "const char* const {}s[]{} = {{",
        options.name, table_postfix
    )?;
    for i in 0..encoded.len() {
        let sep = if i + 1 < encoded.len() { "," } else { "" };
        writeln!(out, "    {}_{}{}", options.name, i, sep)?;
    }
    writeln!(out, "}};")?;
    writeln!(out, "#define {}s_COUNT {}", options.name, encoded.len())?;

    tracing::info!(
        lines = encoded.len(),
        total_bytes,
        compressed_bytes,
        "batch encoded"
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use fbp_codec::decode;

    const INPUT: &str = "# status messages\n\
                         Battery low\n\
                         \n\
                         Connecting to network\n   \n\
                         Sensor offline\n";

    fn run(options: &BatchOptions) -> String {
        let mut out = Vec::new();
        cmd_batch(DictionaryDescriptor::builtin(), INPUT, "test", options, &mut out).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn test_source_lines() {
        let lines: Vec<_> = source_lines(INPUT, "#").collect();
        assert_eq!(
            lines,
            [
                (2, "Battery low"),
                (4, "Connecting to network"),
                (6, "Sensor offline")
            ]
        );
        assert_eq!(source_lines(INPUT, "").count(), 4);
    }

    #[test]
    fn test_batch_table() {
        let out = run(&BatchOptions {
            name: "Msg".to_string(),
            progmem: true,
            ..BatchOptions::default()
        });
        assert!(out.contains("// 'Battery low'\n"));
        assert!(out.contains("const char Msg_0[] PROGMEM = { "));
        assert!(out.contains("const char Msg_2[] PROGMEM = { "));
        assert!(!out.contains("Msg_3"));
        assert!(out.contains("const char* const Msgs[] PROGMEM = {\n    Msg_0,\n    Msg_1,\n    Msg_2\n};\n"));
        assert!(out.contains("#define Msgs_COUNT 3\n"));
        assert!(out.contains("// total compression: "));
        assert!(out.contains("// w/ dictionary: "));
    }

    #[test]
    fn test_truncate_to_line_buffer() {
        let dict = DictionaryDescriptor::builtin();
        let input = "short\n~~~~~~~~~~~~~~~~~~~~ a long line of symbols ~~~~~~~~~~~~~~~~~~~~\n";
        let options = BatchOptions {
            line_max: 16,
            truncate: true,
            ..BatchOptions::default()
        };
        let mut out = Vec::new();
        cmd_batch(dict, input, "test", &options, &mut out).unwrap();
        let out = String::from_utf8(out).unwrap();

        for line in out.lines().filter(|l| l.starts_with("const char String_")) {
            let body = line
                .split_once('{')
                .and_then(|(_, rest)| rest.split_once('}'))
                .map(|(body, _)| body)
                .unwrap();
            let bytes = crate::utils::parse_byte_list(body, ",", true).unwrap();
            assert!(bytes.len() <= 16);
            assert_eq!(bytes.last(), Some(&0));
            let text = decode(dict, &bytes).unwrap();
            assert!(input.contains(std::str::from_utf8(&text).unwrap()));
        }

        let untruncated = run(&BatchOptions {
            line_max: 16,
            ..BatchOptions::default()
        });
        assert_eq!(untruncated, run(&BatchOptions::default()));
    }

    #[test]
    fn test_parallel_matches_sequential() {
        let sequential = run(&BatchOptions::default());
        let parallel = run(&BatchOptions {
            parallel: true,
            ..BatchOptions::default()
        });
        assert_eq!(sequential, parallel);
    }

    #[test]
    fn test_batch_arrays_decode() {
        let dict = DictionaryDescriptor::builtin();
        let out = run(&BatchOptions::default());
        let arrays: Vec<&str> = out
            .lines()
            .filter(|l| l.starts_with("const char String_"))
            .collect();
        assert_eq!(arrays.len(), 3);

        let body = arrays[0]
            .split_once('{')
            .and_then(|(_, rest)| rest.split_once('}'))
            .map(|(body, _)| body)
            .unwrap();
        let bytes = crate::utils::parse_byte_list(body, ",", true).unwrap();
        assert_eq!(decode(dict, &bytes).unwrap(), b"Battery low");
    }
}
