//! FBP CLI - string table compression for small devices
//!
//! Encodes text into fixed byte-pair dictionary streams and renders them as
//! C source, decodes streams back, and builds dictionaries from sample text.

mod commands;
mod utils;

use clap::{Parser, Subcommand};
use commands::{
    BatchOptions, DictFormat, cmd_batch, cmd_build_dict, cmd_decode, cmd_encode, cmd_info,
};
use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;
use utils::active_dictionary;

#[derive(Parser)]
#[command(name = "fbp")]
#[command(
    author,
    version,
    about = "Fixed byte-pair dictionary compression for string tables"
)]
#[command(long_about = "
FBP compresses short strings against a dictionary of at most 253 common
1-, 2- and 3-byte substrings. The output is meant to be embedded in
firmware and expanded by a tiny decoder.

Examples:
  fbp encode \"Battery low\"
  fbp encode --name Greeting --postfix PROGMEM \"Hello there\"
  fbp decode \"0x42, 0x61, 0x00\"
  fbp batch messages.txt -o messages.c --progmem
  fbp build-dict messages.txt -o messages.json
  fbp --dict messages.json batch messages.txt
  fbp info --entries
")]
struct Cli {
    /// Dictionary JSON file (built-in dictionary if omitted)
    #[arg(short, long, global = true)]
    dict: Option<PathBuf>,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Encode a string and print it as a C array
    #[command(alias = "e")]
    Encode {
        /// Text to encode (first line of stdin if omitted)
        text: Option<String>,

        /// C variable name
        #[arg(short, long, default_value = "String")]
        name: String,

        /// Declaration postfix, e.g. PROGMEM
        #[arg(short, long, default_value = "")]
        postfix: String,
    },

    /// Decode a list of hex bytes
    #[command(alias = "d")]
    Decode {
        /// Byte list, e.g. "0x04, 0x03, 0x00" (first line of stdin if omitted)
        bytes: Option<String>,

        /// Byte separator
        #[arg(short, long, default_value = ", ")]
        separator: String,

        /// Values carry no 0x prefix
        #[arg(short = 'P', long)]
        no_prefix: bool,
    },

    /// Encode every line of a file into a C string table
    #[command(alias = "b")]
    Batch {
        /// Input text file, one string per line (stdin if omitted)
        input: Option<PathBuf>,

        /// Output file (stdout if omitted)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Base C variable name
        #[arg(short, long, default_value = "String")]
        name: String,

        /// Place the arrays in PROGMEM
        #[arg(short, long)]
        progmem: bool,

        /// Skip lines starting with this string
        #[arg(short, long, default_value = "#")]
        comment: String,

        /// Per-line buffer size on the target; longer lines are reported
        /// but encoded in full unless --truncate is given
        #[arg(long, default_value_t = 255)]
        line_max: usize,

        /// Cut each encoded line to fit a --line-max byte buffer
        #[arg(short, long)]
        truncate: bool,

        /// Encode lines in parallel
        #[arg(long)]
        parallel: bool,

        /// Show progress bar
        #[arg(short = 'P', long)]
        progress: bool,
    },

    /// Build a dictionary from sample text
    BuildDict {
        /// Sample text file, one string per line
        input: PathBuf,

        /// Output file (stdout if omitted)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Output format
        #[arg(short, long, value_enum, default_value = "json")]
        format: DictFormat,

        /// Dictionary name (input file stem if omitted)
        #[arg(short, long)]
        name: Option<String>,

        /// Maximum number of entries (at most 253)
        #[arg(short, long, default_value_t = 253)]
        max_entries: usize,

        /// Skip lines starting with this string
        #[arg(short, long, default_value = "#")]
        comment: String,

        /// Keep leading and trailing whitespace
        #[arg(long)]
        no_trim: bool,
    },

    /// Show dictionary information
    #[command(alias = "i")]
    Info {
        /// List every code and its bytes
        #[arg(short, long)]
        entries: bool,
    },
}

/// Install the stderr log subscriber.
///
/// `RUST_LOG` takes precedence over the `-v` count.
fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .init();
}

/// First line of stdin without its line ending.
fn read_stdin_line() -> io::Result<String> {
    let mut line = String::new();
    io::stdin().lock().read_line(&mut line)?;
    let trimmed = line.trim_end_matches(['\r', '\n']).len();
    line.truncate(trimmed);
    Ok(line)
}

/// Open the output file, or stdout.
fn open_output(path: Option<&Path>) -> io::Result<Box<dyn Write>> {
    Ok(match path {
        Some(path) => Box::new(io::BufWriter::new(std::fs::File::create(path)?)),
        None => Box::new(io::BufWriter::new(io::stdout().lock())),
    })
}

fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let stdout = io::stdout();

    match cli.command {
        Commands::Encode {
            text,
            name,
            postfix,
        } => {
            let (_, dict) = active_dictionary(cli.dict.as_deref())?;
            let text = match text {
                Some(text) => text,
                None => read_stdin_line()?,
            };
            cmd_encode(&dict, &text, &name, &postfix, &mut stdout.lock())
        }
        Commands::Decode {
            bytes,
            separator,
            no_prefix,
        } => {
            let (_, dict) = active_dictionary(cli.dict.as_deref())?;
            let bytes = match bytes {
                Some(bytes) => bytes,
                None => read_stdin_line()?,
            };
            cmd_decode(&dict, &bytes, &separator, !no_prefix, &mut stdout.lock())
        }
        Commands::Batch {
            input,
            output,
            name,
            progmem,
            comment,
            line_max,
            truncate,
            parallel,
            progress,
        } => {
            let (_, dict) = active_dictionary(cli.dict.as_deref())?;
            let (text, source) = match &input {
                Some(path) => (std::fs::read_to_string(path)?, path.display().to_string()),
                None => (io::read_to_string(io::stdin())?, "stdin".to_string()),
            };
            let options = BatchOptions {
                name,
                progmem,
                comment,
                line_max,
                truncate,
                parallel,
                progress,
            };
            let mut out = open_output(output.as_deref())?;
            cmd_batch(&dict, &text, &source, &options, &mut out)?;
            out.flush()?;
            Ok(())
        }
        Commands::BuildDict {
            input,
            output,
            format,
            name,
            max_entries,
            comment,
            no_trim,
        } => cmd_build_dict(
            &input,
            output.as_deref(),
            format,
            name.as_deref(),
            max_entries,
            &comment,
            !no_trim,
            &mut stdout.lock(),
        ),
        Commands::Info { entries } => {
            let (name, dict) = active_dictionary(cli.dict.as_deref())?;
            cmd_info(&dict, &name, entries, &mut stdout.lock())
        }
    }
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    if let Err(e) = run(cli) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
