//! # FBP Core
//!
//! Core components for the FBP fixed byte-pair text codec.
//!
//! This crate provides the pieces shared by the encoder and decoder:
//!
//! - [`descriptor`]: Dictionary descriptor (flat entry table + code ranges)
//! - [`index`]: Substring-to-code match index used by the encoder
//! - [`token`]: Compressed stream wire format
//! - [`traits`]: Match lookup capability
//! - [`error`]: Error types
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────┐
//! │ L3: Front ends                                          │
//! │     fbp CLI, C table generation                         │
//! ├─────────────────────────────────────────────────────────┤
//! │ L2: Codec                                               │
//! │     Encoder, Decoder, DictionaryBuilder, Registry       │
//! ├─────────────────────────────────────────────────────────┤
//! │ L1: Core (this crate)                                   │
//! │     DictionaryDescriptor, MatchIndex, Token             │
//! └─────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Example
//!
//! ```rust
//! use fbp_core::{DictionaryDescriptor, MatchLookup};
//!
//! let dict = DictionaryDescriptor::builtin();
//! assert_eq!(dict.entry_count(), 253);
//!
//! // "the" is a single three-byte entry
//! let code = dict.lookup(b"the").unwrap();
//! assert_eq!(dict.entry(code), Some(&b"the"[..]));
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![forbid(unsafe_code)]

mod builtin;
pub mod descriptor;
pub mod error;
pub mod index;
pub mod token;
pub mod traits;

// Re-exports for convenience
#[cfg(feature = "serde")]
pub use descriptor::DictionaryFile;
pub use descriptor::{DictionaryDescriptor, DictionaryLayout};
pub use error::{FbpError, Result};
pub use index::MatchIndex;
pub use token::{Token, TokenReader};
pub use traits::MatchLookup;
