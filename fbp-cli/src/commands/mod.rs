//! Command implementations for the FBP CLI.

pub mod batch;
pub mod build_dict;
pub mod decode;
pub mod encode;
pub mod info;

pub use batch::{BatchOptions, cmd_batch};
pub use build_dict::{DictFormat, cmd_build_dict};
pub use decode::cmd_decode;
pub use encode::cmd_encode;
pub use info::cmd_info;
