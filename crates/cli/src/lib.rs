//! Library half of the `media-dissect` CLI.
//!
//! Each subcommand is a plain function in [`commands`] so it can be tested
//! without spawning the binary.

pub mod commands;

pub use commands::util::{open_input, sha256_file};
