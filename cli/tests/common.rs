//! # brpost CLI Integration Test Common Helpers
//!
//! File: cli/tests/common.rs
//!
//! ## Overview
//!
//! Shared helpers for the integration tests in `cli/tests/`. Each test file
//! declares `mod common;` and runs the compiled `brpost` binary through
//! `assert_cmd`.
//!

// Different test files use different helpers.
#![allow(dead_code)]

pub use assert_cmd::Command;
use std::io::Read;
use std::path::Path;

/// # Get brpost Command (`brpost_cmd`)
///
/// Returns an `assert_cmd::Command` for the compiled `brpost` binary.
/// `RUST_LOG` is cleared so the default `warn` level applies regardless of
/// the environment the tests run in.
///
/// ## Panics
/// Panics if the `brpost` binary cannot be found via `Command::cargo_bin`.
pub fn brpost_cmd() -> Command {
    let mut cmd = Command::cargo_bin("brpost").expect("Failed to find brpost binary for testing");
    cmd.env_remove("RUST_LOG");
    cmd
}

/// Decompresses a `.br` file written by brpost.
pub fn read_brotli(path: &Path) -> Vec<u8> {
    let file = std::fs::File::open(path).expect("Failed to open .br file");
    let mut decoder = brotli::Decompressor::new(file, 4096);
    let mut out = Vec::new();
    decoder
        .read_to_end(&mut out)
        .expect("Failed to decompress .br file");
    out
}

/// Repetitive text of exactly `len` bytes.
pub fn text_of_len(len: usize) -> Vec<u8> {
    b"export function greet(name) { return `Hello, ${name}!`; }\n"
        .iter()
        .copied()
        .cycle()
        .take(len)
        .collect()
}
