//! # brpost Common Utilities (`common`)
//!
//! File: cli/src/common/mod.rs
//!
//! ## Overview
//!
//! Shared utilities used by the commands, kept apart from command-specific
//! logic (`commands::`) and core infrastructure (`core::`):
//!
//! - **`archive`**: Compressed-format detection and the Brotli compression driver.
//! - **`fs`**: Reading build output from disk into artifacts.
//!

/// Compressed-format detection and per-file Brotli compression.
pub mod archive;
/// Filesystem helpers (artifact reads, output directory scanning).
pub mod fs;
