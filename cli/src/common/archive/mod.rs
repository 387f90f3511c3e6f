//! # brpost Archive Utilities Module (`common::archive`)
//!
//! File: cli/src/common/archive/mod.rs
//!
//! ## Overview
//!
//! Everything that deals with compressed data:
//!
//! - **`signature`**: Detects artifacts that are already compressed, by file
//!   name suffix or by magic bytes.
//! - **`compression`**: The per-file Brotli driver that writes `<path>.br`.
//!
//! ## Usage
//!
//! ```rust
//! use crate::common::archive::{compression, signature};
//!
//! # async fn run(artifact: &crate::core::artifact::Artifact) {
//! if !signature::is_compressed(artifact) {
//!     let path = std::path::Path::new("dist").join(&artifact.file_name);
//!     let outcome = compression::compress_file(&path, &Default::default(), 0).await;
//!     println!("{:?}", outcome);
//! }
//! # }
//! ```
//!

/// Per-file Brotli compression into a `.br` sibling.
pub mod compression;
/// Compressed-format detection (extensions and magic bytes).
pub mod signature;
