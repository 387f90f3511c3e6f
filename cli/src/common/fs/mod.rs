//! # brpost Filesystem Utilities (`common::fs`)
//!
//! File: cli/src/common/fs/mod.rs
//!
//! ## Overview
//!
//! Filesystem helpers used when the CLI plays the role of the bundler:
//!
//! - **`io`**: Reads a single file into an `Artifact` and formats paths for output.
//! - **`scan`**: Walks an output directory and builds the full artifact map.
//!
//! ```rust
//! use crate::common::fs::scan;
//!
//! # fn run() -> crate::core::error::Result<()> {
//! let artifacts = scan::collect_artifacts(std::path::Path::new("dist"))?;
//! println!("{} artifact(s)", artifacts.len());
//! # Ok(())
//! # }
//! ```
//!

/// Single-file reads and path display helpers.
pub mod io;
/// Output directory walking.
pub mod scan;
