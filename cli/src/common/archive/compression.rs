//! # brpost Compression Driver (`common::archive::compression`)
//!
//! File: cli/src/common/archive/compression.rs
//!
//! ## Overview
//!
//! Compresses a single file into a Brotli sibling (`<path>.br`). The driver
//! never returns an error: every way a file can be skipped or fail is
//! reported as a `CompressOutcome`, and the orchestrator decides what to log.
//!
//! ## Architecture
//!
//! `compress_file` runs these steps:
//! 1. Stat the file (`tokio::fs::metadata`). A failure yields `SkippedMissing`.
//! 2. If a minimum size is configured and the file is smaller, yield `SkippedTooSmall`.
//! 3. Stream the file through `brotli::BrotliCompress` into `<path>.br`
//!    (created or truncated). The encoder is synchronous, so this step runs on
//!    tokio's blocking pool.
//! 4. Any error while streaming yields `Failed`. The partially written `.br`
//!    file is removed so a broken sibling is never left next to the original.
//!
//! ## Usage
//!
//! ```rust
//! use crate::common::archive::compression::{self, CompressOutcome};
//! use crate::core::config::BrotliOptions;
//! # async fn run() {
//! let outcome = compression::compress_file(
//!     std::path::Path::new("dist/app.js"),
//!     &BrotliOptions::default(),
//!     1024,
//! )
//! .await;
//! if let CompressOutcome::Compressed { original, compressed } = outcome {
//!     println!("{} -> {} bytes", original, compressed);
//! }
//! # }
//! ```
//!
use crate::core::config::{BrotliOptions, EncoderMode};
use crate::core::error::{BrpostError, Result};
use anyhow::{anyhow, Context};
use brotli::enc::backward_references::BrotliEncoderMode;
use brotli::enc::BrotliEncoderParams;
use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::{Path, PathBuf};
use tracing::{debug, trace};

/// Suffix appended to the original path to form the compressed sibling.
pub const SUFFIX: &str = ".br";

/// Result of compressing one file.
#[derive(Debug)]
pub enum CompressOutcome {
    /// `<path>.br` was written.
    Compressed { original: u64, compressed: u64 },
    /// The file is smaller than the configured minimum size.
    SkippedTooSmall { size: u64 },
    /// The file could not be stat'ed (missing, permission denied, ...).
    SkippedMissing { error: std::io::Error },
    /// Reading, encoding, or writing failed part way through.
    Failed { error: anyhow::Error },
}

impl CompressOutcome {
    pub fn is_compressed(&self) -> bool {
        matches!(self, CompressOutcome::Compressed { .. })
    }

    pub fn is_skipped(&self) -> bool {
        matches!(
            self,
            CompressOutcome::SkippedTooSmall { .. } | CompressOutcome::SkippedMissing { .. }
        )
    }

    pub fn is_failed(&self) -> bool {
        matches!(self, CompressOutcome::Failed { .. })
    }
}

/// Returns `<path>.br`. The suffix is appended, the original extension is kept.
pub fn sibling_path(path: &Path) -> PathBuf {
    let mut name = path.as_os_str().to_os_string();
    name.push(SUFFIX);
    PathBuf::from(name)
}

/// Builds encoder parameters from the configured options.
///
/// A `size_hint` of zero is replaced by the actual size of the file.
pub fn encoder_params(options: &BrotliOptions, file_size: u64) -> BrotliEncoderParams {
    let size_hint = if options.size_hint > 0 {
        options.size_hint
    } else {
        file_size
    };
    BrotliEncoderParams {
        quality: options.quality as i32,
        lgwin: options.lgwin as i32,
        mode: match options.mode {
            EncoderMode::Generic => BrotliEncoderMode::BROTLI_MODE_GENERIC,
            EncoderMode::Text => BrotliEncoderMode::BROTLI_MODE_TEXT,
            EncoderMode::Font => BrotliEncoderMode::BROTLI_MODE_FONT,
        },
        size_hint: usize::try_from(size_hint).unwrap_or(usize::MAX),
        ..Default::default()
    }
}

/// Compresses `path` into `<path>.br` unless it is missing or smaller than `min_size`.
///
/// `min_size == 0` disables the size threshold.
pub async fn compress_file(
    path: &Path,
    options: &BrotliOptions,
    min_size: u64,
) -> CompressOutcome {
    let metadata = match tokio::fs::metadata(path).await {
        Ok(metadata) => metadata,
        Err(error) => return CompressOutcome::SkippedMissing { error },
    };

    let size = metadata.len();
    if min_size > 0 && size < min_size {
        trace!("{} is {} bytes, below minimum {}", path.display(), size, min_size);
        return CompressOutcome::SkippedTooSmall { size };
    }

    let source = path.to_path_buf();
    let target = sibling_path(path);
    let params = encoder_params(options, size);
    let buffer_size = options.buffer_size;

    let task_target = target.clone();
    let joined = tokio::task::spawn_blocking(move || {
        stream_compress(&source, &task_target, &params, buffer_size)
    })
    .await;

    let error = match joined {
        Ok(Ok(compressed)) => {
            return CompressOutcome::Compressed {
                original: size,
                compressed,
            }
        }
        Ok(Err(e)) => e,
        Err(join_err) => anyhow!(
            "Compression task for '{}' did not complete: {}",
            path.display(),
            join_err
        ),
    };

    remove_partial_output(&target).await;
    CompressOutcome::Failed { error }
}

/// Streams `source` through the Brotli encoder into `target`. Returns the number of bytes written.
fn stream_compress(
    source: &Path,
    target: &Path,
    params: &BrotliEncoderParams,
    buffer_size: usize,
) -> Result<u64> {
    let input = File::open(source)
        .with_context(|| format!("Failed to open '{}' for reading", source.display()))?;
    let output = File::create(target)
        .with_context(|| format!("Failed to create '{}'", target.display()))?;

    let mut reader = BufReader::with_capacity(buffer_size, input);
    let mut writer = BufWriter::with_capacity(buffer_size, output);

    brotli::BrotliCompress(&mut reader, &mut writer, params).map_err(|source_err| {
        BrpostError::Compression {
            path: source.to_path_buf(),
            source: source_err,
        }
    })?;

    let output = writer
        .into_inner()
        .map_err(|e| e.into_error())
        .with_context(|| format!("Failed to flush '{}'", target.display()))?;
    let written = output
        .metadata()
        .with_context(|| format!("Failed to stat '{}'", target.display()))?
        .len();

    debug!("Wrote {} ({} bytes)", target.display(), written);
    Ok(written)
}

async fn remove_partial_output(target: &Path) {
    match tokio::fs::remove_file(target).await {
        Ok(()) => debug!("Removed partial output {}", target.display()),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
        Err(e) => debug!("Could not remove partial output {}: {}", target.display(), e),
    }
}
