//! # brpost Build Artifact Model
//!
//! File: cli/src/core/artifact.rs
//!
//! ## Overview
//!
//! Types describing what a bundler hands to a post-build step:
//!
//! - `Artifact`: one emitted output unit, either an `Asset` (raw bytes) or a
//!   `Chunk` (generated code as text).
//! - `OutputOptions`: the bundler's output location, either an explicit output
//!   file or an output directory.
//!
//! The artifact map itself is a `BTreeMap<String, Artifact>` keyed by the
//! artifact's file name, so iteration order is stable across runs.
//!
use std::collections::BTreeMap;
use std::path::PathBuf;

/// Map of artifact file name to artifact, as handed over by the host after a build.
pub type ArtifactMap = BTreeMap<String, Artifact>;

/// The content of an emitted artifact.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ArtifactKind {
    /// Binary or text asset copied/emitted verbatim.
    Asset { source: Vec<u8> },
    /// Generated code.
    Chunk { code: String },
}

/// A single named output file produced by a build.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Artifact {
    /// Path of the artifact relative to the output directory.
    pub file_name: String,
    pub kind: ArtifactKind,
}

impl Artifact {
    pub fn asset(file_name: impl Into<String>, source: Vec<u8>) -> Self {
        Self {
            file_name: file_name.into(),
            kind: ArtifactKind::Asset { source },
        }
    }

    pub fn chunk(file_name: impl Into<String>, code: impl Into<String>) -> Self {
        Self {
            file_name: file_name.into(),
            kind: ArtifactKind::Chunk { code: code.into() },
        }
    }

    /// The artifact's content as bytes: raw source for assets, UTF-8 encoding of the code for chunks.
    pub fn bytes(&self) -> &[u8] {
        match &self.kind {
            ArtifactKind::Asset { source } => source,
            ArtifactKind::Chunk { code } => code.as_bytes(),
        }
    }

    /// Short label for logs (`asset` / `chunk`).
    pub fn kind_label(&self) -> &'static str {
        match self.kind {
            ArtifactKind::Asset { .. } => "asset",
            ArtifactKind::Chunk { .. } => "chunk",
        }
    }
}

/// Where the bundler writes its output.
///
/// Mirrors the two ways a bundler is usually configured: a single output
/// `file` (the output directory is its parent) or an output `dir`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OutputOptions {
    pub file: Option<PathBuf>,
    pub dir: Option<PathBuf>,
}

impl OutputOptions {
    /// Resolves the output directory: the parent of `file`, else `dir`, else the empty path.
    ///
    /// A bare output file name (no directory component) resolves to `.`.
    pub fn output_dir(&self) -> PathBuf {
        if let Some(file) = &self.file {
            return match file.parent() {
                Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
                _ => PathBuf::from("."),
            };
        }
        self.dir.clone().unwrap_or_default()
    }
}
