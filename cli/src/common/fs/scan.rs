//! # brpost Output Directory Scanner
//!
//! File: cli/src/common/fs/scan.rs
//!
//! ## Overview
//!
//! Rebuilds the artifact map a bundler would hand to a post-build step by
//! walking its output directory with `walkdir`. Keys are paths relative to
//! the output directory using `/` separators, which is how bundlers name
//! their emitted files.
//!
//! Existing `.br` files are left out of the map: they are this tool's own
//! output from an earlier run, not build artifacts.
//!
//! A file that cannot be read, or whose relative name is not valid UTF-8,
//! is reported with one `WARN` line and left out. It never stops the scan.
//!
use crate::common::archive::compression::SUFFIX;
use crate::common::fs::io::read_artifact;
use crate::core::artifact::{Artifact, ArtifactMap};
use crate::core::error::{BrpostError, Result};
use std::path::Path;
use tracing::{debug, trace, warn};
use walkdir::WalkDir;

/// Collects every regular file under `output_dir` into an artifact map.
///
/// An empty `output_dir` means the current directory.
///
/// # Errors
///
/// Returns an `Err` only if `output_dir` is not an existing directory.
pub fn collect_artifacts(output_dir: &Path) -> Result<ArtifactMap> {
    collect_artifacts_with(output_dir, read_artifact)
}

/// Walks `output_dir` and builds each artifact with `read`.
fn collect_artifacts_with<F>(output_dir: &Path, mut read: F) -> Result<ArtifactMap>
where
    F: FnMut(&Path, &str) -> Result<Artifact>,
{
    let root = if output_dir.as_os_str().is_empty() {
        Path::new(".")
    } else {
        output_dir
    };

    if !root.is_dir() {
        anyhow::bail!(BrpostError::FileSystem(format!(
            "Output directory does not exist or is not a directory: {:?}",
            root
        )));
    }

    let mut artifacts = ArtifactMap::new();
    for entry in WalkDir::new(root).follow_links(false).sort_by_file_name() {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) => {
                let path = e.path().unwrap_or(root).to_path_buf();
                warn!("Error reading file {}: {}", path.display(), e);
                continue;
            }
        };
        if !entry.file_type().is_file() {
            continue;
        }
        let path = entry.path();
        let Ok(relative) = path.strip_prefix(root) else {
            continue;
        };
        let Some(file_name) = artifact_name(relative) else {
            warn!("Skipping {}: file name is not valid UTF-8", path.display());
            continue;
        };

        if file_name.ends_with(SUFFIX) {
            trace!("Ignoring previous output {}", file_name);
            continue;
        }

        match read(path, &file_name) {
            Ok(artifact) => {
                artifacts.insert(file_name, artifact);
            }
            Err(e) => warn!("Error reading file {}: {:#}", path.display(), e),
        }
    }

    debug!("Collected {} artifact(s) from {:?}", artifacts.len(), root);
    Ok(artifacts)
}

/// Joins the components of `relative` with `/`. `None` if any component is not UTF-8.
fn artifact_name(relative: &Path) -> Option<String> {
    relative
        .components()
        .map(|c| c.as_os_str().to_str())
        .collect::<Option<Vec<_>>>()
        .map(|parts| parts.join("/"))
}
