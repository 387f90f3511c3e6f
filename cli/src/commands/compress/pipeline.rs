//! # brpost Compression Pipeline
//!
//! File: cli/src/commands/compress/pipeline.rs
//!
//! ## Overview
//!
//! The bundler-facing side of brpost. `BrotliPlugin` exposes the two hooks a
//! bundler invokes once per build:
//!
//! 1. `generate_bundle(&OutputOptions)`: called before artifacts are written.
//!    Resolves the output directory and returns it as a `BuildContext`.
//! 2. `write_bundle(&BuildContext, &ArtifactMap)`: called after artifacts are
//!    on disk. Filters out already-compressed artifacts, adds the configured
//!    `additional` paths, compresses every candidate concurrently and waits
//!    for all of them.
//!
//! The `BuildContext` is returned by the first hook and handed to the second,
//! so the output directory used to resolve artifact names always belongs to
//! the same build.
//!
//! ## Error handling
//!
//! `write_bundle` cannot fail. Each file's result is a `CompressOutcome`,
//! logged here and collected into a `CompressionReport`. A task that panics
//! is recorded as `Failed` for its path only.
//!
use crate::commands::compress::report::CompressionReport;
use crate::common::archive::compression::{self, CompressOutcome};
use crate::common::archive::signature;
use crate::core::artifact::{ArtifactMap, OutputOptions};
use crate::core::config::PluginConfig;
use anyhow::anyhow;
use futures_util::future::join_all;
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Build-cycle state produced by `generate_bundle` and consumed by `write_bundle`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildContext {
    pub output_dir: PathBuf,
}

/// Post-build Brotli compression step.
#[derive(Debug, Clone)]
pub struct BrotliPlugin {
    config: Arc<PluginConfig>,
}

impl BrotliPlugin {
    pub const NAME: &'static str = "brotli";

    pub fn new(config: PluginConfig) -> Self {
        Self {
            config: Arc::new(config),
        }
    }

    pub fn name(&self) -> &'static str {
        Self::NAME
    }

    /// Output location hook. Captures the output directory for this build.
    pub fn generate_bundle(&self, output: &OutputOptions) -> BuildContext {
        let output_dir = output.output_dir();
        debug!("Build output directory: {:?}", output_dir);
        BuildContext { output_dir }
    }

    /// Lists the files `write_bundle` will compress, in launch order.
    ///
    /// Artifacts that are not already compressed come first (resolved under
    /// the build's output directory), followed by the configured `additional`
    /// paths. A path that appears twice is only listed once.
    pub fn plan(&self, ctx: &BuildContext, artifacts: &ArtifactMap) -> Vec<PathBuf> {
        let candidates = artifacts.values().filter_map(|artifact| {
            if signature::is_compressed(artifact) {
                debug!(
                    "Skipping already compressed {} {}",
                    artifact.kind_label(),
                    artifact.file_name
                );
                None
            } else {
                Some(ctx.output_dir.join(&artifact.file_name))
            }
        });

        let mut seen = HashSet::new();
        candidates
            .chain(self.config.additional.iter().cloned())
            .filter(|path| seen.insert(path.clone()))
            .collect()
    }

    /// Write completion hook. Compresses every planned file concurrently and
    /// resolves once all of them have finished or been skipped.
    pub async fn write_bundle(
        &self,
        ctx: &BuildContext,
        artifacts: &ArtifactMap,
    ) -> CompressionReport {
        let paths = self.plan(ctx, artifacts);
        info!(
            "Compressing {} file(s) ({} artifact(s), {} additional)",
            paths.len(),
            artifacts.len(),
            self.config.additional.len()
        );

        let tasks = paths.iter().cloned().map(|path| {
            let config = Arc::clone(&self.config);
            tokio::spawn(async move {
                compression::compress_file(&path, &config.options, config.min_size).await
            })
        });
        let results = join_all(tasks).await;

        let mut report = CompressionReport::default();
        for (path, result) in paths.into_iter().zip(results) {
            let outcome = result.unwrap_or_else(|join_err| CompressOutcome::Failed {
                error: anyhow!("Compression task panicked: {}", join_err),
            });
            log_outcome(&path, &outcome);
            report.push(path, outcome);
        }
        report
    }
}

fn log_outcome(path: &Path, outcome: &CompressOutcome) {
    match outcome {
        CompressOutcome::Compressed {
            original,
            compressed,
        } => info!(
            "Compressed {} ({} -> {} bytes)",
            path.display(),
            original,
            compressed
        ),
        CompressOutcome::SkippedTooSmall { size } => {
            debug!("Skipped {} ({} bytes, below minimum size)", path.display(), size)
        }
        CompressOutcome::SkippedMissing { error } => {
            warn!("Error reading file {}: {}", path.display(), error)
        }
        CompressOutcome::Failed { error } => {
            warn!("Failed to compress {}: {:#}", path.display(), error)
        }
    }
}
