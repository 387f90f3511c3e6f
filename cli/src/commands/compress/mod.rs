//! # brpost Compress Command
//!
//! File: cli/src/commands/compress/mod.rs
//!
//! ## Overview
//!
//! `brpost compress` runs the post-build step against a build that has
//! already been written to disk. The CLI stands in for the bundler: it
//! resolves the output location, rebuilds the artifact map from the output
//! directory and drives the same two hooks a bundler would call.
//!
//! ## Architecture
//!
//! - `pipeline.rs`: `BrotliPlugin`, its hooks and the concurrent compression run
//! - `report.rs`: per-file outcomes and the printed summary
//!
//! ## Examples
//!
//! ```bash
//! # Compress everything under ./dist
//! brpost compress --dir dist
//!
//! # Single-file build, skip anything under 1 KiB, also compress a worker
//! brpost compress --file build/app.js --min-size 1024 --additional /srv/www/worker.js
//!
//! # Faster, text-tuned encoding
//! brpost compress --dir dist --quality 6 --mode text
//! ```
//!
//! Command flow:
//! 1. Load configuration (`--config` or user/project discovery) and apply flags
//! 2. Validate the effective configuration
//! 3. `generate_bundle` resolves the output directory
//! 4. Scan the output directory into an artifact map
//! 5. `write_bundle` compresses every candidate and returns a report
//! 6. Print the report. Per-file failures never change the exit status
//!
use crate::common::fs::scan;
use crate::core::artifact::OutputOptions;
use crate::core::config::{self, EncoderMode, PluginConfig};
use crate::core::error::Result;
use clap::Parser;
use std::path::PathBuf;
use tracing::info;

pub mod pipeline;
pub mod report;

pub use pipeline::BrotliPlugin;

/// # Compress Command Arguments (`CompressArgs`)
///
/// Flags override values from the configuration files.
#[derive(Parser, Debug)]
#[command(about = "Write Brotli-compressed .br siblings for a build's output files")]
pub struct CompressArgs {
    /// Output directory of the build.
    #[arg(long, short)]
    pub dir: Option<PathBuf>,

    /// Output file of a single-file build. Its parent directory is scanned and takes precedence over --dir.
    #[arg(long, short)]
    pub file: Option<PathBuf>,

    /// Extra absolute path to compress unconditionally. Can be repeated.
    #[arg(long, short, value_name = "PATH")]
    pub additional: Vec<PathBuf>,

    /// Skip files smaller than this many bytes (0 compresses everything).
    #[arg(long, value_name = "BYTES")]
    pub min_size: Option<u64>,

    /// Brotli quality, 0 (fastest) to 11 (smallest).
    #[arg(long, short, value_parser = clap::value_parser!(u32).range(0..=11))]
    pub quality: Option<u32>,

    /// Base-2 logarithm of the Brotli window size.
    #[arg(long, value_parser = clap::value_parser!(u32).range(10..=24))]
    pub lgwin: Option<u32>,

    /// Encoder mode hint.
    #[arg(long, value_enum)]
    pub mode: Option<EncoderMode>,

    /// Read configuration from this file instead of searching for `.brpost.toml`.
    #[arg(long, short, value_name = "FILE")]
    pub config: Option<PathBuf>,
}

impl CompressArgs {
    /// Applies command-line overrides on top of the loaded configuration.
    /// `--additional` paths are appended after the configured ones.
    fn apply_overrides(&self, config: &mut PluginConfig) {
        config.additional.extend(self.additional.iter().cloned());
        if let Some(min_size) = self.min_size {
            config.min_size = min_size;
        }
        if let Some(quality) = self.quality {
            config.options.quality = quality;
        }
        if let Some(lgwin) = self.lgwin {
            config.options.lgwin = lgwin;
        }
        if let Some(mode) = self.mode {
            config.options.mode = mode;
        }
    }

    fn output_options(&self) -> OutputOptions {
        OutputOptions {
            file: self.file.clone(),
            dir: self.dir.clone(),
        }
    }
}

/// # Handle Compress Command (`handle_compress`)
///
/// Returns an error only for invalid configuration or an unreadable output
/// directory. Individual files that are missing, too small, or fail to
/// compress are reported in the summary.
pub async fn handle_compress(args: CompressArgs) -> Result<()> {
    info!("Handling compress command with args: {:?}", args);

    let mut config = config::load_config(args.config.as_deref())?;
    args.apply_overrides(&mut config);
    config::expand_config_paths(&mut config);
    config::validate_config(&config)?;
    info!("Effective configuration: {:?}", config);

    let plugin = BrotliPlugin::new(config);
    info!("Running {} post-build step", plugin.name());
    let ctx = plugin.generate_bundle(&args.output_options());
    let artifacts = scan::collect_artifacts(&ctx.output_dir)?;
    let report = plugin.write_bundle(&ctx, &artifacts).await;
    if report.is_empty() {
        info!("Nothing to compress in {:?}", ctx.output_dir);
    }

    for line in report.compressed_lines() {
        println!("{}", line);
    }
    println!("{}", report.summary());
    Ok(())
}
