//! # brpost Configuration System
//!
//! File: cli/src/core/config.rs
//!
//! ## Overview
//!
//! This module loads, merges, expands and validates the plugin configuration:
//!
//! - `additional`: absolute paths compressed unconditionally, in order.
//! - `min_size`: files smaller than this many bytes are skipped (0 disables the threshold).
//! - `options`: encoder settings forwarded verbatim to the Brotli encoder.
//!
//! ## Architecture
//!
//! Configuration sources (lowest to highest precedence):
//! 1. Default values defined in the code
//! 2. User-specific `<config dir>/brpost/config.toml`
//! 3. Project-specific `.brpost.toml` in the current directory or an ancestor
//!    (the search stops at the first directory containing `.git`)
//!
//! An explicit `--config <file>` replaces steps 2 and 3. Command-line flags are
//! applied on top by the `compress` command, which then calls `validate_config`.
//!
//! Every file is read into a `FileConfig` whose fields are all optional, so a
//! layer only overrides the keys it actually sets.
//!
//! ## Examples
//!
//! ```toml
//! additional = ["~/site/public/app.wasm"]
//! min_size = 1024
//!
//! [options]
//! quality = 11
//! mode = "text"
//! ```
//!
//! ```rust
//! let mut cfg = config::load_config(None)?;
//! cfg.min_size = 512; // CLI override
//! config::validate_config(&cfg)?;
//! ```
//!
use crate::core::error::{BrpostError, Result};
use anyhow::{anyhow, Context};
use directories::ProjectDirs;
use serde::Deserialize;
use std::{
    fs,
    path::{Path, PathBuf},
};
use tracing::{debug, info, warn};

/// Name of the per-project configuration file.
pub const PROJECT_CONFIG_FILENAME: &str = ".brpost.toml";

/// Highest Brotli quality level.
pub const MAX_QUALITY: u32 = 11;
/// Smallest and largest accepted Brotli window sizes (log2 of the window).
pub const MIN_LGWIN: u32 = 10;
pub const MAX_LGWIN: u32 = 24;

/// Effective plugin configuration. Created once and never mutated while compressing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PluginConfig {
    /// Absolute paths compressed in addition to the build's artifacts.
    pub additional: Vec<PathBuf>,
    /// Size threshold in bytes; `0` compresses everything.
    pub min_size: u64,
    /// Encoder settings.
    pub options: BrotliOptions,
}

/// Brotli encoder mode hint.
#[derive(Deserialize, Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum EncoderMode {
    #[default]
    Generic,
    Text,
    Font,
}

/// Settings handed to the Brotli encoder for every file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BrotliOptions {
    /// Compression quality, 0 (fastest) to 11 (smallest).
    pub quality: u32,
    /// Base-2 logarithm of the sliding window size.
    pub lgwin: u32,
    pub mode: EncoderMode,
    /// Expected input size; `0` lets the driver use the file's actual size.
    pub size_hint: u64,
    /// Read/write chunk size used while streaming.
    pub buffer_size: usize,
}

impl Default for BrotliOptions {
    fn default() -> Self {
        Self {
            quality: MAX_QUALITY,
            lgwin: 22,
            mode: EncoderMode::Generic,
            size_hint: 0,
            buffer_size: 16 * 1024,
        }
    }
}

/// On-disk representation. Every key is optional so layers merge key by key.
#[derive(Deserialize, Debug, Default)]
#[serde(deny_unknown_fields)]
struct FileConfig {
    additional: Option<Vec<PathBuf>>,
    min_size: Option<u64>,
    #[serde(default)]
    options: FileOptions,
}

#[derive(Deserialize, Debug, Default)]
#[serde(deny_unknown_fields)]
struct FileOptions {
    quality: Option<u32>,
    lgwin: Option<u32>,
    mode: Option<EncoderMode>,
    size_hint: Option<u64>,
    buffer_size: Option<usize>,
}

/// Loads the layered configuration and expands `~` in paths.
///
/// With `explicit` set, only that file is read on top of the defaults and it
/// must exist. Validation is left to the caller so that command-line overrides
/// can be applied first.
pub fn load_config(explicit: Option<&Path>) -> Result<PluginConfig> {
    let mut config = PluginConfig::default();

    if let Some(path) = explicit {
        info!("Loading configuration from: {}", path.display());
        apply_layer(&mut config, load_config_from_path(path)?);
    } else {
        if let Some(user) = load_user_config()? {
            apply_layer(&mut config, user);
        }
        let current_dir = std::env::current_dir().context("Failed to get current directory")?;
        if let Some(project) = load_project_config(&current_dir)? {
            apply_layer(&mut config, project);
        }
    }

    expand_config_paths(&mut config);
    debug!("Loaded configuration: {:?}", config);
    Ok(config)
}

fn load_user_config() -> Result<Option<FileConfig>> {
    if let Some(proj_dirs) = ProjectDirs::from("", "", "brpost") {
        let config_path = proj_dirs.config_dir().join("config.toml");
        if config_path.is_file() {
            info!("Loading user configuration from: {}", config_path.display());
            load_config_from_path(&config_path).map(Some)
        } else {
            debug!(
                "User configuration file not found at {}",
                config_path.display()
            );
            Ok(None)
        }
    } else {
        warn!("Could not determine user config directory.");
        Ok(None)
    }
}

fn load_project_config(start: &Path) -> Result<Option<FileConfig>> {
    match find_project_config_path(start) {
        Some(path) => {
            info!("Loading project configuration from: {}", path.display());
            load_config_from_path(&path).map(Some)
        }
        None => {
            debug!(
                "No {} found in {} or ancestors.",
                PROJECT_CONFIG_FILENAME,
                start.display()
            );
            Ok(None)
        }
    }
}

/// Walks from `start` up to the filesystem root looking for `.brpost.toml`.
/// Stops at the first directory that contains a `.git` directory.
fn find_project_config_path(start: &Path) -> Option<PathBuf> {
    let mut path = start;
    loop {
        let candidate = path.join(PROJECT_CONFIG_FILENAME);
        if candidate.is_file() {
            return Some(candidate);
        }
        if path.join(".git").is_dir() {
            debug!(
                "Found .git directory at {}, stopping project config search.",
                path.display()
            );
            return None;
        }
        path = path.parent()?;
    }
}

fn load_config_from_path(path: &Path) -> Result<FileConfig> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read configuration file: {}", path.display()))?;
    toml::from_str(&content)
        .with_context(|| format!("Failed to parse TOML from file: {}", path.display()))
}

/// Overrides every key of `config` that `layer` sets.
fn apply_layer(config: &mut PluginConfig, layer: FileConfig) {
    if let Some(additional) = layer.additional {
        config.additional = additional;
    }
    if let Some(min_size) = layer.min_size {
        config.min_size = min_size;
    }
    let opts = layer.options;
    if let Some(quality) = opts.quality {
        config.options.quality = quality;
    }
    if let Some(lgwin) = opts.lgwin {
        config.options.lgwin = lgwin;
    }
    if let Some(mode) = opts.mode {
        config.options.mode = mode;
    }
    if let Some(size_hint) = opts.size_hint {
        config.options.size_hint = size_hint;
    }
    if let Some(buffer_size) = opts.buffer_size {
        config.options.buffer_size = buffer_size;
    }
}

/// Expands a leading `~` in every `additional` path.
pub fn expand_config_paths(config: &mut PluginConfig) {
    for path in &mut config.additional {
        let expanded = shellexpand::tilde(&path.to_string_lossy()).into_owned();
        *path = PathBuf::from(expanded);
    }
}

/// Checks the effective configuration before any file is touched.
pub fn validate_config(config: &PluginConfig) -> Result<()> {
    debug!("Validating configuration...");
    for path in &config.additional {
        if !path.is_absolute() {
            return Err(anyhow!(BrpostError::Config(format!(
                "Additional path '{}' must be absolute.",
                path.display()
            ))));
        }
    }
    let opts = &config.options;
    if opts.quality > MAX_QUALITY {
        return Err(anyhow!(BrpostError::Config(format!(
            "Invalid quality {}. Expected 0-{}.",
            opts.quality, MAX_QUALITY
        ))));
    }
    if !(MIN_LGWIN..=MAX_LGWIN).contains(&opts.lgwin) {
        return Err(anyhow!(BrpostError::Config(format!(
            "Invalid lgwin {}. Expected {}-{}.",
            opts.lgwin, MIN_LGWIN, MAX_LGWIN
        ))));
    }
    if opts.buffer_size == 0 {
        return Err(anyhow!(BrpostError::Config(
            "buffer_size must be greater than zero.".to_string()
        )));
    }
    Ok(())
}
