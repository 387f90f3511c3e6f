//! # brpost Command Modules
//!
//! File: cli/src/commands/mod.rs
//!
//! ## Overview
//!
//! This module aggregates the top-level commands of the brpost CLI and makes
//! them available to the entry point (`main.rs`).
//!
//! ## Commands
//!
//! - `compress`: Compress a build's output files into `.br` siblings
//! - `check`: Report which files the eligibility filter would skip
//!
//! Each command defines its own arguments struct and an async handler.
//!

/// Eligibility report for individual files.
pub mod check;
/// Post-build compression of a build's output directory.
pub mod compress;
