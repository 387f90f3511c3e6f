//! # brpost Core Infrastructure
//!
//! File: cli/src/core/mod.rs
//!
//! ## Overview
//!
//! This module aggregates the foundational pieces shared by every command:
//! - `artifact`: the build artifact model and output location options
//! - `config`: configuration loading, merging, and validation
//! - `error`: error types and the crate-wide `Result` alias
//!
//! ## Usage
//!
//! ```rust
//! use crate::core::artifact::{Artifact, OutputOptions};
//! use crate::core::config::{self, PluginConfig};
//! use crate::core::error::{BrpostError, Result};
//! ```
//!
pub mod artifact;
pub mod config;
pub mod error;
