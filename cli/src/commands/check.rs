//! # brpost Check Command
//!
//! File: cli/src/commands/check.rs
//!
//! ## Overview
//!
//! `brpost check <PATH>...` runs only the eligibility filter and reports, for
//! each file, whether `brpost compress` would skip it as already compressed
//! or treat it as a compression candidate. Nothing is written.
//!
//! ```bash
//! $ brpost check dist/app.js dist/fonts.zip dist/data.bin
//! dist/app.js: candidate
//! dist/fonts.zip: compressed (.zip extension)
//! dist/data.bin: compressed (gzip magic bytes)
//! ```
//!
use crate::common::archive::signature;
use crate::common::fs::io::read_artifact;
use crate::core::error::Result;
use clap::Parser;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

/// # Check Command Arguments (`CheckArgs`)
#[derive(Parser, Debug)]
#[command(about = "Report which files would be skipped as already compressed")]
pub struct CheckArgs {
    /// Files to inspect.
    #[arg(required = true, num_args = 1..)]
    pub paths: Vec<PathBuf>,
}

/// Classifies one file. Returns the line printed for it.
fn classify(path: &Path) -> String {
    let name = path.to_string_lossy();
    match read_artifact(path, &name) {
        Ok(artifact) => match signature::detect(&artifact) {
            Some(detection) => format!("{}: compressed ({})", name, detection),
            None => format!("{}: candidate", name),
        },
        Err(e) => {
            warn!("Error reading file {}: {:#}", name, e);
            format!("{}: unreadable", name)
        }
    }
}

/// # Handle Check Command (`handle_check`)
///
/// Always succeeds; unreadable files are reported as such.
pub async fn handle_check(args: CheckArgs) -> Result<()> {
    info!("Handling check command for {} path(s)", args.paths.len());
    for path in &args.paths {
        println!("{}", classify(path));
    }
    Ok(())
}

// --- Unit Tests ---
#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn test_check_args_require_path() {
        assert!(CheckArgs::try_parse_from(["check"]).is_err());
        let args = CheckArgs::try_parse_from(["check", "a.js", "b.gz"]).unwrap();
        assert_eq!(args.paths.len(), 2);
    }

    #[test]
    fn test_classify() {
        let dir = tempdir().unwrap();
        let js = dir.path().join("app.js");
        let zip = dir.path().join("fonts.zip");
        let gz = dir.path().join("data.bin");
        fs::write(&js, "let a = 1;").unwrap();
        fs::write(&zip, "PK").unwrap();
        fs::write(&gz, [0x1F, 0x8B, 0x08]).unwrap();

        assert!(classify(&js).ends_with(": candidate"));
        assert!(classify(&zip).ends_with(": compressed (.zip extension)"));
        assert!(classify(&gz).ends_with(": compressed (gzip magic bytes)"));
        assert!(classify(&dir.path().join("missing")).ends_with(": unreadable"));
    }
}
