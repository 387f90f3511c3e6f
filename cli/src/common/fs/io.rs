//! # brpost Filesystem I/O Operations
//!
//! File: cli/src/common/fs/io.rs
//!
//! ## Overview
//!
//! Small wrappers around `std::fs` used when the CLI stands in for the
//! bundler and has to rebuild artifacts from files on disk:
//!
//! - **`read_artifact`**: Reads the leading bytes of a file into an
//!   `Artifact`. Generated code (`.js`, `.mjs`, `.cjs`) that is valid UTF-8
//!   becomes a chunk, everything else an asset.
//! - **`display_relative`**: Formats a path relative to the working directory
//!   for user-facing output.
//!
//! Only the first `MAX_MAGIC_LEN` bytes are kept. That is all the
//! eligibility filter looks at, and the compression driver re-reads the file
//! from disk, so a large build is never held in memory.
//!
use crate::common::archive::signature::MAX_MAGIC_LEN;
use crate::core::artifact::Artifact;
use crate::core::error::Result;
use anyhow::Context;
use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};

/// Extensions of files a bundler emits as code chunks.
pub const CHUNK_EXTENSIONS: [&str; 3] = ["js", "mjs", "cjs"];

/// Reads the header of `path` into an artifact named `file_name`.
///
/// # Errors
///
/// Returns an `Err` if the file cannot be opened or read.
pub fn read_artifact(path: &Path, file_name: &str) -> Result<Artifact> {
    let file = File::open(path).with_context(|| format!("Failed to open file {:?}", path))?;
    let mut header = Vec::with_capacity(MAX_MAGIC_LEN);
    file.take(MAX_MAGIC_LEN as u64)
        .read_to_end(&mut header)
        .with_context(|| format!("Failed to read file {:?}", path))?;

    let is_code = path
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| CHUNK_EXTENSIONS.contains(&ext));

    if is_code {
        // The cut may land inside a multi-byte character.
        if let Err(e) = std::str::from_utf8(&header) {
            if e.error_len().is_none() {
                header.truncate(e.valid_up_to());
            }
        }
        return Ok(match String::from_utf8(header) {
            Ok(code) => Artifact::chunk(file_name, code),
            Err(e) => Artifact::asset(file_name, e.into_bytes()),
        });
    }
    Ok(Artifact::asset(file_name, header))
}

/// Returns `path` relative to the current directory when that is shorter, otherwise `path` itself.
pub fn display_relative(path: &Path) -> PathBuf {
    if !path.is_absolute() {
        return path.to_path_buf();
    }
    std::env::current_dir()
        .ok()
        .and_then(|cwd| pathdiff::diff_paths(path, cwd))
        .filter(|rel| !rel.starts_with(".."))
        .unwrap_or_else(|| path.to_path_buf())
}

// --- Unit Tests ---
#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::artifact::ArtifactKind;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn test_read_js_as_chunk() -> Result<()> {
        let dir = tempdir()?;
        let path = dir.path().join("main.mjs");
        fs::write(&path, "export const a = 1;")?;

        let artifact = read_artifact(&path, "main.mjs")?;
        assert_eq!(
            artifact.kind,
            ArtifactKind::Chunk {
                code: "export ".to_string()
            }
        );
        Ok(())
    }

    #[test]
    fn test_read_keeps_only_header_bytes() -> Result<()> {
        let dir = tempdir()?;
        let path = dir.path().join("big.bin");
        let mut content = vec![0xFD, 0x37, 0x7A, 0x58, 0x5A, 0x00, 0x00];
        content.extend(std::iter::repeat(0xAB).take(1 << 20));
        fs::write(&path, &content)?;

        let artifact = read_artifact(&path, "big.bin")?;
        assert_eq!(artifact.bytes(), &content[..MAX_MAGIC_LEN]);
        Ok(())
    }

    #[test]
    fn test_read_js_cut_inside_multibyte_char_is_chunk() -> Result<()> {
        let dir = tempdir()?;
        let path = dir.path().join("i18n.js");
        // "héé" puts a two-byte character across the header boundary.
        fs::write(&path, "x=\"héé\";")?;

        let artifact = read_artifact(&path, "i18n.js")?;
        assert_eq!(
            artifact.kind,
            ArtifactKind::Chunk {
                code: "x=\"hé".to_string()
            }
        );
        Ok(())
    }

    #[test]
    fn test_read_non_utf8_js_as_asset() -> Result<()> {
        let dir = tempdir()?;
        let path = dir.path().join("odd.js");
        fs::write(&path, [0x1F, 0x8B, 0xFF])?;

        let artifact = read_artifact(&path, "odd.js")?;
        assert_eq!(artifact.kind_label(), "asset");
        assert_eq!(artifact.bytes(), &[0x1F, 0x8B, 0xFF]);
        Ok(())
    }

    #[test]
    fn test_read_other_files_as_asset() -> Result<()> {
        let dir = tempdir()?;
        let path = dir.path().join("style.css");
        fs::write(&path, "body{}")?;

        let artifact = read_artifact(&path, "style.css")?;
        assert_eq!(artifact.kind_label(), "asset");
        assert_eq!(artifact.file_name, "style.css");
        Ok(())
    }

    #[test]
    fn test_read_missing_file() {
        let dir = tempdir().unwrap();
        assert!(read_artifact(&dir.path().join("nope.js"), "nope.js").is_err());
    }

    #[test]
    fn test_display_relative_keeps_relative_paths() {
        assert_eq!(
            display_relative(Path::new("dist/app.js")),
            PathBuf::from("dist/app.js")
        );
    }
}
