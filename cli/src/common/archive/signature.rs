//! # brpost Compressed-Format Detection (`common::archive::signature`)
//!
//! File: cli/src/common/archive/signature.rs
//!
//! ## Overview
//!
//! Decides whether a build artifact is already a compressed container and
//! should therefore be left alone. Two checks run in order, and the first
//! match wins:
//!
//! 1. **Name**: the file name ends in `.gz`, `.zip`, `.xz`, `.lz2` or `.7z`
//!    (case-sensitive).
//! 2. **Content**: the artifact's leading bytes match one of the known magic
//!    signatures in `SIGNATURES`. Every byte of the signature is compared
//!    against the byte at the same index, and a buffer shorter than the
//!    signature never matches.
//!
//! ## Usage
//!
//! ```rust
//! use crate::common::archive::signature;
//! use crate::core::artifact::Artifact;
//!
//! let gz = Artifact::asset("data.bin", vec![0x1F, 0x8B, 0x08, 0x00]);
//! assert!(signature::is_compressed(&gz));
//!
//! let js = Artifact::chunk("main.js", "export default 1;");
//! assert!(!signature::is_compressed(&js));
//! ```
//!
use crate::core::artifact::Artifact;

/// File name suffixes of formats that are already compressed.
pub const COMPRESSED_EXTENSIONS: [&str; 5] = [".gz", ".zip", ".xz", ".lz2", ".7z"];

/// A leading byte sequence identifying a compressed container format.
#[derive(Debug, PartialEq, Eq)]
pub struct Signature {
    pub format: &'static str,
    pub magic: &'static [u8],
}

impl Signature {
    /// True when `bytes` starts with every byte of this signature.
    pub fn matches(&self, bytes: &[u8]) -> bool {
        bytes.len() >= self.magic.len()
            && self
                .magic
                .iter()
                .enumerate()
                .all(|(i, byte)| bytes[i] == *byte)
    }
}

/// Length of the longest entry in `SIGNATURES`. Reading this many leading
/// bytes of a file is enough to run the content check.
pub const MAX_MAGIC_LEN: usize = 7;

/// Known magic signatures, checked in order.
pub static SIGNATURES: [Signature; 4] = [
    Signature {
        format: "gzip",
        magic: &[0x1F, 0x8B],
    },
    Signature {
        format: "xz",
        magic: &[0xFD, 0x37, 0x7A, 0x58, 0x5A, 0x00, 0x00],
    },
    Signature {
        format: "lz4",
        magic: &[0x04, 0x22, 0x4D, 0x18],
    },
    Signature {
        format: "7z",
        magic: &[0x37, 0x7A, 0xBC, 0xAF, 0x27, 0x1C],
    },
];

/// Why an artifact was considered compressed.
#[derive(Debug, PartialEq, Eq)]
pub enum Detection {
    Extension(&'static str),
    Magic(&'static Signature),
}

impl std::fmt::Display for Detection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Detection::Extension(ext) => write!(f, "{} extension", ext),
            Detection::Magic(sig) => write!(f, "{} magic bytes", sig.format),
        }
    }
}

/// Returns the matching entry of `COMPRESSED_EXTENSIONS`, if any.
pub fn compressed_extension(file_name: &str) -> Option<&'static str> {
    COMPRESSED_EXTENSIONS
        .iter()
        .copied()
        .find(|ext| file_name.ends_with(ext))
}

/// Returns the first signature in `SIGNATURES` that `bytes` starts with.
pub fn matched_signature(bytes: &[u8]) -> Option<&'static Signature> {
    SIGNATURES.iter().find(|sig| sig.matches(bytes))
}

/// Explains why `artifact` counts as compressed, or `None` if it is a compression candidate.
pub fn detect(artifact: &Artifact) -> Option<Detection> {
    if let Some(ext) = compressed_extension(&artifact.file_name) {
        return Some(Detection::Extension(ext));
    }
    matched_signature(artifact.bytes()).map(Detection::Magic)
}

/// True when `artifact` is already compressed and should be skipped.
pub fn is_compressed(artifact: &Artifact) -> bool {
    detect(artifact).is_some()
}
