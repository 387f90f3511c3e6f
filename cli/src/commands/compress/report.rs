//! # brpost Compression Report
//!
//! File: cli/src/commands/compress/report.rs
//!
//! Per-file outcomes of one `write_bundle` run, kept in launch order, plus the
//! totals printed at the end of `brpost compress`.
//!
use crate::common::archive::compression::CompressOutcome;
use crate::common::fs::io::display_relative;
use std::path::PathBuf;

#[derive(Debug, Default)]
pub struct CompressionReport {
    entries: Vec<(PathBuf, CompressOutcome)>,
}

impl CompressionReport {
    pub fn push(&mut self, path: PathBuf, outcome: CompressOutcome) {
        self.entries.push((path, outcome));
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn compressed_count(&self) -> usize {
        self.entries.iter().filter(|(_, o)| o.is_compressed()).count()
    }

    pub fn skipped_count(&self) -> usize {
        self.entries.iter().filter(|(_, o)| o.is_skipped()).count()
    }

    pub fn failed_count(&self) -> usize {
        self.entries.iter().filter(|(_, o)| o.is_failed()).count()
    }

    /// Bytes saved across all compressed files. A file whose `.br` is larger counts as zero.
    pub fn bytes_saved(&self) -> u64 {
        self.entries
            .iter()
            .map(|(_, outcome)| match outcome {
                CompressOutcome::Compressed {
                    original,
                    compressed,
                } => original.saturating_sub(*compressed),
                _ => 0,
            })
            .sum()
    }

    /// One line per compressed file, e.g. `dist/app.js: 5120 -> 1024 bytes`.
    pub fn compressed_lines(&self) -> Vec<String> {
        self.entries
            .iter()
            .filter_map(|(path, outcome)| match outcome {
                CompressOutcome::Compressed {
                    original,
                    compressed,
                } => Some(format!(
                    "{}: {} -> {} bytes",
                    display_relative(path).display(),
                    original,
                    compressed
                )),
                _ => None,
            })
            .collect()
    }

    pub fn summary(&self) -> String {
        format!(
            "Compressed {} file(s), skipped {}, failed {} (saved {} bytes)",
            self.compressed_count(),
            self.skipped_count(),
            self.failed_count(),
            self.bytes_saved()
        )
    }
}

// --- Unit Tests ---
#[cfg(test)]
mod tests {
    use super::*;

    fn sample_report() -> CompressionReport {
        let mut report = CompressionReport::default();
        report.push(
            PathBuf::from("dist/a.js"),
            CompressOutcome::Compressed {
                original: 1000,
                compressed: 300,
            },
        );
        report.push(
            PathBuf::from("dist/b.bin"),
            CompressOutcome::Compressed {
                original: 10,
                compressed: 14,
            },
        );
        report.push(
            PathBuf::from("dist/c.css"),
            CompressOutcome::SkippedTooSmall { size: 3 },
        );
        report.push(
            PathBuf::from("/gone.js"),
            CompressOutcome::SkippedMissing {
                error: std::io::Error::new(std::io::ErrorKind::NotFound, "not found"),
            },
        );
        report.push(
            PathBuf::from("dist/d"),
            CompressOutcome::Failed {
                error: anyhow::anyhow!("boom"),
            },
        );
        report
    }

    #[test]
    fn test_counts_and_savings() {
        let report = sample_report();
        assert_eq!(report.compressed_count(), 2);
        assert_eq!(report.skipped_count(), 2);
        assert_eq!(report.failed_count(), 1);
        assert_eq!(report.bytes_saved(), 700);
    }

    #[test]
    fn test_summary_and_lines() {
        let report = sample_report();
        assert_eq!(
            report.summary(),
            "Compressed 2 file(s), skipped 2, failed 1 (saved 700 bytes)"
        );
        assert_eq!(
            report.compressed_lines(),
            vec![
                "dist/a.js: 1000 -> 300 bytes".to_string(),
                "dist/b.bin: 10 -> 14 bytes".to_string(),
            ]
        );
    }
}
