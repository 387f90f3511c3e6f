//! # brpost Main Entry Point
//!
//! File: cli/src/main.rs
//!
//! ## Overview
//!
//! Entry point for the brpost CLI, a post-build step that writes
//! Brotli-compressed `.br` siblings next to a bundler's output files.
//! It handles:
//! - Command-line argument parsing using Clap
//! - Setting up the logging system based on verbosity flags
//! - Routing execution to the command handlers
//!
//! ## Examples
//!
//! ```bash
//! # Compress a build in ./dist
//! brpost compress --dir dist
//!
//! # See why files would be skipped, with debug logging
//! brpost -vv check dist/app.js dist/fonts.zip
//! ```
//!
use clap::Parser;
use std::io::IsTerminal;
use tracing_subscriber::{fmt, EnvFilter};

mod commands; // Command handlers (compress, check)
mod common; // Compression driver, format detection, filesystem helpers
mod core; // Artifact model, configuration, errors

/// Top-level command-line arguments.
#[derive(Parser, Debug)]
#[command(
    name = "brpost",
    about = "Post-build Brotli compressor for bundler output",
    long_about = "Compresses a build's output files into .br siblings, skipping files that\n\
                  are already compressed (by extension or magic bytes).",
    propagate_version = true,
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,
}

/// All available top-level commands.
#[derive(Parser, Debug)]
enum Commands {
    Compress(commands::compress::CompressArgs),
    Check(commands::check::CheckArgs),
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let log_level = match cli.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_level));
    fmt::Subscriber::builder()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .with_ansi(std::io::stderr().is_terminal())
        .with_target(false)
        .compact()
        .init();

    tracing::debug!("Parsed CLI arguments: {:?}", cli);

    let command_result = match cli.command {
        Commands::Compress(args) => commands::compress::handle_compress(args).await,
        Commands::Check(args) => commands::check::handle_check(args).await,
    };

    if let Err(e) = command_result {
        tracing::error!("Command execution failed: {:?}", e);
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parses_compress_subcommand() {
        let cli = Cli::try_parse_from(["brpost", "-v", "compress", "--dir", "dist"]).unwrap();
        assert_eq!(cli.verbose, 1);
        assert!(matches!(cli.command, Commands::Compress(_)));
    }

    #[test]
    fn test_parses_check_subcommand() {
        let cli = Cli::try_parse_from(["brpost", "check", "a.js"]).unwrap();
        assert!(matches!(cli.command, Commands::Check(_)));
    }

    #[test]
    fn test_rejects_unknown_subcommand() {
        assert!(Cli::try_parse_from(["brpost", "serve"]).is_err());
    }
}
