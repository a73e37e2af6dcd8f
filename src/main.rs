//! Main entry point for the rezip CLI application.
//!
//! Reads a ZIP archive from stdin, re-encodes it and writes the result to
//! stdout. Diagnostics go to stderr so stdout only ever carries archive bytes.

use anyhow::{Context, Result};
use clap::Parser;
use env_logger::Env;
use log::debug;

use rezip::{Cli, EntrySummary, RezipError, list_entries, read_input, rezip, write_output};

/// Application entry point.
///
/// The output archive is fully assembled before the first byte is written,
/// so a failure leaves stdout empty.
#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    env_logger::Builder::from_env(Env::default().default_filter_or("warn")).init();

    let cli = Cli::parse();
    let options = cli.options();

    let input = read_input(tokio::io::stdin())
        .await
        .map_err(RezipError::Io)
        .context("failed to read archive from stdin")?;
    debug!("read {} bytes from stdin", input.len());

    let output = rezip(&input, &options)?;

    if cli.verbose {
        print_entries(&list_entries(&output)?);
    }

    write_output(tokio::io::stdout(), &output)
        .await
        .map_err(RezipError::Io)
        .context("failed to write archive to stdout")?;
    debug!("wrote {} bytes to stdout", output.len());

    Ok(())
}

/// Print a table of the re-encoded entries to stderr.
///
/// Columns are uncompressed length, stored size, space saved, modification
/// date and time, and name, followed by a totals line.
fn print_entries(entries: &[EntrySummary]) {
    eprintln!(
        "{:>10}  {:>10}  {:>5}  {:>10}  {:>5}  {:<7}  Name",
        "Length", "Size", "Cmpr", "Date", "Time", "Method"
    );
    eprintln!("{}", "-".repeat(79));

    let mut total_uncompressed = 0u64;
    let mut total_compressed = 0u64;
    let mut file_count = 0usize;

    for entry in entries {
        let (year, month, day) = entry.mod_date();
        let (hour, minute, _second) = entry.mod_time();

        eprintln!(
            "{:>10}  {:>10}  {:>4}%  {:04}-{:02}-{:02}  {:02}:{:02}  {:<7}  {}",
            entry.uncompressed_size,
            entry.compressed_size,
            entry.ratio(),
            year,
            month,
            day,
            hour,
            minute,
            format!("{:?}", entry.compression_method),
            entry.file_name
        );

        // Directories are excluded from the totals
        if !entry.is_directory {
            total_uncompressed += entry.uncompressed_size;
            total_compressed += entry.compressed_size;
            file_count += 1;
        }
    }

    eprintln!("{}", "-".repeat(79));
    let total_ratio = if total_uncompressed > 0 {
        100u64.saturating_sub(total_compressed * 100 / total_uncompressed)
    } else {
        0
    };
    eprintln!(
        "{:>10}  {:>10}  {:>4}%  {:>30}  {} files",
        total_uncompressed, total_compressed, total_ratio, "", file_count
    );
}
