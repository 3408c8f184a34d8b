//! Main entry point for the dl1x CLI application.
//!
//! This binary lists and extracts DL1 archives, decompressing LZ entries
//! on the way out.

use anyhow::{Context, Result};
use clap::Parser;
use std::sync::Arc;
use tracing::{debug, warn};
use tracing_subscriber::EnvFilter;

use dl1x::{Cli, Dl1Extractor, EntryDescriptor, LocalFileReader, ReadAt, dl1::Extracted};

/// Application entry point.
///
/// Parses command-line arguments, sets up logging and dispatches to list
/// or extract mode.
#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(cli.log_directive())),
        )
        .with_writer(std::io::stderr)
        .init();

    let reader = LocalFileReader::new(&cli.file)
        .with_context(|| format!("Cannot open {}", cli.file.display()))?;
    let extractor = Dl1Extractor::new(Arc::new(reader))
        .with_context(|| format!("Cannot read DL1 archive {}", cli.file.display()))?
        .raw(cli.raw);

    if cli.is_listing() {
        return list_files(&extractor, cli.verbose);
    }

    if !cli.pipe {
        let out_dir = cli.output_dir();
        tokio::fs::create_dir_all(&out_dir)
            .await
            .with_context(|| format!("Cannot create {}", out_dir.display()))?;
        if !cli.is_quiet() {
            println!("Extracting file... {} -> {}", cli.file.display(), out_dir.display());
        }
    }

    let entries: Vec<_> = extractor
        .list_files()
        .iter()
        .filter(|e| cli.selects(&e.name))
        .collect();

    let multiple_files = cli.pipe && entries.len() > 1;
    for entry in entries {
        extract_file(&extractor, entry, &cli, multiple_files).await?;
    }

    Ok(())
}

/// List entries in the archive.
///
/// Supports two output formats:
/// - Simple format (`-l`): Just entry names, one per line, in table order
/// - Verbose format (`-v`): Offset, stored size, unpacked size and method
fn list_files<R: ReadAt>(extractor: &Dl1Extractor<R>, verbose: bool) -> Result<()> {
    let entries = extractor.list_files();

    if !verbose {
        for entry in entries {
            println!("{}", entry.name);
        }
        return Ok(());
    }

    println!(
        "{:>10}  {:>10}  {:>10}  {:<6}  Name",
        "Offset", "Size", "Length", "Method"
    );
    println!("{}", "-".repeat(56));

    let mut total_stored = 0u64;
    let mut total_unpacked = 0u64;

    for entry in entries {
        let header = extractor
            .lz_header(entry)
            .with_context(|| format!("Cannot read entry {}", entry.name))?;
        let (unpacked, method) = match header {
            Some(h) => (u64::from(h.uncompressed_size), "LZ"),
            None => (entry.size, "stored"),
        };

        println!(
            "{:>#10x}  {:>10}  {:>10}  {:<6}  {}",
            entry.offset, entry.size, unpacked, method, entry.name
        );

        total_stored += entry.size;
        total_unpacked += unpacked;
    }

    println!("{}", "-".repeat(56));
    println!(
        "{:>10}  {:>10}  {:>10}  {:<6}  {} entries",
        "",
        total_stored,
        total_unpacked,
        "",
        entries.len()
    );

    Ok(())
}

/// Extract a single entry from the archive.
///
/// - Pipe mode (`-p`): write to stdout instead of a file
/// - Otherwise write into the output directory, skipping files that
///   already exist unless `-o` is given
async fn extract_file<R: ReadAt>(
    extractor: &Dl1Extractor<R>,
    entry: &EntryDescriptor,
    cli: &Cli,
    show_filename: bool,
) -> Result<()> {
    if cli.pipe {
        if show_filename {
            use tokio::io::AsyncWriteExt;
            let mut stdout = tokio::io::stdout();
            stdout
                .write_all(format!("--- {} ---\n", entry.name).as_bytes())
                .await?;
        }
        return extractor
            .extract_to_stdout(entry)
            .await
            .with_context(|| format!("Cannot extract {}", entry.name));
    }

    let out_dir = cli.output_dir();
    let outcome = extractor
        .extract_into(&out_dir, entry, cli.overwrite)
        .await
        .with_context(|| format!("Cannot extract {} into {}", entry.name, out_dir.display()))?;

    match outcome {
        Extracted::Written(path) => {
            if !cli.is_quiet() {
                println!("{}...extracting", path.display());
            }
            debug!("Wrote {} ({} bytes stored)", path.display(), entry.size);
        }
        Extracted::Exists(path) => {
            if !cli.is_quiet() {
                println!("{}...exists", path.display());
            }
        }
        Extracted::Escapes => {
            warn!("Skipping {}: name escapes {}", entry.name, out_dir.display());
        }
    }

    Ok(())
}
