//! atepack CLI - Command-line tool for building `.ate` script archives.
//!
//! This is the main entry point for the atepack command-line application.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Instant;

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use indicatif::{ProgressBar, ProgressStyle};
use walkdir::WalkDir;

use atepack::{AesStrength, ArchiveBuilder, BuildOptions, CompressionMethod, EncryptionProfile, FileEntry};

/// atepack - encrypted .ate archive builder for the AutoTouch runtime
#[derive(Parser)]
#[command(name = "atepack")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Pack files and directories into an .ate archive
    Pack {
        /// Output archive path
        #[arg(short, long, env = "OUTPUT_ATE")]
        output: PathBuf,

        /// Archive password (empty for passwordless mode)
        #[arg(short, long, default_value = "")]
        password: String,

        /// AES strength in bits (128, 192 or 256)
        #[arg(long, default_value_t = 256)]
        strength: u16,

        /// Compress entries with DEFLATE before encryption
        #[arg(long)]
        deflate: bool,

        /// Build a plain unencrypted archive
        #[arg(long)]
        plain: bool,

        /// Input files or directories
        #[arg(required = true)]
        inputs: Vec<PathBuf>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Pack {
            output,
            password,
            strength,
            deflate,
            plain,
            inputs,
        } => cmd_pack(&output, &password, strength, deflate, plain, &inputs),
    }
}

fn cmd_pack(
    output: &Path,
    password: &str,
    strength: u16,
    deflate: bool,
    plain: bool,
    inputs: &[PathBuf],
) -> Result<()> {
    let start = Instant::now();

    let encryption = if plain {
        EncryptionProfile::None
    } else {
        EncryptionProfile::Aes(parse_strength(strength)?)
    };

    let options = BuildOptions {
        encryption,
        password: password.to_string(),
        compression: if deflate {
            CompressionMethod::Deflate
        } else {
            CompressionMethod::Store
        },
        ..BuildOptions::default()
    };

    let files = collect_files(inputs)?;
    if files.is_empty() {
        bail!("no input files found");
    }

    let progress = ProgressBar::new(files.len() as u64);
    progress.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{bar:40.cyan/blue}] {pos}/{len} {msg}")?
            .progress_chars("##-"),
    );

    let mut builder = ArchiveBuilder::new(options);
    for (name, path) in &files {
        progress.set_message(name.clone());
        let content = fs::read(path)
            .with_context(|| format!("failed to read input file {}", path.display()))?;
        builder.entry(FileEntry::binary(name.clone(), content));
        progress.inc(1);
    }
    progress.finish_and_clear();

    let archive = builder
        .build()
        .context("failed to build archive")?;

    fs::write(output, &archive)
        .with_context(|| format!("failed to write archive to {}", output.display()))?;

    println!(
        "Packed {} file(s) into {} ({} bytes) in {:.2?}",
        files.len(),
        output.display(),
        archive.len(),
        start.elapsed()
    );

    Ok(())
}

fn parse_strength(bits: u16) -> Result<AesStrength> {
    match bits {
        128 => Ok(AesStrength::Aes128),
        192 => Ok(AesStrength::Aes192),
        256 => Ok(AesStrength::Aes256),
        other => bail!("unsupported AES strength: {other} (expected 128, 192 or 256)"),
    }
}

/// Expand the input paths into (archive name, filesystem path) pairs.
///
/// Directory inputs are walked recursively; entry names are relative to the
/// directory, with forward slashes. Plain file inputs use their file name.
fn collect_files(inputs: &[PathBuf]) -> Result<Vec<(String, PathBuf)>> {
    let mut files = Vec::new();

    for input in inputs {
        if input.is_dir() {
            for dir_entry in WalkDir::new(input).sort_by_file_name() {
                let dir_entry = dir_entry
                    .with_context(|| format!("failed to walk directory {}", input.display()))?;
                if !dir_entry.file_type().is_file() {
                    continue;
                }
                let relative = dir_entry
                    .path()
                    .strip_prefix(input)
                    .context("walked path escaped its root")?;
                files.push((path_to_entry_name(relative), dir_entry.path().to_path_buf()));
            }
        } else {
            let name = input
                .file_name()
                .and_then(|n| n.to_str())
                .with_context(|| format!("invalid input file name: {}", input.display()))?
                .to_string();
            files.push((name, input.clone()));
        }
    }

    Ok(files)
}

fn path_to_entry_name(path: &Path) -> String {
    path.components()
        .map(|c| c.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/")
}
