use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use image::DynamicImage;
use rayon::prelude::*;
use serde::Serialize;
use tracing::{info, instrument};

use calc_image_hash::config::{AppConfig, OutputFormat};
use calc_image_hash::image_hash::{compare_images, fingerprint_many, ImageFingerprints};

/// Perceptual image hashing - aHash / dHash fingerprints and similarity
#[derive(Parser)]
#[command(name = "image-hash")]
#[command(version)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Config file (defaults to ./image-hash.toml when present)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Print JSON instead of text
    #[arg(long, global = true)]
    pub json: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Compare two images by aHash and dHash similarity
    Compare {
        first: PathBuf,
        second: PathBuf,
        /// Similarity both hashes must reach to report a duplicate
        #[arg(short, long)]
        threshold: Option<f64>,
    },
    /// Print aHash and dHash of every image
    Hash {
        #[arg(required = true)]
        files: Vec<PathBuf>,
    },
}

#[derive(Serialize)]
struct HashOutput<'a> {
    path: &'a Path,
    #[serde(flatten)]
    fingerprints: ImageFingerprints,
}

#[derive(Serialize)]
struct CompareOutput<'a> {
    first: HashOutput<'a>,
    second: HashOutput<'a>,
    ahash_similarity: f64,
    dhash_similarity: f64,
    threshold: f64,
    duplicate: bool,
}

/// Runs `cli`, writing the command's output to `out`. Flags win over the
/// config file.
pub fn run(cli: Cli, out: &mut impl Write) -> Result<()> {
    let conf = AppConfig::load(cli.config.as_deref()).context("Failed to load config")?;
    let output = if cli.json {
        OutputFormat::Json
    } else {
        conf.output
    };

    match cli.command {
        Commands::Compare {
            first,
            second,
            threshold,
        } => {
            let threshold = threshold.unwrap_or(conf.duplicate_threshold);
            compare_command(&first, &second, threshold, output, out)
        }
        Commands::Hash { files } => hash_command(&files, output, out),
    }
}

fn load_image(path: &Path) -> Result<DynamicImage> {
    image::open(path).with_context(|| format!("Failed to decode {}", path.display()))
}

#[instrument(skip(output, out))]
fn compare_command(
    first: &Path,
    second: &Path,
    threshold: f64,
    output: OutputFormat,
    out: &mut impl Write,
) -> Result<()> {
    let (first_image, second_image) = rayon::join(|| load_image(first), || load_image(second));
    let report = compare_images(&first_image?, &second_image?)
        .context("Failed to fingerprint images")?;
    let duplicate = report.is_duplicate(threshold);

    info!(
        ahash = report.ahash_similarity,
        dhash = report.dhash_similarity,
        duplicate,
        "Compared images"
    );

    match output {
        OutputFormat::Json => {
            let json = CompareOutput {
                first: HashOutput {
                    path: first,
                    fingerprints: report.first,
                },
                second: HashOutput {
                    path: second,
                    fingerprints: report.second,
                },
                ahash_similarity: report.ahash_similarity,
                dhash_similarity: report.dhash_similarity,
                threshold,
                duplicate,
            };
            writeln!(out, "{}", serde_json::to_string_pretty(&json)?)?;
        }
        OutputFormat::Text => {
            writeln!(out, "aHash1 = {}", report.first.ahash)?;
            writeln!(out, "dHash1 = {}", report.first.dhash)?;
            writeln!(out, "aHash2 = {}", report.second.ahash)?;
            writeln!(out, "dHash2 = {}", report.second.dhash)?;
            writeln!(out, "aHash = {}", report.ahash_similarity)?;
            writeln!(out, "dHash = {}", report.dhash_similarity)?;
            writeln!(out, "duplicate = {} (threshold {})", duplicate, threshold)?;
        }
    }
    Ok(())
}

#[instrument(skip_all, fields(count = files.len()))]
fn hash_command(files: &[PathBuf], output: OutputFormat, out: &mut impl Write) -> Result<()> {
    let images = files
        .par_iter()
        .map(|path| load_image(path))
        .collect::<Result<Vec<_>>>()?;

    for (path, result) in files.iter().zip(fingerprint_many(&images)) {
        let fingerprints =
            result.with_context(|| format!("Failed to fingerprint {}", path.display()))?;
        match output {
            OutputFormat::Json => {
                let json = HashOutput { path, fingerprints };
                writeln!(out, "{}", serde_json::to_string(&json)?)?;
            }
            OutputFormat::Text => writeln!(
                out,
                "{}\taHash = {}\tdHash = {}",
                path.display(),
                fingerprints.ahash,
                fingerprints.dhash
            )?,
        }
    }
    info!("Hashed {} images", files.len());
    Ok(())
}
