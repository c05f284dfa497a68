//! # CLI Module
//!
//! Command-line interface for the perceptual hasher.
//!
//! ## Usage
//! ```bash
//! # Hash one or more images
//! phash hash ~/Photos/*.jpg
//!
//! # Larger DCT, row-parallel transform, JSON output
//! phash hash photo.png --size 64 --parallel --output json
//!
//! # Distance between two hash strings
//! phash distance C3F0E1A0B0C0D0E0 C3F0E1A0B0C0D0E1
//!
//! # Hash two images and compare them
//! phash compare a.jpg b.jpg --threshold 8
//! ```

use clap::{Parser, Subcommand, ValueEnum};
use console::{style, Term};
use dct_phash::core::comparator::{self, MatchType};
use dct_phash::core::hasher::{HasherConfig, ImageHash, PerceptualHasher};
use dct_phash::core::preprocess::ResampleFilter;
use dct_phash::core::transform::ExecutionStrategy;
use dct_phash::error::Result;
use indicatif::{ProgressBar, ProgressStyle};
use rayon::prelude::*;
use serde::Serialize;
use std::path::PathBuf;

/// phash - DCT perceptual image hashing
#[derive(Parser, Debug)]
#[command(name = "phash")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Compute the perceptual hash of image files
    Hash {
        /// Image files to hash
        #[arg(required = true)]
        paths: Vec<PathBuf>,

        #[command(flatten)]
        hashing: HashingArgs,

        /// Output format
        #[arg(short, long, default_value = "pretty")]
        output: OutputFormat,
    },

    /// Hamming distance between two hex hash strings
    Distance {
        /// First hash (hex)
        a: String,

        /// Second hash (hex)
        b: String,

        /// Output format
        #[arg(short, long, default_value = "pretty")]
        output: OutputFormat,
    },

    /// Hash two images and compare them
    Compare {
        /// First image
        a: PathBuf,

        /// Second image
        b: PathBuf,

        /// Maximum distance reported as a match (0-64)
        #[arg(short, long, default_value_t = comparator::DEFAULT_SIMILARITY_THRESHOLD)]
        threshold: u32,

        #[command(flatten)]
        hashing: HashingArgs,

        /// Output format
        #[arg(short, long, default_value = "pretty")]
        output: OutputFormat,
    },
}

#[derive(clap::Args, Debug)]
struct HashingArgs {
    /// DCT size N (hashes are only comparable for equal N)
    #[arg(short, long, default_value = "32")]
    size: u32,

    /// Resampling filter
    #[arg(short, long, default_value = "catmull-rom")]
    filter: Filter,

    /// Run the per-row transforms on all cores
    #[arg(long)]
    parallel: bool,
}

impl HashingArgs {
    fn build(&self) -> Result<PerceptualHasher> {
        let strategy = if self.parallel {
            ExecutionStrategy::Parallel
        } else {
            ExecutionStrategy::Serial
        };

        HasherConfig::new()
            .dct_size(self.size)
            .filter(self.filter.into())
            .strategy(strategy)
            .build()
    }
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum Filter {
    /// Triangle kernel
    Bilinear,
    /// Bicubic, B = 0, C = 0.5 (default)
    CatmullRom,
    /// Bicubic, B = C = 1/3
    Mitchell,
    /// Windowed sinc, radius 3
    Lanczos3,
}

impl From<Filter> for ResampleFilter {
    fn from(filter: Filter) -> Self {
        match filter {
            Filter::Bilinear => ResampleFilter::Bilinear,
            Filter::CatmullRom => ResampleFilter::CatmullRom,
            Filter::Mitchell => ResampleFilter::Mitchell,
            Filter::Lanczos3 => ResampleFilter::Lanczos3,
        }
    }
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum OutputFormat {
    /// Human-readable output with colors
    Pretty,
    /// JSON output for scripting
    Json,
    /// Minimal output
    Minimal,
}

/// One line of `hash` output
#[derive(Debug, Serialize)]
struct HashReport {
    path: PathBuf,
    #[serde(skip_serializing_if = "Option::is_none")]
    hash: Option<ImageHash>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

/// Result of `distance` and `compare`
#[derive(Debug, Serialize)]
struct ComparisonReport {
    a: String,
    b: String,
    hash_a: ImageHash,
    hash_b: ImageHash,
    distance: u32,
    similarity_percent: f64,
    match_type: MatchType,
    #[serde(skip_serializing_if = "Option::is_none")]
    threshold: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    is_match: Option<bool>,
}

impl ComparisonReport {
    fn new(a: String, b: String, hash_a: ImageHash, hash_b: ImageHash) -> Self {
        let distance = hash_a.distance(&hash_b);
        Self {
            a,
            b,
            hash_a,
            hash_b,
            distance,
            similarity_percent: hash_a.similarity(&hash_b),
            match_type: MatchType::from_distance(distance),
            threshold: None,
            is_match: None,
        }
    }

    /// Record whether the pair is within `threshold`
    fn with_threshold(mut self, threshold: u32) -> Self {
        self.threshold = Some(threshold);
        self.is_match = Some(self.hash_a.is_similar(&self.hash_b, threshold));
        self
    }
}

/// Run the CLI
pub fn run() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Hash {
            paths,
            hashing,
            output,
        } => run_hash(paths, &hashing, output),
        Commands::Distance { a, b, output } => run_distance(a, b, output),
        Commands::Compare {
            a,
            b,
            threshold,
            hashing,
            output,
        } => run_compare(a, b, threshold, &hashing, output),
    }
}

fn run_hash(paths: Vec<PathBuf>, hashing: &HashingArgs, output: OutputFormat) -> Result<()> {
    let hasher = hashing.build()?;

    let progress = if matches!(output, OutputFormat::Pretty) && paths.len() > 1 {
        let pb = ProgressBar::new(paths.len() as u64);
        pb.set_style(
            ProgressStyle::default_bar()
                .template("{spinner:.green} [{bar:40.cyan/blue}] {pos}/{len} {msg}")
                .unwrap_or_else(|_| ProgressStyle::default_bar())
                .progress_chars("█▓░"),
        );
        Some(pb)
    } else {
        None
    };

    let reports: Vec<HashReport> = paths
        .into_par_iter()
        .map(|path| {
            let result = hasher.hash_file(&path);
            if let Some(ref pb) = progress {
                pb.inc(1);
            }
            match result {
                Ok(hash) => HashReport {
                    path,
                    hash: Some(hash),
                    error: None,
                },
                Err(e) => {
                    tracing::warn!(path = %path.display(), error = %e, "failed to hash image");
                    HashReport {
                        path,
                        hash: None,
                        error: Some(e.to_string()),
                    }
                }
            }
        })
        .collect();

    if let Some(pb) = progress {
        pb.finish_and_clear();
    }

    match output {
        OutputFormat::Pretty => print_pretty_hashes(&Term::stdout(), &reports),
        OutputFormat::Json => print_json(&reports),
        OutputFormat::Minimal => print_minimal_hashes(&reports),
    }

    Ok(())
}

fn run_distance(a: String, b: String, output: OutputFormat) -> Result<()> {
    let hash_a = ImageHash::from_hex(&a)?;
    let hash_b = ImageHash::from_hex(&b)?;
    let report = ComparisonReport::new(a, b, hash_a, hash_b);

    print_comparison(&report, output);
    Ok(())
}

fn run_compare(
    a: PathBuf,
    b: PathBuf,
    threshold: u32,
    hashing: &HashingArgs,
    output: OutputFormat,
) -> Result<()> {
    let hasher = hashing.build()?;
    let (hash_a, hash_b) = rayon::join(|| hasher.hash_file(&a), || hasher.hash_file(&b));

    let report = ComparisonReport::new(
        a.display().to_string(),
        b.display().to_string(),
        hash_a?,
        hash_b?,
    )
    .with_threshold(threshold);

    print_comparison(&report, output);
    Ok(())
}

fn print_pretty_hashes(term: &Term, reports: &[HashReport]) {
    for report in reports {
        match (&report.hash, &report.error) {
            (Some(hash), _) => term.write_line(&format!(
                "{}  {}",
                style(hash).cyan().bold(),
                report.path.display()
            )),
            (None, error) => term.write_line(&format!(
                "{}  {} {}",
                style("✗").red().bold(),
                report.path.display(),
                style(error.as_deref().unwrap_or("unknown error")).dim()
            )),
        }
        .ok();
    }

    let failed = reports.iter().filter(|r| r.hash.is_none()).count();
    if failed > 0 {
        term.write_line("").ok();
        term.write_line(&format!(
            "  {} of {} images could not be hashed",
            style(failed).yellow(),
            reports.len()
        ))
        .ok();
    }
}

fn print_minimal_hashes(reports: &[HashReport]) {
    for report in reports {
        if let Some(hash) = report.hash {
            println!("{}  {}", hash, report.path.display());
        }
    }
}

fn print_comparison(report: &ComparisonReport, output: OutputFormat) {
    match output {
        OutputFormat::Pretty => {
            let term = Term::stdout();
            term.write_line(&format!("  {}  {}", style(report.hash_a).cyan(), report.a))
                .ok();
            term.write_line(&format!("  {}  {}", style(report.hash_b).cyan(), report.b))
                .ok();
            term.write_line("").ok();
            term.write_line(&format!(
                "  distance {} ({:.1}% similar) - {}",
                style(report.distance).bold(),
                report.similarity_percent,
                style(report.match_type).yellow()
            ))
            .ok();

            if let (Some(threshold), Some(is_match)) = (report.threshold, report.is_match) {
                let verdict = if is_match {
                    style("match").green().bold()
                } else {
                    style("no match").red().bold()
                };
                term.write_line(&format!("  {} at threshold {}", verdict, threshold))
                    .ok();
            }
        }
        OutputFormat::Json => print_json(report),
        OutputFormat::Minimal => println!("{}", report.distance),
    }
}

fn print_json<T: Serialize + ?Sized>(value: &T) {
    match serde_json::to_string_pretty(value) {
        Ok(json) => println!("{}", json),
        Err(e) => eprintln!("failed to serialize output: {}", e),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn report(a: u64, b: u64) -> ComparisonReport {
        ComparisonReport::new(
            "a".to_string(),
            "b".to_string(),
            ImageHash::from_u64(a),
            ImageHash::from_u64(b),
        )
    }

    #[test]
    fn report_without_threshold_has_no_verdict() {
        let report = report(0, 0b111);

        assert_eq!(report.distance, 3);
        assert_eq!(report.match_type, MatchType::NearExact);
        assert_eq!(report.threshold, None);
        assert_eq!(report.is_match, None);
    }

    #[test]
    fn threshold_is_inclusive() {
        assert_eq!(report(0, 0b11111).with_threshold(5).is_match, Some(true));
        assert_eq!(report(0, 0b111111).with_threshold(5).is_match, Some(false));
    }

    #[test]
    fn default_threshold_splits_similar_from_different() {
        let threshold = comparator::DEFAULT_SIMILARITY_THRESHOLD;
        let within = report(0, (1 << threshold) - 1).with_threshold(threshold);
        let beyond = report(0, (1 << (threshold + 1)) - 1).with_threshold(threshold);

        assert_eq!(within.is_match, Some(true));
        assert_eq!(within.match_type, MatchType::Similar);
        assert_eq!(beyond.is_match, Some(false));
        assert_eq!(beyond.match_type, MatchType::Different);
    }

    #[test]
    fn json_omits_absent_verdict() {
        let json = serde_json::to_value(report(0xF, 0)).unwrap();

        assert_eq!(json["hash_a"], "000000000000000F");
        assert_eq!(json["distance"], 4);
        assert!(json.get("threshold").is_none());
    }
}
