use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::Serialize;
use tracing::{info, warn};

use confluence_geom::LabeledSet;
use confluence_io::{ResultWriter, RunName, TableReader, write_labeled_csv};
use confluence_linkage::Linkage;

#[derive(Parser)]
#[command(name = "confluence")]
#[command(about = "Agglomerative many-to-one linkage clustering of labeled point sets")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// RNG seed for reproducibility
    #[arg(long, default_value_t = 42, global = true)]
    seed: u64,

    /// Enable verbose (debug-level) logging
    #[arg(long, global = true)]
    verbose: bool,

    /// Suppress all output except errors
    #[arg(long, global = true)]
    quiet: bool,

    /// Number of threads for parallel computation (defaults to all cores)
    #[arg(long, global = true)]
    threads: Option<usize>,
}

#[derive(Subcommand)]
enum Command {
    /// Merge a labeled CSV table down to a target cluster count
    Cluster {
        /// Path to the input CSV file (features plus a trailing label column)
        #[arg(long)]
        data: PathBuf,

        /// Linkage strategy: "single", "complete", "average", or "centroid"
        #[arg(long, default_value = "single")]
        method: String,

        /// Target number of clusters
        #[arg(long)]
        final_clusters: usize,

        /// Run name for output files (must match [a-zA-Z0-9_-]+)
        #[arg(long)]
        run: String,

        /// Output directory for result files
        #[arg(long, default_value = ".")]
        output_dir: PathBuf,
    },

    /// Generate a random labeled table for experimentation
    Generate {
        /// Number of points
        #[arg(long, default_value_t = 50)]
        points: usize,

        /// Feature dimensionality
        #[arg(long, default_value_t = 2)]
        dims: usize,

        /// Number of initial clusters
        #[arg(long, default_value_t = 10)]
        clusters: usize,

        /// Path of the CSV file to write
        #[arg(long)]
        output: PathBuf,
    },
}

// --- JSON stdout output structs ---

#[derive(Serialize)]
struct ClusterOutput<'a> {
    run: &'a str,
    method: &'a str,
    n_points: usize,
    dims: usize,
    initial_clusters: usize,
    final_clusters: usize,
    merges: usize,
    cluster_sizes: Vec<usize>,
}

#[derive(Serialize)]
struct RejectedOutput<'a> {
    run: &'a str,
    method: &'a str,
    n_points: usize,
    rejected: String,
}

#[derive(Serialize)]
struct GenerateOutput {
    output: String,
    n_points: usize,
    dims: usize,
    clusters: usize,
    seed: u64,
}

fn parse_method(s: &str) -> Result<Linkage> {
    match s {
        "single" => Ok(Linkage::Single),
        "complete" => Ok(Linkage::Complete),
        "average" => Ok(Linkage::Average),
        "centroid" => Ok(Linkage::Centroid),
        other => anyhow::bail!(
            "unknown linkage method: {other} (expected single, complete, average, or centroid)"
        ),
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = match (cli.verbose, cli.quiet) {
        (true, _) => "debug",
        (_, true) => "error",
        _ => "info",
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    // Configure Rayon thread pool
    if let Some(threads) = cli.threads {
        rayon::ThreadPoolBuilder::new()
            .num_threads(threads)
            .build_global()
            .context("failed to configure thread pool")?;
        info!(threads, "thread pool configured");
    }

    match cli.command {
        Command::Cluster {
            data,
            method,
            final_clusters,
            run,
            output_dir,
        } => {
            let linkage = parse_method(&method)?;
            let run_name = RunName::new(run.clone())?;

            let mut set = TableReader::new(&data)
                .read()
                .context("failed to read input CSV")?;

            for (label, size) in set.label_histogram() {
                info!(label, size, "initial cluster");
            }

            match linkage.fit(&mut set, final_clusters) {
                Ok(report) => {
                    let writer = ResultWriter::new(&output_dir, run_name)?;
                    writer.write_linkage(linkage.name(), &set, &report)?;
                    writer.write_labeled(&set)?;

                    let output = ClusterOutput {
                        run: &run,
                        method: linkage.name(),
                        n_points: set.len(),
                        dims: set.dim(),
                        initial_clusters: report.initial_clusters,
                        final_clusters: report.final_clusters,
                        merges: report.merges(),
                        cluster_sizes: set
                            .label_histogram()
                            .into_iter()
                            .map(|(_, size)| size)
                            .collect(),
                    };
                    println!("{}", serde_json::to_string_pretty(&output)?);
                }
                // Rejections are non-fatal: the set is untouched and the
                // caller gets the reason instead of the artifacts.
                Err(rejection) => {
                    warn!(%rejection, "clustering rejected");
                    let output = RejectedOutput {
                        run: &run,
                        method: linkage.name(),
                        n_points: set.len(),
                        rejected: rejection.to_string(),
                    };
                    println!("{}", serde_json::to_string_pretty(&output)?);
                }
            }
        }

        Command::Generate {
            points,
            dims,
            clusters,
            output,
        } => {
            anyhow::ensure!(points >= 1, "--points must be at least 1");
            anyhow::ensure!(dims >= 1, "--dims must be at least 1");
            anyhow::ensure!(
                (1..=points).contains(&clusters),
                "--clusters must be between 1 and --points"
            );

            let mut rng = ChaCha8Rng::seed_from_u64(cli.seed);
            let rows: Vec<Vec<f64>> = (0..points)
                .map(|i| {
                    let mut row: Vec<f64> = (0..dims).map(|_| rng.r#gen::<f64>()).collect();
                    // The first `clusters` rows take labels 1..=clusters so
                    // every requested cluster is populated.
                    let label = if i < clusters {
                        (i + 1) as f64
                    } else {
                        rng.gen_range(1..=clusters) as f64
                    };
                    row.push(label);
                    row
                })
                .collect();

            let set = LabeledSet::from_rows(rows).context("generated table is invalid")?;
            write_labeled_csv(&output, &set)?;
            info!(path = %output.display(), n_points = points, "table generated");

            let summary = GenerateOutput {
                output: output.display().to_string(),
                n_points: points,
                dims,
                clusters,
                seed: cli.seed,
            };
            println!("{}", serde_json::to_string_pretty(&summary)?);
        }
    }

    Ok(())
}
