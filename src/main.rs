use clap::Parser;
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

mod log;
mod model;
mod render;
mod units;

pub type Result<T> = anyhow::Result<T>;

/// Plot overestimation mean and insertion time from a counting Bloom filter
/// benchmark log.
#[derive(Parser, Debug)]
#[command(name = "bench-log-plot", version, about, long_about = None)]
struct Cli {
    /// Benchmark log to read
    #[arg(value_name = "LOG")]
    log: PathBuf,

    /// Chart output path (default: LOG with an .html extension)
    #[arg(short = 'o', long)]
    out: Option<PathBuf>,

    /// Also write the aligned series as JSON
    #[arg(long)]
    json: Option<PathBuf>,

    /// Debug-level logging (RUST_LOG takes precedence)
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
    tracing::debug!(?cli, "parsed CLI arguments");

    // 1) Extract.
    let raw = log::parse_log_file(&cli.log)?;
    println!(
        "overestimation_mean_non_opt: {:?}",
        raw.overestimation_mean_non_opt
    );
    println!("overestimation_mean_opt: {:?}", raw.overestimation_mean_opt);
    println!("insertion_time_non_opt: {:?}", raw.insertion_time_non_opt);
    println!("insertion_time_opt: {:?}", raw.insertion_time_opt);
    println!("n_elements: {:?}", raw.n_elements);

    // 2) Align.
    let data = model::align(raw);
    println!("Extracted Data:");
    println!("n_elements: {:?}", data.n_elements);
    println!(
        "Overestimation Mean (Optimized): {:?}",
        data.overestimation_mean_opt
    );
    println!(
        "Overestimation Mean (Non-Optimized): {:?}",
        data.overestimation_mean_non_opt
    );
    println!("Insertion Time (Optimized): {:?}", data.insertion_time_opt);
    println!(
        "Insertion Time (Non-Optimized): {:?}",
        data.insertion_time_non_opt
    );
    if data.is_empty() {
        tracing::warn!("no aligned data points; the chart will be empty");
    }

    if let Some(path) = &cli.json {
        std::fs::write(path, serde_json::to_string_pretty(&data)?)?;
        tracing::info!(path = %path.display(), "wrote aligned series");
    }

    // 3) Render.
    let chart = model::build_chart_data(&data);
    let html = render::render_html_chart(&chart)?;
    let out = cli.out.unwrap_or_else(|| default_out_path(&cli.log));
    std::fs::write(&out, html)?;
    tracing::info!(points = data.len(), "chart rendered");
    println!("Wrote {}", out.display());

    Ok(())
}

/// `bench.log` -> `bench.html`; never the input file itself.
fn default_out_path(log: &Path) -> PathBuf {
    let out = log.with_extension("html");
    if out == log {
        log.with_extension("chart.html")
    } else {
        out
    }
}
