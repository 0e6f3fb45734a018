use std::fs;
use std::path::{Path, PathBuf};

use clap::Parser;
use tracing_subscriber::EnvFilter;

use stewpot::ritual::RitualProps;
use stewpot::sweep::{SweepConfig, SweepRanges, print_topk, run_sweep, write_csv, write_summary_json};

#[derive(Parser, Debug)]
#[command(name = "quality_sweep")]
#[command(about = "Random sweep of ritual quality factors, flagging sums outside [0, 1]")]
struct Args {
    /// Number of random samples
    #[arg(long, default_value = "1000")]
    samples: usize,

    /// Random seed for reproducibility
    #[arg(long, default_value = "123")]
    seed: u64,

    /// Ritual props JSON; defaults when omitted
    #[arg(long)]
    props: Option<PathBuf>,

    /// Output CSV file for all samples
    #[arg(long, default_value = "sweep_results.csv")]
    csv: PathBuf,

    /// Output JSON file for the summary
    #[arg(long, default_value = "sweep_summary.json")]
    json: PathBuf,

    /// Number of top samples to display
    #[arg(long, default_value = "10")]
    topk: usize,
}

fn load_props(path: &Path) -> stewpot::Result<RitualProps> {
    let content = fs::read_to_string(path)?;
    let props: RitualProps = serde_json::from_str(&content)?;
    props.validate()?;
    Ok(props)
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::from_default_env().add_directive(tracing::Level::INFO.into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    let props = match &args.props {
        Some(path) => match load_props(path) {
            Ok(p) => p,
            Err(e) => {
                eprintln!("Error loading props {:?}: {}", path, e);
                std::process::exit(1);
            }
        },
        None => RitualProps::default(),
    };

    let config = SweepConfig {
        samples: args.samples,
        seed: args.seed,
        ranges: SweepRanges::default(),
        props,
    };

    println!("Sampling {} rituals (seed {})...", config.samples, config.seed);
    let sweep = run_sweep(&config);

    println!(
        "Best case: raw={:.3} clamped={:.3}",
        sweep.best_case.breakdown.raw_quality, sweep.best_case.breakdown.quality
    );
    println!("    {}", sweep.best_case.sample.display());

    print_topk(&sweep.results, args.topk);

    println!("=== Out of range ===");
    println!(
        "Above 1: {}  Below 0: {}  ({:.1}% of samples)",
        sweep.above_max,
        sweep.below_min,
        sweep.out_of_bounds_fraction() * 100.0
    );
    println!();

    if let Err(e) = write_csv(&sweep.results, &args.csv) {
        eprintln!("Error writing CSV: {}", e);
    } else {
        println!("Wrote all samples to {:?}", args.csv);
    }

    if let Err(e) = write_summary_json(&sweep, &args.json, args.topk) {
        eprintln!("Error writing JSON: {}", e);
    } else {
        println!("Wrote summary to {:?}", args.json);
    }
}
