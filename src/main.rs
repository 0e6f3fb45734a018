use clap::Parser;
use std::path::Path;

use rand::SeedableRng;
use rand::rngs::StdRng;
use tracing_subscriber::EnvFilter;

use stewpot::cli::{Cli, Command};
use stewpot::error::Result;
use stewpot::interface::{
    collect_ritual_inputs, display_pot, display_quality_breakdown, display_step_reports,
    display_xp_deltas, prompt_tier, prompt_yes_no,
};
use stewpot::kitchen::IngredientCatalog;
use stewpot::models::OutcomeTier;
use stewpot::ritual::{
    FixedOutcome, MemoryLedger, OutcomeSelector, OutcomeTable, RitualProps, TableSelector,
    apply_outcome, award_xp, evaluate,
};
use stewpot::state::{
    RitualSession, Scenario, ScenarioRunner, load_catalog, load_pot, save_catalog, save_pot,
};

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("stewpot=info")),
        )
        .with_writer(std::io::stderr)
        .init();

    if let Err(e) = run() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Command::Simulate {
            scenario,
            catalog,
            save,
        } => cmd_simulate(&scenario, catalog.as_deref(), save.as_deref()),
        Command::Inspect { state } => cmd_inspect(&state),
        Command::Ritual { input, tier, seed } => cmd_ritual(input.as_deref(), tier, seed),
        Command::Catalog { output } => {
            save_catalog(&output, &IngredientCatalog::standard())?;
            println!("Wrote stock catalog to {}", output.display());
            Ok(())
        }
    }
}

/// Run a scenario file against a fresh pot.
fn cmd_simulate(path: &Path, catalog: Option<&Path>, save: Option<&Path>) -> Result<()> {
    let scenario = Scenario::load(path)?;
    let mut runner = match catalog {
        Some(catalog_path) => {
            let catalog = load_catalog(catalog_path)?;
            let pot = ScenarioRunner::from_scenario(&scenario).into_pot();
            ScenarioRunner::new(pot, catalog)
        }
        None => ScenarioRunner::from_scenario(&scenario),
    };

    println!(
        "Running {} steps with {} known ingredients",
        scenario.steps.len(),
        runner.catalog().len()
    );
    println!();

    let reports = runner.run(&scenario.steps)?;
    display_step_reports(&reports);
    display_pot(runner.pot(), "Final pot");
    println!("Served {} items.", runner.served().len());

    if let Some(out) = save {
        save_pot(out, runner.pot())?;
        println!("Pot state saved to {}", out.display());
    }
    Ok(())
}

fn cmd_inspect(path: &Path) -> Result<()> {
    if !path.exists() {
        eprintln!("Pot state file not found: {}", path.display());
        return Ok(());
    }
    let pot = load_pot(path)?;
    display_pot(&pot, &path.display().to_string());
    Ok(())
}

/// Score a ritual, pick its outcome and apply XP.
fn cmd_ritual(input: Option<&Path>, tier: Option<OutcomeTier>, seed: Option<u64>) -> Result<()> {
    let (inputs, roster, props, outcomes) = match input {
        Some(path) => {
            let session = RitualSession::load(path)?;
            let inputs = session.inputs();
            (inputs, session.participants, session.props, session.outcomes)
        }
        None => {
            let props = RitualProps::default();
            let (inputs, roster) = collect_ritual_inputs(&props)?;
            (inputs, roster, props, OutcomeTable::default())
        }
    };

    let breakdown = evaluate(&inputs, &props);
    display_quality_breakdown(&breakdown);

    let tier = match tier {
        Some(t) => Some(t),
        None if input.is_none() => prompt_tier()?,
        None => None,
    };

    let mut selector: Box<dyn OutcomeSelector + '_> = match (tier, seed) {
        (Some(t), _) => Box::new(FixedOutcome(t)),
        (None, Some(seed)) => Box::new(TableSelector {
            table: &outcomes,
            rng: StdRng::seed_from_u64(seed),
        }),
        (None, None) => Box::new(TableSelector {
            table: &outcomes,
            rng: StdRng::from_entropy(),
        }),
    };

    let Some(outcome) = selector.select_outcome(breakdown.quality) else {
        println!("No outcome is possible at this quality.");
        return Ok(());
    };

    let deltas = apply_outcome(outcome, &roster, inputs.teacher.as_ref(), &props);
    display_xp_deltas(outcome, &deltas);

    if input.is_none() && !prompt_yes_no("Apply XP?", true)? {
        return Ok(());
    }
    let mut ledger = MemoryLedger::default();
    let written = award_xp(&deltas, &mut ledger);
    println!("Applied XP to {} participants.", written);
    Ok(())
}
