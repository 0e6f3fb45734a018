use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::models::OutcomeTier;

/// Stewpot: cooking pot and teaching ritual simulator.
#[derive(Parser, Debug)]
#[command(name = "stewpot")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Run a scripted pot scenario and print what happened.
    Simulate {
        /// Scenario JSON file.
        scenario: PathBuf,

        /// Ingredient catalog to use instead of the scenario's own.
        #[arg(long)]
        catalog: Option<PathBuf>,

        /// Save the final pot state here.
        #[arg(long)]
        save: Option<PathBuf>,
    },

    /// Show the status of a saved pot.
    Inspect {
        /// Saved pot state JSON file.
        state: PathBuf,
    },

    /// Score a teaching ritual and apply its XP.
    Ritual {
        /// Ritual JSON file; prompts interactively when omitted.
        #[arg(short, long)]
        input: Option<PathBuf>,

        /// Force an outcome instead of rolling one.
        #[arg(long, conflicts_with = "seed")]
        tier: Option<OutcomeTier>,

        /// Seed for the outcome roll.
        #[arg(long)]
        seed: Option<u64>,
    },

    /// Write the stock ingredient catalog to a file.
    Catalog {
        #[arg(default_value = "catalog.json")]
        output: PathBuf,
    },
}
