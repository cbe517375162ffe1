// Copyright (C) 2025 Vince Vasta
// SPDX-License-Identifier: Apache-2.0

//! Penney's Game simulation CLI.
#![warn(clippy::all, rust_2018_idioms, missing_docs)]
use clap::{Parser, value_parser};
use log::error;
use std::path::PathBuf;

pub mod simulation;

#[derive(Debug, Parser)]
struct Cli {
    /// The number of decks to simulate.
    #[clap(long, short = 'n', default_value_t = 1000, value_parser = value_parser!(u32).range(1..))]
    decks: u32,
    /// The seed used to generate the decks.
    #[clap(long, short, default_value_t = 42)]
    seed: u64,
    /// The number of games each sequences pair plays, defaults to the number of decks.
    #[clap(long, value_parser = value_parser!(u32).range(1..))]
    simulations: Option<u32>,
    /// The decks store directory.
    #[clap(long)]
    store_dir: Option<PathBuf>,
    /// The results JSON file.
    #[clap(long, short, default_value = "results.json")]
    output: PathBuf,
    /// Number of parallel tasks.
    #[cfg(feature = "parallel")]
    #[clap(long, short, default_value_t = 4, value_parser = value_parser!(u8).range(1..=64))]
    tasks: u8,
    /// Generate new decks even if the store has decks for the seed.
    #[clap(long)]
    regenerate: bool,
}

fn main() {
    env_logger::builder()
        .filter_level(log::LevelFilter::Info)
        .format_target(false)
        .format_timestamp_millis()
        .parse_default_env()
        .init();

    let cli = Cli::parse();
    let config = simulation::Config {
        decks: cli.decks as usize,
        seed: cli.seed,
        simulations: cli.simulations.map(|n| n as usize),
        store_dir: cli.store_dir.unwrap_or_else(simulation::default_store_dir),
        output: cli.output,
        #[cfg(feature = "parallel")]
        tasks: cli.tasks as usize,
        #[cfg(not(feature = "parallel"))]
        tasks: 1,
        regenerate: cli.regenerate,
    };

    if let Err(e) = simulation::run(config) {
        error!("{e:#}");
        std::process::exit(1);
    }
}
