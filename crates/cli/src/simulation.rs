// Copyright (C) 2025 Vince Vasta
// SPDX-License-Identifier: Apache-2.0

//! Simulation run.
use anyhow::{Result, bail};
use log::info;
use std::{path::PathBuf, time::Instant};

use penney_eval::{Rule, Sequence, generate_decks};
use penney_store::DeckStore;

/// Simulation config.
#[derive(Debug, Clone)]
pub struct Config {
    /// The number of decks to simulate.
    pub decks: usize,
    /// The seed used to generate the decks.
    pub seed: u64,
    /// The number of games each sequences pair plays cycling through the
    /// decks, one game per deck if `None`.
    pub simulations: Option<usize>,
    /// The decks store directory.
    pub store_dir: PathBuf,
    /// The results JSON file.
    pub output: PathBuf,
    /// The number of parallel tasks.
    pub tasks: usize,
    /// Generate new decks even if the store has decks for the seed.
    pub regenerate: bool,
}

impl Config {
    /// Checks the config values.
    pub fn validate(&self) -> Result<()> {
        if self.decks == 0 {
            bail!("The number of decks must be at least 1");
        }

        if self.simulations == Some(0) {
            bail!("The number of simulations must be at least 1");
        }

        if self.tasks == 0 {
            bail!("The number of tasks must be at least 1");
        }

        Ok(())
    }
}

/// Returns the platform data directory for the decks store.
pub fn default_store_dir() -> PathBuf {
    directories::ProjectDirs::from("", "", "penney")
        .map(|dirs| dirs.data_dir().join("decks"))
        .unwrap_or_else(|| PathBuf::from("files"))
}

/// Simulation entry point.
pub fn run(config: Config) -> Result<()> {
    config.validate()?;

    info!(
        "Simulating {} decks with seed {}",
        config.decks, config.seed
    );

    // The store is only needed to load the decks.
    let store = DeckStore::open(&config.store_dir)?;
    let decks = if config.regenerate {
        let decks = generate_decks(config.decks, config.seed)?;
        store.put_decks(config.seed, &decks)?;
        decks
    } else {
        store.load_or_generate(config.seed, config.decks)?
    };
    store.close()?;

    let n_simulations = config.simulations.unwrap_or(decks.len());

    let now = Instant::now();

    #[cfg(feature = "parallel")]
    let matrix = penney_eval::compute_matchup_statistics_par(&decks, n_simulations, config.tasks)?;
    #[cfg(not(feature = "parallel"))]
    let matrix = penney_eval::compute_matchup_statistics(&decks, n_simulations)?;

    info!(
        "Computed {} matchups in {:.3}s",
        matrix.len(),
        now.elapsed().as_secs_f64()
    );

    for seq in Sequence::all() {
        if let Some((reply, win)) = matrix.best_reply(seq, Rule::Cards) {
            info!("Best reply to {seq} is {reply} winning {win:.2}% by cards");
        }
    }

    matrix.to_json_file(&config.output)?;
    info!("Results written to {}", config.output.display());

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use penney_eval::ResultMatrix;

    fn test_config(dir: &tempfile::TempDir) -> Config {
        Config {
            decks: 60,
            seed: 42,
            simulations: None,
            store_dir: dir.path().join("store"),
            output: dir.path().join("data").join("results.json"),
            tasks: 2,
            regenerate: false,
        }
    }

    #[test]
    fn run_simulation() {
        let dir = tempfile::tempdir().unwrap();
        let config = test_config(&dir);

        run(config.clone()).unwrap();
        let first = ResultMatrix::from_json_file(&config.output).unwrap();
        assert_eq!(first.len(), 56);

        let store = DeckStore::open(&config.store_dir).unwrap();
        assert_eq!(store.entry(42).unwrap().unwrap().decks, 60);
        store.close().unwrap();

        // A second run with fewer decks reuses the stored decks.
        let config = Config {
            decks: 30,
            simulations: Some(10),
            ..config
        };
        run(config.clone()).unwrap();

        let store = DeckStore::open(&config.store_dir).unwrap();
        assert_eq!(store.entry(42).unwrap().unwrap().decks, 60);
        store.close().unwrap();

        let second = ResultMatrix::from_json_file(&config.output).unwrap();
        assert_eq!(second.len(), 56);

        // More games than decks go through the decks again.
        let config = Config {
            simulations: Some(1000),
            ..config
        };
        run(config.clone()).unwrap();
        let third = ResultMatrix::from_json_file(&config.output).unwrap();
        assert_eq!(third.len(), 56);
    }

    #[test]
    fn regenerate_decks() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config {
            regenerate: true,
            decks: 10,
            ..test_config(&dir)
        };

        run(config.clone()).unwrap();

        let store = DeckStore::open(&config.store_dir).unwrap();
        assert_eq!(
            store.get_decks(42).unwrap(),
            generate_decks(10, 42).unwrap()
        );
    }

    #[test]
    fn invalid_config() {
        let dir = tempfile::tempdir().unwrap();

        let config = Config {
            decks: 0,
            ..test_config(&dir)
        };
        assert!(config.validate().is_err());

        let config = Config {
            simulations: Some(0),
            ..test_config(&dir)
        };
        assert!(config.validate().is_err());

        let config = Config {
            simulations: Some(1000),
            ..test_config(&dir)
        };
        assert!(config.validate().is_ok());

        let config = Config {
            tasks: 0,
            ..test_config(&dir)
        };
        assert!(config.validate().is_err());

        // Nothing is written for an invalid config.
        assert!(run(config).is_err());
        assert!(!dir.path().join("store").exists());

        assert!(test_config(&dir).validate().is_ok());
    }
}
