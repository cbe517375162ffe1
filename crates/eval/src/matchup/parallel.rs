// Copyright (C) 2025 Vince Vasta
// SPDX-License-Identifier: Apache-2.0

//! Parallel matchup statistics.
use log::{debug, info};
use std::{thread, time::Instant};

use penney_cards::{Deck, Error, Sequence};

use super::{Counters, ResultMatrix, check_args, game_decks};

/// Computes the statistics for all pairs using `num_tasks` parallel tasks.
///
/// The games are split in contiguous ranges, one for each task, each task
/// counts its games in its own counters that are merged after all tasks are
/// done, so the result is the same as [compute_matchup_statistics].
///
/// [compute_matchup_statistics]: super::compute_matchup_statistics
pub fn compute_matchup_statistics_par(
    decks: &[Deck],
    n_simulations: usize,
    num_tasks: usize,
) -> Result<ResultMatrix, Error> {
    if num_tasks == 0 {
        return Err(Error::InvalidArgument(
            "the number of tasks must be at least 1".to_string(),
        ));
    }

    check_args(decks, n_simulations)?;
    let games_per_task = n_simulations.div_ceil(num_tasks);

    let now = Instant::now();
    let task_counters = thread::scope(|s| {
        let handles = (0..n_simulations)
            .step_by(games_per_task)
            .enumerate()
            .map(|(task_id, start)| {
                let end = (start + games_per_task).min(n_simulations);
                s.spawn(move || {
                    debug!("Task {task_id} playing games {start}..{end}");
                    let mut counters = Counters::default();
                    counters.play_all(game_decks(decks, start..end));
                    counters
                })
            })
            .collect::<Vec<_>>();

        handles
            .into_iter()
            .map(|h| h.join().unwrap_or_else(|e| std::panic::resume_unwind(e)))
            .collect::<Vec<_>>()
    });

    // Aggregate counters.
    let mut counters = Counters::default();
    task_counters.iter().for_each(|c| counters.merge(c));

    info!(
        "Played {} games with {} tasks in {:.3}s",
        n_simulations * Sequence::COUNT * (Sequence::COUNT - 1),
        task_counters.len(),
        now.elapsed().as_secs_f64()
    );

    Ok(counters.finalize())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::matchup::compute_matchup_statistics;
    use penney_cards::generate_decks;

    #[test]
    fn parallel_matches_serial() {
        let decks = generate_decks(101, 31).unwrap();
        let serial = compute_matchup_statistics(&decks, decks.len()).unwrap();

        for num_tasks in [1, 3, 4, 7] {
            let par = compute_matchup_statistics_par(&decks, decks.len(), num_tasks).unwrap();
            assert_eq!(par, serial);
        }

        let serial = compute_matchup_statistics(&decks, 50).unwrap();
        let par = compute_matchup_statistics_par(&decks, 50, 4).unwrap();
        assert_eq!(par, serial);
    }

    #[test]
    fn more_simulations_than_decks() {
        let decks = generate_decks(7, 12).unwrap();
        let serial = compute_matchup_statistics(&decks, 100).unwrap();
        for num_tasks in [1, 3, 8] {
            let par = compute_matchup_statistics_par(&decks, 100, num_tasks).unwrap();
            assert_eq!(par, serial);
        }
    }

    #[test]
    fn more_tasks_than_decks() {
        let decks = generate_decks(3, 8).unwrap();
        let serial = compute_matchup_statistics(&decks, 3).unwrap();
        let par = compute_matchup_statistics_par(&decks, 3, 8).unwrap();
        assert_eq!(par, serial);
    }

    #[test]
    fn invalid_arguments() {
        let decks = generate_decks(3, 8).unwrap();
        assert!(matches!(
            compute_matchup_statistics_par(&decks, 3, 0),
            Err(Error::InvalidArgument(_))
        ));
        assert!(matches!(
            compute_matchup_statistics_par(&[], 1, 4),
            Err(Error::InvalidArgument(_))
        ));
    }
}
