// Copyright (C) 2025 Vince Vasta
// SPDX-License-Identifier: Apache-2.0

//! Matchup statistics over a batch of decks.
//!
//! Every ordered pair of distinct sequences plays the same decks, player 2
//! results are counted for both the tricks and the cards rules and turned into
//! percentages once all games have been played.
use anyhow::Result;
use log::info;
use serde::{Deserialize, Serialize};
use std::{collections::BTreeMap, fs, ops::Range, path::Path, time::Instant};

use penney_cards::{Deck, Error, Sequence};

use crate::game::{GameOutcome, Rule, Verdict, play};

#[cfg(feature = "parallel")]
mod parallel;
#[cfg(feature = "parallel")]
pub use parallel::compute_matchup_statistics_par;

/// Player 2 wins and draws under one rule.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
struct RuleCounter {
    wins: u64,
    draws: u64,
}

impl RuleCounter {
    fn record(&mut self, verdict: Verdict) {
        match verdict {
            Verdict::Player2 => self.wins += 1,
            Verdict::Draw => self.draws += 1,
            Verdict::Player1 => {}
        }
    }

    fn merge(&mut self, other: &RuleCounter) {
        self.wins += other.wins;
        self.draws += other.draws;
    }
}

/// Games counters for one sequences pair.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
struct MatchupCounter {
    games: u64,
    tricks: RuleCounter,
    cards: RuleCounter,
}

impl MatchupCounter {
    fn record(&mut self, outcome: &GameOutcome) {
        self.games += 1;
        self.tricks.record(outcome.verdict(Rule::Tricks));
        self.cards.record(outcome.verdict(Rule::Cards));
    }

    fn merge(&mut self, other: &MatchupCounter) {
        self.games += other.games;
        self.tricks.merge(&other.tricks);
        self.cards.merge(&other.cards);
    }

    fn finalize(&self) -> MatchupStatistics {
        let percent = |count: u64| {
            let p = count as f64 / self.games as f64 * 100.0;
            (p * 100.0).round() / 100.0
        };

        MatchupStatistics {
            tricks_win: percent(self.tricks.wins),
            tricks_draw: percent(self.tricks.draws),
            cards_win: percent(self.cards.wins),
            cards_draw: percent(self.cards.draws),
        }
    }
}

/// Counters for all sequences pairs indexed by `seq1 * 8 + seq2`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Counters([MatchupCounter; Sequence::COUNT * Sequence::COUNT]);

impl Default for Counters {
    fn default() -> Self {
        Self([MatchupCounter::default(); Sequence::COUNT * Sequence::COUNT])
    }
}

impl Counters {
    /// Plays all decks for all pairs.
    pub(crate) fn play_all<'a>(&mut self, decks: impl IntoIterator<Item = &'a Deck>) {
        for deck in decks {
            for (seq1, seq2) in pairs() {
                let outcome = play(deck.cards(), seq1, seq2);
                self.0[seq1.index() * Sequence::COUNT + seq2.index()].record(&outcome);
            }
        }
    }

    #[cfg_attr(not(feature = "parallel"), allow(dead_code))]
    pub(crate) fn merge(&mut self, other: &Counters) {
        self.0
            .iter_mut()
            .zip(other.0.iter())
            .for_each(|(c, o)| c.merge(o));
    }

    pub(crate) fn finalize(&self) -> ResultMatrix {
        let mut matrix = BTreeMap::<Sequence, BTreeMap<Sequence, MatchupStatistics>>::new();
        for (seq1, seq2) in pairs() {
            let counter = &self.0[seq1.index() * Sequence::COUNT + seq2.index()];
            matrix
                .entry(seq1)
                .or_default()
                .insert(seq2, counter.finalize());
        }

        ResultMatrix(matrix)
    }
}

/// All ordered pairs of distinct sequences in index order.
pub fn pairs() -> impl Iterator<Item = (Sequence, Sequence)> {
    Sequence::all().flat_map(|s1| {
        Sequence::all()
            .filter(move |&s2| s2 != s1)
            .map(move |s2| (s1, s2))
    })
}

/// Player 2 percentages for a sequences pair.
#[derive(Debug, Default, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MatchupStatistics {
    /// Percentage of games player 2 won more tricks.
    pub tricks_win: f64,
    /// Percentage of games both players won the same number of tricks.
    pub tricks_draw: f64,
    /// Percentage of games player 2 collected more cards.
    pub cards_win: f64,
    /// Percentage of games both players collected the same number of cards.
    pub cards_draw: f64,
}

impl MatchupStatistics {
    /// Player 2 win percentage for a rule.
    pub fn win(&self, rule: Rule) -> f64 {
        match rule {
            Rule::Tricks => self.tricks_win,
            Rule::Cards => self.cards_win,
        }
    }

    /// Draw percentage for a rule.
    pub fn draw(&self, rule: Rule) -> f64 {
        match rule {
            Rule::Tricks => self.tricks_draw,
            Rule::Cards => self.cards_draw,
        }
    }

    /// Player 2 loss percentage for a rule.
    pub fn loss(&self, rule: Rule) -> f64 {
        100.0 - self.win(rule) - self.draw(rule)
    }
}

/// Statistics for all pairs of distinct sequences, `seq1 -> seq2 -> stats`.
#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ResultMatrix(BTreeMap<Sequence, BTreeMap<Sequence, MatchupStatistics>>);

impl ResultMatrix {
    /// Gets the statistics for a pair.
    pub fn get(&self, seq1: Sequence, seq2: Sequence) -> Option<&MatchupStatistics> {
        self.0.get(&seq1).and_then(|row| row.get(&seq2))
    }

    /// The number of pairs in the matrix.
    pub fn len(&self) -> usize {
        self.0.values().map(|row| row.len()).sum()
    }

    /// Checks if the matrix is empty.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Iterates pairs statistics in index order.
    pub fn iter(&self) -> impl Iterator<Item = (Sequence, Sequence, &MatchupStatistics)> {
        self.0
            .iter()
            .flat_map(|(&s1, row)| row.iter().map(move |(&s2, stats)| (s1, s2, stats)))
    }

    /// Player 2 win percentages for a rule as an 8x8 grid indexed by
    /// `[seq1][seq2]`, the diagonal is `None`.
    pub fn grid(&self, rule: Rule) -> [[Option<f64>; Sequence::COUNT]; Sequence::COUNT] {
        let mut grid = [[None; Sequence::COUNT]; Sequence::COUNT];
        for (s1, s2, stats) in self.iter() {
            grid[s1.index()][s2.index()] = Some(stats.win(rule));
        }

        grid
    }

    /// The sequence player 2 should pick when player 1 picks `seq1`.
    pub fn best_reply(&self, seq1: Sequence, rule: Rule) -> Option<(Sequence, f64)> {
        self.0.get(&seq1).and_then(|row| {
            row.iter()
                .map(|(&s2, stats)| (s2, stats.win(rule)))
                .max_by(|a, b| a.1.total_cmp(&b.1))
        })
    }

    /// Serializes the matrix to a JSON string.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Writes the matrix to a JSON file.
    pub fn to_json_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }

        fs::write(path, self.to_json()?)?;
        Ok(())
    }

    /// Reads a matrix from a JSON file.
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let json = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&json)?)
    }
}

/// Checks the aggregation arguments.
pub(crate) fn check_args(decks: &[Deck], n_simulations: usize) -> Result<(), Error> {
    if decks.is_empty() {
        return Err(Error::InvalidArgument(
            "cannot aggregate an empty decks batch".to_string(),
        ));
    }

    if n_simulations == 0 {
        return Err(Error::InvalidArgument(
            "the number of simulations must be at least 1".to_string(),
        ));
    }

    Ok(())
}

/// The decks for games `range`, game `i` is played with deck `i % decks.len()`.
pub(crate) fn game_decks(
    decks: &[Deck],
    range: Range<usize>,
) -> impl Iterator<Item = &Deck> {
    range.map(move |i| &decks[i % decks.len()])
}

/// Computes the statistics for all pairs of distinct sequences.
///
/// Every pair plays `n_simulations` games going through the batch in order
/// and starting again from the first deck when `n_simulations` is larger than
/// the batch, so all pairs play the same decks.
pub fn compute_matchup_statistics(
    decks: &[Deck],
    n_simulations: usize,
) -> Result<ResultMatrix, Error> {
    check_args(decks, n_simulations)?;

    let now = Instant::now();
    let mut counters = Counters::default();
    counters.play_all(game_decks(decks, 0..n_simulations));

    info!(
        "Played {} games in {:.3}s",
        n_simulations * Sequence::COUNT * (Sequence::COUNT - 1),
        now.elapsed().as_secs_f64()
    );

    Ok(counters.finalize())
}
