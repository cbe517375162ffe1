// Copyright (C) 2025 Vince Vasta
// SPDX-License-Identifier: Apache-2.0

//! Penney's Game simulator.
//!
//! Plays Penney's Game on binary decks and aggregates the results for all
//! pairs of sequences. A single game is played with [simulate_game]:
//!
//! ```
//! # use penney_eval::*;
//! let deck = Deck::default();
//! let bbb = "BBB".parse::<Sequence>().unwrap();
//! let rrr = "RRR".parse::<Sequence>().unwrap();
//! let outcome = simulate_game(&deck, bbb, rrr).unwrap();
//! assert_eq!(outcome.p1_tricks, 8);
//! assert_eq!(outcome.verdict(Rule::Cards), Verdict::Player2);
//! ```
//!
//! and [compute_matchup_statistics] plays a batch of decks for all 56 ordered
//! pairs of distinct sequences:
//!
//! ```
//! # use penney_eval::*;
//! let decks = generate_decks(100, 42).unwrap();
//! let matrix = compute_matchup_statistics(&decks, decks.len()).unwrap();
//! assert_eq!(matrix.len(), 56);
//! ```
//!
//! The **`parallel`** feature enables [compute_matchup_statistics_par] that
//! splits the decks batch across parallel tasks.
#![warn(clippy::all, rust_2018_idioms, missing_docs)]
pub mod game;
pub use game::{GameOutcome, Rule, Verdict, simulate_game};

pub mod matchup;
#[cfg(feature = "parallel")]
pub use matchup::compute_matchup_statistics_par;
pub use matchup::{MatchupStatistics, ResultMatrix, compute_matchup_statistics, pairs};

// Reexport cards types.
pub use penney_cards::{Card, Deck, Error, Sequence, generate_decks};
