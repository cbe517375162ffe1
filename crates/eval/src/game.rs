// Copyright (C) 2025 Vince Vasta
// SPDX-License-Identifier: Apache-2.0

//! Single game simulation.
//!
//! Cards are dealt face up on a table one at a time, when the last three cards
//! on the table match a player sequence that player wins a trick and collects
//! all the cards on the table, the table is cleared and the game goes on until
//! the deck is exhausted. Cards left on the table at the end are not collected.
use std::cmp::Ordering;

use penney_cards::{Card, Deck, Error, Result, Sequence};

/// The rule used to decide a game winner.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rule {
    /// The player with more tricks wins.
    Tricks,
    /// The player with more collected cards wins.
    Cards,
}

impl Rule {
    /// Returns all rules.
    pub fn rules() -> impl DoubleEndedIterator<Item = Rule> {
        [Rule::Tricks, Rule::Cards].into_iter()
    }
}

/// A game result under one rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    /// Player 1 wins.
    Player1,
    /// Player 2 wins.
    Player2,
    /// Same score for both players.
    Draw,
}

/// The outcome of one game.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct GameOutcome {
    /// Tricks won by player 1.
    pub p1_tricks: u32,
    /// Tricks won by player 2.
    pub p2_tricks: u32,
    /// Cards collected by player 1.
    pub p1_cards: u32,
    /// Cards collected by player 2.
    pub p2_cards: u32,
    /// Cards left on the table when the deck ran out.
    pub leftover: u32,
}

impl GameOutcome {
    /// The game result for the given rule.
    pub fn verdict(&self, rule: Rule) -> Verdict {
        let (p1, p2) = match rule {
            Rule::Tricks => (self.p1_tricks, self.p2_tricks),
            Rule::Cards => (self.p1_cards, self.p2_cards),
        };

        match p1.cmp(&p2) {
            Ordering::Greater => Verdict::Player1,
            Ordering::Less => Verdict::Player2,
            Ordering::Equal => Verdict::Draw,
        }
    }

    /// Total cards collected by both players.
    pub fn collected(&self) -> u32 {
        self.p1_cards + self.p2_cards
    }
}

/// Plays a game with the given deck, player 1 bets on `seq1` and player 2 on
/// `seq2`.
///
/// Returns an error if the two sequences are the same.
pub fn simulate_game(deck: &Deck, seq1: Sequence, seq2: Sequence) -> Result<GameOutcome> {
    if seq1 == seq2 {
        return Err(Error::InvalidArgument(format!(
            "players must bet on different sequences, both bet on {seq1}"
        )));
    }

    Ok(play(deck.cards(), seq1, seq2))
}

/// Plays a game on a cards slice, the sequences must be different.
///
/// Only the last three cards bits are kept in `window` together with the
/// number of cards on the table, a match is possible only after three cards
/// have been dealt since the last trick.
pub(crate) fn play(cards: &[Card], seq1: Sequence, seq2: Sequence) -> GameOutcome {
    debug_assert_ne!(seq1, seq2);

    let (target1, target2) = (seq1.index(), seq2.index());
    let mut outcome = GameOutcome::default();
    let mut window = 0usize;
    let mut table = 0u32;

    for card in cards {
        window = ((window << 1) | card.bit() as usize) & (Sequence::COUNT - 1);
        table += 1;

        if table < Sequence::LEN as u32 {
            continue;
        }

        if window == target1 {
            outcome.p1_tricks += 1;
            outcome.p1_cards += table;
            table = 0;
        } else if window == target2 {
            outcome.p2_tricks += 1;
            outcome.p2_cards += table;
            table = 0;
        }
    }

    outcome.leftover = table;
    outcome
}
