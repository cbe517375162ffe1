// Copyright (C) 2025 Vince Vasta
// SPDX-License-Identifier: Apache-2.0

//! Binary cards and decks definitions.
use rand::prelude::*;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::{Error, Result};

/// A binary card, a deck has the same number of black and red cards.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(into = "u8", try_from = "u8")]
#[repr(u8)]
pub enum Card {
    /// A black card, the 0 value.
    Black = 0,
    /// A red card, the 1 value.
    Red = 1,
}

impl Card {
    /// Returns the card bit value.
    #[inline]
    pub fn bit(self) -> u8 {
        self as u8
    }

    /// Returns all cards values.
    pub fn cards() -> impl DoubleEndedIterator<Item = Card> {
        [Card::Black, Card::Red].into_iter()
    }
}

impl From<Card> for u8 {
    fn from(card: Card) -> u8 {
        card.bit()
    }
}

impl TryFrom<u8> for Card {
    type Error = Error;

    fn try_from(bit: u8) -> Result<Self> {
        match bit {
            0 => Ok(Card::Black),
            1 => Ok(Card::Red),
            _ => Err(Error::MalformedDeck(format!("invalid card value {bit}"))),
        }
    }
}

impl fmt::Display for Card {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let card = match self {
            Card::Black => 'B',
            Card::Red => 'R',
        };

        write!(f, "{card}")
    }
}

/// A deck of 26 black and 26 red cards.
///
/// The composition is checked on every construction path, including
/// deserialization, so a `Deck` value always holds a valid deck.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "Vec<Card>", try_from = "Vec<Card>")]
pub struct Deck {
    cards: Vec<Card>,
}

impl Deck {
    /// The number of cards in the deck.
    pub const SIZE: usize = 52;

    /// The number of cards of each color.
    pub const HALF_SIZE: usize = Self::SIZE / 2;

    /// Creates a new shuffled deck.
    pub fn new_and_shuffled<R: Rng>(rng: &mut R) -> Self {
        let mut deck = Self::default();
        deck.shuffle(rng);
        deck
    }

    /// Shuffles the deck in place.
    pub fn shuffle<R: Rng>(&mut self, rng: &mut R) {
        self.cards.shuffle(rng);
    }

    /// The deck cards in dealing order.
    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    /// Iterates the deck cards in dealing order.
    pub fn iter(&self) -> std::slice::Iter<'_, Card> {
        self.cards.iter()
    }

    /// Checks that a cards slice is a valid deck.
    pub fn check(cards: &[Card]) -> Result<()> {
        if cards.len() != Self::SIZE {
            return Err(Error::MalformedDeck(format!(
                "expected {} cards found {}",
                Self::SIZE,
                cards.len()
            )));
        }

        let reds = cards.iter().filter(|&&c| c == Card::Red).count();
        if reds != Self::HALF_SIZE {
            return Err(Error::MalformedDeck(format!(
                "expected {} red cards found {reds}",
                Self::HALF_SIZE
            )));
        }

        Ok(())
    }
}

impl Default for Deck {
    /// The canonical deck, all black cards followed by all red cards.
    fn default() -> Self {
        let cards = Card::cards()
            .flat_map(|c| std::iter::repeat_n(c, Self::HALF_SIZE))
            .collect::<Vec<_>>();
        Self { cards }
    }
}

impl TryFrom<Vec<Card>> for Deck {
    type Error = Error;

    fn try_from(cards: Vec<Card>) -> Result<Self> {
        Self::check(&cards)?;
        Ok(Self { cards })
    }
}

impl From<Deck> for Vec<Card> {
    fn from(deck: Deck) -> Vec<Card> {
        deck.cards
    }
}

impl<'a> IntoIterator for &'a Deck {
    type Item = &'a Card;
    type IntoIter = std::slice::Iter<'a, Card>;

    fn into_iter(self) -> Self::IntoIter {
        self.cards.iter()
    }
}

impl fmt::Display for Deck {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for card in &self.cards {
            write!(f, "{card}")?;
        }

        Ok(())
    }
}

/// Generates `n_decks` shuffled decks from a seeded random stream.
///
/// The decks are shuffled in order from the same stream so the same seed and
/// count always give the same decks, and the first `k` decks for a seed don't
/// depend on how many decks are generated after them. The stream is a
/// [StdRng], its output is stable for a given `rand` version.
pub fn generate_decks(n_decks: usize, seed: u64) -> Result<Vec<Deck>> {
    if n_decks == 0 {
        return Err(Error::InvalidArgument(
            "the number of decks must be at least 1".to_string(),
        ));
    }

    let mut rng = StdRng::seed_from_u64(seed);
    let mut decks = vec![Deck::default(); n_decks];
    for deck in &mut decks {
        deck.shuffle(&mut rng);
    }

    Ok(decks)
}

#[cfg(test)]
mod tests {
    use super::*;
    use ahash::HashSet;

    #[test]
    fn canonical_deck() {
        let deck = Deck::default();
        assert_eq!(deck.cards().len(), Deck::SIZE);
        assert!(deck.cards()[..26].iter().all(|&c| c == Card::Black));
        assert!(deck.cards()[26..].iter().all(|&c| c == Card::Red));
        assert_eq!(deck.to_string(), format!("{}{}", "B".repeat(26), "R".repeat(26)));
    }

    #[test]
    fn generated_decks_composition() {
        let decks = generate_decks(500, 9903).unwrap();
        assert_eq!(decks.len(), 500);

        for deck in &decks {
            assert_eq!(deck.cards().len(), Deck::SIZE);
            let blacks = deck.iter().filter(|&&c| c == Card::Black).count();
            assert_eq!(blacks, Deck::HALF_SIZE);
            assert!(Deck::check(deck.cards()).is_ok());
        }
    }

    #[test]
    fn generated_decks_are_deterministic() {
        let d1 = generate_decks(100, 42).unwrap();
        let d2 = generate_decks(100, 42).unwrap();
        assert_eq!(d1, d2);

        // A different seed gives a different batch.
        let d3 = generate_decks(100, 43).unwrap();
        assert_ne!(d1, d3);
    }

    #[test]
    fn generated_decks_are_independent() {
        // With C(52, 26) possible decks a repeated deck means a shared permutation.
        let decks = generate_decks(1_000, 7).unwrap();
        let unique = decks.iter().collect::<HashSet<_>>();
        assert_eq!(unique.len(), decks.len());
        assert!(!unique.contains(&Deck::default()));
    }

    #[test]
    fn generated_decks_prefix() {
        let long = generate_decks(50, 11).unwrap();
        let short = generate_decks(20, 11).unwrap();
        assert_eq!(&long[..20], &short[..]);
    }

    #[test]
    fn generate_zero_decks() {
        let res = generate_decks(0, 42);
        assert!(matches!(res, Err(Error::InvalidArgument(_))));
    }

    #[test]
    fn malformed_decks() {
        let short = vec![Card::Black; Deck::SIZE - 1];
        assert!(matches!(
            Deck::try_from(short),
            Err(Error::MalformedDeck(_))
        ));

        let mut skewed = Vec::from(Deck::default());
        skewed[0] = Card::Red;
        assert!(matches!(
            Deck::try_from(skewed),
            Err(Error::MalformedDeck(_))
        ));

        assert!(Card::try_from(2).is_err());
        assert_eq!(Card::try_from(1).unwrap(), Card::Red);
    }

    #[test]
    fn shuffled_deck_keeps_composition() {
        let mut rng = StdRng::seed_from_u64(13);
        let deck = Deck::new_and_shuffled(&mut rng);
        let cards = Vec::from(deck.clone());
        assert_eq!(Deck::try_from(cards).unwrap(), deck);
    }
}
