// Copyright (C) 2025 Vince Vasta
// SPDX-License-Identifier: Apache-2.0

//! Three cards sequences players bet on.
use serde::{Deserialize, Deserializer, Serialize, Serializer, de};
use std::{fmt, str::FromStr};

use crate::{Card, Error};

/// A sequence of three cards.
///
/// Sequences are ordered as the binary number they encode with black as 0 and
/// red as 1, so that `BBB < BBR < ... < RRR`, this is the order used to index
/// results tables.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Sequence([Card; 3]);

impl Sequence {
    /// The number of cards in a sequence.
    pub const LEN: usize = 3;

    /// The number of distinct sequences.
    pub const COUNT: usize = 1 << Self::LEN;

    /// Creates a sequence from its cards.
    pub const fn new(cards: [Card; 3]) -> Self {
        Self(cards)
    }

    /// Creates the sequence with the given index.
    ///
    /// Panics if index is not 0 <= index < 8.
    pub fn from_index(index: usize) -> Self {
        assert!(index < Self::COUNT, "index={index} must be 0 <= index < 8");

        let card = |shift: usize| {
            if (index >> shift) & 1 == 0 {
                Card::Black
            } else {
                Card::Red
            }
        };

        Self([card(2), card(1), card(0)])
    }

    /// Returns all sequences in index order.
    pub fn all() -> impl DoubleEndedIterator<Item = Sequence> + ExactSizeIterator {
        (0..Self::COUNT).map(Self::from_index)
    }

    /// The sequence index, the three cards bits with the first card as the most
    /// significant bit.
    #[inline]
    pub fn index(&self) -> usize {
        self.0
            .iter()
            .fold(0, |acc, card| (acc << 1) | card.bit() as usize)
    }

    /// The sequence cards.
    pub fn cards(&self) -> [Card; 3] {
        self.0
    }
}

impl fmt::Display for Sequence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let [c1, c2, c3] = self.0;
        write!(f, "{c1}{c2}{c3}")
    }
}

impl FromStr for Sequence {
    type Err = Error;

    /// Parses a sequence using either the `B`/`R` or the `0`/`1` alphabet.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let cards = s
            .chars()
            .map(|c| match c.to_ascii_uppercase() {
                'B' | '0' => Ok(Card::Black),
                'R' | '1' => Ok(Card::Red),
                _ => Err(Error::InvalidArgument(format!(
                    "invalid card {c:?} in sequence {s:?}"
                ))),
            })
            .collect::<Result<Vec<_>, _>>()?;

        let cards: [Card; 3] = cards.try_into().map_err(|_| {
            Error::InvalidArgument(format!("sequence {s:?} must have {} cards", Self::LEN))
        })?;

        Ok(Self(cards))
    }
}

impl Serialize for Sequence {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Sequence {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn all_sequences() {
        let labels = Sequence::all().map(|s| s.to_string()).collect::<Vec<_>>();
        assert_eq!(
            labels,
            ["BBB", "BBR", "BRB", "BRR", "RBB", "RBR", "RRB", "RRR"]
        );

        for (idx, seq) in Sequence::all().enumerate() {
            assert_eq!(seq.index(), idx);
            assert_eq!(Sequence::from_index(idx), seq);
        }

        // The order matches the index order.
        let seqs = Sequence::all().collect::<Vec<_>>();
        assert!(seqs.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn parse_sequence() {
        let brb = Sequence::new([Card::Black, Card::Red, Card::Black]);
        assert_eq!("BRB".parse::<Sequence>().unwrap(), brb);
        assert_eq!("brb".parse::<Sequence>().unwrap(), brb);
        assert_eq!("010".parse::<Sequence>().unwrap(), brb);
        assert_eq!(brb.index(), 0b010);

        assert!(matches!(
            "BR".parse::<Sequence>(),
            Err(Error::InvalidArgument(_))
        ));
        assert!(matches!(
            "BRBR".parse::<Sequence>(),
            Err(Error::InvalidArgument(_))
        ));
        assert!(matches!(
            "BXB".parse::<Sequence>(),
            Err(Error::InvalidArgument(_))
        ));
    }
}
