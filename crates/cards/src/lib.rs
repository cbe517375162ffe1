// Copyright (C) 2025 Vince Vasta
// SPDX-License-Identifier: Apache-2.0

//! Penney's Game cards types.
//!
//! This crate defines the binary [Card] type, the 52-card [Deck] with 26 black
//! and 26 red cards, and the three cards [Sequence] players bet on:
//!
//! ```
//! # use penney_cards::{Card, Deck, Sequence};
//! let deck = Deck::default();
//! assert_eq!(deck.cards().len(), Deck::SIZE);
//!
//! let seq = "BRR".parse::<Sequence>().unwrap();
//! assert_eq!(seq.cards(), [Card::Black, Card::Red, Card::Red]);
//! assert_eq!(Sequence::all().count(), 8);
//! ```
//!
//! Decks for a simulation come from [generate_decks] that shuffles a batch of
//! decks from a seeded stream, the same seed always gives the same batch:
//!
//! ```
//! # use penney_cards::generate_decks;
//! let d1 = generate_decks(10, 42).unwrap();
//! let d2 = generate_decks(10, 42).unwrap();
//! assert_eq!(d1, d2);
//! ```
#![warn(clippy::all, rust_2018_idioms, missing_docs)]
mod deck;
pub use deck::{Card, Deck, generate_decks};

mod error;
pub use error::{Error, Result};

mod sequence;
pub use sequence::Sequence;
