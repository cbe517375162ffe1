// Copyright (C) 2025 Vince Vasta
// SPDX-License-Identifier: Apache-2.0

//! Store errors.

/// Errors returned by the decks store.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// No decks have been stored for the seed.
    #[error("no decks found for seed {0}")]
    NotFound(u64),
    /// The chunks don't hold the number of decks in the registry.
    #[error("seed {seed} registry has {expected} decks but chunks have {found}")]
    Inconsistent {
        /// The seed.
        seed: u64,
        /// The decks count in the registry.
        expected: usize,
        /// The decks found in the chunks.
        found: usize,
    },
    /// Invalid decks or arguments.
    #[error(transparent)]
    Deck(#[from] penney_cards::Error),
    /// Chunk file error.
    #[error("chunk i/o error: {0}")]
    Io(#[from] std::io::Error),
    /// Registry database error.
    #[error("registry error: {0}")]
    Sqlite(#[from] rusqlite::Error),
    /// Chunk encoding error.
    #[error("chunk codec error: {0}")]
    Codec(#[from] bincode::Error),
}

/// A result type for store operations.
pub type Result<T> = std::result::Result<T, Error>;
