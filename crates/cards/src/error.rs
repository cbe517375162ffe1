// Copyright (C) 2025 Vince Vasta
// SPDX-License-Identifier: Apache-2.0

//! Cards and simulation errors.

/// Errors for invalid inputs and decks.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// An argument is out of range.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),
    /// A deck doesn't have 52 cards with 26 cards of each color.
    #[error("malformed deck: {0}")]
    MalformedDeck(String),
}

/// A result type for cards operations.
pub type Result<T> = std::result::Result<T, Error>;
