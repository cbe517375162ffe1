// Copyright (C) 2025 Vince Vasta
// SPDX-License-Identifier: Apache-2.0

//! Penney's Game decks store.
//!
//! Decks generated for a seed are saved to a directory in chunks files of at
//! most [MAX_DECKS_PER_CHUNK] decks, and a registry database keeps track of the
//! seeds in the store:
//!
//! ```text
//! <root>/registry.db
//! <root>/seed-42/chunk-00000.bin
//! <root>/seed-42/chunk-00001.bin
//! ```
#![warn(clippy::all, rust_2018_idioms, missing_docs)]
pub mod store;
pub use store::{DeckStore, MAX_DECKS_PER_CHUNK, SeedEntry};

mod error;
pub use error::{Error, Result};
