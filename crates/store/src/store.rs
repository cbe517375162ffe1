// Copyright (C) 2025 Vince Vasta
// SPDX-License-Identifier: Apache-2.0

//! Decks store for persisting generated decks.
use log::{debug, info, warn};
use parking_lot::Mutex;
use rusqlite::{Connection, params};
use std::{
    fs::{self, File},
    io::{BufReader, BufWriter, Write},
    path::{Path, PathBuf},
};

use penney_cards::{Card, Deck, generate_decks};

use crate::{Error, Result};

/// The maximum number of decks in a chunk file.
pub const MAX_DECKS_PER_CHUNK: usize = 10_000;

/// The registry file name.
const REGISTRY_FILE: &str = "registry.db";

/// A registry row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SeedEntry {
    /// The seed used to generate the decks.
    pub seed: u64,
    /// The number of decks stored for the seed.
    pub decks: usize,
    /// The number of chunk files.
    pub chunks: usize,
}

/// Store for persisting decks by seed.
#[derive(Debug)]
pub struct DeckStore {
    root: PathBuf,
    db: Mutex<Connection>,
}

impl DeckStore {
    /// Opens a store at the given directory, creating it if needed.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let root = path.as_ref().to_path_buf();
        fs::create_dir_all(&root)?;

        let conn = Connection::open(root.join(REGISTRY_FILE))?;

        // Create tables
        conn.execute(
            "CREATE TABLE IF NOT EXISTS seeds (
               seed INTEGER PRIMARY KEY,
               decks INTEGER NOT NULL,
               chunks INTEGER NOT NULL,
               created_at DATETIME DEFAULT CURRENT_TIMESTAMP
            )",
            (),
        )?;

        info!("Opened decks store at {}", root.display());

        Ok(Self {
            root,
            db: Mutex::new(conn),
        })
    }

    /// Closes the store registry.
    pub fn close(self) -> Result<()> {
        self.db.into_inner().close().map_err(|(_, e)| e)?;
        info!("Closed decks store at {}", self.root.display());
        Ok(())
    }

    /// Saves the decks for a seed replacing any decks stored for the seed.
    pub fn put_decks(&self, seed: u64, decks: &[Deck]) -> Result<()> {
        if decks.is_empty() {
            return Err(penney_cards::Error::InvalidArgument(format!(
                "no decks to store for seed {seed}"
            ))
            .into());
        }

        // Write chunks to a staging directory so that a failed write doesn't
        // replace the decks in the store.
        let staging = self.root.join(format!("seed-{seed}.tmp"));
        if staging.exists() {
            fs::remove_dir_all(&staging)?;
        }

        let res = write_chunks(&staging, decks)
            .and_then(|chunks| self.commit_chunks(seed, &staging, decks.len(), chunks));

        if res.is_err() && staging.exists() {
            if let Err(e) = fs::remove_dir_all(&staging) {
                warn!("Failed to remove {}: {e}", staging.display());
            }
        }

        res
    }

    /// Moves the staged chunks to the seed directory and updates the registry.
    ///
    /// The registry row is written before the directories are swapped and the
    /// old directory is restored if the swap or the commit fail.
    fn commit_chunks(
        &self,
        seed: u64,
        staging: &Path,
        n_decks: usize,
        chunks: usize,
    ) -> Result<()> {
        let mut db = self.db.lock();
        let tx = db.transaction()?;

        tx.execute(
            "INSERT OR REPLACE INTO seeds (seed, decks, chunks, created_at)
             VALUES (?1, ?2, ?3, CURRENT_TIMESTAMP)",
            params![seed as i64, n_decks as i64, chunks as i64],
        )?;

        let seed_dir = self.seed_dir(seed);
        let backup = self.root.join(format!("seed-{seed}.old"));
        if backup.exists() {
            fs::remove_dir_all(&backup)?;
        }

        let has_old = seed_dir.exists();
        if has_old {
            fs::rename(&seed_dir, &backup)?;
        }

        let res = fs::rename(staging, &seed_dir)
            .map_err(Error::from)
            .and_then(|_| tx.commit().map_err(Error::from));

        if let Err(e) = res {
            // Put the new chunks back in staging and restore the old ones.
            if seed_dir.exists() && !staging.exists() {
                if let Err(e) = fs::rename(&seed_dir, staging) {
                    warn!("Failed to move back {}: {e}", seed_dir.display());
                }
            }

            if has_old {
                if let Err(e) = fs::rename(&backup, &seed_dir) {
                    warn!("Failed to restore {}: {e}", backup.display());
                }
            }

            return Err(e);
        }

        if has_old {
            if let Err(e) = fs::remove_dir_all(&backup) {
                warn!("Failed to remove {}: {e}", backup.display());
            }
        }

        info!("Stored {n_decks} decks for seed {seed} in {chunks} chunks");

        Ok(())
    }

    /// Loads all the decks stored for a seed in order.
    pub fn get_decks(&self, seed: u64) -> Result<Vec<Deck>> {
        let entry = self.entry(seed)?.ok_or(Error::NotFound(seed))?;
        let seed_dir = self.seed_dir(seed);

        let mut decks = Vec::with_capacity(entry.decks);
        for idx in 0..entry.chunks {
            let path = seed_dir.join(chunk_file_name(idx));
            let reader = BufReader::new(File::open(&path)?);
            let chunk = bincode::deserialize_from::<_, Vec<Vec<Card>>>(reader)?;

            debug!("Read {} decks from {}", chunk.len(), path.display());

            for cards in chunk {
                decks.push(Deck::try_from(cards)?);
            }
        }

        if decks.len() != entry.decks {
            return Err(Error::Inconsistent {
                seed,
                expected: entry.decks,
                found: decks.len(),
            });
        }

        Ok(decks)
    }

    /// Loads `n_decks` decks for a seed, generating and storing them if the
    /// store doesn't have enough decks for the seed.
    ///
    /// Stored decks are reused only if there are at least `n_decks`, as
    /// generation for a seed is sequential the first `n_decks` stored decks
    /// are the same decks [generate_decks] returns.
    pub fn load_or_generate(&self, seed: u64, n_decks: usize) -> Result<Vec<Deck>> {
        match self.entry(seed)? {
            Some(entry) if n_decks > 0 && entry.decks >= n_decks => {
                info!("Loading {n_decks} of {} decks for seed {seed}", entry.decks);
                let mut decks = self.get_decks(seed)?;
                decks.truncate(n_decks);
                Ok(decks)
            }
            _ => {
                info!("Generating {n_decks} decks for seed {seed}");
                let decks = generate_decks(n_decks, seed)?;
                self.put_decks(seed, &decks)?;
                Ok(decks)
            }
        }
    }

    /// Checks if the store has decks for a seed.
    pub fn contains(&self, seed: u64) -> Result<bool> {
        Ok(self.entry(seed)?.is_some())
    }

    /// Returns the registry entry for a seed.
    pub fn entry(&self, seed: u64) -> Result<Option<SeedEntry>> {
        let db = self.db.lock();

        let mut stmt = db.prepare(
            "SELECT seed, decks, chunks
             FROM seeds
             WHERE seed = ?1",
        )?;

        let res = stmt.query_row(params![seed as i64], seed_entry);

        match res {
            Ok(entry) => Ok(Some(entry)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    /// Returns all seeds in the store.
    pub fn seeds(&self) -> Result<Vec<SeedEntry>> {
        let db = self.db.lock();

        let mut stmt = db.prepare(
            "SELECT seed, decks, chunks
             FROM seeds
             ORDER BY seed",
        )?;

        let entries = stmt
            .query_map((), seed_entry)?
            .collect::<rusqlite::Result<Vec<_>>>()?;

        Ok(entries)
    }

    fn seed_dir(&self, seed: u64) -> PathBuf {
        self.root.join(format!("seed-{seed}"))
    }
}

fn seed_entry(row: &rusqlite::Row<'_>) -> rusqlite::Result<SeedEntry> {
    Ok(SeedEntry {
        seed: row.get::<usize, i64>(0)? as u64,
        decks: row.get::<usize, i64>(1)? as usize,
        chunks: row.get::<usize, i64>(2)? as usize,
    })
}

/// Writes the decks chunks to a new directory, returns the number of chunks.
fn write_chunks(dir: &Path, decks: &[Deck]) -> Result<usize> {
    fs::create_dir_all(dir)?;

    let mut chunks = 0;
    for (idx, chunk) in decks.chunks(MAX_DECKS_PER_CHUNK).enumerate() {
        let path = dir.join(chunk_file_name(idx));
        let mut writer = BufWriter::new(File::create(&path)?);
        bincode::serialize_into(&mut writer, chunk)?;
        writer.flush()?;

        debug!("Wrote {} decks to {}", chunk.len(), path.display());
        chunks += 1;
    }

    Ok(chunks)
}

fn chunk_file_name(idx: usize) -> String {
    format!("chunk-{idx:05}.bin")
}
