//! Cross-session leaderboard shared by every worker
//!
//! This module holds the only long-lived mutable state in the server:
//! - One record per authenticated user, created on first login
//! - Win/loss counters updated at the end of each game
//! - Insertion-ordered snapshots for the browse command
//!
//! Every operation, reads included, takes the same exclusive lock. The
//! critical sections are a hash lookup and an increment, so contention stays
//! low even with every worker reporting results at once.

use crate::error::LeaderboardError;
use log::debug;
use parking_lot::Mutex;
use std::collections::HashMap;

/// Per-user play statistics
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LeaderboardRecord {
    /// Unique key across the store
    pub username: String,
    /// Games finished, won or lost
    pub games_played: u32,
    /// Games won; never exceeds `games_played`
    pub games_won: u32,
}

impl LeaderboardRecord {
    fn new(username: &str) -> Self {
        Self {
            username: username.to_string(),
            games_played: 0,
            games_won: 0,
        }
    }
}

/// Result of [`Leaderboard::create`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CreateOutcome {
    Created,
    AlreadyExists,
}

#[derive(Debug, Default)]
struct Table {
    /// Records in insertion order
    records: Vec<LeaderboardRecord>,
    /// Username to position in `records`
    index: HashMap<String, usize>,
}

impl Table {
    fn get_mut(&mut self, username: &str) -> Result<&mut LeaderboardRecord, LeaderboardError> {
        match self.index.get(username) {
            Some(&slot) => Ok(&mut self.records[slot]),
            None => Err(LeaderboardError::UnknownUser(username.to_string())),
        }
    }
}

/// Thread-safe leaderboard store
///
/// Shared between workers through the server context. Records are never
/// deleted, so positions in the insertion-ordered table stay valid for the
/// lifetime of the store.
#[derive(Debug, Default)]
pub struct Leaderboard {
    table: Mutex<Table>,
}

impl Leaderboard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a zeroed record unless one already exists
    ///
    /// The check and insert happen under one lock acquisition, so exactly one
    /// of several concurrent callers for the same username sees `Created`.
    pub fn create(&self, username: &str) -> CreateOutcome {
        let mut table = self.table.lock();
        if table.index.contains_key(username) {
            return CreateOutcome::AlreadyExists;
        }

        let slot = table.records.len();
        table.records.push(LeaderboardRecord::new(username));
        table.index.insert(username.to_string(), slot);
        debug!("Leaderboard record created for {}", username);

        CreateOutcome::Created
    }

    /// Counts a won game: both counters go up by one
    pub fn record_win(&self, username: &str) -> Result<(), LeaderboardError> {
        let mut table = self.table.lock();
        let record = table.get_mut(username)?;
        record.games_played += 1;
        record.games_won += 1;
        Ok(())
    }

    /// Counts a lost game: only `games_played` goes up
    pub fn record_loss(&self, username: &str) -> Result<(), LeaderboardError> {
        let mut table = self.table.lock();
        table.get_mut(username)?.games_played += 1;
        Ok(())
    }

    /// Copies every record in insertion order
    pub fn snapshot(&self) -> Vec<LeaderboardRecord> {
        self.table.lock().records.clone()
    }

    pub fn get(&self, username: &str) -> Option<LeaderboardRecord> {
        let table = self.table.lock();
        table
            .index
            .get(username)
            .map(|&slot| table.records[slot].clone())
    }

    pub fn len(&self) -> usize {
        self.table.lock().records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
