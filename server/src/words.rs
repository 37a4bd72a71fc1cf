//! Word dataset loaded once at startup

use crate::error::DatasetError;
use log::info;
use rand::seq::SliceRandom;
use rand::Rng;
use std::fs;
use std::path::Path;

/// One hangman puzzle: the answer and the category shown next to it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WordEntry {
    pub category: String,
    pub answer: String,
}

impl WordEntry {
    pub fn new(category: impl Into<String>, answer: impl Into<String>) -> Self {
        Self {
            category: category.into(),
            answer: answer.into(),
        }
    }
}

/// Immutable, non-empty collection of puzzles
#[derive(Debug)]
pub struct WordDataset {
    entries: Vec<WordEntry>,
}

impl WordDataset {
    /// Returns `None` for an empty collection.
    pub fn new(entries: Vec<WordEntry>) -> Option<Self> {
        if entries.is_empty() {
            None
        } else {
            Some(Self { entries })
        }
    }

    /// Loads comma-separated `answer,category` lines from a file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, DatasetError> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|source| DatasetError::Read {
            path: path.to_path_buf(),
            source,
        })?;

        let entries = Self::parse(&text).map_err(|(line, reason)| DatasetError::Malformed {
            path: path.to_path_buf(),
            line,
            reason,
        })?;
        let dataset = Self::new(entries).ok_or_else(|| DatasetError::Empty(path.to_path_buf()))?;

        info!("Loaded {} words from {}", dataset.len(), path.display());
        Ok(dataset)
    }

    /// Parses file contents; errors carry the 1-based line number.
    pub fn parse(text: &str) -> Result<Vec<WordEntry>, (usize, &'static str)> {
        let mut entries = Vec::new();

        for (number, line) in text.lines().enumerate() {
            let line = line.trim();
            if line.is_empty() {
                continue;
            }

            let (answer, category) = line
                .split_once(',')
                .ok_or((number + 1, "expected `answer,category`"))?;
            let (answer, category) = (answer.trim(), category.trim());
            if answer.is_empty() || category.is_empty() {
                return Err((number + 1, "empty answer or category"));
            }

            entries.push(WordEntry::new(category, answer));
        }

        Ok(entries)
    }

    /// Picks one entry uniformly at random
    pub fn choose<R: Rng + ?Sized>(&self, rng: &mut R) -> &WordEntry {
        // `new` guarantees at least one entry
        self.entries
            .choose(rng)
            .unwrap_or(&self.entries[0])
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
