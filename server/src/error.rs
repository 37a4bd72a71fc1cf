//! Error types for the hangman server

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Failures that abort server startup
#[derive(Debug, Error)]
pub enum ServerError {
    #[error("failed to bind {addr}: {source}")]
    Bind {
        addr: String,
        #[source]
        source: io::Error,
    },
    #[error(transparent)]
    Dataset(#[from] DatasetError),
}

/// Failures while loading the credential or word files
#[derive(Debug, Error)]
pub enum DatasetError {
    #[error("failed to read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("{}:{line}: {reason}", path.display())]
    Malformed {
        path: PathBuf,
        line: usize,
        reason: &'static str,
    },
    #[error("{} contains no entries", .0.display())]
    Empty(PathBuf),
}

/// Reasons a session ended before the client quit
///
/// None of these affect other sessions or the worker pool.
#[derive(Debug, Error)]
pub enum SessionError {
    #[error("transport failure: {0}")]
    Transport(#[from] io::Error),
    #[error("connection closed by peer")]
    ConnectionClosed,
    #[error("authentication failed for {username:?}")]
    AuthenticationFailed { username: String },
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum LeaderboardError {
    #[error("no leaderboard record for {0:?}")]
    UnknownUser(String),
}
