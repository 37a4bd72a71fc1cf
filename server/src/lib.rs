//! # Hangman Server Library
//!
//! This library implements the server side of the online hangman game. It
//! authenticates players, runs guessing games against a shared word list and
//! keeps a leaderboard that every connected player can browse.
//!
//! ## Architecture Design
//!
//! ### Acceptor → Queue → Worker Pool
//! A single acceptor task accepts TCP connections and appends them to an
//! unbounded FIFO request queue. A fixed number of worker tasks drain the
//! queue; each worker runs one client session to completion before taking
//! the next connection. When every worker is busy, new connections wait in
//! the queue in arrival order.
//!
//! ### Session State Machine
//! Every connection follows the same protocol:
//! `Connected → Authenticating → Authenticated → {PlayingGame |
//! BrowsingLeaderboard} → Authenticated → … → Disconnected`.
//! Game state lives entirely inside the worker that owns the connection.
//!
//! ### Shared State
//! Credentials and words are loaded once and never change. The leaderboard is
//! the only mutable state shared across workers, and every access goes
//! through one exclusive lock so concurrent results are never lost.
//!
//! ### Shutdown
//! Acceptor and workers watch one cancellation token. Cancelling it closes
//! the listener and drops any sessions still in progress without notifying
//! their clients.
//!
//! ## Module Organization
//!
//! - `network`: [`Server`], which binds the socket and wires the rest together
//! - `acceptor`: accept loop feeding the queue
//! - `queue`: monitor-style FIFO of pending connections
//! - `pool`: fixed-size worker pool
//! - `session`: per-connection protocol state machine
//! - `game`: hangman rules for a single game
//! - `leaderboard`: synchronized per-user statistics
//! - `credentials`, `words`: startup datasets
//! - `connection`: newline-framed transport
//!
//! ## Usage Example
//!
//! ```rust,no_run
//! use server::{Server, ServerConfig, ServerContext};
//! use tokio_util::sync::CancellationToken;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = ServerConfig::default();
//!     let context = ServerContext::load(&config)?;
//!     let server = Server::bind(&config, context).await?;
//!
//!     let cancel = CancellationToken::new();
//!     server.run(cancel).await;
//!     Ok(())
//! }
//! ```

pub mod acceptor;
pub mod config;
pub mod connection;
pub mod context;
pub mod credentials;
pub mod error;
pub mod game;
pub mod leaderboard;
pub mod network;
pub mod pool;
pub mod queue;
pub mod session;
pub mod words;

pub use config::ServerConfig;
pub use context::ServerContext;
pub use error::{ServerError, SessionError};
pub use network::Server;
