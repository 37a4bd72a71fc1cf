//! # Hangman Client Library
//!
//! Client side of the online hangman game.
//!
//! ## Module Organization
//!
//! ### Network Module (`network`)
//! A typed wrapper around the server's line protocol: connection
//! acknowledgement, login, game turns, the solved phrase and the leaderboard
//! listing. Generic over the byte stream so it can be driven over TCP or an
//! in-memory pipe.
//!
//! ### Menu Module (`menu`)
//! The interactive console: login prompt, main menu, guess loop and the
//! ranked leaderboard table.

pub mod menu;
pub mod network;

pub use network::{Client, ClientError, GuessReply};
