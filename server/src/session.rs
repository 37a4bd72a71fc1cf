//! Per-connection protocol state machine
//!
//! A session walks one client through:
//! - Acknowledging the connection and checking its credentials
//! - Serving `hm-start` (a full hangman game) and `lb-start` (leaderboard
//!   listing) commands in any order
//! - Ending on a quit command, end of stream, or any transport error
//!
//! Nothing in a session is shared with other workers except the leaderboard,
//! which is only touched through its own synchronized operations.

use crate::connection::Connection;
use crate::context::ServerContext;
use crate::error::SessionError;
use crate::game::{GameSession, GuessOutcome};
use crate::leaderboard::CreateOutcome;
use log::{debug, info, warn};
use shared::{Command, LeaderboardRow};
use std::sync::Arc;
use tokio::io::{AsyncRead, AsyncWrite};

/// Where a session is in the protocol
#[derive(Debug)]
pub enum SessionState {
    Connected,
    Authenticating,
    Authenticated { username: String },
    PlayingGame(Box<GameSession>),
    BrowsingLeaderboard { username: String },
    Disconnected,
}

/// Runs the protocol for one client connection
pub struct Session<S> {
    id: u64,
    conn: Connection<S>,
    context: Arc<ServerContext>,
}

impl<S> Session<S>
where
    S: AsyncRead + AsyncWrite + Unpin,
{
    pub fn new(id: u64, stream: S, context: Arc<ServerContext>) -> Self {
        Self {
            id,
            conn: Connection::new(stream),
            context,
        }
    }

    /// Drives the session until the client leaves or the transport fails
    pub async fn run(mut self) -> Result<(), SessionError> {
        let mut state = SessionState::Connected;

        loop {
            state = match state {
                SessionState::Connected => {
                    self.conn.send(shared::CONNECTED).await?;
                    SessionState::Authenticating
                }
                SessionState::Authenticating => SessionState::Authenticated {
                    username: self.authenticate().await?,
                },
                SessionState::Authenticated { username } => self.next_command(username).await?,
                SessionState::PlayingGame(game) => self.play_turn(game).await?,
                SessionState::BrowsingLeaderboard { username } => {
                    self.send_leaderboard().await?;
                    SessionState::Authenticated { username }
                }
                SessionState::Disconnected => return Ok(()),
            };
        }
    }

    /// Reads `username&password` and checks it against the credential store
    async fn authenticate(&mut self) -> Result<String, SessionError> {
        let line = self.conn.recv().await?;
        let (username, password) =
            shared::parse_credentials(&line).unwrap_or((line.as_str(), ""));

        if self.context.credentials.authenticate(username, password).is_none() {
            self.conn.send(shared::AUTH_FAILED).await?;
            return Err(SessionError::AuthenticationFailed {
                username: username.to_string(),
            });
        }

        if self.context.leaderboard.create(username) == CreateOutcome::Created {
            debug!("[#{}] first login for {}", self.id, username);
        }
        self.conn.send(shared::AUTH_SUCCESS).await?;
        info!("[#{}] {} authenticated", self.id, username);

        Ok(username.to_string())
    }

    async fn next_command(&mut self, username: String) -> Result<SessionState, SessionError> {
        let line = self.conn.recv().await?;

        Ok(match Command::parse(&line) {
            Command::StartGame => self.start_game(username).await?,
            Command::Leaderboard => SessionState::BrowsingLeaderboard { username },
            Command::Quit => {
                info!("[#{}] {} quit", self.id, username);
                SessionState::Disconnected
            }
            Command::Unknown => {
                debug!("[#{}] ignoring unknown command {:?}", self.id, line);
                SessionState::Authenticated { username }
            }
        })
    }

    async fn start_game(&mut self, username: String) -> Result<SessionState, SessionError> {
        let game = GameSession::new(&username, self.context.words.choose(&mut rand::thread_rng()));
        debug!("[#{}] {} started a game", self.id, username);

        self.conn.send(&game.state().encode()).await?;
        Ok(SessionState::PlayingGame(Box::new(game)))
    }

    /// Handles a single guess and reports the result
    async fn play_turn(&mut self, mut game: Box<GameSession>) -> Result<SessionState, SessionError> {
        let line = self.conn.recv().await?;
        let letter = match line.chars().next() {
            Some(letter) => letter,
            None => {
                info!("[#{}] {} left mid-game", self.id, game.username);
                return Ok(SessionState::Disconnected);
            }
        };

        match game.guess(letter) {
            GuessOutcome::InProgress => {
                self.conn.send(&game.state().encode()).await?;
                Ok(SessionState::PlayingGame(game))
            }
            GuessOutcome::Won => {
                self.conn.send(shared::GAME_WIN).await?;
                if let Err(e) = self.context.leaderboard.record_win(&game.username) {
                    warn!("[#{}] {}", self.id, e);
                }
                info!("[#{}] {} won", self.id, game.username);

                let follow_up = self.conn.recv().await?;
                if Command::parse(&follow_up) == Command::Quit {
                    return Ok(SessionState::Disconnected);
                }
                self.conn.send(&game.phrase()).await?;
                Ok(SessionState::Authenticated {
                    username: game.username,
                })
            }
            GuessOutcome::Lost => {
                self.conn.send(shared::GAME_LOSS).await?;
                if let Err(e) = self.context.leaderboard.record_loss(&game.username) {
                    warn!("[#{}] {}", self.id, e);
                }
                info!("[#{}] {} lost", self.id, game.username);
                Ok(SessionState::Authenticated {
                    username: game.username,
                })
            }
        }
    }

    async fn send_leaderboard(&mut self) -> Result<(), SessionError> {
        for record in self.context.leaderboard.snapshot() {
            let row = LeaderboardRow {
                username: record.username,
                games_played: record.games_played,
                games_won: record.games_won,
            };
            self.conn.send(&row.encode()).await?;
        }
        self.conn.send(shared::LEADERBOARD_END).await
    }
}
