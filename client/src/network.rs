use log::debug;
use shared::{GameState, LeaderboardRow, ProtocolError, MAX_LINE_LEN};
use std::io;
use thiserror::Error;
use tokio::io::{AsyncBufReadExt, AsyncRead, AsyncReadExt, AsyncWrite, AsyncWriteExt, BufReader};
use tokio::net::{TcpStream, ToSocketAddrs};

#[derive(Debug, Error)]
pub enum ClientError {
    #[error(transparent)]
    Io(#[from] io::Error),
    #[error("server closed the connection")]
    Closed,
    #[error(transparent)]
    Protocol(#[from] ProtocolError),
    #[error("unexpected reply from server: {0:?}")]
    Unexpected(String),
}

/// Server reply to a single guess
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GuessReply {
    Continue(GameState),
    Won,
    Lost,
}

/// Protocol client for the hangman server
pub struct Client<S> {
    stream: BufReader<S>,
    // server is reading guesses rather than commands
    in_game: bool,
}

impl Client<TcpStream> {
    pub async fn connect(addr: impl ToSocketAddrs) -> Result<Self, ClientError> {
        let stream = TcpStream::connect(addr).await?;
        stream.set_nodelay(true)?;
        Ok(Self::new(stream))
    }
}

impl<S> Client<S>
where
    S: AsyncRead + AsyncWrite + Unpin,
{
    pub fn new(stream: S) -> Self {
        Self {
            stream: BufReader::new(stream),
            in_game: false,
        }
    }

    async fn send(&mut self, message: &str) -> Result<(), ClientError> {
        let stream = self.stream.get_mut();
        stream.write_all(format!("{}\n", message).as_bytes()).await?;
        stream.flush().await?;
        Ok(())
    }

    async fn recv(&mut self) -> Result<String, ClientError> {
        let mut line = String::new();
        let read = (&mut self.stream)
            .take(MAX_LINE_LEN)
            .read_line(&mut line)
            .await?;
        if read == 0 {
            return Err(ClientError::Closed);
        }
        if !line.ends_with('\n') {
            if read as u64 == MAX_LINE_LEN {
                return Err(io::Error::new(io::ErrorKind::InvalidData, "reply too long").into());
            }
            return Err(ClientError::Closed);
        }
        let line = line.trim_end_matches(['\r', '\n']).to_string();
        debug!("<- {}", line);
        Ok(line)
    }

    async fn expect(&mut self, token: &str) -> Result<(), ClientError> {
        match self.recv().await? {
            reply if reply == token => Ok(()),
            reply => Err(ClientError::Unexpected(reply)),
        }
    }

    /// Waits until a server worker picks the connection up
    pub async fn wait_until_served(&mut self) -> Result<(), ClientError> {
        self.expect(shared::CONNECTED).await
    }

    /// Returns whether the server accepted the credentials
    ///
    /// The server closes the connection after a rejection.
    pub async fn login(&mut self, username: &str, password: &str) -> Result<bool, ClientError> {
        self.send(&shared::encode_credentials(username, password))
            .await?;
        match self.recv().await?.as_str() {
            shared::AUTH_SUCCESS => Ok(true),
            shared::AUTH_FAILED => Ok(false),
            other => Err(ClientError::Unexpected(other.to_string())),
        }
    }

    pub async fn start_game(&mut self) -> Result<GameState, ClientError> {
        self.send(shared::GAME_START).await?;
        let state = GameState::parse(&self.recv().await?)?;
        self.in_game = true;
        Ok(state)
    }

    pub async fn guess(&mut self, letter: char) -> Result<GuessReply, ClientError> {
        self.send(&letter.to_string()).await?;
        let reply = self.recv().await?;
        let reply = match reply.as_str() {
            shared::GAME_WIN => GuessReply::Won,
            shared::GAME_LOSS => GuessReply::Lost,
            _ => return Ok(GuessReply::Continue(GameState::parse(&reply)?)),
        };
        self.in_game = false;
        Ok(reply)
    }

    /// Asks for the solved phrase; only valid right after a win
    pub async fn phrase(&mut self) -> Result<String, ClientError> {
        self.send(shared::PHRASE_REQUEST).await?;
        self.recv().await
    }

    pub async fn leaderboard(&mut self) -> Result<Vec<LeaderboardRow>, ClientError> {
        self.send(shared::LEADERBOARD_START).await?;

        let mut rows = Vec::new();
        loop {
            let line = self.recv().await?;
            if line == shared::LEADERBOARD_END {
                return Ok(rows);
            }
            rows.push(LeaderboardRow::parse(&line)?);
        }
    }

    /// Leaves the server
    ///
    /// Mid-game the server would take `quit` as a guess, so an empty line
    /// is sent instead and the unfinished game is not scored.
    pub async fn quit(mut self) -> Result<(), ClientError> {
        let farewell = if self.in_game { "" } else { shared::QUIT };
        self.send(farewell).await?;
        self.stream.get_mut().shutdown().await?;
        Ok(())
    }
}
