//! Wire protocol shared by the hangman server and client.
//!
//! Every message is a single newline-terminated line of text. Multi-field
//! messages join their fields with [`DELIMITER`].

use std::collections::HashSet;
use thiserror::Error;

pub const DELIMITER: char = '&';

/// Longest accepted line, newline included
pub const MAX_LINE_LEN: u64 = 512;

pub const CONNECTED: &str = "connected";
pub const AUTH_SUCCESS: &str = "success";
pub const AUTH_FAILED: &str = "failed";

pub const GAME_START: &str = "hm-start";
pub const GAME_WIN: &str = "hm-win";
pub const GAME_LOSS: &str = "hm-loss";
pub const PHRASE_REQUEST: &str = "phrase";

pub const LEADERBOARD_START: &str = "lb-start";
pub const LEADERBOARD_END: &str = "lb-end";

pub const QUIT: &str = "quit";

/// Character shown for letters that have not been guessed yet
pub const PLACEHOLDER: char = '_';
/// Separates the category from the answer on the masked board
pub const WORD_SEPARATOR: char = ' ';

pub const BASE_GUESSES: usize = 10;
pub const MAX_GUESSES: usize = 26;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ProtocolError {
    #[error("missing field `{0}` in message")]
    MissingField(&'static str),
    #[error("invalid number in field `{field}`: {value:?}")]
    InvalidNumber { field: &'static str, value: String },
}

/// Commands a client may send once it is authenticated
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    StartGame,
    Leaderboard,
    Quit,
    Unknown,
}

impl Command {
    pub fn parse(line: &str) -> Self {
        match line {
            GAME_START => Command::StartGame,
            LEADERBOARD_START => Command::Leaderboard,
            "" | QUIT => Command::Quit,
            _ => Command::Unknown,
        }
    }
}

/// `username&password`
pub fn encode_credentials(username: &str, password: &str) -> String {
    format!("{}{}{}", username, DELIMITER, password)
}

/// Splits at the first delimiter so passwords may contain `&`.
pub fn parse_credentials(line: &str) -> Result<(&str, &str), ProtocolError> {
    line.split_once(DELIMITER)
        .ok_or(ProtocolError::MissingField("password"))
}

/// Snapshot of an in-progress game as sent after every guess
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameState {
    pub remaining_guesses: usize,
    pub board: String,
}

impl GameState {
    pub fn encode(&self) -> String {
        format!("{}{}{}", self.remaining_guesses, DELIMITER, self.board)
    }

    pub fn parse(line: &str) -> Result<Self, ProtocolError> {
        let (guesses, board) = line
            .split_once(DELIMITER)
            .ok_or(ProtocolError::MissingField("board"))?;
        let remaining_guesses = guesses.parse().map_err(|_| ProtocolError::InvalidNumber {
            field: "remaining_guesses",
            value: guesses.to_string(),
        })?;

        Ok(Self {
            remaining_guesses,
            board: board.to_string(),
        })
    }
}

/// One streamed leaderboard line
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LeaderboardRow {
    pub username: String,
    pub games_played: u32,
    pub games_won: u32,
}

impl LeaderboardRow {
    pub fn encode(&self) -> String {
        format!(
            "{}{d}{}{d}{}",
            self.username,
            self.games_played,
            self.games_won,
            d = DELIMITER
        )
    }

    pub fn parse(line: &str) -> Result<Self, ProtocolError> {
        let mut fields = line.rsplitn(3, DELIMITER);
        let won = fields.next().ok_or(ProtocolError::MissingField("games_won"))?;
        let played = fields
            .next()
            .ok_or(ProtocolError::MissingField("games_played"))?;
        let username = fields.next().ok_or(ProtocolError::MissingField("username"))?;

        Ok(Self {
            username: username.to_string(),
            games_played: parse_count("games_played", played)?,
            games_won: parse_count("games_won", won)?,
        })
    }
}

fn parse_count(field: &'static str, value: &str) -> Result<u32, ProtocolError> {
    value.parse().map_err(|_| ProtocolError::InvalidNumber {
        field,
        value: value.to_string(),
    })
}

/// Guess budget for a game: `min(len(category) + len(answer) + 10, 26)`.
pub fn guess_budget(category: &str, answer: &str) -> usize {
    (category.chars().count() + answer.chars().count() + BASE_GUESSES).min(MAX_GUESSES)
}

/// Renders the masked board for a set of guessed letters.
///
/// The server updates its board incrementally; this is the reference
/// derivation that any sequence of guesses must agree with.
pub fn render_board(category: &str, answer: &str, guessed: &HashSet<char>) -> String {
    let mask = |c: char| if guessed.contains(&c) { c } else { PLACEHOLDER };

    category
        .chars()
        .map(mask)
        .chain(std::iter::once(WORD_SEPARATOR))
        .chain(answer.chars().map(mask))
        .collect()
}

/// `<category> <answer>`, sent after a win
pub fn phrase(category: &str, answer: &str) -> String {
    format!("{}{}{}", category, WORD_SEPARATOR, answer)
}
