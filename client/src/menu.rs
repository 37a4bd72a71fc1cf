//! Interactive console front end

use crate::network::{Client, ClientError, GuessReply};
use shared::{GameState, LeaderboardRow};
use std::collections::BTreeSet;
use std::io::Write;
use tokio::io::{AsyncBufReadExt, AsyncRead, AsyncWrite, BufReader, Lines, Stdin};

const RULE: &str = "-------------------------------------------------------------------------------------";

/// Reads user input line by line from stdin
pub struct Console {
    lines: Lines<BufReader<Stdin>>,
}

impl Console {
    pub fn new() -> Self {
        Self {
            lines: BufReader::new(tokio::io::stdin()).lines(),
        }
    }

    /// Prints a prompt and reads one trimmed line; `None` on end of input
    pub async fn prompt(&mut self, text: &str) -> Result<Option<String>, ClientError> {
        print!("{}", text);
        std::io::stdout().flush()?;
        Ok(self
            .lines
            .next_line()
            .await?
            .map(|line| line.trim().to_string()))
    }
}

impl Default for Console {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuChoice {
    Play,
    Leaderboard,
    Quit,
}

impl MenuChoice {
    pub fn parse(input: &str) -> Option<Self> {
        match input {
            "1" => Some(MenuChoice::Play),
            "2" => Some(MenuChoice::Leaderboard),
            "3" => Some(MenuChoice::Quit),
            _ => None,
        }
    }
}

/// Runs the main menu until the user quits or input ends
pub async fn run<S>(client: &mut Client<S>, console: &mut Console) -> Result<(), ClientError>
where
    S: AsyncRead + AsyncWrite + Unpin,
{
    loop {
        println!("\nPlease enter a selection:\n");
        println!("<1> Play Hangman");
        println!("<2> Show Leaderboard");
        println!("<3> Quit\n");

        let input = match console.prompt("Enter an option (1-3): ").await? {
            Some(input) => input,
            None => return Ok(()),
        };

        match MenuChoice::parse(&input) {
            Some(MenuChoice::Play) => {
                if !play(client, console).await? {
                    return Ok(());
                }
            }
            Some(MenuChoice::Leaderboard) => {
                print!("{}", format_leaderboard(&client.leaderboard().await?));
            }
            Some(MenuChoice::Quit) => return Ok(()),
            None => println!("Unknown option {:?}", input),
        }
    }
}

/// Plays one game; returns false if the user wants to leave afterwards
async fn play<S>(client: &mut Client<S>, console: &mut Console) -> Result<bool, ClientError>
where
    S: AsyncRead + AsyncWrite + Unpin,
{
    println!("{}\n                                  Let's play!\n", RULE);

    let mut state = client.start_game().await?;
    let mut guessed = BTreeSet::new();

    let won = loop {
        println!("{}", RULE);
        print_state(&state, &guessed);

        let input = console.prompt("Please enter a guess (a-z): ").await?;
        let letter = match input.as_deref().and_then(|s| s.chars().next()) {
            Some(letter) => letter,
            None if input.is_none() => return Ok(false),
            None => continue,
        };
        guessed.insert(letter);

        match client.guess(letter).await? {
            GuessReply::Continue(next) => state = next,
            GuessReply::Won => break true,
            GuessReply::Lost => break false,
        }
    };

    println!("{}\n", RULE);
    if won {
        println!("Word: {}\n", client.phrase().await?);
        println!("Congratulations! You won!\n");
    } else {
        println!("Oh no! You lost!\n");
    }

    let answer = console
        .prompt("Would you like to return to the menu? (y/n): ")
        .await?;
    Ok(!matches!(answer.as_deref(), Some("n") | None))
}

fn print_state(state: &GameState, guessed: &BTreeSet<char>) {
    let guessed: String = guessed.iter().collect();
    println!(
        "Guesses: {}\n\nNumber of guesses left: {}\n\nWord: {}\n",
        guessed, state.remaining_guesses, state.board
    );
}

/// Renders leaderboard rows as a ranked table
pub fn format_leaderboard(rows: &[LeaderboardRow]) -> String {
    let rule = "---------------------------------------------\n";
    let mut out = String::from("\nLeaderboard:\n");
    out.push_str(rule);
    out.push_str(&format!(
        "| {:<5}| {:<20}| {:<6}| {:<5}|\n",
        "Rank", "Name", "Plays", "Wins"
    ));
    out.push_str(rule);
    for (rank, row) in rows.iter().enumerate() {
        out.push_str(&format!(
            "| {:<5}| {:<20}| {:<6}| {:<5}|\n",
            rank + 1,
            row.username,
            row.games_played,
            row.games_won
        ));
    }
    out.push_str(rule);
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_menu_choice() {
        assert_eq!(MenuChoice::parse("1"), Some(MenuChoice::Play));
        assert_eq!(MenuChoice::parse("2"), Some(MenuChoice::Leaderboard));
        assert_eq!(MenuChoice::parse("3"), Some(MenuChoice::Quit));
        assert_eq!(MenuChoice::parse("4"), None);
    }

    #[test]
    fn test_format_leaderboard() {
        let rows = vec![
            LeaderboardRow {
                username: "alice".to_string(),
                games_played: 3,
                games_won: 2,
            },
            LeaderboardRow {
                username: "bob".to_string(),
                games_played: 1,
                games_won: 0,
            },
        ];

        let table = format_leaderboard(&rows);
        let lines: Vec<&str> = table.lines().collect();

        assert_eq!(lines[3], "| Rank | Name                | Plays | Wins |");
        assert_eq!(lines[5], "| 1    | alice               | 3     | 2    |");
        assert_eq!(lines[6], "| 2    | bob                 | 1     | 0    |");
    }
}
