//! Hangman rules for a single game
//!
//! Pure state: the session feeds guesses in and sends back whatever
//! [`GameSession::state`] reports.

use crate::words::WordEntry;
use shared::{guess_budget, GameState, PLACEHOLDER, WORD_SEPARATOR};
use std::collections::HashSet;

/// Where a game stands after a guess
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GuessOutcome {
    InProgress,
    Won,
    Lost,
}

/// One hangman game, owned by the worker running the connection
#[derive(Debug, Clone)]
pub struct GameSession {
    pub username: String,
    category: String,
    answer: String,
    board: Vec<char>,
    guessed: HashSet<char>,
    remaining_guesses: usize,
    letters_left: usize,
}

impl GameSession {
    pub fn new(username: &str, entry: &WordEntry) -> Self {
        let board: Vec<char> = entry
            .category
            .chars()
            .map(|_| PLACEHOLDER)
            .chain(std::iter::once(WORD_SEPARATOR))
            .chain(entry.answer.chars().map(|_| PLACEHOLDER))
            .collect();

        Self {
            username: username.to_string(),
            category: entry.category.clone(),
            answer: entry.answer.clone(),
            letters_left: board.len() - 1,
            board,
            guessed: HashSet::new(),
            remaining_guesses: guess_budget(&entry.category, &entry.answer),
        }
    }

    /// Applies one guess. Every guess costs an attempt, repeated ones included.
    ///
    /// Calling this after the game has finished is a no-op that returns the
    /// final outcome again.
    pub fn guess(&mut self, letter: char) -> GuessOutcome {
        if self.outcome() != GuessOutcome::InProgress {
            return self.outcome();
        }

        if self.guessed.insert(letter) {
            let category_len = self.category.chars().count();
            let positions = self
                .category
                .chars()
                .enumerate()
                .chain(
                    self.answer
                        .chars()
                        .enumerate()
                        .map(|(i, c)| (i + category_len + 1, c)),
                )
                .filter(|&(_, c)| c == letter)
                .map(|(i, _)| i);

            for i in positions {
                self.board[i] = letter;
                self.letters_left -= 1;
            }
        }
        self.remaining_guesses -= 1;

        self.outcome()
    }

    /// A fully revealed board wins even when the last attempt was just spent.
    pub fn outcome(&self) -> GuessOutcome {
        if self.letters_left == 0 {
            GuessOutcome::Won
        } else if self.remaining_guesses == 0 {
            GuessOutcome::Lost
        } else {
            GuessOutcome::InProgress
        }
    }

    pub fn state(&self) -> GameState {
        GameState {
            remaining_guesses: self.remaining_guesses,
            board: self.board(),
        }
    }

    pub fn board(&self) -> String {
        self.board.iter().collect()
    }

    pub fn remaining_guesses(&self) -> usize {
        self.remaining_guesses
    }

    pub fn guessed(&self) -> &HashSet<char> {
        &self.guessed
    }

    pub fn phrase(&self) -> String {
        shared::phrase(&self.category, &self.answer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::render_board;

    fn cat_game() -> GameSession {
        GameSession::new("alice", &WordEntry::new("animal", "cat"))
    }

    #[test]
    fn test_new_game() {
        let game = cat_game();

        assert_eq!(game.remaining_guesses(), 19);
        assert_eq!(game.board(), "______ ___");
        assert_eq!(game.state().encode(), "19&______ ___");
        assert_eq!(game.outcome(), GuessOutcome::InProgress);
    }

    #[test]
    fn test_guess_reveals_both_words() {
        let mut game = cat_game();

        assert_eq!(game.guess('a'), GuessOutcome::InProgress);
        assert_eq!(game.board(), "a___a_ _a_");
        assert_eq!(game.remaining_guesses(), 18);
    }

    #[test]
    fn test_repeated_and_wrong_guesses_cost_an_attempt() {
        let mut game = cat_game();

        game.guess('a');
        let board = game.board();
        game.guess('a');
        game.guess('z');

        assert_eq!(game.board(), board);
        assert_eq!(game.remaining_guesses(), 16);
    }

    #[test]
    fn test_win() {
        let mut game = cat_game();

        for letter in ['a', 'n', 'i', 'm', 'l', 'c'] {
            assert_eq!(game.guess(letter), GuessOutcome::InProgress);
        }
        assert_eq!(game.guess('t'), GuessOutcome::Won);
        assert_eq!(game.board(), "animal cat");
        assert_eq!(game.remaining_guesses(), 12);
        assert_eq!(game.phrase(), "animal cat");
    }

    #[test]
    fn test_loss_after_budget_exhausted() {
        let mut game = GameSession::new("bob", &WordEntry::new("ab", "cd"));
        assert_eq!(game.remaining_guesses(), 14);

        let mut outcome = GuessOutcome::InProgress;
        let mut previous = game.remaining_guesses();
        while outcome == GuessOutcome::InProgress {
            outcome = game.guess('z');
            assert_eq!(game.remaining_guesses(), previous - 1);
            previous = game.remaining_guesses();
        }

        assert_eq!(outcome, GuessOutcome::Lost);
        assert_eq!(game.remaining_guesses(), 0);
        assert_eq!(game.guess('a'), GuessOutcome::Lost);
        assert_eq!(game.remaining_guesses(), 0);
    }

    #[test]
    fn test_win_on_last_attempt() {
        // budget is capped at 26, so 26 distinct letters exactly fit
        let word: String = ('a'..='m').collect();
        let other: String = ('n'..='z').collect();
        let mut game = GameSession::new("carol", &WordEntry::new(word, other));
        assert_eq!(game.remaining_guesses(), 26);

        for letter in 'a'..'z' {
            assert_eq!(game.guess(letter), GuessOutcome::InProgress);
        }
        assert_eq!(game.guess('z'), GuessOutcome::Won);
        assert_eq!(game.remaining_guesses(), 0);
    }

    #[test]
    fn test_board_matches_reference_rendering() {
        let entry = WordEntry::new("fruit", "banana");
        let mut game = GameSession::new("dave", &entry);

        for letter in ['n', 'x', 'a', 'n', 'u', 'b'] {
            game.guess(letter);
            assert_eq!(
                game.board(),
                render_board(&entry.category, &entry.answer, game.guessed())
            );
        }
    }
}
