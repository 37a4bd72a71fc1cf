//! User credentials loaded once at startup

use crate::error::DatasetError;
use log::info;
use std::collections::HashMap;
use std::fs;
use std::path::Path;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Credential {
    pub username: String,
    pub password: String,
}

/// Read-only username → password table
#[derive(Debug, Default)]
pub struct CredentialStore {
    users: HashMap<String, Credential>,
}

impl CredentialStore {
    pub fn new(credentials: impl IntoIterator<Item = Credential>) -> Self {
        Self {
            users: credentials
                .into_iter()
                .map(|c| (c.username.clone(), c))
                .collect(),
        }
    }

    /// Loads whitespace-separated `username password` pairs from a file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, DatasetError> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|source| DatasetError::Read {
            path: path.to_path_buf(),
            source,
        })?;

        let store = Self::parse(&text).map_err(|(line, reason)| DatasetError::Malformed {
            path: path.to_path_buf(),
            line,
            reason,
        })?;
        if store.is_empty() {
            return Err(DatasetError::Empty(path.to_path_buf()));
        }

        info!("Loaded {} credentials from {}", store.len(), path.display());
        Ok(store)
    }

    /// Parses file contents; errors carry the 1-based line number.
    ///
    /// A leading `Username Password` header line is skipped.
    pub fn parse(text: &str) -> Result<Self, (usize, &'static str)> {
        let mut credentials = Vec::new();

        for (number, line) in text.lines().enumerate() {
            let mut fields = line.split_whitespace();
            let (username, password) = match (fields.next(), fields.next()) {
                (None, _) => continue,
                (Some(_), None) => return Err((number + 1, "expected `username password`")),
                (Some(u), Some(p)) => (u, p),
            };

            if credentials.is_empty()
                && username.eq_ignore_ascii_case("username")
                && password.eq_ignore_ascii_case("password")
            {
                continue;
            }

            credentials.push(Credential {
                username: username.to_string(),
                password: password.to_string(),
            });
        }

        Ok(Self::new(credentials))
    }

    /// Returns the matching credential only if the password is correct.
    pub fn authenticate(&self, username: &str, password: &str) -> Option<&Credential> {
        self.users
            .get(username)
            .filter(|credential| credential.password == password)
    }

    pub fn len(&self) -> usize {
        self.users.len()
    }

    pub fn is_empty(&self) -> bool {
        self.users.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const FILE: &str = "Username    Password\n\
                        Maolin      111111\n\
                        Jason       222222\n\
                        \n\
                        Mike        333333\n";

    #[test]
    fn test_parse_skips_header_and_blank_lines() {
        let store = CredentialStore::parse(FILE).unwrap();
        assert_eq!(store.len(), 3);
        assert!(store.authenticate("Username", "Password").is_none());
    }

    #[test]
    fn test_authenticate() {
        let store = CredentialStore::parse(FILE).unwrap();

        let credential = store.authenticate("Jason", "222222").unwrap();
        assert_eq!(credential.username, "Jason");

        assert!(store.authenticate("Jason", "111111").is_none());
        assert!(store.authenticate("jason", "222222").is_none());
        assert!(store.authenticate("nobody", "222222").is_none());
    }

    #[test]
    fn test_parse_rejects_missing_password() {
        let err = CredentialStore::parse("alice pw\nbob\n").unwrap_err();
        assert_eq!(err.0, 2);
    }

    #[test]
    fn test_load_missing_file() {
        let result = CredentialStore::load("/definitely/not/here.txt");
        assert!(matches!(result, Err(DatasetError::Read { .. })));
    }

    #[test]
    fn test_load_from_disk() {
        let path = std::env::temp_dir().join(format!("hangman-creds-{}.txt", std::process::id()));
        fs::write(&path, FILE).unwrap();

        let store = CredentialStore::load(&path).unwrap();
        fs::remove_file(&path).unwrap();

        assert_eq!(store.len(), 3);
    }
}
