use crate::config::ServerConfig;
use crate::credentials::CredentialStore;
use crate::error::ServerError;
use crate::leaderboard::Leaderboard;
use crate::words::WordDataset;

/// Process-wide state shared by every worker
///
/// Built once at startup and handed out behind an `Arc`. Credentials and
/// words are read-only; the leaderboard synchronizes itself.
#[derive(Debug)]
pub struct ServerContext {
    pub credentials: CredentialStore,
    pub words: WordDataset,
    pub leaderboard: Leaderboard,
}

impl ServerContext {
    pub fn new(credentials: CredentialStore, words: WordDataset) -> Self {
        Self {
            credentials,
            words,
            leaderboard: Leaderboard::new(),
        }
    }

    /// Loads both datasets named in the configuration
    pub fn load(config: &ServerConfig) -> Result<Self, ServerError> {
        let credentials = CredentialStore::load(&config.credentials_path)?;
        let words = WordDataset::load(&config.words_path)?;
        Ok(Self::new(credentials, words))
    }
}
