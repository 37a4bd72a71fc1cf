//! Server startup settings

use std::path::PathBuf;

pub const DEFAULT_PORT: u16 = 12345;
pub const DEFAULT_WORKERS: usize = 10;
pub const DEFAULT_WORDS_FILE: &str = "hangman_text.txt";
pub const DEFAULT_CREDENTIALS_FILE: &str = "Authentication.txt";

/// Settings fixed at startup
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Size of the worker pool; never changes while running
    pub workers: usize,
    pub words_path: PathBuf,
    pub credentials_path: PathBuf,
}

impl ServerConfig {
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: DEFAULT_PORT,
            workers: DEFAULT_WORKERS,
            words_path: PathBuf::from(DEFAULT_WORDS_FILE),
            credentials_path: PathBuf::from(DEFAULT_CREDENTIALS_FILE),
        }
    }
}
