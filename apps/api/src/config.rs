use std::path::PathBuf;

use anyhow::{Context, Result};

use crate::matching::relevance::StopWords;

/// Application configuration loaded from environment variables.
/// Every variable has a default; startup fails only on values that do not parse.
#[derive(Debug, Clone)]
pub struct Config {
    pub jobs_path: PathBuf,
    pub courses_path: PathBuf,
    pub stop_words: StopWords,
    pub max_upload_bytes: usize,
    pub port: u16,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            jobs_path: env_or("JOBS_PATH", "vacantes.json").into(),
            courses_path: env_or("COURSES_PATH", "cursos.json").into(),
            stop_words: env_or("TFIDF_STOP_WORDS", "english")
                .parse::<StopWords>()
                .context("TFIDF_STOP_WORDS must be one of: english, spanish, none")?,
            max_upload_bytes: env_or("MAX_UPLOAD_BYTES", "5242880")
                .parse::<usize>()
                .context("MAX_UPLOAD_BYTES must be a byte count")?,
            port: env_or("PORT", "8080")
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: env_or("RUST_LOG", "info"),
        })
    }
}

fn env_or(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

#[cfg(test)]
impl Config {
    /// Configuration used by handler tests; paths are never read.
    pub fn for_tests() -> Self {
        Config {
            jobs_path: PathBuf::from("vacantes.json"),
            courses_path: PathBuf::from("cursos.json"),
            stop_words: StopWords::English,
            max_upload_bytes: 1024 * 1024,
            port: 0,
            rust_log: "debug".to_string(),
        }
    }
}
