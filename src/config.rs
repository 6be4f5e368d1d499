// src/config.rs

use dotenvy::dotenv;
use std::env;

const DEFAULT_PORT: u16 = 5000;

#[derive(Debug, Clone)]
pub struct Config {
    /// When set, sessions and seed data live in Postgres instead of memory.
    pub database_url: Option<String>,
    pub port: u16,
    pub rust_log: String,
    pub log_dir: String,
    pub allowed_origins: Vec<String>,
}

impl Config {
    pub fn from_env() -> Self {
        dotenv().ok();

        let database_url = env::var("DATABASE_URL")
            .ok()
            .filter(|url| !url.trim().is_empty());

        let port = env::var("PORT")
            .ok()
            .and_then(|p| p.parse().ok())
            .unwrap_or(DEFAULT_PORT);

        let rust_log = env::var("RUST_LOG")
            .unwrap_or_else(|_| "info".to_string());

        let log_dir = env::var("LOG_DIR")
            .unwrap_or_else(|_| "logs".to_string());

        let allowed_origins = match env::var("ALLOWED_ORIGINS") {
            Ok(list) => parse_origins(&list),
            Err(_) => vec![
                format!("http://localhost:{}", port),
                format!("http://127.0.0.1:{}", port),
            ],
        };

        Self {
            database_url,
            port,
            rust_log,
            log_dir,
            allowed_origins,
        }
    }
}

fn parse_origins(list: &str) -> Vec<String> {
    list.split(',')
        .map(str::trim)
        .filter(|o| !o.is_empty())
        .map(str::to_string)
        .collect()
}
