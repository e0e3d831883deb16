use std::path::PathBuf;

use anyhow::{Context, Result};

pub const DEFAULT_SOURCE_PATH: &str = "public/resume.pdf";
pub const DEFAULT_CACHE_PATH: &str = "data/extracted-cv-data.json";
pub const DEFAULT_MAIL_FROM: &str = "onboarding@resend.dev";

/// Application configuration loaded from environment variables.
/// Every variable has a default except `RESEND_API_KEY`; without it the
/// email endpoint reports a failure instead of sending.
#[derive(Debug, Clone)]
pub struct Config {
    pub cv_source_path: PathBuf,
    pub cv_cache_path: PathBuf,
    pub resend_api_key: Option<String>,
    pub mail_from: String,
    pub port: u16,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            cv_source_path: env_or("CV_SOURCE_PATH", DEFAULT_SOURCE_PATH).into(),
            cv_cache_path: env_or("CV_CACHE_PATH", DEFAULT_CACHE_PATH).into(),
            resend_api_key: optional_env("RESEND_API_KEY"),
            mail_from: env_or("MAIL_FROM", DEFAULT_MAIL_FROM),
            port: parse_port(std::env::var("PORT").ok())?,
            rust_log: env_or("RUST_LOG", "info"),
        })
    }
}

fn env_or(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

fn optional_env(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.trim().is_empty())
}

fn parse_port(raw: Option<String>) -> Result<u16> {
    raw.unwrap_or_else(|| "8080".to_string())
        .parse::<u16>()
        .context("PORT must be a valid port number")
}
