use std::time::Duration;

use crate::mcr::PollConfig;

const DEFAULT_PORT: u16 = 8080;
const DEFAULT_MEGAPORT_URL: &str = "https://api-staging.megaport.com";
const DEFAULT_POLL_ATTEMPTS: u32 = 30;
const DEFAULT_POLL_INTERVAL_SECS: u64 = 10;

#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub megaport_url: String,
    pub megaport_token: String,
    pub poll_attempts: u32,
    pub poll_interval_secs: u64,
}

impl Config {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build a config from an arbitrary key lookup; unparsable numbers fall
    /// back to their defaults.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        Self {
            port: lookup("PORT")
                .and_then(|p| p.parse().ok())
                .unwrap_or(DEFAULT_PORT),
            megaport_url: lookup("MEGAPORT_URL")
                .unwrap_or_else(|| DEFAULT_MEGAPORT_URL.to_string()),
            megaport_token: lookup("MEGAPORT_TOKEN").unwrap_or_default(),
            poll_attempts: lookup("MCR_POLL_ATTEMPTS")
                .and_then(|n| n.parse().ok())
                .filter(|n| *n > 0)
                .unwrap_or(DEFAULT_POLL_ATTEMPTS),
            poll_interval_secs: lookup("MCR_POLL_INTERVAL_SECS")
                .and_then(|n| n.parse().ok())
                .unwrap_or(DEFAULT_POLL_INTERVAL_SECS),
        }
    }

    pub fn poll_config(&self) -> PollConfig {
        PollConfig {
            max_attempts: self.poll_attempts,
            interval: Duration::from_secs(self.poll_interval_secs),
        }
    }
}
