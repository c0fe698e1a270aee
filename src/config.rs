//! Configuration and CLI argument handling

use std::path::PathBuf;

use clap::Parser;

/// CLI argument parsing structure
#[derive(Parser, Debug)]
#[command(name = "event-countdown")]
#[command(about = "A shared countdown timer served over HTTP for live event displays")]
#[command(version)]
pub struct Config {
    /// Port to bind the server to
    #[arg(short, long, default_value = "5009")]
    pub port: u16,

    /// Host address to bind to
    #[arg(long, default_value = "0.0.0.0")]
    pub host: String,

    /// File holding the persisted timer record
    #[arg(short, long, env = "COUNTDOWN_STATE_FILE", default_value = "timer_state.json")]
    pub state_file: PathBuf,

    /// Shared secret required in the X-API-Key header of mutating requests
    #[arg(long, env = "COUNTDOWN_API_KEY", hide_env_values = true)]
    pub api_key: String,

    /// Keep the timer in memory only (state is lost on exit)
    #[arg(long)]
    pub in_memory: bool,

    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,
}

impl Config {
    /// Parse configuration from command line arguments
    pub fn parse() -> Self {
        Parser::parse()
    }

    /// Get the server address as a formatted string
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Get the appropriate log level based on verbose flag
    pub fn log_level(&self) -> &'static str {
        if self.verbose { "debug" } else { "info" }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::try_parse_from(["event-countdown", "--api-key", "k"]).unwrap();
        assert_eq!(config.port, 5009);
        assert_eq!(config.address(), "0.0.0.0:5009");
        assert_eq!(config.state_file, PathBuf::from("timer_state.json"));
        assert!(!config.in_memory);
        assert_eq!(config.log_level(), "info");
    }

    #[test]
    fn test_overrides() {
        let config = Config::try_parse_from([
            "event-countdown",
            "--api-key",
            "k",
            "-p",
            "8080",
            "--host",
            "127.0.0.1",
            "-s",
            "/var/lib/countdown/state.json",
            "--in-memory",
            "-v",
        ])
        .unwrap();
        assert_eq!(config.address(), "127.0.0.1:8080");
        assert_eq!(config.state_file, PathBuf::from("/var/lib/countdown/state.json"));
        assert!(config.in_memory);
        assert_eq!(config.log_level(), "debug");
    }
}
