//! Command-line and environment configuration.

use std::time::Duration;

use clap::Parser;
use url::Url;

use crate::domain::notation::GesturePolicy;
use crate::ui::assets::DEFAULT_ASSET_BASE;

pub const DEFAULT_AUTHORITY: &str = "http://localhost:8080/";
pub const DEFAULT_TIMEOUT_MS: u64 = 10_000;
pub const DEFAULT_LOG_FILTER: &str = "chess_relay=info";

#[derive(Parser, Debug, Clone)]
#[command(name = "chess-relay", version, about = "Two-player chess client for a remote rules authority")]
pub struct Config {
    /// Base URL of the rules authority
    #[arg(long, env = "CHESS_RELAY_AUTHORITY", default_value = DEFAULT_AUTHORITY)]
    pub authority: Url,

    /// Per-request timeout in milliseconds
    #[arg(long, env = "CHESS_RELAY_TIMEOUT_MS", default_value_t = DEFAULT_TIMEOUT_MS)]
    pub timeout_ms: u64,

    /// Session payload received from the other player (query string or message URL)
    #[arg(long)]
    pub resume: Option<String>,

    /// Directory (or URL prefix) of the piece images referenced by rendered boards
    #[arg(long, default_value = DEFAULT_ASSET_BASE)]
    pub assets: String,

    /// Submit diagonal pawn moves onto empty squares instead of refusing them
    #[arg(long)]
    pub no_pawn_veto: bool,

    /// Log filter, e.g. `chess_relay=debug`
    #[arg(long, env = "CHESS_RELAY_LOG", default_value = DEFAULT_LOG_FILTER)]
    pub log: String,
}

impl Config {
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }

    pub fn gesture_policy(&self) -> GesturePolicy {
        GesturePolicy {
            pawn_veto: !self.no_pawn_veto,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::try_parse_from(["chess-relay"]).unwrap();
        assert_eq!(config.timeout(), Duration::from_secs(10));
        assert_eq!(config.assets, DEFAULT_ASSET_BASE);
        assert!(config.resume.is_none());
        assert!(config.gesture_policy().pawn_veto);
    }

    #[test]
    fn test_flags() {
        let config = Config::try_parse_from([
            "chess-relay",
            "--authority",
            "http://chess.test:9000/api/",
            "--timeout-ms",
            "250",
            "--resume",
            "board=x&color=0",
            "--no-pawn-veto",
        ])
        .unwrap();
        assert_eq!(config.authority.as_str(), "http://chess.test:9000/api/");
        assert_eq!(config.timeout(), Duration::from_millis(250));
        assert_eq!(config.resume.as_deref(), Some("board=x&color=0"));
        assert!(!config.gesture_policy().pawn_veto);
    }

    #[test]
    fn test_bad_authority_url() {
        assert!(Config::try_parse_from(["chess-relay", "--authority", "not a url"]).is_err());
    }
}
