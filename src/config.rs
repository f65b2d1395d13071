//! Environment-backed configuration.
//!
//! The two upstream URLs are read per request, not once at startup, so a
//! missing setting fails that invocation with an explicit 500 instead of
//! taking the whole process down.

use std::env;

use crate::error::ConfigError;

/// Default league selector when `LEAGUE_ID` is not set.
pub const DEFAULT_LEAGUE_ID: u32 = 1;

#[derive(Debug, Clone)]
pub struct Config {
    /// Upstream odds API base URL; the league id is appended to it.
    pub api_base_url: String,
    /// Fetch relay endpoint; the target URL is passed as its `url` query
    /// parameter.
    pub relay_url: String,
    /// Which league's odds to request upstream.
    pub league_id: u32,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Ok(Self {
            api_base_url: require("ODDS_API_BASE_URL")?,
            relay_url: require("FETCH_RELAY_URL")?,
            league_id: env::var("LEAGUE_ID")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(DEFAULT_LEAGUE_ID),
        })
    }
}

/// Port for the HTTP listener; independent of the per-request settings.
pub fn listen_port() -> u16 {
    env::var("PORT")
        .unwrap_or_else(|_| "8080".to_string())
        .parse()
        .unwrap_or(8080)
}

fn require(name: &'static str) -> Result<String, ConfigError> {
    match env::var(name) {
        Ok(v) if !v.trim().is_empty() => Ok(v),
        Ok(_) => Err(ConfigError::Empty(name)),
        Err(_) => Err(ConfigError::Missing(name)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // Env-var tests mutate process state; keep them in one place and restore
    // after each assertion so parallel test binaries stay isolated.
    #[test]
    fn missing_settings_are_reported_by_name() {
        env::remove_var("ODDS_API_BASE_URL");
        env::remove_var("FETCH_RELAY_URL");

        let err = Config::from_env().unwrap_err();
        assert_eq!(
            err.to_string(),
            "required setting ODDS_API_BASE_URL is not set"
        );

        env::set_var("ODDS_API_BASE_URL", "http://api.example/odds?league=");
        let err = Config::from_env().unwrap_err();
        assert_eq!(err.to_string(), "required setting FETCH_RELAY_URL is not set");

        env::set_var("FETCH_RELAY_URL", "  ");
        let err = Config::from_env().unwrap_err();
        assert_eq!(
            err.to_string(),
            "required setting FETCH_RELAY_URL is set but empty"
        );

        env::set_var("FETCH_RELAY_URL", "http://relay.example/fetch");
        let config = Config::from_env().unwrap();
        assert_eq!(config.league_id, DEFAULT_LEAGUE_ID);

        env::remove_var("ODDS_API_BASE_URL");
        env::remove_var("FETCH_RELAY_URL");
    }
}
