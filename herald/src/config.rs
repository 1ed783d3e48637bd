//! Environment-sourced configuration.
//!
//! All settings come from the process environment (after an optional `.env`
//! load in `main`). Anything missing or unparseable fails startup.

use std::time::Duration;

use crate::error::{Error, Result};

/// Default poll period in seconds.
pub const DEFAULT_CHECK_INTERVAL_SECS: u64 = 3600;

/// Runtime configuration, read once at startup.
#[derive(Debug, Clone)]
pub struct Config {
    /// Discord bot token.
    pub discord_token: String,
    /// YouTube Data API key.
    pub youtube_api_key: String,
    /// Tracked YouTube channel id.
    pub youtube_channel_id: String,
    /// Guild the bot serves.
    pub guild_id: u64,
    /// Channel live announcements are posted to.
    pub announce_channel_id: u64,
    /// Role mentioned in live announcements.
    pub mention_role_id: u64,
    /// Period between live checks.
    pub check_interval: Duration,
}

impl Config {
    /// Read configuration from the process environment.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let required = |key: &str| -> Result<String> {
            lookup(key)
                .filter(|value| !value.trim().is_empty())
                .ok_or_else(|| Error::config(format!("missing required environment variable {key}")))
        };

        let check_interval = match lookup("CHECK_INTERVAL") {
            Some(raw) => parse_interval(&raw)?,
            None => Duration::from_secs(DEFAULT_CHECK_INTERVAL_SECS),
        };

        Ok(Self {
            discord_token: required("DISCORD_TOKEN")?,
            youtube_api_key: required("YOUTUBE_API_KEY")?,
            youtube_channel_id: required("YOUTUBE_CHANNEL_ID")?,
            guild_id: parse_id("GUILD_ID", &required("GUILD_ID")?)?,
            announce_channel_id: parse_id("ANNOUNCE_CHANNEL_ID", &required("ANNOUNCE_CHANNEL_ID")?)?,
            mention_role_id: parse_id("MENTION_ROLE_ID", &required("MENTION_ROLE_ID")?)?,
            check_interval,
        })
    }
}

fn parse_id(key: &str, value: &str) -> Result<u64> {
    value
        .trim()
        .parse()
        .map_err(|_| Error::config(format!("{key} must be a numeric id, got {value:?}")))
}

fn parse_interval(raw: &str) -> Result<Duration> {
    let secs: u64 = raw
        .trim()
        .parse()
        .map_err(|_| Error::config(format!("CHECK_INTERVAL must be a number of seconds, got {raw:?}")))?;
    if secs == 0 {
        return Err(Error::config("CHECK_INTERVAL must be positive"));
    }
    Ok(Duration::from_secs(secs))
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::collections::HashMap;

    fn base_vars() -> HashMap<&'static str, &'static str> {
        HashMap::from([
            ("DISCORD_TOKEN", "token"),
            ("YOUTUBE_API_KEY", "key"),
            ("YOUTUBE_CHANNEL_ID", "UC1opHUrw8rvnsadT-iGp7Cg"),
            ("GUILD_ID", "1275721677782913035"),
            ("ANNOUNCE_CHANNEL_ID", "1275721677782913036"),
            ("MENTION_ROLE_ID", "1275982267898138657"),
        ])
    }

    fn from_vars(vars: &HashMap<&str, &str>) -> Result<Config> {
        Config::from_lookup(|key| vars.get(key).map(|v| v.to_string()))
    }

    #[test]
    fn test_full_config_parses() {
        let mut vars = base_vars();
        vars.insert("CHECK_INTERVAL", "600");
        let config = from_vars(&vars).unwrap();
        assert_eq!(config.guild_id, 1275721677782913035);
        assert_eq!(config.mention_role_id, 1275982267898138657);
        assert_eq!(config.check_interval, Duration::from_secs(600));
    }

    #[test]
    fn test_interval_defaults_to_an_hour() {
        let config = from_vars(&base_vars()).unwrap();
        assert_eq!(
            config.check_interval,
            Duration::from_secs(DEFAULT_CHECK_INTERVAL_SECS)
        );
    }

    #[test]
    fn test_missing_token_is_rejected() {
        let mut vars = base_vars();
        vars.remove("DISCORD_TOKEN");
        let err = from_vars(&vars).unwrap_err();
        assert!(err.to_string().contains("DISCORD_TOKEN"));
    }

    #[test]
    fn test_blank_value_counts_as_missing() {
        let mut vars = base_vars();
        vars.insert("YOUTUBE_API_KEY", "  ");
        assert!(from_vars(&vars).is_err());
    }

    #[test]
    fn test_non_numeric_id_is_rejected() {
        let mut vars = base_vars();
        vars.insert("GUILD_ID", "not-a-number");
        let err = from_vars(&vars).unwrap_err();
        assert!(err.to_string().contains("GUILD_ID"));
    }

    #[test]
    fn test_zero_interval_is_rejected() {
        let mut vars = base_vars();
        vars.insert("CHECK_INTERVAL", "0");
        assert!(from_vars(&vars).is_err());
    }
}
