use std::{env::var, fmt, time::Duration};

use anyhow::{Context, Result, bail};
use chrono_tz::Tz;
use completion::DEFAULT_COMPLETION_API;
use stock::DEFAULT_QUOTE_API;

const DEFAULT_TIMEZONE: Tz = chrono_tz::Asia::Taipei;
const DEFAULT_HTTP_TIMEOUT_SECS: u64 = 30;

#[derive(Clone)]
pub struct Config {
    pub bot_token: String,
    pub authorized_identity: Option<String>,
    pub ai_api_key: Option<String>,
    pub ai_api_url: String,
    pub quote_api_url: String,
    pub http_timeout: Duration,
    pub timezone: Tz,
    pub version: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| var(key).ok())
    }

    /// Build from any key lookup. Each setting also accepts the older
    /// `TELEGRAM_*` / `NEBULA_*` name; empty values count as unset.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let get = |keys: &[&str]| {
            keys.iter()
                .filter_map(|key| lookup(*key))
                .map(|v| v.trim().to_string())
                .find(|v| !v.is_empty())
        };

        let Some(bot_token) = get(&["BOT_TOKEN", "TELEGRAM_BOT_TOKEN"]) else {
            bail!("BOT_TOKEN not set");
        };

        let http_timeout = match get(&["HTTP_TIMEOUT_SECS"]) {
            Some(raw) => Duration::from_secs(
                raw.parse()
                    .with_context(|| format!("HTTP_TIMEOUT_SECS is not a number: {raw}"))?,
            ),
            None => Duration::from_secs(DEFAULT_HTTP_TIMEOUT_SECS),
        };

        let timezone = match get(&["BOT_TIMEZONE"]) {
            Some(raw) => raw
                .parse::<Tz>()
                .map_err(|e| anyhow::anyhow!("BOT_TIMEZONE is invalid: {e}"))?,
            None => DEFAULT_TIMEZONE,
        };

        Ok(Self {
            bot_token,
            authorized_identity: get(&["AUTHORIZED_IDENTITY", "TELEGRAM_CHAT_ID"]),
            ai_api_key: get(&["AI_API_KEY", "NEBULA_API_KEY"]),
            ai_api_url: get(&["AI_API_URL", "NEBULA_API_URL"])
                .unwrap_or_else(|| DEFAULT_COMPLETION_API.to_string()),
            quote_api_url: get(&["QUOTE_API_URL"]).unwrap_or_else(|| DEFAULT_QUOTE_API.to_string()),
            http_timeout,
            timezone,
            version: get(&["APP_VERSION"]).unwrap_or_else(|| "Unknown".to_string()),
        })
    }

    /// Token prefix safe for logs.
    pub fn masked_token(&self) -> String {
        let prefix: String = self.bot_token.chars().take(8).collect();
        format!("{prefix}...")
    }
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("bot_token", &self.masked_token())
            .field("authorized_identity", &self.authorized_identity)
            .field("ai_api_key", &self.ai_api_key.as_ref().map(|_| "<set>"))
            .field("ai_api_url", &self.ai_api_url)
            .field("quote_api_url", &self.quote_api_url)
            .field("http_timeout", &self.http_timeout)
            .field("timezone", &self.timezone)
            .field("version", &self.version)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn load(pairs: &[(&str, &str)]) -> Result<Config> {
        let env: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|key| env.get(key).cloned())
    }

    #[test]
    fn missing_token_is_an_error() {
        let err = load(&[("AUTHORIZED_IDENTITY", "42")]).unwrap_err();
        assert!(err.to_string().contains("BOT_TOKEN"));
    }

    #[test]
    fn blank_token_counts_as_missing() {
        assert!(load(&[("BOT_TOKEN", "  ")]).is_err());
    }

    #[test]
    fn defaults_apply() {
        let config = load(&[("BOT_TOKEN", "123:abc")]).unwrap();

        assert_eq!(config.authorized_identity, None);
        assert_eq!(config.ai_api_key, None);
        assert_eq!(config.ai_api_url, DEFAULT_COMPLETION_API);
        assert_eq!(config.quote_api_url, DEFAULT_QUOTE_API);
        assert_eq!(config.http_timeout, Duration::from_secs(30));
        assert_eq!(config.timezone, chrono_tz::Asia::Taipei);
        assert_eq!(config.version, "Unknown");
    }

    #[test]
    fn legacy_names_are_accepted() {
        let config = load(&[
            ("TELEGRAM_BOT_TOKEN", "123:abc"),
            ("TELEGRAM_CHAT_ID", "42"),
            ("NEBULA_API_KEY", "k"),
            ("NEBULA_API_URL", "http://localhost:9000"),
        ])
        .unwrap();

        assert_eq!(config.bot_token, "123:abc");
        assert_eq!(config.authorized_identity.as_deref(), Some("42"));
        assert_eq!(config.ai_api_key.as_deref(), Some("k"));
        assert_eq!(config.ai_api_url, "http://localhost:9000");
    }

    #[test]
    fn primary_names_win_over_legacy() {
        let config = load(&[
            ("BOT_TOKEN", "new"),
            ("TELEGRAM_BOT_TOKEN", "old"),
            ("AUTHORIZED_IDENTITY", "1"),
            ("TELEGRAM_CHAT_ID", "2"),
        ])
        .unwrap();

        assert_eq!(config.bot_token, "new");
        assert_eq!(config.authorized_identity.as_deref(), Some("1"));
    }

    #[test]
    fn bad_timeout_and_timezone_are_rejected() {
        assert!(load(&[("BOT_TOKEN", "t"), ("HTTP_TIMEOUT_SECS", "soon")]).is_err());
        assert!(load(&[("BOT_TOKEN", "t"), ("BOT_TIMEZONE", "Mars/Base")]).is_err());

        let config = load(&[("BOT_TOKEN", "t"), ("BOT_TIMEZONE", "America/New_York")]).unwrap();
        assert_eq!(config.timezone, chrono_tz::America::New_York);
    }

    #[test]
    fn masked_token_hides_secret() {
        let config = load(&[("BOT_TOKEN", "1234567890:SECRET")]).unwrap();
        assert_eq!(config.masked_token(), "12345678...");
    }
}
