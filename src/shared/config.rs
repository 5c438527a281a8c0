//! Application configuration. Credentials, loop tuning, paths.

use serde::{Deserialize, Serialize};

use crate::domain::DomainError;

pub const DEFAULT_BASE_URL: &str = "https://www.tiktok.com";
pub const DEFAULT_AI_API_URL: &str = "https://api.openai.com/v1/chat/completions";
pub const DEFAULT_AI_MODEL: &str = "gpt-4o-mini";

/// Raw settings as read from the environment (`TIKTOK_*`) and the optional
/// file named by `TIKTOK_CONFIG`. Unset keys fall back to the `*_or_default`
/// accessors.
#[derive(Debug, Clone, Deserialize, Default)]
pub struct AppConfig {
    // ─────────────────────────────────────────────────────────────────────────
    // Session
    // ─────────────────────────────────────────────────────────────────────────
    /// Rotating `msToken` cookie. Read from TIKTOK_MS_TOKEN.
    #[serde(default)]
    pub ms_token: Option<String>,

    /// `sessionid` cookie. Read from TIKTOK_SESSION_ID.
    #[serde(default)]
    pub session_id: Option<String>,

    /// `tt_csrf_token` cookie. Read from TIKTOK_CSRF_TOKEN.
    #[serde(default)]
    pub csrf_token: Option<String>,

    #[serde(default)]
    pub user_agent: Option<String>,

    #[serde(default)]
    pub base_url: Option<String>,

    /// Per-request timeout in seconds (default 30). Zero is rejected.
    #[serde(default)]
    pub request_timeout_secs: Option<u64>,

    /// Root for `trending/` and `activity/` output (default ./data).
    #[serde(default)]
    pub data_dir: Option<String>,

    // ─────────────────────────────────────────────────────────────────────────
    // Bot
    // ─────────────────────────────────────────────────────────────────────────
    #[serde(default)]
    pub bot_max_cycles: Option<u32>,
    #[serde(default)]
    pub bot_fetch_batch: Option<u32>,
    #[serde(default)]
    pub bot_process_batch: Option<usize>,
    #[serde(default)]
    pub bot_sleep_min_secs: Option<u64>,
    #[serde(default)]
    pub bot_sleep_max_secs: Option<u64>,
    #[serde(default)]
    pub bot_like_probability: Option<f64>,
    #[serde(default)]
    pub bot_follow_probability: Option<f64>,
    #[serde(default)]
    pub bot_comments_read: Option<u32>,

    // ─────────────────────────────────────────────────────────────────────────
    // Collector
    // ─────────────────────────────────────────────────────────────────────────
    #[serde(default)]
    pub collector_batch_size: Option<u32>,
    #[serde(default)]
    pub collector_interval_secs: Option<u64>,
    /// Unset means run until stopped.
    #[serde(default)]
    pub collector_cycles: Option<u32>,
    #[serde(default)]
    pub collector_skip_exceptions: Option<bool>,

    // ─────────────────────────────────────────────────────────────────────────
    // Decision agent
    // ─────────────────────────────────────────────────────────────────────────
    /// Enables the LLM agent. Read from TIKTOK_AI_API_KEY.
    #[serde(default)]
    pub ai_api_key: Option<String>,
    #[serde(default)]
    pub ai_api_url: Option<String>,
    #[serde(default)]
    pub ai_model: Option<String>,
    /// Free-text persona appended to the agent's system prompt.
    #[serde(default)]
    pub ai_persona: Option<String>,
    /// Use the offline mock decider. Read from TIKTOK_AI_MOCK.
    #[serde(default)]
    pub ai_mock: Option<bool>,
}

impl AppConfig {
    pub fn load() -> Result<Self, config::ConfigError> {
        dotenv::dotenv().ok();
        let file = std::env::var("TIKTOK_CONFIG").ok();
        // Values stay strings until deserialized, so numeric-looking tokens
        // keep their exact spelling.
        Self::from_sources(config::Environment::with_prefix("TIKTOK"), file.as_deref())
    }

    fn from_sources(
        env: config::Environment,
        file: Option<&str>,
    ) -> Result<Self, config::ConfigError> {
        let mut c = config::Config::builder();
        if let Some(path) = file {
            c = c.add_source(config::File::with_name(path));
        }
        // Environment wins over the file.
        c = c.add_source(env);
        c.build()?.try_deserialize()
    }

    /// Names of the session values still missing (empty counts as missing).
    pub fn missing_credentials(&self) -> Vec<&'static str> {
        [
            ("ms_token", &self.ms_token),
            ("session_id", &self.session_id),
            ("csrf_token", &self.csrf_token),
        ]
        .into_iter()
        .filter(|(_, v)| v.as_deref().is_none_or(|s| s.trim().is_empty()))
        .map(|(name, _)| name)
        .collect()
    }

    pub fn credentials(&self) -> Result<Credentials, DomainError> {
        let missing = self.missing_credentials();
        if !missing.is_empty() {
            return Err(DomainError::Config(format!(
                "missing credentials: {} (set TIKTOK_MS_TOKEN, TIKTOK_SESSION_ID, TIKTOK_CSRF_TOKEN)",
                missing.join(", ")
            )));
        }
        Ok(Credentials {
            ms_token: self.ms_token.clone().unwrap_or_default(),
            session_id: self.session_id.clone().unwrap_or_default(),
            csrf_token: self.csrf_token.clone().unwrap_or_default(),
        })
    }

    pub fn user_agent_or_default(&self) -> String {
        self.user_agent
            .clone()
            .unwrap_or_else(|| crate::adapters::tiktok::DEFAULT_USER_AGENT.to_string())
    }

    pub fn base_url_or_default(&self) -> String {
        self.base_url
            .clone()
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string())
    }

    pub fn request_timeout_secs_or_default(&self) -> u64 {
        self.request_timeout_secs.unwrap_or(30)
    }

    pub fn data_dir_or_default(&self) -> String {
        self.data_dir.clone().unwrap_or_else(|| "./data".to_string())
    }

    pub fn bot_config(&self) -> BotConfig {
        let d = BotConfig::default();
        BotConfig {
            max_cycles: self.bot_max_cycles.unwrap_or(d.max_cycles),
            fetch_batch: self.bot_fetch_batch.unwrap_or(d.fetch_batch),
            process_batch: self.bot_process_batch.unwrap_or(d.process_batch),
            sleep_min_secs: self.bot_sleep_min_secs.unwrap_or(d.sleep_min_secs),
            sleep_max_secs: self.bot_sleep_max_secs.unwrap_or(d.sleep_max_secs),
            like_probability: self.bot_like_probability.unwrap_or(d.like_probability),
            follow_probability: self.bot_follow_probability.unwrap_or(d.follow_probability),
            comments_read: self.bot_comments_read.unwrap_or(d.comments_read),
        }
    }

    pub fn collector_config(&self) -> CollectorConfig {
        let d = CollectorConfig::default();
        CollectorConfig {
            batch_size: self.collector_batch_size.unwrap_or(d.batch_size),
            interval_secs: self.collector_interval_secs.unwrap_or(d.interval_secs),
            cycles: self.collector_cycles,
            skip_exceptions: self.collector_skip_exceptions.unwrap_or(d.skip_exceptions),
        }
    }

    // ─────────────────────────────────────────────────────────────────────────
    // AI Configuration Helpers
    // ─────────────────────────────────────────────────────────────────────────

    pub fn ai_api_url_or_default(&self) -> String {
        self.ai_api_url
            .clone()
            .unwrap_or_else(|| DEFAULT_AI_API_URL.to_string())
    }

    pub fn ai_model_or_default(&self) -> String {
        self.ai_model
            .clone()
            .unwrap_or_else(|| DEFAULT_AI_MODEL.to_string())
    }

    /// Returns true if a remote decision agent is configured (API key present).
    pub fn is_ai_configured(&self) -> bool {
        self.ai_api_key.as_deref().is_some_and(|k| !k.is_empty())
    }

    pub fn is_ai_mock(&self) -> bool {
        self.ai_mock.unwrap_or(false)
    }
}

/// Session values every API call carries.
#[derive(Clone)]
pub struct Credentials {
    pub ms_token: String,
    pub session_id: String,
    pub csrf_token: String,
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("Credentials(***)")
    }
}

/// Engagement bot tuning. Serialized into the session activity log.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BotConfig {
    pub max_cycles: u32,
    /// Trending items requested per cycle.
    pub fetch_batch: u32,
    /// Items handed to one decision.
    pub process_batch: usize,
    pub sleep_min_secs: u64,
    pub sleep_max_secs: u64,
    pub like_probability: f64,
    pub follow_probability: f64,
    /// Page size of the comment-load call.
    pub comments_read: u32,
}

impl Default for BotConfig {
    fn default() -> Self {
        Self {
            max_cycles: 22,
            fetch_batch: 1,
            process_batch: 1,
            sleep_min_secs: 10,
            sleep_max_secs: 20,
            like_probability: 0.14,
            follow_probability: 0.015,
            comments_read: 10,
        }
    }
}

impl BotConfig {
    pub fn validate(&self) -> Result<(), DomainError> {
        for (name, p) in [
            ("like_probability", self.like_probability),
            ("follow_probability", self.follow_probability),
        ] {
            if !(0.0..=1.0).contains(&p) {
                return Err(DomainError::Config(format!("{name} must be in [0, 1], got {p}")));
            }
        }
        if self.sleep_min_secs > self.sleep_max_secs {
            return Err(DomainError::Config(format!(
                "sleep range is empty: {} > {}",
                self.sleep_min_secs, self.sleep_max_secs
            )));
        }
        if self.fetch_batch == 0 || self.process_batch == 0 {
            return Err(DomainError::Config("batch sizes must be positive".into()));
        }
        if self.max_cycles == 0 {
            return Err(DomainError::Config("max_cycles must be positive".into()));
        }
        Ok(())
    }
}

/// Trending collector run options.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CollectorConfig {
    pub batch_size: u32,
    pub interval_secs: u64,
    pub cycles: Option<u32>,
    pub skip_exceptions: bool,
}

impl Default for CollectorConfig {
    fn default() -> Self {
        Self {
            batch_size: 1,
            interval_secs: 5,
            cycles: None,
            skip_exceptions: false,
        }
    }
}

impl CollectorConfig {
    pub fn validate(&self) -> Result<(), DomainError> {
        if self.batch_size == 0 {
            return Err(DomainError::Config("collector batch_size must be positive".into()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn from_env(pairs: &[(&str, &str)]) -> AppConfig {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        AppConfig::from_sources(
            config::Environment::with_prefix("TIKTOK").source(Some(map)),
            None,
        )
        .unwrap()
    }

    #[test]
    fn test_defaults_when_unset() {
        let cfg = from_env(&[]);
        assert_eq!(cfg.bot_config(), BotConfig::default());
        assert_eq!(cfg.collector_config(), CollectorConfig::default());
        assert_eq!(cfg.request_timeout_secs_or_default(), 30);
        assert_eq!(cfg.data_dir_or_default(), "./data");
        assert_eq!(cfg.ai_model_or_default(), "gpt-4o-mini");
        assert!(!cfg.is_ai_configured());
        assert_eq!(
            cfg.missing_credentials(),
            vec!["ms_token", "session_id", "csrf_token"]
        );
    }

    #[test]
    fn test_env_values_parsed() {
        let cfg = from_env(&[
            ("TIKTOK_MS_TOKEN", "tok"),
            ("TIKTOK_SESSION_ID", "abc123"),
            ("TIKTOK_CSRF_TOKEN", "csrf"),
            ("TIKTOK_BOT_LIKE_PROBABILITY", "0.5"),
            ("TIKTOK_BOT_MAX_CYCLES", "3"),
            ("TIKTOK_COLLECTOR_CYCLES", "7"),
            ("TIKTOK_COLLECTOR_SKIP_EXCEPTIONS", "true"),
        ]);
        let creds = cfg.credentials().unwrap();
        assert_eq!(creds.session_id, "abc123");
        assert_eq!(cfg.bot_config().like_probability, 0.5);
        assert_eq!(cfg.bot_config().max_cycles, 3);
        assert_eq!(cfg.collector_config().cycles, Some(7));
        assert!(cfg.collector_config().skip_exceptions);
    }

    #[test]
    fn test_numeric_looking_credentials_kept_verbatim() {
        let cfg = from_env(&[
            ("TIKTOK_MS_TOKEN", "true"),
            ("TIKTOK_SESSION_ID", "00123"),
            ("TIKTOK_CSRF_TOKEN", "1"),
        ]);
        let creds = cfg.credentials().unwrap();
        assert_eq!(creds.ms_token, "true");
        assert_eq!(creds.session_id, "00123");
        assert_eq!(creds.csrf_token, "1");
    }

    #[test]
    fn test_blank_credential_is_missing() {
        let cfg = AppConfig {
            ms_token: Some("tok".into()),
            session_id: Some("  ".into()),
            csrf_token: Some("csrf".into()),
            ..Default::default()
        };
        assert_eq!(cfg.missing_credentials(), vec!["session_id"]);
        assert!(matches!(cfg.credentials(), Err(DomainError::Config(_))));
    }

    #[test]
    fn test_bot_config_validation() {
        assert!(BotConfig::default().validate().is_ok());
        let bad_p = BotConfig {
            like_probability: 1.5,
            ..Default::default()
        };
        assert!(bad_p.validate().is_err());
        let bad_sleep = BotConfig {
            sleep_min_secs: 30,
            ..Default::default()
        };
        assert!(bad_sleep.validate().is_err());
        let bad_batch = BotConfig {
            process_batch: 0,
            ..Default::default()
        };
        assert!(bad_batch.validate().is_err());
        assert!(
            CollectorConfig {
                batch_size: 0,
                ..Default::default()
            }
            .validate()
            .is_err()
        );
    }

    #[test]
    fn test_credentials_debug_redacted() {
        let creds = Credentials {
            ms_token: "secret-token".into(),
            session_id: "s".into(),
            csrf_token: "c".into(),
        };
        assert!(!format!("{creds:?}").contains("secret-token"));
    }
}
