use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use chrono_tz::Tz;
use serde::Deserialize;
use thiserror::Error;
use watch_logging::watch_warn;

use pagewatch_engine::{
    default_rules, ExtractionRule, FetchSettings, NotifySettings, TelegramCredentials,
    MIN_CONTENT_CHARS,
};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("could not read config file {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("could not parse config file {path:?}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
    #[error("no urls configured under [watch]")]
    NoUrls,
    #[error("invalid url {url}: {source}")]
    InvalidUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },
    #[error("unknown timezone {0}")]
    UnknownTimezone(String),
}

/// Whole-process configuration, read from one TOML file at startup and
/// passed into the run controller. Credentials deliberately live in the
/// environment, not here.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub watch: WatchSection,
    #[serde(default)]
    pub fetch: FetchSection,
    #[serde(default)]
    pub extract: ExtractSection,
    #[serde(default)]
    pub gate: GateSection,
    #[serde(default)]
    pub state: StateSection,
    #[serde(default)]
    pub notify: NotifySection,
}

/// The ordered list of pages to monitor.
#[derive(Debug, Clone, Deserialize)]
pub struct WatchSection {
    pub urls: Vec<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct FetchSection {
    pub timeout_secs: u64,
    pub connect_timeout_secs: u64,
    pub user_agent: String,
    pub max_bytes: u64,
}

impl Default for FetchSection {
    fn default() -> Self {
        let defaults = FetchSettings::default();
        Self {
            timeout_secs: defaults.request_timeout.as_secs(),
            connect_timeout_secs: defaults.connect_timeout.as_secs(),
            user_agent: defaults.user_agent,
            max_bytes: defaults.max_bytes,
        }
    }
}

/// Site-specific extraction rules, tried before the built-in cascade.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ExtractSection {
    pub rules: Vec<RuleEntry>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RuleEntry {
    pub selector: String,
    #[serde(default = "default_min_chars")]
    pub min_chars: usize,
}

fn default_min_chars() -> usize {
    MIN_CONTENT_CHARS
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct GateSection {
    pub quiet_hours: Vec<u32>,
    pub timezone: String,
}

impl Default for GateSection {
    fn default() -> Self {
        Self {
            quiet_hours: vec![3, 4],
            timezone: "Europe/Rome".to_string(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct StateSection {
    pub path: PathBuf,
}

impl Default for StateSection {
    fn default() -> Self {
        Self {
            path: PathBuf::from("hashes.json"),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct NotifySection {
    pub api_base: String,
    pub timeout_secs: u64,
}

impl Default for NotifySection {
    fn default() -> Self {
        let defaults = NotifySettings::default();
        Self {
            api_base: defaults.api_base,
            timeout_secs: defaults.timeout.as_secs(),
        }
    }
}

impl Config {
    pub fn load(path: &Path) -> Result<Config, ConfigError> {
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config: Config = toml::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.watch.urls.is_empty() {
            return Err(ConfigError::NoUrls);
        }
        for url in &self.watch.urls {
            url::Url::parse(url).map_err(|source| ConfigError::InvalidUrl {
                url: url.clone(),
                source,
            })?;
        }
        self.timezone()?;
        Ok(())
    }

    /// The tz-database zone used for the active-hour gate.
    pub fn timezone(&self) -> Result<Tz, ConfigError> {
        self.gate
            .timezone
            .parse()
            .map_err(|_| ConfigError::UnknownTimezone(self.gate.timezone.clone()))
    }

    pub fn fetch_settings(&self) -> FetchSettings {
        FetchSettings {
            connect_timeout: Duration::from_secs(self.fetch.connect_timeout_secs),
            request_timeout: Duration::from_secs(self.fetch.timeout_secs),
            user_agent: self.fetch.user_agent.clone(),
            max_bytes: self.fetch.max_bytes,
        }
    }

    pub fn notify_settings(&self) -> NotifySettings {
        NotifySettings {
            api_base: self.notify.api_base.clone(),
            timeout: Duration::from_secs(self.notify.timeout_secs),
        }
    }

    /// Site-specific rules first, then the built-in cascade.
    pub fn extraction_rules(&self) -> Vec<ExtractionRule> {
        let mut rules: Vec<ExtractionRule> = self
            .extract
            .rules
            .iter()
            .map(|entry| ExtractionRule::new(entry.selector.clone(), entry.min_chars))
            .collect();
        rules.extend(default_rules());
        rules
    }
}

/// Reads Telegram credentials once at startup, `.env` files included.
///
/// Returns `None` when either variable is absent so delivery degrades to a
/// logged soft-failure; the run itself must still fetch and persist.
pub fn telegram_credentials_from_env() -> Option<TelegramCredentials> {
    let bot_token = env_var("TELEGRAM_BOT_TOKEN")?;
    let chat_id = env_var("TELEGRAM_CHAT_ID")?;
    Some(TelegramCredentials { bot_token, chat_id })
}

fn env_var(name: &str) -> Option<String> {
    match dotenvy::var(name) {
        Ok(value) if !value.is_empty() => Some(value),
        _ => {
            watch_warn!("{name} is not set; notifications will not be sent");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use tempfile::NamedTempFile;

    use super::{Config, ConfigError};

    fn load(toml_content: &str) -> Result<Config, ConfigError> {
        let mut file = NamedTempFile::new().expect("temp config file");
        write!(file, "{toml_content}").expect("write config");
        Config::load(file.path())
    }

    #[test]
    fn full_config_parses() {
        let config = load(
            r##"
            [watch]
            urls = [
                "https://www.example.edu/news",
                "https://courses.example.edu/announcements",
            ]

            [fetch]
            timeout_secs = 10
            user_agent = "pagewatch-test/1.0"

            [extract]
            rules = [{ selector = "#announcements", min_chars = 30 }]

            [gate]
            quiet_hours = [2, 3]
            timezone = "Europe/Rome"

            [state]
            path = "state/hashes.json"

            [notify]
            timeout_secs = 5
            "##,
        )
        .expect("config parses");

        assert_eq!(config.watch.urls.len(), 2);
        assert_eq!(config.fetch.timeout_secs, 10);
        // Unset fetch fields still fall back to defaults.
        assert_eq!(config.fetch.connect_timeout_secs, 10);
        assert_eq!(config.gate.quiet_hours, vec![2, 3]);

        let rules = config.extraction_rules();
        assert_eq!(rules[0].selector, "#announcements");
        assert_eq!(rules[0].min_chars, 30);
        assert!(rules.iter().any(|rule| rule.selector == "article"));
    }

    #[test]
    fn minimal_config_gets_defaults() {
        let config = load(
            r#"
            [watch]
            urls = ["https://www.example.edu/news"]
            "#,
        )
        .expect("config parses");

        assert_eq!(config.fetch.timeout_secs, 20);
        assert_eq!(config.gate.quiet_hours, vec![3, 4]);
        assert_eq!(config.gate.timezone, "Europe/Rome");
        assert_eq!(config.state.path.to_str(), Some("hashes.json"));
        assert_eq!(config.notify.timeout_secs, 15);
        assert!(config.timezone().is_ok());
    }

    #[test]
    fn empty_url_list_is_rejected() {
        let err = load("[watch]\nurls = []\n").unwrap_err();
        assert!(matches!(err, ConfigError::NoUrls), "got {err:?}");
    }

    #[test]
    fn invalid_url_is_rejected() {
        let err = load("[watch]\nurls = [\"not a url\"]\n").unwrap_err();
        assert!(matches!(err, ConfigError::InvalidUrl { .. }), "got {err:?}");
    }

    #[test]
    fn unknown_timezone_is_rejected() {
        let err = load(
            r#"
            [watch]
            urls = ["https://www.example.edu/news"]

            [gate]
            timezone = "Mars/Olympus_Mons"
            "#,
        )
        .unwrap_err();
        assert!(
            matches!(err, ConfigError::UnknownTimezone(_)),
            "got {err:?}"
        );
    }
}
