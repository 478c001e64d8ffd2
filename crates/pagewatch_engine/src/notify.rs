use std::time::Duration;

use serde::Serialize;
use thiserror::Error;
use watch_logging::watch_error;

/// Default base of the Telegram Bot API; tests point this at a mock server.
pub const TELEGRAM_API_BASE: &str = "https://api.telegram.org";

/// Bot token and chat id, both required before any delivery is attempted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TelegramCredentials {
    pub bot_token: String,
    pub chat_id: String,
}

#[derive(Debug, Clone)]
pub struct NotifySettings {
    pub api_base: String,
    pub timeout: Duration,
}

impl Default for NotifySettings {
    fn default() -> Self {
        Self {
            api_base: TELEGRAM_API_BASE.to_string(),
            timeout: Duration::from_secs(15),
        }
    }
}

#[derive(Debug, Error)]
pub enum NotifyError {
    #[error("TELEGRAM_BOT_TOKEN or TELEGRAM_CHAT_ID is missing")]
    MissingCredentials,
    #[error("telegram api returned status {0}")]
    HttpStatus(u16),
    #[error("transport error: {0}")]
    Transport(String),
}

#[derive(Serialize)]
struct SendMessageForm<'a> {
    chat_id: &'a str,
    text: &'a str,
    parse_mode: &'a str,
}

/// Sends the aggregated change message through the Telegram Bot API.
///
/// Credentials are optional on purpose: a run without them still goes
/// through the whole pipeline and persists state; it just cannot deliver.
pub struct TelegramNotifier {
    credentials: Option<TelegramCredentials>,
    settings: NotifySettings,
}

impl TelegramNotifier {
    pub fn new(credentials: Option<TelegramCredentials>, settings: NotifySettings) -> Self {
        Self {
            credentials,
            settings,
        }
    }

    /// Delivery is a soft operation: every failure is logged and folded
    /// into `false` so the caller always reaches the persist step.
    pub async fn deliver(&self, text: &str) -> bool {
        match self.send(text).await {
            Ok(()) => true,
            Err(err) => {
                watch_error!("Telegram delivery failed: {err}");
                false
            }
        }
    }

    async fn send(&self, text: &str) -> Result<(), NotifyError> {
        let credentials = self
            .credentials
            .as_ref()
            .ok_or(NotifyError::MissingCredentials)?;

        let client = reqwest::Client::builder()
            .timeout(self.settings.timeout)
            .build()
            .map_err(|err| NotifyError::Transport(err.to_string()))?;

        let endpoint = format!(
            "{}/bot{}/sendMessage",
            self.settings.api_base, credentials.bot_token
        );
        let form = SendMessageForm {
            chat_id: &credentials.chat_id,
            text,
            parse_mode: "HTML",
        };

        let response = client
            .post(&endpoint)
            .form(&form)
            .send()
            .await
            .map_err(|err| NotifyError::Transport(err.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(NotifyError::HttpStatus(status.as_u16()));
        }
        Ok(())
    }
}
