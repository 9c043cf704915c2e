use serde::Serialize;

use herald_common::config::AppConfig;
use herald_common::error::{HeraldError, Result};

use crate::Notifier;

#[derive(Debug, Serialize)]
struct SendMessage<'a> {
    chat_id: &'a str,
    text: &'a str,
}

/// Sends notifications to one Telegram chat via the Bot API.
pub struct TelegramNotifier {
    api_url: String,
    bot_token: String,
    chat_id: String,
    client: reqwest::Client,
}

impl TelegramNotifier {
    pub fn new(api_url: String, bot_token: String, chat_id: String) -> Self {
        Self {
            api_url: api_url.trim_end_matches('/').to_string(),
            bot_token,
            chat_id,
            client: reqwest::Client::new(),
        }
    }

    pub fn from_config(config: &AppConfig) -> Self {
        Self::new(
            config.telegram_api_url.clone(),
            config.telegram_token.clone(),
            config.telegram_chat_id.clone(),
        )
    }

    pub fn chat_id(&self) -> &str {
        &self.chat_id
    }
}

#[async_trait::async_trait]
impl Notifier for TelegramNotifier {
    async fn send(&self, text: &str) -> Result<()> {
        let url = format!("{}/bot{}/sendMessage", self.api_url, self.bot_token);

        let resp = self
            .client
            .post(&url)
            .json(&SendMessage {
                chat_id: &self.chat_id,
                text,
            })
            .send()
            .await
            .map_err(|e| HeraldError::Delivery(e.without_url().to_string()))?;

        if !resp.status().is_success() {
            let status = resp.status();
            let body = resp.text().await.unwrap_or_else(|_| "unknown".to_string());
            return Err(HeraldError::Delivery(format!(
                "Telegram API error {}: {}",
                status, body
            )));
        }

        tracing::debug!(chat_id = %self.chat_id, "Telegram accepted message");
        Ok(())
    }

    fn name(&self) -> &str {
        "telegram"
    }
}
