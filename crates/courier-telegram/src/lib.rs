// SPDX-FileCopyrightText: 2026 Courier Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Telegram messenger for the Courier relay.
//!
//! Implements [`Messenger`] over the Telegram Bot API via teloxide. The bot
//! token and destination chat are bound at construction; every send uses
//! `ParseMode::MarkdownV2`, so callers pass text escaped with
//! [`markdown::escape_markdown_v2`].

pub mod markdown;

use std::time::Duration;

use async_trait::async_trait;
use courier_config::model::TelegramConfig;
use courier_core::error::CourierError;
use courier_core::redact::redact;
use courier_core::traits::{Messenger, PluginAdapter};
use courier_core::types::{AdapterType, DeliveryReceipt, HealthStatus};
use secrecy::{ExposeSecret, SecretString};
use teloxide::prelude::*;
use teloxide::types::{ChatId, InputFile, ParseMode, Recipient};
use tracing::{debug, warn};

/// Sends notifications to a single Telegram chat.
pub struct TelegramMessenger {
    bot: Bot,
    chat: Recipient,
    token: SecretString,
}

impl TelegramMessenger {
    /// Builds a messenger from config.
    ///
    /// Fails with [`CourierError::Config`] when the token or chat id is
    /// missing, or when `api_url` does not parse.
    pub fn new(config: &TelegramConfig) -> Result<Self, CourierError> {
        let token = non_empty(config.bot_token.as_deref()).ok_or_else(|| {
            CourierError::Config("telegram.bot_token is required".into())
        })?;
        let chat_id = non_empty(config.chat_id.as_deref())
            .ok_or_else(|| CourierError::Config("telegram.chat_id is required".into()))?;

        let client = teloxide::net::default_reqwest_settings()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| CourierError::Config(format!("failed to build Telegram client: {e}")))?;

        let mut bot = Bot::with_client(token, client);
        if let Some(raw) = non_empty(config.api_url.as_deref()) {
            let url = url::Url::parse(raw).map_err(|e| {
                CourierError::Config(format!("telegram.api_url `{raw}` is invalid: {e}"))
            })?;
            bot = bot.set_api_url(url);
        }

        Ok(Self {
            bot,
            chat: parse_recipient(chat_id),
            token: SecretString::from(token.to_string()),
        })
    }

    /// Converts a teloxide failure into a delivery error with the token scrubbed.
    fn delivery_error(&self, action: &str, err: teloxide::RequestError) -> CourierError {
        let message = redact(&err.to_string(), &[self.token.expose_secret()]);
        warn!(action, error = %message, "Telegram request failed");
        CourierError::Delivery {
            message,
            source: None,
        }
    }
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

/// Numeric ids address users, groups and channels; `@name` addresses a
/// public channel.
fn parse_recipient(chat_id: &str) -> Recipient {
    match chat_id.parse::<i64>() {
        Ok(id) => Recipient::Id(ChatId(id)),
        Err(_) => Recipient::ChannelUsername(chat_id.to_string()),
    }
}

#[async_trait]
impl PluginAdapter for TelegramMessenger {
    fn name(&self) -> &str {
        "telegram"
    }

    fn version(&self) -> semver::Version {
        semver::Version::new(0, 1, 0)
    }

    fn adapter_type(&self) -> AdapterType {
        AdapterType::Messenger
    }

    async fn health_check(&self) -> Result<HealthStatus, CourierError> {
        match self.bot.get_me().await {
            Ok(me) => {
                debug!(bot_id = me.user.id.0, "Telegram getMe succeeded");
                Ok(HealthStatus::Healthy)
            }
            Err(e) => Ok(HealthStatus::Unhealthy(format!(
                "Telegram bot unreachable: {}",
                redact(&e.to_string(), &[self.token.expose_secret()])
            ))),
        }
    }
}

#[async_trait]
impl Messenger for TelegramMessenger {
    async fn send_text(&self, text: &str) -> Result<DeliveryReceipt, CourierError> {
        let msg = self
            .bot
            .send_message(self.chat.clone(), text)
            .parse_mode(ParseMode::MarkdownV2)
            .await
            .map_err(|e| self.delivery_error("sendMessage", e))?;

        debug!(message_id = msg.id.0, "Telegram text delivered");
        Ok(DeliveryReceipt {
            message_id: Some(msg.id.0.to_string()),
        })
    }

    async fn send_photo(
        &self,
        photo: Vec<u8>,
        caption: &str,
    ) -> Result<DeliveryReceipt, CourierError> {
        let size = photo.len();
        let mut request = self
            .bot
            .send_photo(self.chat.clone(), InputFile::memory(photo).file_name("photo.jpg"));
        if !caption.is_empty() {
            request = request
                .caption(caption.to_string())
                .parse_mode(ParseMode::MarkdownV2);
        }

        let msg = request
            .await
            .map_err(|e| self.delivery_error("sendPhoto", e))?;

        debug!(message_id = msg.id.0, bytes = size, "Telegram photo delivered");
        Ok(DeliveryReceipt {
            message_id: Some(msg.id.0.to_string()),
        })
    }
}
