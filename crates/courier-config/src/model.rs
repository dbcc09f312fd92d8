// SPDX-FileCopyrightText: 2026 Courier Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration model structs.
//!
//! Every section uses `#[serde(deny_unknown_fields)]` so a mistyped key fails
//! at startup with a suggestion instead of being silently ignored.

use std::fmt;

use serde::{Deserialize, Deserializer, Serialize};

/// Top-level Courier configuration.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct CourierConfig {
    /// HTTP listener settings.
    #[serde(default)]
    pub server: ServerConfig,

    /// Telegram bot credentials and destination chat.
    #[serde(default)]
    pub telegram: TelegramConfig,

    /// PostgREST datastore credentials.
    #[serde(default)]
    pub storage: StorageConfig,

    /// Notification formatting and batching.
    #[serde(default)]
    pub relay: RelayConfig,
}

/// HTTP listener configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct ServerConfig {
    /// Address to bind.
    #[serde(default = "default_host")]
    pub host: String,

    /// Port to bind.
    #[serde(default = "default_port")]
    pub port: u16,

    /// Path the relay endpoint is mounted on.
    #[serde(default = "default_route")]
    pub route: String,

    /// Largest accepted request body. Photos travel inline as base64.
    #[serde(default = "default_max_body_bytes")]
    pub max_body_bytes: usize,

    /// Logging level (trace, debug, info, warn, error).
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            route: default_route(),
            max_body_bytes: default_max_body_bytes(),
            log_level: default_log_level(),
        }
    }
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    3000
}

fn default_route() -> String {
    "/api/send".to_string()
}

fn default_max_body_bytes() -> usize {
    10 * 1024 * 1024
}

fn default_log_level() -> String {
    "info".to_string()
}

/// Telegram bot configuration.
#[derive(Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct TelegramConfig {
    /// Bot API token. `None` leaves the relay unconfigured.
    #[serde(default)]
    pub bot_token: Option<String>,

    /// Destination chat id. Numeric ids are accepted as numbers or strings.
    #[serde(default, deserialize_with = "optional_string_or_number")]
    pub chat_id: Option<String>,

    /// Bot API base URL override (local Bot API server, tests).
    #[serde(default)]
    pub api_url: Option<String>,

    /// Per-request timeout for Bot API calls.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for TelegramConfig {
    fn default() -> Self {
        Self {
            bot_token: None,
            chat_id: None,
            api_url: None,
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl TelegramConfig {
    /// Whether both the token and the chat id are present and non-empty.
    pub fn is_configured(&self) -> bool {
        is_present(&self.bot_token) && is_present(&self.chat_id)
    }
}

impl fmt::Debug for TelegramConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TelegramConfig")
            .field("bot_token", &self.bot_token.as_ref().map(|_| "[redacted]"))
            .field("chat_id", &self.chat_id)
            .field("api_url", &self.api_url)
            .field("timeout_secs", &self.timeout_secs)
            .finish()
    }
}

/// PostgREST datastore configuration.
#[derive(Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct StorageConfig {
    /// Project URL, e.g. `https://xyz.supabase.co`.
    #[serde(default)]
    pub url: Option<String>,

    /// API key sent as `apikey` and as the bearer token.
    #[serde(default)]
    pub api_key: Option<String>,

    /// Table holding message records.
    #[serde(default = "default_table")]
    pub table: String,

    /// Per-request timeout for store calls.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            url: None,
            api_key: None,
            table: default_table(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl StorageConfig {
    /// Whether both the URL and the key are present and non-empty.
    pub fn is_configured(&self) -> bool {
        is_present(&self.url) && is_present(&self.api_key)
    }
}

impl fmt::Debug for StorageConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StorageConfig")
            .field("url", &self.url)
            .field("api_key", &self.api_key.as_ref().map(|_| "[redacted]"))
            .field("table", &self.table)
            .field("timeout_secs", &self.timeout_secs)
            .finish()
    }
}

fn default_table() -> String {
    "messages".to_string()
}

fn default_timeout_secs() -> u64 {
    30
}

/// Notification formatting and photo batching.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct RelayConfig {
    /// Heading of every notification.
    #[serde(default = "default_title")]
    pub title: String,

    /// Pause before each photo after the first, in milliseconds.
    #[serde(default = "default_photo_delay_ms")]
    pub photo_delay_ms: u64,

    /// Offset from UTC used for the notification timestamp, in minutes.
    #[serde(default = "default_utc_offset_minutes")]
    pub utc_offset_minutes: i32,

    /// Maximum caption length (Telegram counts UTF-16 units).
    #[serde(default = "default_caption_limit")]
    pub caption_limit: usize,

    /// Maximum text message length (Telegram counts UTF-16 units).
    #[serde(default = "default_text_limit")]
    pub text_limit: usize,
}

impl Default for RelayConfig {
    fn default() -> Self {
        Self {
            title: default_title(),
            photo_delay_ms: default_photo_delay_ms(),
            utc_offset_minutes: default_utc_offset_minutes(),
            caption_limit: default_caption_limit(),
            text_limit: default_text_limit(),
        }
    }
}

/// Telegram's own caption ceiling.
pub const MAX_CAPTION_LIMIT: usize = 1024;

/// Telegram's own text message ceiling.
pub const MAX_TEXT_LIMIT: usize = 4096;

fn default_title() -> String {
    "NEW MESSAGE".to_string()
}

fn default_photo_delay_ms() -> u64 {
    300
}

fn default_utc_offset_minutes() -> i32 {
    7 * 60
}

fn default_caption_limit() -> usize {
    MAX_CAPTION_LIMIT
}

fn default_text_limit() -> usize {
    MAX_TEXT_LIMIT
}

fn is_present(value: &Option<String>) -> bool {
    value.as_deref().is_some_and(|v| !v.trim().is_empty())
}

#[derive(Deserialize)]
#[serde(untagged)]
enum StringOrNumber {
    String(String),
    Signed(i64),
    Unsigned(u64),
}

/// Environment values like `CHAT_ID=-1001234` arrive as integers.
fn optional_string_or_number<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(
        Option::<StringOrNumber>::deserialize(deserializer)?.map(|value| match value {
            StringOrNumber::String(s) => s,
            StringOrNumber::Signed(n) => n.to_string(),
            StringOrNumber::Unsigned(n) => n.to_string(),
        }),
    )
}
