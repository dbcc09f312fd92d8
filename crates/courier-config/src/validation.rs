// SPDX-FileCopyrightText: 2026 Courier Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Post-deserialization validation.
//!
//! Missing credentials are deliberately not an error here: the service still
//! answers liveness probes and reports "not configured" per request.

use crate::diagnostic::ConfigError;
use crate::model::{CourierConfig, MAX_CAPTION_LIMIT, MAX_TEXT_LIMIT};

/// Longest offset any real timezone uses, in minutes.
const MAX_UTC_OFFSET_MINUTES: i32 = 14 * 60;

/// Longest accepted notification title, in characters.
const MAX_TITLE_CHARS: usize = 200;

/// Validates semantic constraints, collecting every failure.
pub fn validate_config(config: &CourierConfig) -> Result<(), Vec<ConfigError>> {
    let mut errors = Vec::new();
    let mut fail = |message: String| errors.push(ConfigError::Validation { message });

    if config.server.host.trim().is_empty() {
        fail("server.host must not be empty".to_string());
    }

    if !config.server.route.starts_with('/') {
        fail(format!(
            "server.route must start with `/`, got `{}`",
            config.server.route
        ));
    }

    if config.server.max_body_bytes == 0 {
        fail("server.max_body_bytes must be greater than 0".to_string());
    }

    for (key, value) in [
        ("telegram.api_url", &config.telegram.api_url),
        ("storage.url", &config.storage.url),
    ] {
        if let Some(raw) = value.as_deref().filter(|v| !v.trim().is_empty())
            && let Err(e) = url::Url::parse(raw)
        {
            fail(format!("{key} `{raw}` is not a valid URL: {e}"));
        }
    }

    if config.telegram.timeout_secs == 0 {
        fail("telegram.timeout_secs must be greater than 0".to_string());
    }

    if config.storage.timeout_secs == 0 {
        fail("storage.timeout_secs must be greater than 0".to_string());
    }

    if config.storage.table.trim().is_empty() {
        fail("storage.table must not be empty".to_string());
    }

    let offset = config.relay.utc_offset_minutes;
    if offset.abs() > MAX_UTC_OFFSET_MINUTES {
        fail(format!(
            "relay.utc_offset_minutes must be within ±{MAX_UTC_OFFSET_MINUTES}, got {offset}"
        ));
    }

    if config.relay.title.chars().count() > MAX_TITLE_CHARS {
        fail(format!(
            "relay.title must be at most {MAX_TITLE_CHARS} characters"
        ));
    }

    let caption = config.relay.caption_limit;
    if caption == 0 || caption > MAX_CAPTION_LIMIT {
        fail(format!(
            "relay.caption_limit must be between 1 and {MAX_CAPTION_LIMIT}, got {caption}"
        ));
    }

    let text = config.relay.text_limit;
    if text == 0 || text > MAX_TEXT_LIMIT {
        fail(format!(
            "relay.text_limit must be between 1 and {MAX_TEXT_LIMIT}, got {text}"
        ));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
