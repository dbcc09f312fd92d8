// SPDX-FileCopyrightText: 2026 Courier Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! `courier check`: print the effective configuration with secrets hidden.

use courier_config::model::CourierConfig;

const HIDDEN: &str = "[set]";
const MISSING: &str = "(missing)";

fn secret(value: &Option<String>) -> &'static str {
    if value.as_deref().is_some_and(|v| !v.is_empty()) {
        HIDDEN
    } else {
        MISSING
    }
}

fn plain(value: &Option<String>) -> &str {
    value.as_deref().unwrap_or(MISSING)
}

/// Renders a human-readable summary of `config`.
///
/// Bot tokens and API keys are never printed, only whether they are set.
pub fn summary(config: &CourierConfig) -> String {
    let CourierConfig {
        server,
        telegram,
        storage,
        relay,
    } = config;

    let mut out = format!(
        "configuration OK

[server]
  listen         {host}:{port}
  route          {route}
  max body       {max_body} bytes
  log level      {log_level}
[telegram]
  bot token      {bot_token}
  chat id        {chat_id}
  api url        {api_url}
[storage]
  url            {store_url}
  api key        {api_key}
  table          {table}
[relay]
  title          {title}
  photo delay    {delay} ms
  utc offset     {offset} min
  limits         caption {caption} / text {text}
",
        host = server.host,
        port = server.port,
        route = server.route,
        max_body = server.max_body_bytes,
        log_level = server.log_level,
        bot_token = secret(&telegram.bot_token),
        chat_id = plain(&telegram.chat_id),
        api_url = telegram.api_url.as_deref().unwrap_or("https://api.telegram.org"),
        store_url = plain(&storage.url),
        api_key = secret(&storage.api_key),
        table = storage.table,
        title = relay.title,
        delay = relay.photo_delay_ms,
        offset = relay.utc_offset_minutes,
        caption = relay.caption_limit,
        text = relay.text_limit,
    );

    if !(telegram.is_configured() && storage.is_configured()) {
        out.push_str("\nwarning: credentials incomplete, POST requests will be refused\n");
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;

    const FULL: &str = r#"
        [telegram]
        bot_token = "123456789:AAHsecretsecretsecretsecretsecret"
        chat_id = "-100777"

        [storage]
        url = "https://project.supabase.co"
        api_key = "sb_secret_abcdefghijklmnop"
    "#;

    #[test]
    fn secrets_are_never_printed() {
        let config = courier_config::load_and_validate_str(FULL).unwrap();
        let text = summary(&config);
        assert!(!text.contains("AAHsecret"));
        assert!(!text.contains("sb_secret_"));
        assert!(text.contains("-100777"));
        assert!(text.contains("https://project.supabase.co"));
        assert!(!text.contains("warning:"));
    }

    #[test]
    fn defaults_render_one_line_per_setting() {
        let config = courier_config::load_and_validate_str("").unwrap();
        let text = summary(&config);
        assert!(text.starts_with("configuration OK\n\n[server]\n"));
        assert!(text.contains("\n  listen         0.0.0.0:3000\n"));
        assert!(text.contains("\n  limits         caption 1024 / text 4096\n"));
        assert!(text.contains("\n  api url        https://api.telegram.org\n"));
    }

    #[test]
    fn missing_credentials_are_flagged() {
        let config = courier_config::load_and_validate_str("").unwrap();
        let text = summary(&config);
        assert!(text.contains("bot token      (missing)"));
        assert!(text.contains("warning: credentials incomplete"));
    }
}
