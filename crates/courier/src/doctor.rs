// SPDX-FileCopyrightText: 2026 Courier Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! `courier doctor` command implementation.
//!
//! Probes the Telegram bot (`getMe`) and the PostgREST table with the same
//! adapters `serve` uses, and prints one line per check.

use std::io::IsTerminal;
use std::time::{Duration, Instant};

use courier_config::model::CourierConfig;
use courier_core::CourierError;
use courier_core::traits::PluginAdapter;
use courier_core::types::HealthStatus;
use courier_store::PostgrestStore;
use courier_telegram::TelegramMessenger;

/// Status of a diagnostic check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CheckStatus {
    Pass,
    Warn,
    Fail,
}

/// Result of a single diagnostic check.
#[derive(Debug, Clone)]
pub struct CheckResult {
    pub name: String,
    pub status: CheckStatus,
    pub message: String,
    pub duration: Duration,
}

/// Runs every check and prints the report.
///
/// Returns the number of failed checks.
pub async fn run_doctor(config: &CourierConfig, plain: bool) -> Result<usize, CourierError> {
    let use_color = !plain && std::io::stdout().is_terminal();

    let results = vec![check_telegram(config).await, check_store(config).await];

    println!();
    println!("  courier doctor");
    println!("  {}", "-".repeat(50));
    for result in &results {
        println!("{}", format_line(result, use_color));
    }
    println!();

    let failures = results
        .iter()
        .filter(|r| r.status == CheckStatus::Fail)
        .count();
    let warnings = results
        .iter()
        .filter(|r| r.status == CheckStatus::Warn)
        .count();

    if failures + warnings == 0 {
        println!("  All checks passed.");
    } else {
        let issues = failures + warnings;
        let issue_word = if issues == 1 { "issue" } else { "issues" };
        println!("  {issues} {issue_word} found.");
    }
    println!();

    Ok(failures)
}

fn format_line(result: &CheckResult, use_color: bool) -> String {
    let duration_ms = result.duration.as_millis();
    if use_color {
        use colored::Colorize;
        let (symbol, message) = match result.status {
            CheckStatus::Pass => ("✓".green(), result.message.normal()),
            CheckStatus::Warn => ("!".yellow(), result.message.yellow()),
            CheckStatus::Fail => ("✗".red(), result.message.red()),
        };
        format!(
            "    {symbol} {:<20} {message} ({duration_ms}ms)",
            result.name
        )
    } else {
        let tag = match result.status {
            CheckStatus::Pass => "[OK]  ",
            CheckStatus::Warn => "[WARN]",
            CheckStatus::Fail => "[FAIL]",
        };
        format!(
            "    {tag} {:<20} {} ({duration_ms}ms)",
            result.name, result.message
        )
    }
}

async fn check_telegram(config: &CourierConfig) -> CheckResult {
    const NAME: &str = "Telegram bot";
    let start = Instant::now();

    if !config.telegram.is_configured() {
        return not_configured(NAME, "set BOT_TOKEN and CHAT_ID", start);
    }
    match TelegramMessenger::new(&config.telegram) {
        Ok(messenger) => probe(NAME, &messenger, start).await,
        Err(e) => failed(NAME, e, start),
    }
}

async fn check_store(config: &CourierConfig) -> CheckResult {
    const NAME: &str = "Message store";
    let start = Instant::now();

    if !config.storage.is_configured() {
        return not_configured(NAME, "set SUPABASE_URL and SUPABASE_KEY", start);
    }
    match PostgrestStore::new(&config.storage) {
        Ok(store) => probe(NAME, &store, start).await,
        Err(e) => failed(NAME, e, start),
    }
}

/// Maps an adapter health probe onto a check line.
async fn probe(name: &str, adapter: &dyn PluginAdapter, start: Instant) -> CheckResult {
    let (status, message) = match adapter.health_check().await {
        Ok(HealthStatus::Healthy) => (CheckStatus::Pass, "reachable".to_string()),
        Ok(HealthStatus::Degraded(reason)) => (CheckStatus::Warn, reason),
        Ok(HealthStatus::Unhealthy(reason)) => (CheckStatus::Fail, reason),
        Err(e) => (CheckStatus::Fail, e.to_string()),
    };
    CheckResult {
        name: name.to_string(),
        status,
        message,
        duration: start.elapsed(),
    }
}

fn not_configured(name: &str, hint: &str, start: Instant) -> CheckResult {
    CheckResult {
        name: name.to_string(),
        status: CheckStatus::Warn,
        message: format!("not configured ({hint})"),
        duration: start.elapsed(),
    }
}

fn failed(name: &str, err: CourierError, start: Instant) -> CheckResult {
    CheckResult {
        name: name.to_string(),
        status: CheckStatus::Fail,
        message: err.to_string(),
        duration: start.elapsed(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{method, path, path_regex};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn config_for(bot: &MockServer, store: &MockServer) -> CourierConfig {
        courier_config::load_and_validate_str(&format!(
            r#"
            [telegram]
            bot_token = "123456:doctor-token"
            chat_id = "42"
            api_url = "{}"

            [storage]
            url = "{}"
            api_key = "sb_publishable_doctor"
            "#,
            bot.uri(),
            store.uri()
        ))
        .unwrap()
    }

    #[tokio::test]
    async fn unconfigured_adapters_warn() {
        let config = courier_config::load_and_validate_str("").unwrap();
        let telegram = check_telegram(&config).await;
        let store = check_store(&config).await;
        assert_eq!(telegram.status, CheckStatus::Warn);
        assert_eq!(store.status, CheckStatus::Warn);
        assert!(store.message.contains("SUPABASE_URL"));
    }

    #[tokio::test]
    async fn healthy_services_pass() {
        let bot = MockServer::start().await;
        let store = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path_regex(r"(?i)/bot[^/]+/getme$"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "ok": true,
                "result": {
                    "id": 42,
                    "is_bot": true,
                    "first_name": "Courier",
                    "username": "courier_bot",
                    "can_join_groups": true,
                    "can_read_all_group_messages": false,
                    "supports_inline_queries": false,
                    "can_connect_to_business": false,
                    "has_main_web_app": false
                }
            })))
            .mount(&bot)
            .await;
        Mock::given(method("GET"))
            .and(path("/rest/v1/messages"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
            .mount(&store)
            .await;

        let config = config_for(&bot, &store);
        assert_eq!(check_telegram(&config).await.status, CheckStatus::Pass);
        assert_eq!(check_store(&config).await.status, CheckStatus::Pass);
    }

    #[tokio::test]
    async fn store_rejecting_key_is_degraded() {
        let bot = MockServer::start().await;
        let store = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(401).set_body_string("Invalid API key"))
            .mount(&store)
            .await;

        let result = check_store(&config_for(&bot, &store)).await;
        assert_eq!(result.status, CheckStatus::Warn);
    }

    #[test]
    fn plain_lines_are_tagged() {
        let line = format_line(
            &CheckResult {
                name: "Message store".into(),
                status: CheckStatus::Fail,
                message: "unreachable".into(),
                duration: Duration::from_millis(12),
            },
            false,
        );
        assert!(line.contains("[FAIL]"));
        assert!(line.contains("unreachable (12ms)"));
    }
}
