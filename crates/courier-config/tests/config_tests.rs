// SPDX-FileCopyrightText: 2026 Courier Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Integration tests for Courier configuration loading.

use std::path::Path;

use courier_config::diagnostic::ConfigError;
use courier_config::{load_and_validate_path, load_and_validate_str, load_config_from_str};

#[test]
fn full_toml_deserializes() {
    let toml = r#"
[server]
host = "127.0.0.1"
port = 8080
route = "/relay"
max_body_bytes = 2048
log_level = "debug"

[telegram]
bot_token = "123:ABC"
chat_id = "-100200300"
api_url = "http://localhost:8081"
timeout_secs = 5

[storage]
url = "https://demo.supabase.co"
api_key = "sb_publishable_demo"
table = "contact_messages"
timeout_secs = 7

[relay]
title = "NEW INQUIRY"
photo_delay_ms = 0
utc_offset_minutes = -300
caption_limit = 900
text_limit = 4000
"#;

    let config = load_and_validate_str(toml).expect("valid config");
    assert_eq!(config.server.host, "127.0.0.1");
    assert_eq!(config.server.port, 8080);
    assert_eq!(config.server.route, "/relay");
    assert_eq!(config.server.max_body_bytes, 2048);
    assert_eq!(config.telegram.chat_id.as_deref(), Some("-100200300"));
    assert_eq!(config.telegram.timeout_secs, 5);
    assert!(config.telegram.is_configured());
    assert_eq!(config.storage.table, "contact_messages");
    assert!(config.storage.is_configured());
    assert_eq!(config.relay.title, "NEW INQUIRY");
    assert_eq!(config.relay.photo_delay_ms, 0);
    assert_eq!(config.relay.utc_offset_minutes, -300);
}

#[test]
fn empty_toml_uses_defaults() {
    let config = load_and_validate_str("").expect("defaults are valid");
    assert_eq!(config.server.port, 3000);
    assert_eq!(config.server.route, "/api/send");
    assert_eq!(config.storage.table, "messages");
    assert_eq!(config.relay.utc_offset_minutes, 420);
    assert_eq!(config.relay.caption_limit, 1024);
    assert!(!config.telegram.is_configured());
}

#[test]
fn unknown_key_is_rejected_by_loader() {
    let err = load_config_from_str("[telegram]\nbot_tokn = \"x\"\n").expect_err("unknown key");
    assert!(err.to_string().contains("bot_tokn"), "got: {err}");
}

#[test]
fn unknown_key_becomes_diagnostic_with_suggestion() {
    let errors = load_and_validate_str("[relay]\nphoto_dely_ms = 10\n").expect_err("unknown key");
    assert_eq!(errors.len(), 1);
    match &errors[0] {
        ConfigError::UnknownKey {
            key, suggestion, ..
        } => {
            assert_eq!(key, "photo_dely_ms");
            assert_eq!(suggestion.as_deref(), Some("photo_delay_ms"));
        }
        other => panic!("expected UnknownKey, got {other:?}"),
    }
}

#[test]
fn wrong_type_becomes_invalid_type() {
    let errors = load_and_validate_str("[server]\nport = \"eighty\"\n").expect_err("bad type");
    assert!(
        matches!(&errors[0], ConfigError::InvalidType { key, .. } if key == "server.port"),
        "got {errors:?}"
    );
}

#[test]
fn validation_errors_are_reported_after_parse() {
    let errors = load_and_validate_str("[relay]\ntext_limit = 9000\n").expect_err("too large");
    assert!(matches!(&errors[0], ConfigError::Validation { message } if message.contains("text_limit")));
}

#[test]
#[serial_test::serial]
fn explicit_path_applies_deployment_variables() {
    figment::Jail::expect_with(|jail| {
        jail.create_file("relay.toml", "[server]\nport = 9000\n")?;
        jail.set_env("BOT_TOKEN", "42:token");
        jail.set_env("CHAT_ID", "77");
        let config = load_and_validate_path(Path::new("relay.toml")).expect("valid");
        assert_eq!(config.server.port, 9000);
        assert_eq!(config.telegram.bot_token.as_deref(), Some("42:token"));
        assert_eq!(config.telegram.chat_id.as_deref(), Some("77"));
        Ok(())
    });
}

#[test]
#[serial_test::serial]
fn unknown_key_in_file_carries_span() {
    figment::Jail::expect_with(|jail| {
        jail.create_file("relay.toml", "[server]\nprot = 1\n")?;
        let errors = load_and_validate_path(Path::new("relay.toml")).expect_err("unknown key");
        match &errors[0] {
            ConfigError::UnknownKey { suggestion, .. } => {
                assert_eq!(suggestion.as_deref(), Some("port"));
            }
            other => panic!("expected UnknownKey, got {other:?}"),
        }
        Ok(())
    });
}
