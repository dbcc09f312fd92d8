// SPDX-FileCopyrightText: 2026 Courier Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Layered configuration loading with Figment.
//!
//! Merge order (later overrides earlier):
//! 1. Compiled defaults
//! 2. `/etc/courier/courier.toml`
//! 3. `~/.config/courier/courier.toml`
//! 4. `./courier.toml`
//! 5. `COURIER_*` environment variables
//! 6. Deployment variables `BOT_TOKEN`, `CHAT_ID`, `SUPABASE_URL`, `SUPABASE_KEY`

#![allow(clippy::result_large_err)] // figment::Error is external

use std::path::{Path, PathBuf};

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};

use crate::model::CourierConfig;

/// System-wide config file.
pub const SYSTEM_CONFIG_PATH: &str = "/etc/courier/courier.toml";

/// Config file in the working directory.
pub const LOCAL_CONFIG_FILE: &str = "courier.toml";

/// Returns the per-user config file path, if the platform has a config dir.
pub fn user_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("courier").join(LOCAL_CONFIG_FILE))
}

/// Loads configuration from the standard file hierarchy plus the environment.
pub fn load_config() -> Result<CourierConfig, figment::Error> {
    build_figment().extract()
}

/// Loads configuration from a TOML string only (no files, no environment).
pub fn load_config_from_str(toml_content: &str) -> Result<CourierConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(CourierConfig::default()))
        .merge(Toml::string(toml_content))
        .extract()
}

/// Loads configuration from one explicit file, then applies the environment.
pub fn load_config_from_path(path: &Path) -> Result<CourierConfig, figment::Error> {
    with_environment(
        Figment::new()
            .merge(Serialized::defaults(CourierConfig::default()))
            .merge(Toml::file(path)),
    )
    .extract()
}

/// Builds the Figment used by [`load_config`] without extracting it.
pub fn build_figment() -> Figment {
    let mut figment = Figment::new()
        .merge(Serialized::defaults(CourierConfig::default()))
        .merge(Toml::file(SYSTEM_CONFIG_PATH));
    if let Some(user) = user_config_path() {
        figment = figment.merge(Toml::file(user));
    }
    with_environment(figment.merge(Toml::file(LOCAL_CONFIG_FILE)))
}

fn with_environment(figment: Figment) -> Figment {
    figment.merge(prefixed_env()).merge(deployment_env())
}

/// `COURIER_<SECTION>_<KEY>` variables.
///
/// Uses `map()` rather than `split("_")` because keys contain underscores:
/// `COURIER_TELEGRAM_BOT_TOKEN` must become `telegram.bot_token`.
fn prefixed_env() -> Env {
    Env::prefixed("COURIER_").map(|key| map_prefixed_key(key.as_str()).into())
}

/// `TELEGRAM_BOT_TOKEN` -> `telegram.bot_token`. Keys outside a known section
/// pass through lowercased and are rejected by `deny_unknown_fields`.
fn map_prefixed_key(key: &str) -> String {
    let key = key.to_ascii_lowercase();
    ["server", "telegram", "storage", "relay"]
        .iter()
        .find_map(|section| {
            key.strip_prefix(section)
                .and_then(|rest| rest.strip_prefix('_'))
                .map(|field| format!("{section}.{field}"))
        })
        .unwrap_or(key)
}

/// Plain variable names used by existing serverless deployments.
fn deployment_env() -> Env {
    Env::raw().filter_map(|key| {
        let mapped = match key.as_str().to_ascii_lowercase().as_str() {
            "bot_token" => "telegram.bot_token",
            "chat_id" => "telegram.chat_id",
            "supabase_url" => "storage.url",
            "supabase_key" => "storage.api_key",
            _ => return None,
        };
        Some(mapped.into())
    })
}
