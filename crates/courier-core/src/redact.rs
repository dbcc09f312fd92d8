// SPDX-FileCopyrightText: 2026 Courier Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Secret redaction for error text that is logged, stored, or returned.
//!
//! Transport errors can echo request URLs, and the Telegram Bot API puts the
//! bot token in the URL path. Two passes scrub them:
//! 1. **Pattern**: anything shaped like a bot token or a bearer credential.
//! 2. **Exact**: the secret values the process was configured with.

use std::sync::LazyLock;

use regex::Regex;

static SECRET_PATTERNS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    [
        // Telegram bot tokens: 123456789:AAH...
        r"\d{6,12}:[A-Za-z0-9_\-]{30,}",
        r"Bearer\s+[A-Za-z0-9._\-]{10,}",
        // Supabase publishable / secret keys.
        r"sb_(?:publishable|secret)_[A-Za-z0-9_\-]{10,}",
    ]
    .iter()
    .filter_map(|p| Regex::new(p).ok())
    .collect()
});

/// The placeholder substituted for secrets.
pub const REDACTED: &str = "[REDACTED]";

/// Removes secret-looking substrings and the given exact values from `input`.
pub fn redact(input: &str, secrets: &[&str]) -> String {
    let mut result = input.to_string();

    for pattern in SECRET_PATTERNS.iter() {
        result = pattern.replace_all(&result, REDACTED).into_owned();
    }

    // Longest first so a secret that contains another is removed whole.
    let mut exact: Vec<&str> = secrets.iter().copied().filter(|s| !s.is_empty()).collect();
    exact.sort_by_key(|s| std::cmp::Reverse(s.len()));
    for secret in exact {
        result = result.replace(secret, REDACTED);
    }

    result
}
