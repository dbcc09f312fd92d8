// SPDX-FileCopyrightText: 2026 Courier Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! MarkdownV2 escaping and length helpers for the Telegram Bot API.
//!
//! User-supplied text is untrusted, so every MarkdownV2 special character is
//! escaped, backticks and backslashes included. Telegram measures message and
//! caption limits in UTF-16 code units, not bytes or chars.

/// Characters Telegram requires escaping anywhere in MarkdownV2 text.
const SPECIAL_CHARS: &[char] = &[
    '\\', '_', '*', '[', ']', '(', ')', '~', '`', '>', '#', '+', '-', '=', '|', '{', '}', '.',
    '!',
];

/// Escapes `text` so it renders literally under `ParseMode::MarkdownV2`.
pub fn escape_markdown_v2(text: &str) -> String {
    let mut out = String::with_capacity(text.len() + text.len() / 4);
    for ch in text.chars() {
        if SPECIAL_CHARS.contains(&ch) {
            out.push('\\');
        }
        out.push(ch);
    }
    out
}

/// Length of `text` as Telegram counts it.
pub fn utf16_len(text: &str) -> usize {
    text.encode_utf16().count()
}

/// Longest prefix of `text` that fits in `max` UTF-16 units.
///
/// Never splits a character: a surrogate pair that would straddle the limit
/// is dropped whole.
pub fn truncate_utf16(text: &str, max: usize) -> &str {
    let mut units = 0;
    for (idx, ch) in text.char_indices() {
        units += ch.len_utf16();
        if units > max {
            return &text[..idx];
        }
    }
    text
}

/// Drops a trailing lone escape character left behind by truncation.
///
/// An odd run of trailing backslashes means the last one escaped a character
/// that was cut off.
pub fn trim_dangling_escape(text: &str) -> &str {
    let trailing = text.chars().rev().take_while(|c| *c == '\\').count();
    if trailing % 2 == 1 {
        &text[..text.len() - 1]
    } else {
        text
    }
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;

    #[test]
    fn plain_text_is_unchanged() {
        assert_eq!(escape_markdown_v2("Hello world"), "Hello world");
        assert_eq!(escape_markdown_v2(""), "");
    }

    #[test]
    fn escapes_every_special_character() {
        assert_eq!(
            escape_markdown_v2("_*[]()~`>#+-=|{}.!"),
            "\\_\\*\\[\\]\\(\\)\\~\\`\\>\\#\\+\\-\\=\\|\\{\\}\\.\\!"
        );
    }

    #[test]
    fn escapes_backslash_itself() {
        assert_eq!(escape_markdown_v2(r"C:\path"), r"C:\\path");
    }

    #[test]
    fn code_spans_are_not_special() {
        // Sender input is literal text; backticks never open code.
        assert_eq!(escape_markdown_v2("`rm -rf`"), "\\`rm \\-rf\\`");
    }

    #[test]
    fn non_ascii_passes_through() {
        assert_eq!(escape_markdown_v2("Halo, apa kabar? 👋"), "Halo, apa kabar? 👋");
    }

    #[test]
    fn utf16_counts_surrogate_pairs() {
        assert_eq!(utf16_len("abc"), 3);
        assert_eq!(utf16_len("é"), 1);
        assert_eq!(utf16_len("📨"), 2);
    }

    #[test]
    fn truncate_keeps_surrogate_pairs_whole() {
        assert_eq!(truncate_utf16("a📨b", 2), "a");
        assert_eq!(truncate_utf16("a📨b", 3), "a📨");
        assert_eq!(truncate_utf16("abc", 10), "abc");
    }

    #[test]
    fn trims_only_an_odd_trailing_escape() {
        assert_eq!(trim_dangling_escape("end\\"), "end");
        assert_eq!(trim_dangling_escape("end\\\\"), "end\\\\");
        assert_eq!(trim_dangling_escape("end\\\\\\"), "end\\\\");
        assert_eq!(trim_dangling_escape("end"), "end");
    }

    proptest! {
        #[test]
        fn truncated_escape_output_stays_well_formed(s in ".{0,80}", max in 0usize..120) {
            let escaped = escape_markdown_v2(&s);
            let cut = trim_dangling_escape(truncate_utf16(&escaped, max));
            prop_assert!(utf16_len(cut) <= max);
            let trailing = cut.chars().rev().take_while(|c| *c == '\\').count();
            prop_assert_eq!(trailing % 2, 0);
        }
    }
}
