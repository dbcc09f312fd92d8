// SPDX-FileCopyrightText: 2026 Courier Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Notification text rendered as Telegram MarkdownV2.
//!
//! Only the message body is ever shortened; title, sender and timestamp
//! always survive.

use chrono::{DateTime, FixedOffset, Utc};
use courier_telegram::markdown::{
    escape_markdown_v2, trim_dangling_escape, truncate_utf16, utf16_len,
};

/// Appended to a shortened body.
const ELLIPSIS: &str = "…";

/// `dd/mm/yyyy, HH.MM.SS`
const TIME_FORMAT: &str = "%d/%m/%Y, %H.%M.%S";

/// Renders notifications with a fixed title and timezone.
#[derive(Debug, Clone)]
pub struct NotificationFormat {
    title: String,
    offset: FixedOffset,
}

impl NotificationFormat {
    pub fn new(title: impl Into<String>, offset: FixedOffset) -> Self {
        Self {
            title: title.into(),
            offset,
        }
    }

    /// Full notification for one submission, at most `limit` UTF-16 units.
    pub fn render(&self, sender: &str, body: &str, at: DateTime<Utc>, limit: usize) -> String {
        let timestamp = at.with_timezone(&self.offset).format(TIME_FORMAT).to_string();
        let head = format!(
            "📨 *{}*\n\n👤 *Sender:* {}\n💬 *Message:*\n",
            escape_markdown_v2(&self.title),
            escape_markdown_v2(sender),
        );
        let tail = format!("\n\n🕒 *Time:* {}", escape_markdown_v2(&timestamp));
        let body = escape_markdown_v2(body);

        let frame = utf16_len(&head) + utf16_len(&tail);
        if frame + utf16_len(&body) <= limit {
            return format!("{head}{body}{tail}");
        }

        let reserved = frame + utf16_len(ELLIPSIS);
        if reserved > limit {
            // Even the frame does not fit; cut the whole text.
            return fit(&format!("{head}{body}{tail}"), limit);
        }
        let shortened = trim_dangling_escape(truncate_utf16(&body, limit - reserved));
        format!("{head}{shortened}{ELLIPSIS}{tail}")
    }

    /// Caption for photo `index` (1-based) of `total` after the first.
    pub fn photo_caption(&self, index: usize, total: usize, sender: &str, limit: usize) -> String {
        fit(
            &format!(
                "📸 Photo {index} of {total} from {}",
                escape_markdown_v2(sender)
            ),
            limit,
        )
    }
}

fn fit(text: &str, limit: usize) -> String {
    trim_dangling_escape(truncate_utf16(text, limit)).to_string()
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;
    use proptest::prelude::*;

    use super::*;

    fn format() -> NotificationFormat {
        NotificationFormat::new("NEW MESSAGE", FixedOffset::east_opt(7 * 3600).unwrap())
    }

    fn at() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 3, 9, 17, 5, 4).unwrap()
    }

    #[test]
    fn renders_full_template_in_local_time() {
        let text = format().render("Ana", "Hello!", at(), 4096);
        assert_eq!(
            text,
            "📨 *NEW MESSAGE*\n\n👤 *Sender:* Ana\n💬 *Message:*\nHello\\!\n\n🕒 *Time:* 10/03/2026, 00\\.05\\.04"
        );
    }

    #[test]
    fn escapes_user_input() {
        let text = format().render("a_b", "*bold* [x](y)", at(), 4096);
        assert!(text.contains("*Sender:* a\\_b\n"));
        assert!(text.contains("\\*bold\\* \\[x\\]\\(y\\)"));
    }

    #[test]
    fn long_body_is_shortened_but_frame_survives() {
        let body = "word ".repeat(400);
        let text = format().render("Ana", &body, at(), 1024);
        assert!(utf16_len(&text) <= 1024);
        assert!(text.starts_with("📨 *NEW MESSAGE*"));
        assert!(text.contains("*Sender:* Ana"));
        assert!(text.contains("…\n\n🕒 *Time:* 10/03/2026"));
    }

    #[test]
    fn shortening_never_leaves_a_lone_escape() {
        let body = ".".repeat(2000);
        let text = format().render("Ana", &body, at(), 1024);
        let (_, after) = text.split_once("*Message:*\n").unwrap();
        let (kept, _) = after.split_once('…').unwrap();
        assert_eq!(kept.len() % 2, 0, "every `.` keeps its escape");
    }

    #[test]
    fn tiny_limit_cuts_everything() {
        let text = format().render("Ana", "Hello", at(), 10);
        assert!(utf16_len(&text) <= 10);
    }

    #[test]
    fn photo_caption_counts_from_two() {
        assert_eq!(
            format().photo_caption(2, 3, "Ana.B", 1024),
            "📸 Photo 2 of 3 from Ana\\.B"
        );
    }

    proptest! {
        #[test]
        fn rendered_text_respects_limit(
            sender in ".{1,40}",
            body in ".{0,3000}",
            limit in 300usize..4096,
        ) {
            let text = format().render(&sender, &body, at(), limit);
            prop_assert!(utf16_len(&text) <= limit);
            prop_assert!(text.contains("*Time:*"));
        }
    }
}
