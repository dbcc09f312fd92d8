// SPDX-FileCopyrightText: 2026 Courier Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Mock messenger that captures every send attempt.
//!
//! Each attempt is recorded with the (tokio) instant it happened, so tests
//! running with a paused clock can assert on the pause between photos.

use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::Mutex;
use tokio::time::Instant;

use courier_core::CourierError;
use courier_core::traits::{Messenger, PluginAdapter};
use courier_core::types::{AdapterType, DeliveryReceipt, HealthStatus};

/// What a single send attempt carried.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outgoing {
    Text(String),
    Photo { bytes: Vec<u8>, caption: String },
}

impl Outgoing {
    /// The text of a text send or the caption of a photo send.
    pub fn text(&self) -> &str {
        match self {
            Self::Text(text) => text,
            Self::Photo { caption, .. } => caption,
        }
    }

    pub fn is_photo(&self) -> bool {
        matches!(self, Self::Photo { .. })
    }
}

/// One captured send attempt.
#[derive(Debug, Clone)]
pub struct SendAttempt {
    pub outgoing: Outgoing,
    pub at: Instant,
    /// False when the mock was told to fail this attempt.
    pub delivered: bool,
}

/// A mock messenger with call capture and injectable failures.
pub struct MockMessenger {
    attempts: Arc<Mutex<Vec<SendAttempt>>>,
    fail_at: Option<(usize, String)>,
    return_ids: bool,
}

impl Default for MockMessenger {
    fn default() -> Self {
        Self {
            attempts: Arc::default(),
            fail_at: None,
            return_ids: true,
        }
    }
}

impl MockMessenger {
    pub fn new() -> Self {
        Self::default()
    }

    /// The send attempt with zero-based index `index` fails with `message`.
    pub fn failing_at(mut self, index: usize, message: &str) -> Self {
        self.fail_at = Some((index, message.to_string()));
        self
    }

    /// Receipts carry no message id, as when the bot response lacks one.
    pub fn without_message_ids(mut self) -> Self {
        self.return_ids = false;
        self
    }

    /// Every attempt so far, in order.
    pub async fn attempts(&self) -> Vec<SendAttempt> {
        self.attempts.lock().await.clone()
    }

    pub async fn attempt_count(&self) -> usize {
        self.attempts.lock().await.len()
    }

    async fn record(&self, outgoing: Outgoing) -> Result<DeliveryReceipt, CourierError> {
        let mut attempts = self.attempts.lock().await;
        let index = attempts.len();
        let failure = self
            .fail_at
            .as_ref()
            .filter(|(at, _)| *at == index)
            .map(|(_, message)| message.clone());

        attempts.push(SendAttempt {
            outgoing,
            at: Instant::now(),
            delivered: failure.is_none(),
        });

        match failure {
            Some(message) => Err(CourierError::delivery(message)),
            None => Ok(DeliveryReceipt {
                message_id: self.return_ids.then(|| (1000 + index).to_string()),
            }),
        }
    }
}

#[async_trait]
impl PluginAdapter for MockMessenger {
    fn name(&self) -> &str {
        "mock-messenger"
    }

    fn version(&self) -> semver::Version {
        semver::Version::new(0, 1, 0)
    }

    fn adapter_type(&self) -> AdapterType {
        AdapterType::Messenger
    }

    async fn health_check(&self) -> Result<HealthStatus, CourierError> {
        Ok(HealthStatus::Healthy)
    }
}

#[async_trait]
impl Messenger for MockMessenger {
    async fn send_text(&self, text: &str) -> Result<DeliveryReceipt, CourierError> {
        self.record(Outgoing::Text(text.to_string())).await
    }

    async fn send_photo(
        &self,
        photo: Vec<u8>,
        caption: &str,
    ) -> Result<DeliveryReceipt, CourierError> {
        self.record(Outgoing::Photo {
            bytes: photo,
            caption: caption.to_string(),
        })
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn captures_sends_and_numbers_receipts() {
        let messenger = MockMessenger::new();
        let first = messenger.send_text("hello").await.unwrap();
        let second = messenger.send_photo(vec![1, 2], "cap").await.unwrap();
        assert_eq!(first.message_id.as_deref(), Some("1000"));
        assert_eq!(second.message_id.as_deref(), Some("1001"));

        let attempts = messenger.attempts().await;
        assert_eq!(attempts.len(), 2);
        assert_eq!(attempts[0].outgoing, Outgoing::Text("hello".into()));
        assert!(attempts[1].outgoing.is_photo());
        assert_eq!(attempts[1].outgoing.text(), "cap");
    }

    #[tokio::test]
    async fn fails_only_the_chosen_attempt() {
        let messenger = MockMessenger::new().failing_at(1, "bot blocked");
        assert!(messenger.send_text("a").await.is_ok());
        let err = messenger.send_text("b").await.unwrap_err();
        assert!(err.to_string().contains("bot blocked"));
        assert!(messenger.send_text("c").await.is_ok());

        let delivered: Vec<bool> = messenger
            .attempts()
            .await
            .iter()
            .map(|a| a.delivered)
            .collect();
        assert_eq!(delivered, vec![true, false, true]);
    }

    #[tokio::test]
    async fn receipts_can_omit_ids() {
        let messenger = MockMessenger::new().without_message_ids();
        assert_eq!(messenger.send_text("x").await.unwrap().message_id, None);
    }
}
