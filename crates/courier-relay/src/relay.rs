// SPDX-FileCopyrightText: 2026 Courier Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! The submission pipeline: validate, persist pending, deliver, reconcile.

use std::sync::Arc;
use std::time::Duration;

use chrono::{FixedOffset, Offset, Utc};
use courier_config::model::RelayConfig;
use courier_core::error::CourierError;
use courier_core::redact::redact;
use courier_core::traits::{MessageStore, Messenger};
use courier_core::types::{DeliveryReceipt, NewRecord, RecordId, RecordUpdate};
use tracing::{debug, error, info, warn};

use crate::attachment::decode_data_uri;
use crate::error::RelayError;
use crate::notification::NotificationFormat;

/// Message returned when a required field is missing or empty.
pub const MISSING_FIELDS: &str = "Sender name and message are required";

/// Runtime knobs for formatting and photo batching.
#[derive(Debug, Clone)]
pub struct RelaySettings {
    pub title: String,
    pub photo_delay: Duration,
    pub utc_offset: FixedOffset,
    pub caption_limit: usize,
    pub text_limit: usize,
}

impl From<&RelayConfig> for RelaySettings {
    fn from(config: &RelayConfig) -> Self {
        Self {
            title: config.title.clone(),
            photo_delay: Duration::from_millis(config.photo_delay_ms),
            utc_offset: config
                .utc_offset_minutes
                .checked_mul(60)
                .and_then(FixedOffset::east_opt)
                .unwrap_or_else(|| Utc.fix()),
            caption_limit: config.caption_limit,
            text_limit: config.text_limit,
        }
    }
}

impl Default for RelaySettings {
    fn default() -> Self {
        Self::from(&RelayConfig::default())
    }
}

/// One inbound message as the caller sent it.
#[derive(Debug, Clone, Default)]
pub struct Submission {
    pub sender_name: Option<String>,
    pub message: Option<String>,
    /// Data-URI encoded images, sent in order.
    pub photos: Vec<String>,
}

/// A delivered submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RelayReceipt {
    pub record_id: RecordId,
    /// Bot message id of the first delivered message, if the bot returned one.
    pub delivery_reference: Option<String>,
}

/// Drives a submission through the store and the messenger.
///
/// Either side may be absent (missing credentials); submissions then fail
/// with [`RelayError::NotConfigured`] before anything is written.
pub struct Relay {
    store: Option<Arc<dyn MessageStore>>,
    messenger: Option<Arc<dyn Messenger>>,
    format: NotificationFormat,
    settings: RelaySettings,
}

impl Relay {
    pub fn new(
        store: Option<Arc<dyn MessageStore>>,
        messenger: Option<Arc<dyn Messenger>>,
        settings: RelaySettings,
    ) -> Self {
        Self {
            store,
            messenger,
            format: NotificationFormat::new(settings.title.clone(), settings.utc_offset),
            settings,
        }
    }

    /// Whether both adapters are present.
    pub fn is_configured(&self) -> bool {
        self.store.is_some() && self.messenger.is_some()
    }

    /// Runs one submission to a terminal outcome.
    ///
    /// At most one record is created. Once it exists, it is moved to sent or
    /// failed before returning; a failing terminal update is logged and does
    /// not change the result.
    pub async fn submit(&self, submission: Submission) -> Result<RelayReceipt, RelayError> {
        let Submission {
            sender_name,
            message,
            photos,
        } = submission;

        let (Some(sender_name), Some(message)) = (
            sender_name.filter(|s| !s.is_empty()),
            message.filter(|m| !m.is_empty()),
        ) else {
            debug!("rejecting submission with missing fields");
            return Err(RelayError::Validation(MISSING_FIELDS.to_string()));
        };

        let Some(messenger) = self.messenger.as_deref() else {
            warn!("submission refused: Telegram bot not configured");
            return Err(RelayError::NotConfigured("Telegram bot"));
        };
        let Some(store) = self.store.as_deref() else {
            warn!("submission refused: storage not configured");
            return Err(RelayError::NotConfigured("Storage"));
        };

        let record = NewRecord::pending(&sender_name, &message, photos.len());
        let record_id = store.insert(record.clone()).await.map_err(|e| {
            error!(error = %e, "failed to save pending record");
            RelayError::Persistence(e)
        })?;
        info!(record_id = %record_id, photos = photos.len(), "message saved, delivering");

        match self
            .deliver(messenger, &record.sender_name, &message, &photos)
            .await
        {
            Ok(receipt) => {
                let reference = receipt.message_id;
                self.reconcile(store, &record_id, RecordUpdate::sent(reference.clone()))
                    .await;
                info!(record_id = %record_id, "message delivered");
                Ok(RelayReceipt {
                    record_id,
                    delivery_reference: reference,
                })
            }
            Err(e) => {
                let message = delivery_error_text(&e);
                error!(record_id = %record_id, error = %message, "delivery failed");
                self.reconcile(store, &record_id, RecordUpdate::failed(&message))
                    .await;
                Err(RelayError::Delivery { record_id, message })
            }
        }
    }

    /// Sends the notification, then any photos, stopping at the first error.
    ///
    /// Returns the receipt of the first message sent.
    async fn deliver(
        &self,
        messenger: &dyn Messenger,
        sender: &str,
        message: &str,
        photos: &[String],
    ) -> Result<DeliveryReceipt, CourierError> {
        let now = Utc::now();

        let Some((first, rest)) = photos.split_first() else {
            let text = self
                .format
                .render(sender, message, now, self.settings.text_limit);
            return messenger.send_text(&text).await;
        };

        let caption = self
            .format
            .render(sender, message, now, self.settings.caption_limit);
        let receipt = messenger.send_photo(decode_data_uri(first)?, &caption).await?;
        debug!(index = 1, total = photos.len(), "photo sent");

        for (offset, photo) in rest.iter().enumerate() {
            let index = offset + 2;
            tokio::time::sleep(self.settings.photo_delay).await;
            let caption =
                self.format
                    .photo_caption(index, photos.len(), sender, self.settings.caption_limit);
            messenger.send_photo(decode_data_uri(photo)?, &caption).await?;
            debug!(index, total = photos.len(), "photo sent");
        }

        Ok(receipt)
    }

    async fn reconcile(&self, store: &dyn MessageStore, id: &RecordId, update: RecordUpdate) {
        let status = update.status();
        if let Err(e) = store.update(id, update).await {
            error!(record_id = %id, status = %status, error = %e, "failed to update record status");
        }
    }
}

/// Error text safe to store and return: adapter prefixes dropped, secrets
/// scrubbed.
fn delivery_error_text(err: &CourierError) -> String {
    let text = match err {
        CourierError::Delivery { message, .. } => message.clone(),
        CourierError::Attachment(message) => format!("Invalid image: {message}"),
        other => other.to_string(),
    };
    redact(&text, &[])
}
