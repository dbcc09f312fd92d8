// SPDX-FileCopyrightText: 2026 Courier Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Message record types and the values exchanged with adapters.

use std::fmt;

use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

/// Maximum sender name length stored on a record, in characters.
pub const SENDER_NAME_LIMIT: usize = 100;

/// Maximum delivery error length stored on a record, in characters.
pub const DELIVERY_ERROR_LIMIT: usize = 500;

/// Reference stored when the bot accepted a message but returned no id.
pub const UNKNOWN_REFERENCE: &str = "unknown";

/// Opaque record identifier assigned by the store on insert.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RecordId(pub String);

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Delivery status of a record.
///
/// A record starts `Pending` and moves exactly once to `Sent` or `Failed`.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, Serialize, Deserialize,
)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum DeliveryStatus {
    Pending,
    Sent,
    Failed,
}

impl DeliveryStatus {
    /// Whether this status is final.
    pub fn is_terminal(self) -> bool {
        !matches!(self, Self::Pending)
    }
}

/// A record about to be inserted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewRecord {
    pub sender_name: String,
    pub message_text: String,
    pub photo_count: usize,
    pub status: DeliveryStatus,
}

impl NewRecord {
    /// Builds a pending record, truncating the sender name to [`SENDER_NAME_LIMIT`].
    pub fn pending(sender_name: &str, message_text: &str, photo_count: usize) -> Self {
        Self {
            sender_name: truncate_chars(sender_name, SENDER_NAME_LIMIT).to_string(),
            message_text: message_text.to_string(),
            photo_count,
            status: DeliveryStatus::Pending,
        }
    }
}

/// The single terminal update applied to a record after delivery.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecordUpdate {
    Sent { reference: String },
    Failed { error: String },
}

impl RecordUpdate {
    /// Marks the record sent, substituting [`UNKNOWN_REFERENCE`] for a missing id.
    pub fn sent(reference: Option<String>) -> Self {
        Self::Sent {
            reference: reference.unwrap_or_else(|| UNKNOWN_REFERENCE.to_string()),
        }
    }

    /// Marks the record failed, truncating the error to [`DELIVERY_ERROR_LIMIT`].
    pub fn failed(error: &str) -> Self {
        Self::Failed {
            error: truncate_chars(error, DELIVERY_ERROR_LIMIT).to_string(),
        }
    }

    pub fn status(&self) -> DeliveryStatus {
        match self {
            Self::Sent { .. } => DeliveryStatus::Sent,
            Self::Failed { .. } => DeliveryStatus::Failed,
        }
    }
}

/// A persisted message record as seen by in-process stores.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MessageRecord {
    pub id: RecordId,
    pub sender_name: String,
    pub message_text: String,
    pub photo_count: usize,
    pub status: DeliveryStatus,
    pub delivery_reference: Option<String>,
    pub delivery_error: Option<String>,
}

impl MessageRecord {
    pub fn from_new(id: RecordId, record: NewRecord) -> Self {
        Self {
            id,
            sender_name: record.sender_name,
            message_text: record.message_text,
            photo_count: record.photo_count,
            status: record.status,
            delivery_reference: None,
            delivery_error: None,
        }
    }

    /// Applies a terminal update in place.
    pub fn apply(&mut self, update: RecordUpdate) {
        self.status = update.status();
        match update {
            RecordUpdate::Sent { reference } => self.delivery_reference = Some(reference),
            RecordUpdate::Failed { error } => self.delivery_error = Some(error),
        }
    }
}

/// What the messaging bot reported back for one accepted send.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DeliveryReceipt {
    /// The bot's message id, when it returned one.
    pub message_id: Option<String>,
}

/// Health status reported by adapter health checks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HealthStatus {
    Healthy,
    Degraded(String),
    Unhealthy(String),
}

/// Identifies which side of the relay an adapter sits on.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, Serialize, Deserialize,
)]
pub enum AdapterType {
    Store,
    Messenger,
}

/// Returns the longest prefix of `s` holding at most `max` characters.
pub fn truncate_chars(s: &str, max: usize) -> &str {
    match s.char_indices().nth(max) {
        Some((idx, _)) => &s[..idx],
        None => s,
    }
}
