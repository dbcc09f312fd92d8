// SPDX-FileCopyrightText: 2026 Courier Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Wire shapes for the `messages` table.

use courier_core::error::CourierError;
use courier_core::types::{DeliveryStatus, NewRecord, RecordId, RecordUpdate};
use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize)]
pub(crate) struct InsertRow<'a> {
    pub sender_name: &'a str,
    pub message_text: &'a str,
    pub photo_count: usize,
    pub telegram_status: DeliveryStatus,
}

impl<'a> From<&'a NewRecord> for InsertRow<'a> {
    fn from(record: &'a NewRecord) -> Self {
        Self {
            sender_name: &record.sender_name,
            message_text: &record.message_text,
            photo_count: record.photo_count,
            telegram_status: record.status,
        }
    }
}

#[derive(Debug, Serialize)]
pub(crate) struct UpdateRow<'a> {
    pub telegram_status: DeliveryStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub telegram_message_id: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub telegram_error: Option<&'a str>,
}

impl<'a> From<&'a RecordUpdate> for UpdateRow<'a> {
    fn from(update: &'a RecordUpdate) -> Self {
        match update {
            RecordUpdate::Sent { reference } => Self {
                telegram_status: DeliveryStatus::Sent,
                telegram_message_id: Some(reference.as_str()),
                telegram_error: None,
            },
            RecordUpdate::Failed { error } => Self {
                telegram_status: DeliveryStatus::Failed,
                telegram_message_id: None,
                telegram_error: Some(error.as_str()),
            },
        }
    }
}

/// The only column read back from `return=representation`.
#[derive(Debug, Deserialize)]
pub(crate) struct InsertedRow {
    pub id: serde_json::Value,
}

impl InsertedRow {
    /// Tables may key on bigint or uuid; both become an opaque string.
    pub fn into_record_id(self) -> Result<RecordId, CourierError> {
        match self.id {
            serde_json::Value::String(s) if !s.is_empty() => Ok(RecordId(s)),
            serde_json::Value::Number(n) => Ok(RecordId(n.to_string())),
            other => Err(CourierError::storage(format!(
                "insert returned an unusable id: {other}"
            ))),
        }
    }
}
