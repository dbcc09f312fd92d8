// SPDX-FileCopyrightText: 2026 Courier Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Outcome classes of a failed submission.

use courier_core::error::CourierError;
use courier_core::types::RecordId;
use thiserror::Error;

/// Why a submission did not end in a delivered notification.
#[derive(Debug, Error)]
pub enum RelayError {
    /// A required field is missing or empty. Nothing was persisted.
    #[error("{0}")]
    Validation(String),

    /// The bot or the store lacks credentials. Nothing was persisted.
    #[error("{0} not configured")]
    NotConfigured(&'static str),

    /// The pending record could not be written. No record id exists.
    #[error("failed to save message: {0}")]
    Persistence(#[source] CourierError),

    /// Delivery failed after the record was written; the record is marked
    /// failed (unless that update failed too).
    #[error("failed to send to Telegram: {message}")]
    Delivery { record_id: RecordId, message: String },
}

impl RelayError {
    /// Whether the caller, not the service, is at fault.
    pub fn is_client_error(&self) -> bool {
        matches!(self, Self::Validation(_))
    }

    /// The persisted record this failure belongs to, if one was created.
    pub fn record_id(&self) -> Option<&RecordId> {
        match self {
            Self::Delivery { record_id, .. } => Some(record_id),
            _ => None,
        }
    }
}
