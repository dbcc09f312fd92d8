// SPDX-FileCopyrightText: 2026 Courier Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Error types shared by the Courier adapters and the relay pipeline.

use thiserror::Error;

/// The error type returned by every store and messenger operation.
#[derive(Debug, Error)]
pub enum CourierError {
    /// Missing or malformed configuration (credentials, URLs, limits).
    #[error("configuration error: {0}")]
    Config(String),

    /// The persistence service rejected or failed an operation.
    #[error("storage error: {message}")]
    Storage {
        message: String,
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// The messaging bot rejected a send, or the transport failed.
    #[error("delivery error: {message}")]
    Delivery {
        message: String,
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// An attachment payload could not be turned into bytes.
    #[error("invalid attachment: {0}")]
    Attachment(String),

    /// An outbound request exceeded its configured timeout.
    #[error("operation timed out after {duration:?}")]
    Timeout { duration: std::time::Duration },

    /// Internal or unexpected errors.
    #[error("internal error: {0}")]
    Internal(String),
}

impl CourierError {
    /// Shorthand for a storage error without an underlying source.
    pub fn storage(message: impl Into<String>) -> Self {
        Self::Storage {
            message: message.into(),
            source: None,
        }
    }

    /// Shorthand for a delivery error without an underlying source.
    pub fn delivery(message: impl Into<String>) -> Self {
        Self::Delivery {
            message: message.into(),
            source: None,
        }
    }
}
