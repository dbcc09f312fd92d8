// SPDX-FileCopyrightText: 2026 Courier Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Core library for the Courier message relay.
//!
//! Defines the message record model, the two adapter traits the relay
//! drives ([`MessageStore`] and [`Messenger`]), the shared error type, and
//! secret redaction for error text.

pub mod error;
pub mod redact;
pub mod traits;
pub mod types;

pub use error::CourierError;
pub use traits::{MessageStore, Messenger, PluginAdapter};
pub use types::{
    AdapterType, DeliveryReceipt, DeliveryStatus, HealthStatus, MessageRecord, NewRecord,
    RecordId, RecordUpdate,
};
