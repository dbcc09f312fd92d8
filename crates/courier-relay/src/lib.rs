// SPDX-FileCopyrightText: 2026 Courier Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! The Courier relay pipeline.
//!
//! [`Relay::submit`] validates a [`Submission`], writes a pending record,
//! delivers it to the messenger (text, or a photo batch with a fixed pause
//! between photos) and writes the terminal status back to the same record.

pub mod attachment;
pub mod error;
pub mod notification;
pub mod relay;

pub use error::RelayError;
pub use notification::NotificationFormat;
pub use relay::{MISSING_FIELDS, Relay, RelayReceipt, RelaySettings, Submission};
