// SPDX-FileCopyrightText: 2026 Courier Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Test doubles for the Courier relay.
//!
//! - [`MockStore`]: in-memory `MessageStore` with injectable failures
//! - [`MockMessenger`]: `Messenger` that captures every send attempt

pub mod mock_messenger;
pub mod mock_store;

pub use mock_messenger::{MockMessenger, Outgoing, SendAttempt};
pub use mock_store::MockStore;
