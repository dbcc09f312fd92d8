// SPDX-FileCopyrightText: 2026 Courier Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Delivery trait for the notification bot.

use async_trait::async_trait;

use crate::error::CourierError;
use crate::traits::adapter::PluginAdapter;
use crate::types::DeliveryReceipt;

/// Sends notifications to one preconfigured chat.
///
/// Credentials and the destination are bound when the messenger is built,
/// so callers only supply content. Text and captions arrive already
/// formatted for the messenger's markup dialect.
#[async_trait]
pub trait Messenger: PluginAdapter {
    /// Sends a text notification.
    async fn send_text(&self, text: &str) -> Result<DeliveryReceipt, CourierError>;

    /// Sends a binary image with a caption (possibly empty).
    async fn send_photo(
        &self,
        photo: Vec<u8>,
        caption: &str,
    ) -> Result<DeliveryReceipt, CourierError>;
}
