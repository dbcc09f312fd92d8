// SPDX-FileCopyrightText: 2026 Courier Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Adapter traits at the two edges of the relay: the store and the messenger.
//!
//! Both extend [`PluginAdapter`] and use `#[async_trait]` so the relay can
//! hold them as `Arc<dyn ...>` and tests can inject fakes.

pub mod adapter;
pub mod messenger;
pub mod store;

pub use adapter::PluginAdapter;
pub use messenger::Messenger;
pub use store::MessageStore;
