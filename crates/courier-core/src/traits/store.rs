// SPDX-FileCopyrightText: 2026 Courier Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Persistence trait for message records.

use async_trait::async_trait;

use crate::error::CourierError;
use crate::traits::adapter::PluginAdapter;
use crate::types::{NewRecord, RecordId, RecordUpdate};

/// A persistence service exposing insert and update-by-id.
///
/// Identifiers are assigned by the store; the relay never invents them.
#[async_trait]
pub trait MessageStore: PluginAdapter {
    /// Inserts a record and returns the identifier the store assigned.
    async fn insert(&self, record: NewRecord) -> Result<RecordId, CourierError>;

    /// Applies the terminal update to the record with the given id.
    async fn update(&self, id: &RecordId, update: RecordUpdate) -> Result<(), CourierError>;
}
