// SPDX-FileCopyrightText: 2026 Courier Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! In-memory message store for deterministic tests.
//!
//! `MockStore` implements `MessageStore`, keeps every record it was given,
//! and can be told to fail inserts or updates.

use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::Mutex;

use courier_core::CourierError;
use courier_core::traits::{MessageStore, PluginAdapter};
use courier_core::types::{
    AdapterType, HealthStatus, MessageRecord, NewRecord, RecordId, RecordUpdate,
};

/// A mock store backed by a vector of records.
#[derive(Default)]
pub struct MockStore {
    records: Arc<Mutex<Vec<MessageRecord>>>,
    updates: Arc<Mutex<Vec<(RecordId, RecordUpdate)>>>,
    insert_failure: Option<String>,
    update_failure: Option<String>,
}

impl MockStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every `insert` fails with a storage error carrying `message`.
    pub fn failing_insert(mut self, message: &str) -> Self {
        self.insert_failure = Some(message.to_string());
        self
    }

    /// Every `update` fails with a storage error carrying `message`.
    pub fn failing_update(mut self, message: &str) -> Self {
        self.update_failure = Some(message.to_string());
        self
    }

    /// Snapshot of all stored records, in insertion order.
    pub async fn records(&self) -> Vec<MessageRecord> {
        self.records.lock().await.clone()
    }

    /// Looks up one record by id.
    pub async fn record(&self, id: &RecordId) -> Option<MessageRecord> {
        self.records
            .lock()
            .await
            .iter()
            .find(|r| &r.id == id)
            .cloned()
    }

    /// Every update call received, including ones that were made to fail.
    pub async fn updates(&self) -> Vec<(RecordId, RecordUpdate)> {
        self.updates.lock().await.clone()
    }
}

#[async_trait]
impl PluginAdapter for MockStore {
    fn name(&self) -> &str {
        "mock-store"
    }

    fn version(&self) -> semver::Version {
        semver::Version::new(0, 1, 0)
    }

    fn adapter_type(&self) -> AdapterType {
        AdapterType::Store
    }

    async fn health_check(&self) -> Result<HealthStatus, CourierError> {
        Ok(HealthStatus::Healthy)
    }
}

#[async_trait]
impl MessageStore for MockStore {
    async fn insert(&self, record: NewRecord) -> Result<RecordId, CourierError> {
        if let Some(message) = &self.insert_failure {
            return Err(CourierError::storage(message.clone()));
        }
        let id = RecordId(uuid::Uuid::new_v4().to_string());
        self.records
            .lock()
            .await
            .push(MessageRecord::from_new(id.clone(), record));
        Ok(id)
    }

    async fn update(&self, id: &RecordId, update: RecordUpdate) -> Result<(), CourierError> {
        self.updates.lock().await.push((id.clone(), update.clone()));
        if let Some(message) = &self.update_failure {
            return Err(CourierError::storage(message.clone()));
        }
        let mut records = self.records.lock().await;
        let record = records
            .iter_mut()
            .find(|r| &r.id == id)
            .ok_or_else(|| CourierError::storage(format!("no record with id {id}")))?;
        record.apply(update);
        Ok(())
    }
}
