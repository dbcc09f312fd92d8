// SPDX-FileCopyrightText: 2026 Courier Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! PostgREST-backed [`MessageStore`] for the Courier relay.
//!
//! Talks to the REST interface Supabase exposes at `/rest/v1/<table>`:
//! `POST` with `Prefer: return=representation` to insert and read back the
//! assigned id, `PATCH ?id=eq.<id>` to apply the terminal update.

mod rows;

use std::time::Duration;

use async_trait::async_trait;
use courier_config::model::StorageConfig;
use courier_core::error::CourierError;
use courier_core::redact::redact;
use courier_core::traits::{MessageStore, PluginAdapter};
use courier_core::types::{AdapterType, HealthStatus, NewRecord, RecordId, RecordUpdate};
use reqwest::header::{AUTHORIZATION, HeaderMap, HeaderValue};
use secrecy::{ExposeSecret, SecretString};
use tracing::{debug, warn};
use url::Url;

use crate::rows::{InsertRow, InsertedRow, UpdateRow};

/// Message store over a PostgREST endpoint.
#[derive(Debug, Clone)]
pub struct PostgrestStore {
    client: reqwest::Client,
    endpoint: Url,
    api_key: SecretString,
    timeout: Duration,
}

impl PostgrestStore {
    /// Builds a store from config.
    ///
    /// Fails with [`CourierError::Config`] when the URL or key is missing or
    /// the URL does not parse.
    pub fn new(config: &StorageConfig) -> Result<Self, CourierError> {
        let base = non_empty(config.url.as_deref())
            .ok_or_else(|| CourierError::Config("storage.url is required".into()))?;
        let api_key = non_empty(config.api_key.as_deref())
            .ok_or_else(|| CourierError::Config("storage.api_key is required".into()))?;

        let endpoint = Url::parse(&format!(
            "{}/rest/v1/{}",
            base.trim_end_matches('/'),
            config.table
        ))
        .map_err(|e| CourierError::Config(format!("storage.url `{base}` is invalid: {e}")))?;

        let mut headers = HeaderMap::new();
        headers.insert("apikey", sensitive_header(api_key)?);
        headers.insert(AUTHORIZATION, sensitive_header(&format!("Bearer {api_key}"))?);

        let timeout = Duration::from_secs(config.timeout_secs);
        let client = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(timeout)
            .build()
            .map_err(|e| CourierError::Config(format!("failed to build HTTP client: {e}")))?;

        Ok(Self {
            client,
            endpoint,
            api_key: SecretString::from(api_key.to_string()),
            timeout,
        })
    }

    /// The table endpoint requests are sent to.
    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    fn scrub(&self, text: &str) -> String {
        redact(text, &[self.api_key.expose_secret()])
    }

    fn transport_error(&self, action: &str, err: reqwest::Error) -> CourierError {
        if err.is_timeout() {
            warn!(action, timeout = ?self.timeout, "PostgREST request timed out");
            return CourierError::Timeout {
                duration: self.timeout,
            };
        }
        let message = format!("{action} request failed: {}", self.scrub(&err.to_string()));
        warn!(action, error = %message, "PostgREST transport error");
        CourierError::Storage {
            message,
            source: Some(Box::new(err)),
        }
    }

    /// Passes 2xx responses through; turns anything else into a storage error
    /// carrying the response body.
    async fn check(
        &self,
        action: &str,
        response: reqwest::Response,
    ) -> Result<reqwest::Response, CourierError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        let body = response.text().await.unwrap_or_default();
        let message = format!("{action} returned {status}: {}", self.scrub(body.trim()));
        warn!(action, status = %status, "PostgREST rejected request");
        Err(CourierError::storage(message))
    }

    fn row_url(&self, id: &RecordId) -> Url {
        let mut url = self.endpoint.clone();
        url.query_pairs_mut().append_pair("id", &format!("eq.{id}"));
        url
    }
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

fn sensitive_header(value: &str) -> Result<HeaderValue, CourierError> {
    let mut header = HeaderValue::from_str(value)
        .map_err(|e| CourierError::Config(format!("invalid storage.api_key header value: {e}")))?;
    header.set_sensitive(true);
    Ok(header)
}

#[async_trait]
impl PluginAdapter for PostgrestStore {
    fn name(&self) -> &str {
        "postgrest"
    }

    fn version(&self) -> semver::Version {
        semver::Version::new(0, 1, 0)
    }

    fn adapter_type(&self) -> AdapterType {
        AdapterType::Store
    }

    async fn health_check(&self) -> Result<HealthStatus, CourierError> {
        let mut url = self.endpoint.clone();
        url.query_pairs_mut()
            .append_pair("select", "id")
            .append_pair("limit", "1");

        let response = match self.client.get(url).send().await {
            Ok(response) => response,
            Err(e) => {
                return Ok(HealthStatus::Unhealthy(format!(
                    "store unreachable: {}",
                    self.scrub(&e.to_string())
                )));
            }
        };

        let status = response.status();
        Ok(if status.is_success() {
            HealthStatus::Healthy
        } else if status.is_client_error() {
            // Reachable, but the key or table is wrong.
            HealthStatus::Degraded(format!("store answered {status}"))
        } else {
            HealthStatus::Unhealthy(format!("store answered {status}"))
        })
    }
}

#[async_trait]
impl MessageStore for PostgrestStore {
    async fn insert(&self, record: NewRecord) -> Result<RecordId, CourierError> {
        let response = self
            .client
            .post(self.endpoint.clone())
            .header("Prefer", "return=representation")
            .json(&InsertRow::from(&record))
            .send()
            .await
            .map_err(|e| self.transport_error("insert", e))?;

        let rows: Vec<InsertedRow> = self
            .check("insert", response)
            .await?
            .json()
            .await
            .map_err(|e| self.transport_error("insert", e))?;

        let id = rows
            .into_iter()
            .next()
            .ok_or_else(|| CourierError::storage("insert returned no rows"))?
            .into_record_id()?;

        debug!(record_id = %id, "record inserted");
        Ok(id)
    }

    async fn update(&self, id: &RecordId, update: RecordUpdate) -> Result<(), CourierError> {
        let response = self
            .client
            .patch(self.row_url(id))
            .header("Prefer", "return=minimal")
            .json(&UpdateRow::from(&update))
            .send()
            .await
            .map_err(|e| self.transport_error("update", e))?;

        self.check("update", response).await?;
        debug!(record_id = %id, status = %update.status(), "record updated");
        Ok(())
    }
}
