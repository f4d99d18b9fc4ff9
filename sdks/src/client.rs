// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0

use reqwest::{Client, RequestBuilder};
use serde::de::DeserializeOwned;
use std::time::Duration;

use crate::error::{error_message, ClientError};
use antiplag_core::domain::{CompositeWorkView, NewWork};

/// Client for the antiplag gateway.
#[derive(Debug, Clone)]
pub struct AntiplagClient {
    base_url: String,
    client: Client,
}

impl AntiplagClient {
    /// Create a new client for the gateway at `base_url`.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            client: Client::new(),
        }
    }

    /// Bound every request by `timeout`.
    pub fn with_timeout(mut self, timeout: Duration) -> Result<Self, ClientError> {
        self.client = Client::builder().timeout(timeout).build()?;
        Ok(self)
    }

    /// Submit a work. The answer carries the stored work and its pending report.
    pub async fn submit_work(&self, work: &NewWork) -> Result<CompositeWorkView, ClientError> {
        let url = format!("{}/works", self.base_url);
        send(self.client.post(&url).json(work)).await
    }

    /// Fetch a work with its report. A degraded view sets `message` and
    /// leaves the unavailable side empty.
    pub async fn get_work(&self, id: i64) -> Result<CompositeWorkView, ClientError> {
        let url = format!("{}/works/{}", self.base_url, id);
        send(self.client.get(&url)).await
    }
}

async fn send<T: DeserializeOwned>(request: RequestBuilder) -> Result<T, ClientError> {
    let response = request.send().await?;
    let status = response.status();

    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        return Err(ClientError::Api {
            status,
            message: error_message(&body),
        });
    }

    Ok(response.json().await?)
}
