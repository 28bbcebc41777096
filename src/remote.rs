//! Realtime-database REST backend: every path maps to `{base}/{path}.json`.

use crate::errors::StoreError;
use crate::store::{LedgerStore, split_path};
use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, Response, Url};
use serde::Deserialize;
use serde_json::{Map, Value};
use tracing::debug;

pub struct RemoteStore {
    client: Client,
    base_url: String,
    auth: Option<String>,
}

#[derive(Debug, Deserialize)]
struct PushResponse {
    name: String,
}

impl RemoteStore {
    pub fn new(client: Client, base_url: impl Into<String>, auth: Option<String>) -> Self {
        Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            auth,
        }
    }

    /// Percent-encodes every segment, so `?`, `%` or spaces in item names stay
    /// part of the path.
    fn url(&self, path: &str) -> Result<Url, StoreError> {
        let mut segments = split_path(path)?;
        let invalid_base = || StoreError::InvalidPath(self.base_url.clone());
        let last = segments
            .pop()
            .map(|segment| format!("{segment}.json"))
            .ok_or_else(invalid_base)?;
        let mut url = Url::parse(&self.base_url).map_err(|_| invalid_base())?;
        url.path_segments_mut()
            .map_err(|_| invalid_base())?
            .pop_if_empty()
            .extend(segments)
            .push(&last);
        Ok(url)
    }

    fn authorize(&self, request: RequestBuilder) -> RequestBuilder {
        match &self.auth {
            Some(token) => request.query(&[("auth", token)]),
            None => request,
        }
    }

    async fn send(&self, request: RequestBuilder) -> Result<Response, StoreError> {
        let response = self.authorize(request).send().await?;
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        let body = response.text().await.unwrap_or_default();
        Err(StoreError::Status {
            status: status.as_u16(),
            body,
        })
    }
}

#[async_trait]
impl LedgerStore for RemoteStore {
    async fn get(&self, path: &str) -> Result<Option<Value>, StoreError> {
        let url = self.url(path)?;
        let value: Value = self.send(self.client.get(url)).await?.json().await?;
        debug!(%path, "remote get");
        Ok(match value {
            Value::Null => None,
            value => Some(value),
        })
    }

    async fn set(&self, path: &str, value: Value) -> Result<(), StoreError> {
        let url = self.url(path)?;
        self.send(self.client.put(url).json(&value)).await?;
        debug!(%path, "remote set");
        Ok(())
    }

    async fn update(&self, path: &str, partial: Map<String, Value>) -> Result<(), StoreError> {
        let url = self.url(path)?;
        self.send(self.client.patch(url).json(&partial)).await?;
        debug!(%path, "remote update");
        Ok(())
    }

    async fn remove(&self, path: &str) -> Result<(), StoreError> {
        let url = self.url(path)?;
        self.send(self.client.delete(url)).await?;
        debug!(%path, "remote remove");
        Ok(())
    }

    async fn push(&self, path: &str, value: Value) -> Result<String, StoreError> {
        let url = self.url(path)?;
        let created: PushResponse = self.send(self.client.post(url).json(&value)).await?.json().await?;
        debug!(%path, id = %created.name, "remote push");
        Ok(created.name)
    }
}
