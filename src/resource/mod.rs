#[cfg(feature = "fs")]
pub mod file;

#[cfg(feature = "reqwest")]
pub mod reqwest;

#[cfg(feature = "fs")]
pub mod hybrid;

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use std::collections::BTreeMap;
use std::sync::Arc;

/// Source of raw bytes. Point-cloud files are always fetched whole; range
/// requests are available for callers that index into larger blobs.
#[async_trait]
pub trait ResourceClient: Send + Sync {
    async fn get(
        &self,
        url: &str,
        headers: Option<BTreeMap<String, String>>,
    ) -> Result<Vec<u8>, ResourceError>;

    async fn get_range(
        &self,
        url: &str,
        offset: u64,
        length: usize,
        headers: Option<BTreeMap<String, String>>,
    ) -> Result<Vec<u8>, ResourceError> {
        if length == 0 {
            return Ok(Vec::new());
        }

        // Compute the Range header
        let end = offset
            .checked_add(length as u64 - 1)
            .ok_or_else(|| ResourceError::Other("Range overflow".into()))?;
        let range_value = format!("bytes={}-{}", offset, end);

        // Merge headers
        let mut all_headers = headers.unwrap_or_default();
        all_headers.insert("Range".to_string(), range_value);

        self.get(url, Some(all_headers)).await
    }

    async fn get_json<T: DeserializeOwned + Send>(
        &self,
        url: &str,
        headers: Option<BTreeMap<String, String>>,
    ) -> Result<T, ResourceError> {
        let bytes = self.get(url, headers).await?;
        Ok(serde_json::from_slice(&bytes)?)
    }
}

#[async_trait]
impl<C: ResourceClient> ResourceClient for Arc<C> {
    async fn get(
        &self,
        url: &str,
        headers: Option<BTreeMap<String, String>>,
    ) -> Result<Vec<u8>, ResourceError> {
        (**self).get(url, headers).await
    }

    async fn get_range(
        &self,
        url: &str,
        offset: u64,
        length: usize,
        headers: Option<BTreeMap<String, String>>,
    ) -> Result<Vec<u8>, ResourceError> {
        (**self).get_range(url, offset, length, headers).await
    }

    async fn get_json<T: DeserializeOwned + Send>(
        &self,
        url: &str,
        headers: Option<BTreeMap<String, String>>,
    ) -> Result<T, ResourceError> {
        (**self).get_json(url, headers).await
    }
}

#[async_trait]
impl<C: ResourceClient> ResourceClient for &C {
    async fn get(
        &self,
        url: &str,
        headers: Option<BTreeMap<String, String>>,
    ) -> Result<Vec<u8>, ResourceError> {
        (**self).get(url, headers).await
    }

    async fn get_range(
        &self,
        url: &str,
        offset: u64,
        length: usize,
        headers: Option<BTreeMap<String, String>>,
    ) -> Result<Vec<u8>, ResourceError> {
        (**self).get_range(url, offset, length, headers).await
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ResourceError {
    #[error("Network error: {0}")]
    Network(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Unexpected HTTP status code: {0}")]
    Status(u16),

    #[error("File error: {0}")]
    File(#[from] std::io::Error),

    #[error("{0}")]
    Other(String),

    #[error("Unsupported scheme: {0}")]
    Unsupported(String),
}

/// A url bound to the client that serves it.
#[derive(Clone, Debug)]
pub struct Resource<C: ResourceClient> {
    url: String,
    client: C,
}

impl<C: ResourceClient> Resource<C> {
    pub fn new(url: &str, client: C) -> Self {
        Self {
            url: url.to_string(),
            client,
        }
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub async fn get(
        &self,
        headers: Option<BTreeMap<String, String>>,
    ) -> Result<Vec<u8>, ResourceError> {
        self.client.get(&self.url, headers).await
    }

    pub async fn get_range(
        &self,
        offset: u64,
        length: usize,
        headers: Option<BTreeMap<String, String>>,
    ) -> Result<Vec<u8>, ResourceError> {
        self.client
            .get_range(&self.url, offset, length, headers)
            .await
    }

    pub async fn get_json<T: DeserializeOwned + Send>(
        &self,
        headers: Option<BTreeMap<String, String>>,
    ) -> Result<T, ResourceError> {
        self.client.get_json(&self.url, headers).await
    }
}
