use super::{ResourceClient, ResourceError};
use async_trait::async_trait;
use std::collections::BTreeMap;
use std::io::SeekFrom;
use tokio::io::{AsyncReadExt, AsyncSeekExt};
use tracing::trace;

/// Reads `file://` urls from the local filesystem. Headers are ignored.
#[derive(Clone, Copy, Debug, Default)]
pub struct FileClient;

fn file_path(url: &str) -> Result<&str, ResourceError> {
    url.strip_prefix("file://").ok_or_else(|| {
        ResourceError::Unsupported("This client supports only file:// urls.".to_string())
    })
}

#[async_trait]
impl ResourceClient for FileClient {
    async fn get(
        &self,
        url: &str,
        _headers: Option<BTreeMap<String, String>>,
    ) -> Result<Vec<u8>, ResourceError> {
        let path = file_path(url)?;
        let bytes = tokio::fs::read(path).await?;
        trace!(path, len = bytes.len(), "read file");
        Ok(bytes)
    }

    async fn get_range(
        &self,
        url: &str,
        offset: u64,
        length: usize,
        _headers: Option<BTreeMap<String, String>>,
    ) -> Result<Vec<u8>, ResourceError> {
        let path = file_path(url)?;
        let mut file = tokio::fs::File::open(path).await?;
        file.seek(SeekFrom::Start(offset)).await?;
        let mut bytes = vec![0; length];
        file.read_exact(&mut bytes).await?;
        Ok(bytes)
    }
}
