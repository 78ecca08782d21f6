//! Remote directory of available server regions.

use super::error::DirectoryError;
use super::model::{DirectoryResponse, RegionDescriptor};
use async_trait::async_trait;
use reqwest::StatusCode;

pub const DEFAULT_ENDPOINT: &str = "https://api.redro.ru/api/settings/get-servers";

#[async_trait]
pub trait DirectoryService: Send + Sync {
    /// Fetch the ordered list of regions. One request, no retry.
    async fn fetch_regions(&self) -> Result<Vec<RegionDescriptor>, DirectoryError>;
}

/// Directory backed by a plain HTTP GET.
pub struct HttpDirectory {
    client: reqwest::Client,
    endpoint: String,
}

impl HttpDirectory {
    pub fn new(endpoint: impl Into<String>) -> Result<Self, DirectoryError> {
        let client = reqwest::Client::builder()
            .user_agent(format!("regionpick/{}", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self {
            client,
            endpoint: endpoint.into(),
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait]
impl DirectoryService for HttpDirectory {
    async fn fetch_regions(&self) -> Result<Vec<RegionDescriptor>, DirectoryError> {
        tracing::debug!(endpoint = %self.endpoint, "fetching regions");
        let resp = self.client.get(&self.endpoint).send().await?;

        let status = resp.status();
        if status == StatusCode::NOT_FOUND {
            return Err(DirectoryError::NotFound);
        }
        if !status.is_success() {
            return Err(DirectoryError::Status {
                status: status.as_u16(),
                reason: status.canonical_reason().unwrap_or("").to_string(),
            });
        }

        // Read as text first so a bad body surfaces as a parse error rather
        // than a transport error.
        let body = resp.text().await?;
        let parsed: DirectoryResponse = serde_json::from_str(&body)?;
        tracing::info!(count = parsed.payload.len(), "fetched regions");
        Ok(parsed.payload)
    }
}
