use async_trait::async_trait;
use models::{Record, RecordPatch};
use reqwest::Url;
use tracing::{debug, warn};

use crate::errors::ClientError;

/// Sends a validated patch for one record and returns the server's copy.
#[async_trait]
pub trait RecordUpdater: Send + Sync {
    async fn patch(&self, id: &str, patch: &RecordPatch) -> Result<Record, ClientError>;
}

/// HTTP client for `GET /records` and `PATCH /records/{id}`.
#[derive(Clone, Debug)]
pub struct RecordsClient {
    http: reqwest::Client,
    base_url: Url,
}

impl RecordsClient {
    /// `base_url` is the server root, e.g. `http://127.0.0.1:8080`.
    pub fn new(base_url: &str) -> Result<Self, ClientError> {
        Self::with_client(reqwest::Client::new(), base_url)
    }

    pub fn with_client(http: reqwest::Client, base_url: &str) -> Result<Self, ClientError> {
        let base_url = Url::parse(base_url).map_err(|e| ClientError::BaseUrl(e.to_string()))?;
        if base_url.cannot_be_a_base() {
            return Err(ClientError::BaseUrl(base_url.to_string()));
        }
        Ok(Self { http, base_url })
    }

    fn records_url(&self, id: Option<&str>) -> Result<Url, ClientError> {
        let mut url = self.base_url.clone();
        {
            let mut segments = url
                .path_segments_mut()
                .map_err(|_| ClientError::BaseUrl(self.base_url.to_string()))?;
            segments.pop_if_empty().push("records");
            if let Some(id) = id {
                segments.push(id);
            }
        }
        Ok(url)
    }

    pub async fn list(&self) -> Result<Vec<Record>, ClientError> {
        let url = self.records_url(None)?;
        let res = self.http.get(url).send().await?;
        let records: Vec<Record> = check_status(res).await?.json().await?;
        debug!(count = records.len(), "records loaded");
        Ok(records)
    }

    pub async fn patch(&self, id: &str, patch: &RecordPatch) -> Result<Record, ClientError> {
        let url = self.records_url(Some(id))?;
        let res = self.http.patch(url).json(patch).send().await?;
        let record = check_status(res).await?.json().await?;
        Ok(record)
    }
}

async fn check_status(res: reqwest::Response) -> Result<reqwest::Response, ClientError> {
    let status = res.status();
    if status.is_success() {
        return Ok(res);
    }
    let body = res.text().await.unwrap_or_default();
    warn!(status = status.as_u16(), %body, "records request failed");
    Err(ClientError::Status { status: status.as_u16(), body })
}

#[async_trait]
impl RecordUpdater for RecordsClient {
    async fn patch(&self, id: &str, patch: &RecordPatch) -> Result<Record, ClientError> {
        RecordsClient::patch(self, id, patch).await
    }
}
