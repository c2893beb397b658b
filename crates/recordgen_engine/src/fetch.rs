use std::time::Duration;

use engine_logging::engine_debug;
use futures_util::StreamExt;
use recordgen_core::{PageRequest, Record};
use reqwest::header::{ACCEPT, CONTENT_TYPE};
use serde::Serialize;

use crate::{FailureKind, FetchError};

/// Generation endpoint of the companion backend.
pub const DEFAULT_ENDPOINT: &str = "http://localhost:5000/api/generate";

#[derive(Debug, Clone)]
pub struct FetchSettings {
    pub endpoint: String,
    pub connect_timeout: Duration,
    pub request_timeout: Duration,
    pub max_bytes: u64,
}

impl Default for FetchSettings {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            connect_timeout: Duration::from_secs(10),
            request_timeout: Duration::from_secs(30),
            max_bytes: 1024 * 1024,
        }
    }
}

/// Performs one request for one page. No retries; callers decide.
#[async_trait::async_trait]
pub trait PageFetcher: Send + Sync {
    async fn fetch_page(&self, request: &PageRequest) -> Result<Vec<Record>, FetchError>;
}

/// Request body understood by the generation service.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateBody<'a> {
    region: &'a str,
    error_count: u8,
    seed: &'a str,
    page: u32,
    batch_size: u32,
}

impl<'a> From<&'a PageRequest> for GenerateBody<'a> {
    fn from(request: &'a PageRequest) -> Self {
        Self {
            region: request.spec.region.as_str(),
            error_count: request.spec.error_count,
            seed: &request.spec.seed,
            page: request.page,
            batch_size: request.batch_size,
        }
    }
}

#[derive(Debug, Clone)]
pub struct ReqwestPageFetcher {
    settings: FetchSettings,
    client: reqwest::Client,
}

impl ReqwestPageFetcher {
    pub fn new(settings: FetchSettings) -> Result<Self, FetchError> {
        let client = reqwest::Client::builder()
            .connect_timeout(settings.connect_timeout)
            .timeout(settings.request_timeout)
            .build()
            .map_err(|err| FetchError::new(FailureKind::Network, err.to_string()))?;
        Ok(Self { settings, client })
    }

    pub fn settings(&self) -> &FetchSettings {
        &self.settings
    }
}

#[async_trait::async_trait]
impl PageFetcher for ReqwestPageFetcher {
    async fn fetch_page(&self, request: &PageRequest) -> Result<Vec<Record>, FetchError> {
        let endpoint = reqwest::Url::parse(&self.settings.endpoint)
            .map_err(|err| FetchError::new(FailureKind::InvalidEndpoint, err.to_string()))?;
        let payload = serde_json::to_vec(&GenerateBody::from(request))
            .map_err(|err| FetchError::new(FailureKind::Protocol, err.to_string()))?;

        let response = self
            .client
            .post(endpoint)
            .header(CONTENT_TYPE, "application/json")
            .header(ACCEPT, "application/json")
            .body(payload)
            .send()
            .await
            .map_err(map_reqwest_error)?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::new(
                FailureKind::HttpStatus(status.as_u16()),
                status.to_string(),
            ));
        }

        if let Some(content_len) = response.content_length() {
            if content_len > self.settings.max_bytes {
                return Err(FetchError::new(
                    FailureKind::TooLarge {
                        max_bytes: self.settings.max_bytes,
                        actual: Some(content_len),
                    },
                    "response too large",
                ));
            }
        }

        let mut bytes = Vec::new();
        let mut stream = response.bytes_stream();
        while let Some(chunk) = stream.next().await {
            let chunk = chunk.map_err(map_reqwest_error)?;
            let next_len = bytes.len() as u64 + chunk.len() as u64;
            if next_len > self.settings.max_bytes {
                return Err(FetchError::new(
                    FailureKind::TooLarge {
                        max_bytes: self.settings.max_bytes,
                        actual: Some(next_len),
                    },
                    "response too large",
                ));
            }
            bytes.extend_from_slice(&chunk);
        }

        let records: Vec<Record> = serde_json::from_slice(&bytes)
            .map_err(|err| FetchError::new(FailureKind::Protocol, err.to_string()))?;
        if records.len() > request.batch_size as usize {
            return Err(FetchError::new(
                FailureKind::Protocol,
                format!(
                    "page {} holds {} records, batch size is {}",
                    request.page,
                    records.len(),
                    request.batch_size
                ),
            ));
        }

        engine_debug!(
            "Fetched page {} ({} records, {} bytes)",
            request.page,
            records.len(),
            bytes.len()
        );
        Ok(records)
    }
}

fn map_reqwest_error(err: reqwest::Error) -> FetchError {
    if err.is_timeout() {
        return FetchError::new(FailureKind::Timeout, err.to_string());
    }
    FetchError::new(FailureKind::Network, err.to_string())
}
