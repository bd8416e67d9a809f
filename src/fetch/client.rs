//! HTTP blob fetcher.
//!
//! # Responsibilities
//! - Load a resource's current source over HTTP
//! - Report each outcome back to the resource
//! - Follow source rewrites until success or no further rewrite happens

use std::time::Duration;

use reqwest::Client;
use thiserror::Error;
use url::Url;

use crate::config::FetchConfig;
use crate::failover::FailoverError;
use crate::observability::metrics;
use crate::resource::Resource;

/// Errors returned by [`BlobFetcher::fetch`].
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("failed to build HTTP client: {0}")]
    Client(reqwest::Error),

    /// A failure handler failed (e.g. the mirror list provider).
    #[error(transparent)]
    Failover(#[from] FailoverError),

    /// The last load failed and nothing rewrote the source.
    #[error("could not load {url} after {attempts} attempt(s): {last_error}")]
    Exhausted {
        url: String,
        attempts: usize,
        last_error: String,
    },
}

/// Why a single load failed.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("server returned status {0}")]
    Status(u16),

    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("body exceeds {0} bytes")]
    TooLarge(u64),
}

/// Content loaded by [`BlobFetcher::fetch`].
#[derive(Debug, Clone)]
pub struct FetchedBlob {
    /// The source that finally answered.
    pub url: Url,
    pub body: Vec<u8>,
    /// Loads performed, including the successful one.
    pub attempts: usize,
}

/// Loads resources over HTTP, driving their failure handlers.
#[derive(Debug, Clone)]
pub struct BlobFetcher {
    client: Client,
    max_body_bytes: u64,
}

impl BlobFetcher {
    pub fn new(config: &FetchConfig) -> Result<Self, FetchError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .user_agent(config.user_agent.clone())
            .build()
            .map_err(FetchError::Client)?;

        Ok(Self {
            client,
            max_body_bytes: config.max_body_bytes,
        })
    }

    /// Load `resource`, reporting failures so attached handlers can redirect it.
    ///
    /// Stops at the first successful load, or when a failure leaves the source
    /// unchanged (mirrors exhausted, no list, or no failover attached).
    pub async fn fetch(&self, resource: &Resource) -> Result<FetchedBlob, FetchError> {
        let mut attempts = 0;
        loop {
            let url = resource.source();
            attempts += 1;

            match self.load(&url).await {
                Ok(body) => {
                    metrics::record_fetch_attempt("success");
                    resource.report_success();
                    tracing::info!(url = %url, attempts, bytes = body.len(), "Blob loaded");
                    return Ok(FetchedBlob { url, body, attempts });
                }
                Err(e) => {
                    metrics::record_fetch_attempt(match &e {
                        LoadError::Status(_) => "status",
                        _ => "error",
                    });
                    tracing::warn!(url = %url, attempt = attempts, error = %e, "Load failed");

                    resource.report_failure().await?;
                    if resource.source() == url {
                        return Err(FetchError::Exhausted {
                            url: url.to_string(),
                            attempts,
                            last_error: e.to_string(),
                        });
                    }
                }
            }
        }
    }

    /// Perform one GET of `url`.
    pub async fn load(&self, url: &Url) -> Result<Vec<u8>, LoadError> {
        let mut response = self.client.get(url.clone()).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(LoadError::Status(status.as_u16()));
        }
        if response.content_length().is_some_and(|len| len > self.max_body_bytes) {
            return Err(LoadError::TooLarge(self.max_body_bytes));
        }

        let mut body = Vec::new();
        while let Some(chunk) = response.chunk().await? {
            if (body.len() + chunk.len()) as u64 > self.max_body_bytes {
                return Err(LoadError::TooLarge(self.max_body_bytes));
            }
            body.extend_from_slice(&chunk);
        }
        Ok(body)
    }
}
