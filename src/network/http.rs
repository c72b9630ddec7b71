//! reqwest-backed network implementation.

use std::time::Duration;

use async_trait::async_trait;
use tracing::debug;
use url::Url;

use super::{FetchRequest, FetchResponse, Network, ResponseType};
use crate::error::{Result, WorkerError};

// == HTTP Network ==
/// Issues real HTTP requests and classifies responses against the app origin.
#[derive(Debug, Clone)]
pub struct HttpNetwork {
    client: reqwest::Client,
    origin: Url,
}

impl HttpNetwork {
    /// Creates a client for the given app origin.
    ///
    /// # Arguments
    /// * `app_origin` - Origin whose responses are classified as basic
    /// * `timeout` - Per-request timeout
    pub fn new(app_origin: &str, timeout: Duration) -> Result<Self> {
        let origin = Url::parse(app_origin)
            .map_err(|e| WorkerError::InvalidRequest(format!("bad origin {app_origin}: {e}")))?;

        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| WorkerError::Internal(format!("failed to build HTTP client: {e}")))?;

        Ok(Self { client, origin })
    }

    fn classify(&self, url: &Url) -> ResponseType {
        if url.origin() == self.origin.origin() {
            ResponseType::Basic
        } else {
            ResponseType::Cors
        }
    }
}

#[async_trait]
impl Network for HttpNetwork {
    async fn fetch(&self, request: &FetchRequest) -> Result<FetchResponse> {
        let url = Url::parse(&request.url)
            .map_err(|e| WorkerError::InvalidRequest(format!("{}: {e}", request.url)))?;

        debug!("{} {}", request.method, url);

        let response = self
            .client
            .request(request.method.clone(), url.clone())
            .headers(request.headers.clone())
            .body(request.body.clone())
            .send()
            .await
            .map_err(|e| WorkerError::Network(e.to_string()))?;

        let final_url = response.url().clone();
        let status = response.status();
        let headers = response.headers().clone();
        let body = response
            .bytes()
            .await
            .map_err(|e| WorkerError::Network(e.to_string()))?;

        Ok(FetchResponse {
            response_type: self.classify(&final_url),
            url: final_url.to_string(),
            status,
            headers,
            body,
        })
    }
}
