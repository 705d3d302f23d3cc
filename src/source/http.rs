//! HTTP transport backed by [`reqwest`].

use std::time::Duration;

use async_trait::async_trait;
use bytes::Bytes;
use reqwest::header::CONTENT_TYPE;
use reqwest::Client;
use tracing::debug;

use super::Transport;
use crate::error::TransportError;
use crate::query::RequestDescriptor;

const USER_AGENT: &str = concat!("falcon-flights/", env!("CARGO_PKG_VERSION"));

/// Sends requests to the launch API over HTTPS.
pub struct HttpTransport {
    client: Client,
    /// API root, e.g. `https://api.spacexdata.com/v5`.
    api_root: String,
}

impl HttpTransport {
    /// Create a transport for `api_root` with a per-request `timeout`.
    pub fn new(api_root: impl Into<String>, timeout: Duration) -> Result<Self, TransportError> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(USER_AGENT)
            .build()?;
        Ok(Self {
            client,
            api_root: api_root.into(),
        })
    }
}

#[async_trait]
impl Transport for HttpTransport {
    fn name(&self) -> &str {
        &self.api_root
    }

    async fn execute(&self, request: &RequestDescriptor) -> Result<Bytes, TransportError> {
        let url = request.url(&self.api_root);
        let body = serde_json::to_vec(&request.body).map_err(TransportError::Encode)?;
        debug!(%request, %url, bytes = body.len(), "sending request");

        let response = self
            .client
            .request(request.method.clone(), &url)
            .header(CONTENT_TYPE, RequestDescriptor::CONTENT_TYPE)
            .body(body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(TransportError::Status(status.as_u16()));
        }

        let bytes = response.bytes().await?;
        debug!(%request, %status, bytes = bytes.len(), "received response");
        Ok(bytes)
    }
}
