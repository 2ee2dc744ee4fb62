//! HTTP transport backed by a shared `reqwest` client.

use async_trait::async_trait;
use reqwest::Client;
use serde_json::Value;
use url::Url;

use crate::error::{WikiError, WikiResult};

use super::{Payload, Transport, TransportRequest, TransportResponse};

const USER_AGENT: &str = concat!("wikibot-core/", env!("CARGO_PKG_VERSION"));

/// Sends requests to one fixed API endpoint.
///
/// The underlying client is configured once (user agent, gzip) and
/// shared by every session derived from it; the transport itself holds
/// no per-request state.
#[derive(Debug)]
pub struct HttpTransport {
    client: Client,
    endpoint: Url,
}

impl HttpTransport {
    /// Build a transport bound to an API endpoint URL.
    pub fn new(base_url: &str) -> WikiResult<Self> {
        let client = Client::builder()
            .user_agent(USER_AGENT)
            .gzip(true)
            .build()
            .map_err(|e| WikiError::Config(format!("cannot build HTTP client: {e}")))?;
        Self::with_client(client, base_url)
    }

    /// Reuse an externally configured client, e.g. with custom timeouts.
    pub fn with_client(client: Client, base_url: &str) -> WikiResult<Self> {
        let endpoint = Url::parse(base_url)
            .map_err(|e| WikiError::Config(format!("invalid base URL {base_url:?}: {e}")))?;
        if !matches!(endpoint.scheme(), "http" | "https") {
            return Err(WikiError::Config(format!(
                "unsupported URL scheme {:?} in {base_url:?}",
                endpoint.scheme()
            )));
        }
        Ok(Self { client, endpoint })
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn send(&self, request: TransportRequest) -> WikiResult<TransportResponse> {
        let builder = match &request.payload {
            Payload::Query(wire) => self.client.get(self.endpoint.clone()).query(wire),
            Payload::Form(wire) => self.client.post(self.endpoint.clone()).form(wire),
        };
        let builder = request
            .headers
            .iter()
            .fold(builder, |b, (name, value)| b.header(name.as_str(), value.as_str()));

        let response = builder.send().await?.error_for_status()?;

        // Collect headers before the body read consumes the response.
        // Repeated names stay repeated; Set-Cookie depends on it.
        let headers = response
            .headers()
            .iter()
            .map(|(name, value)| {
                (
                    name.as_str().to_string(),
                    String::from_utf8_lossy(value.as_bytes()).into_owned(),
                )
            })
            .collect();
        let body = response.json::<Value>().await?;

        Ok(TransportResponse { headers, body })
    }
}
