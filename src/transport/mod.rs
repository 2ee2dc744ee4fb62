//! Transport layer — abstracts the HTTP exchange with the remote API.

use async_trait::async_trait;
use serde_json::Value;

use crate::error::WikiResult;
use crate::params::WireParams;

pub mod http;

pub use http::HttpTransport;

/// HTTP method of one API call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
}

/// Where the wire parameters travel.
///
/// A query payload rides the URL of a GET; a form payload is the
/// form-encoded body of a POST. The placement fixes the method, so a
/// request can never pair a body with a GET.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Payload {
    Query(WireParams),
    Form(WireParams),
}

impl Payload {
    pub fn method(&self) -> Method {
        match self {
            Payload::Query(_) => Method::Get,
            Payload::Form(_) => Method::Post,
        }
    }

    pub fn params(&self) -> &WireParams {
        match self {
            Payload::Query(wire) => wire,
            Payload::Form(wire) => wire,
        }
    }
}

/// One outbound API call: payload plus extra request headers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransportRequest {
    pub payload: Payload,
    pub headers: Vec<(String, String)>,
}

impl TransportRequest {
    pub fn new(payload: Payload) -> Self {
        Self {
            payload,
            headers: Vec::new(),
        }
    }

    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }

    pub fn method(&self) -> Method {
        self.payload.method()
    }
}

/// One inbound API reply: response headers (repeats preserved, most
/// importantly `Set-Cookie`) and the decoded JSON body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransportResponse {
    pub headers: Vec<(String, String)>,
    pub body: Value,
}

impl TransportResponse {
    /// Response carrying only a JSON body, no headers.
    pub fn json(body: Value) -> Self {
        Self {
            headers: Vec::new(),
            body,
        }
    }
}

/// Transport trait for carrying one request/response exchange.
#[async_trait]
pub trait Transport: Send + Sync {
    /// Send a request and wait for the decoded response.
    async fn send(&self, request: TransportRequest) -> WikiResult<TransportResponse>;
}


#[cfg(test)]
mod tests {
    use super::mock::MockTransport;
    use super::*;
    use crate::error::WikiError;
    use serde_json::json;

    #[test]
    fn payload_fixes_the_method() {
        assert_eq!(Payload::Query(vec![]).method(), Method::Get);
        assert_eq!(Payload::Form(vec![]).method(), Method::Post);
    }

    #[tokio::test]
    async fn mock_returns_queued_responses_in_order() {
        let transport = MockTransport::new(vec![
            TransportResponse::json(json!({"n": 1})),
            TransportResponse::json(json!({"n": 2})),
        ]);

        let first = transport
            .send(TransportRequest::new(Payload::Query(vec![])))
            .await
            .unwrap();
        let second = transport
            .send(TransportRequest::new(Payload::Query(vec![])))
            .await
            .unwrap();
        assert_eq!(first.body, json!({"n": 1}));
        assert_eq!(second.body, json!({"n": 2}));
    }

    #[tokio::test]
    async fn mock_records_requests() {
        let transport = MockTransport::new(vec![TransportResponse::json(json!({}))]);
        let request = TransportRequest::new(Payload::Form(vec![(
            "action".to_string(),
            "login".to_string(),
        )]))
        .with_header("Cookie", "s=1");

        transport.send(request).await.unwrap();

        let sent = transport.sent_requests();
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].method(), Method::Post);
        assert_eq!(sent[0].payload.params()[0].1, "login");
        assert_eq!(sent[0].headers[0], ("Cookie".to_string(), "s=1".to_string()));
    }

    #[tokio::test]
    async fn mock_empty_queue_errors() {
        let transport = MockTransport::new(vec![]);
        let err = transport
            .send(TransportRequest::new(Payload::Query(vec![])))
            .await
            .unwrap_err();
        assert!(matches!(err, WikiError::Transport(_)));
    }
}
