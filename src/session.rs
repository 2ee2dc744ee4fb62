//! Immutable session state and the request/response cycle.

use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use tracing::debug;

use crate::cookie;
use crate::error::{WikiError, WikiResult};
use crate::merge::merge;
use crate::params::Params;
use crate::stream::QueryStream;
use crate::transport::{HttpTransport, Payload, Transport, TransportRequest};

/// Session behavior flags.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionOptions {
    /// Replace the accumulated result with each response body instead
    /// of merging into it.
    #[serde(default)]
    pub overwrite: bool,
}

/// Immutable client state for one API conversation.
///
/// Every operation consumes the session and returns a new one whose
/// cookie and result reflect exactly one more network round trip. The
/// transport handle and options ride along unchanged. Independent
/// sessions may run concurrently; within one lineage the ownership
/// transfer keeps requests strictly sequential.
#[derive(Clone)]
pub struct Session {
    transport: Arc<dyn Transport>,
    cookie: Option<String>,
    options: SessionOptions,
    result: Value,
}

impl fmt::Debug for Session {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Session")
            .field("cookie", &self.cookie)
            .field("options", &self.options)
            .field("result", &self.result)
            .finish_non_exhaustive()
    }
}

impl Session {
    /// Open a session against an API endpoint. No network call is made.
    pub fn new(base_url: &str, options: SessionOptions) -> WikiResult<Self> {
        let transport = HttpTransport::new(base_url)?;
        Ok(Self::with_transport(Arc::new(transport), options))
    }

    /// Build a session over any transport implementation.
    pub fn with_transport(transport: Arc<dyn Transport>, options: SessionOptions) -> Self {
        Self {
            transport,
            cookie: None,
            options,
            result: json!({}),
        }
    }

    /// Derive a session with the overwrite flag changed; cookie and
    /// accumulated result carry over.
    pub fn with_overwrite(mut self, overwrite: bool) -> Self {
        self.options.overwrite = overwrite;
        self
    }

    /// Accumulated result tree of all requests made so far.
    pub fn result(&self) -> &Value {
        &self.result
    }

    pub fn into_result(self) -> Value {
        self.result
    }

    /// Serialized cookie string, `None` until a response sets one.
    pub fn cookie(&self) -> Option<&str> {
        self.cookie.as_deref()
    }

    pub fn options(&self) -> SessionOptions {
        self.options
    }

    /// Top-level error object reported in-band by the API, if any.
    pub fn api_error(&self) -> Option<&Value> {
        self.result.get("error")
    }

    /// Issue a GET carrying the parameters in the query string.
    pub async fn get(self, params: Params) -> WikiResult<Session> {
        let wire = params.normalize();
        self.dispatch(Payload::Query(wire)).await
    }

    /// Issue a POST carrying the parameters as a form body.
    pub async fn post(self, params: Params) -> WikiResult<Session> {
        let wire = params.normalize();
        self.dispatch(Payload::Form(wire)).await
    }

    /// Log in with the fixed two-step token exchange.
    ///
    /// Fetches a login token, then posts the credentials together with
    /// that token. Fails with [`WikiError::Auth`] when the reply
    /// carries no token at the expected path.
    pub async fn authenticate(self, username: &str, password: &str) -> WikiResult<Session> {
        let token_params = Params::new()
            .add("action", "query")
            .add("format", "json")
            .add("meta", "tokens")
            .add("type", "login");
        let session = self.get(token_params).await?;

        let token = session
            .result
            .pointer("/query/tokens/logintoken")
            .and_then(|v| v.as_str())
            .map(str::to_string)
            .ok_or_else(|| WikiError::Auth("no login token in server response".into()))?;

        let login_params = Params::new()
            .add("action", "login")
            .add("format", "json")
            .add("lgname", username)
            .add("lgpassword", password)
            .add("lgtoken", token);
        session.post(login_params).await
    }

    /// Stream paginated results, one response body per item.
    ///
    /// The derived session runs in overwrite mode so each emitted chunk
    /// stands alone. Nothing is fetched until the stream is pulled.
    pub fn stream(self, params: Params) -> QueryStream {
        QueryStream::new(self.with_overwrite(true), params)
    }

    async fn dispatch(self, payload: Payload) -> WikiResult<Session> {
        let mut request = TransportRequest::new(payload);
        if let Some(cookie) = &self.cookie {
            request = request.with_header("Cookie", cookie.clone());
        }
        debug!(
            method = ?request.method(),
            params = request.payload.params().len(),
            "dispatching API request"
        );

        let response = self.transport.send(request).await?;

        let harvested = cookie::harvest(&response.headers);
        let cookie = cookie::merge(harvested, self.cookie.as_deref());
        let result = if self.options.overwrite {
            response.body
        } else {
            merge(self.result, response.body)?
        };

        Ok(Session {
            transport: self.transport,
            cookie,
            options: self.options,
            result,
        })
    }
}
