//! Lazy continuation streaming over paginated query results.

use std::mem;

use serde_json::Value;

use crate::error::WikiResult;
use crate::params::{ParamValue, Params};
use crate::session::Session;

/// Pull-based sequence of standalone result chunks.
///
/// Each pull issues exactly one request through the carried session.
/// The server's `continue` object, when present, is folded into the
/// next request's parameters; its absence ends the stream. Stopping
/// early is just not pulling again: no cleanup runs and no further
/// requests are made.
pub struct QueryStream {
    state: State,
}

enum State {
    /// No request issued yet.
    Start { session: Session, params: Params },
    /// At least one chunk emitted and the server promised more.
    Continue { session: Session, params: Params },
    /// Exhausted, by completion or by error.
    Done,
}

impl QueryStream {
    pub(crate) fn new(session: Session, params: Params) -> Self {
        Self {
            state: State::Start { session, params },
        }
    }

    /// Whether the stream has terminated.
    pub fn is_done(&self) -> bool {
        matches!(self.state, State::Done)
    }

    /// Fetch the next chunk, or `None` once the stream is exhausted.
    ///
    /// A failed request yields `Some(Err(..))` and terminates the
    /// stream; a later pull returns `None`.
    pub async fn next(&mut self) -> Option<WikiResult<Value>> {
        let (session, params) = match mem::replace(&mut self.state, State::Done) {
            State::Start { session, params } | State::Continue { session, params } => {
                (session, params)
            }
            State::Done => return None,
        };

        let session = match session.get(params.clone()).await {
            Ok(session) => session,
            Err(e) => return Some(Err(e)),
        };

        match session.result().get("continue").and_then(Value::as_object).cloned() {
            Some(tokens) => {
                let mut next_params = params;
                for (key, value) in &tokens {
                    next_params.set(key.clone(), continuation_value(value));
                }
                let chunk = session.result().clone();
                self.state = State::Continue {
                    session,
                    params: next_params,
                };
                Some(Ok(chunk))
            }
            None => Some(Ok(session.into_result())),
        }
    }
}

/// Continuation tokens arrive as JSON scalars; put them on the wire
/// exactly as the server spelled them.
fn continuation_value(value: &Value) -> ParamValue {
    match value.as_str() {
        Some(s) => ParamValue::Scalar(s.to_string()),
        None => ParamValue::Scalar(value.to_string()),
    }
}
