use std::sync::Arc;

use http::Method;
use smallvec::SmallVec;
use tracing::{debug, error, warn};

use crate::binding::BoundHandler;
use crate::context::RequestContext;
use crate::error::CallError;

/// Hard cap on the request body; bytes past it are dropped before
/// decode. This is a truncation boundary, not a rejection limit.
pub const MAX_BODY_BYTES: usize = 1_048_576;

/// Maximum inline headers before heap allocation. Most requests carry
/// well under sixteen.
pub const MAX_INLINE_HEADERS: usize = 16;

/// Stack-allocated header storage for the dispatch hot path.
///
/// Header names use `Arc<str>` so repeated names (content-type,
/// accept, ...) clone in O(1); values are per-request data and stay
/// `String`.
pub type HeaderVec = SmallVec<[(Arc<str>, String); MAX_INLINE_HEADERS]>;

/// Owned snapshot of an HTTP request handed to the adapter.
///
/// The raw body bytes stay readable here (and through the request
/// context) after decoding — any downstream consumer that needs the
/// body a second time reads the snapshot, there is no stream to
/// rewind.
#[derive(Debug, Clone)]
pub struct CapturedRequest {
    /// HTTP method; anything but POST is rejected by the adapter.
    pub method: Method,
    /// Request path, query string stripped.
    pub path: String,
    /// Headers with lowercased names.
    pub headers: HeaderVec,
    /// Raw body bytes as captured (already capped by the reader).
    pub body: Vec<u8>,
}

impl CapturedRequest {
    #[must_use]
    pub fn new(method: Method, path: impl Into<String>, body: Vec<u8>) -> Self {
        Self {
            method,
            path: path.into(),
            headers: HeaderVec::new(),
            body,
        }
    }

    /// Get a header by name (case-insensitive per RFC 7230).
    #[inline]
    #[must_use]
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }

    #[inline]
    #[must_use]
    pub fn body(&self) -> &[u8] {
        &self.body
    }
}

/// Fully-buffered status + JSON body pair.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reply {
    pub status: u16,
    pub body: Vec<u8>,
}

impl Reply {
    #[must_use]
    pub fn empty(status: u16) -> Self {
        Self {
            status,
            body: Vec::new(),
        }
    }

    /// Best-effort JSON body. On encode failure the status stands with
    /// an empty body and the failure is logged.
    #[must_use]
    pub fn json(status: u16, value: &impl serde::Serialize) -> Self {
        match serde_json::to_vec(value) {
            Ok(body) => Self { status, body },
            Err(err) => {
                error!(status, error = %err, "failed to encode response body");
                Self::empty(status)
            }
        }
    }
}

impl<S> BoundHandler<S> {
    /// Run one request through the bound method.
    ///
    /// POST gate, then truncate the body at [`MAX_BODY_BYTES`], decode,
    /// build a fresh [`RequestContext`], invoke per the declared
    /// convention, and buffer the outcome as a [`Reply`]. Diagnostic
    /// logging is fire-and-forget and never changes the outcome.
    #[must_use]
    pub fn handle(&self, request: &CapturedRequest) -> Reply {
        if request.method != Method::POST {
            debug!(method = %request.method, handler = %self.method(), "non-POST rejected");
            return Reply::empty(400);
        }

        let body = &request.body()[..request.body().len().min(MAX_BODY_BYTES)];
        if body.len() < request.body().len() {
            warn!(
                handler = %self.method(),
                captured = request.body().len(),
                truncated_to = MAX_BODY_BYTES,
                "request body truncated"
            );
        }

        let mut ctx = RequestContext::new(request);
        if let Some(authenticator) = self.authenticator() {
            ctx = ctx.with_authenticator(authenticator);
        }

        debug!(
            request_id = %ctx.request_id(),
            handler = %self.method(),
            body_len = body.len(),
            "dispatching"
        );

        match self.spec().call(self.service(), &ctx, body) {
            Ok(Some(value)) => match serde_json::to_vec(&value) {
                Ok(bytes) => Reply {
                    status: 200,
                    body: bytes,
                },
                Err(err) => {
                    error!(
                        request_id = %ctx.request_id(),
                        handler = %self.method(),
                        error = %err,
                        "response encode failed"
                    );
                    Reply::empty(500)
                }
            },
            // Error-only conventions carry no response value; `null`
            // is its serialization.
            Ok(None) => Reply {
                status: 200,
                body: b"null".to_vec(),
            },
            Err(CallError::Decode(err)) => {
                debug!(
                    request_id = %ctx.request_id(),
                    handler = %self.method(),
                    error = %err,
                    "request decode failed"
                );
                Reply::json(422, &err)
            }
            Err(CallError::Endpoint(err)) => {
                debug!(
                    request_id = %ctx.request_id(),
                    handler = %self.method(),
                    error = %err,
                    "endpoint returned error"
                );
                Reply::json(500, &err)
            }
            Err(CallError::Encode(err)) => {
                error!(
                    request_id = %ctx.request_id(),
                    handler = %self.method(),
                    error = %err,
                    "response encode failed"
                );
                Reply::empty(500)
            }
        }
    }
}

/// Object-safe erasure over [`BoundHandler`] so a registry can hold
/// handlers for heterogeneous services.
pub trait RequestHandler: Send + Sync {
    fn handle(&self, request: &CapturedRequest) -> Reply;
    /// Bound method name, for logs.
    fn name(&self) -> &str;
}

impl<S: Send + Sync + 'static> RequestHandler for BoundHandler<S> {
    fn handle(&self, request: &CapturedRequest) -> Reply {
        BoundHandler::handle(self, request)
    }

    fn name(&self) -> &str {
        self.method()
    }
}
