//! Per-invocation request context.

use std::fmt;

use crate::dispatch::CapturedRequest;
use crate::ids::RequestId;

/// Identifies the caller from request credentials.
///
/// The adapter only carries an authenticator on the context; whether
/// and when to consult it is the bound method's decision. Enforcement
/// is out of scope here.
pub trait Authenticator: Send + Sync {
    fn authenticate(&self, request: &CapturedRequest) -> Option<String>;
}

/// Carrier for one invocation: the originating request, a freshly
/// minted [`RequestId`], and the ambient authenticator.
///
/// Created per call and dropped when the call completes; never shared
/// across requests.
pub struct RequestContext<'r> {
    request: &'r CapturedRequest,
    request_id: RequestId,
    authenticator: Option<&'r dyn Authenticator>,
}

impl<'r> RequestContext<'r> {
    #[must_use]
    pub fn new(request: &'r CapturedRequest) -> Self {
        Self {
            request,
            request_id: RequestId::new(),
            authenticator: None,
        }
    }

    #[must_use]
    pub fn with_authenticator(mut self, authenticator: &'r dyn Authenticator) -> Self {
        self.authenticator = Some(authenticator);
        self
    }

    /// The originating request.
    #[must_use]
    pub fn request(&self) -> &CapturedRequest {
        self.request
    }

    #[must_use]
    pub fn request_id(&self) -> RequestId {
        self.request_id
    }

    /// Raw captured body bytes; still readable after decode.
    #[must_use]
    pub fn body(&self) -> &[u8] {
        self.request.body()
    }

    #[must_use]
    pub fn header(&self, name: &str) -> Option<&str> {
        self.request.header(name)
    }

    /// Ask the ambient authenticator, if any, to identify the caller.
    #[must_use]
    pub fn caller(&self) -> Option<String> {
        self.authenticator
            .and_then(|a| a.authenticate(self.request))
    }
}

impl fmt::Debug for RequestContext<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RequestContext")
            .field("request_id", &self.request_id)
            .field("path", &self.request.path)
            .field("has_authenticator", &self.authenticator.is_some())
            .finish()
    }
}
