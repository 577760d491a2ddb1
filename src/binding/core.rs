use std::sync::Arc;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::info;

use crate::context::{Authenticator, RequestContext};
use crate::error::{BindError, CallError, DecodeError, EndpointError};

/// Input/output arity of a bound method.
///
/// Inputs count the context plus any request or output parameters;
/// outputs count the response value and the error. Valid ranges are
/// `num_in ∈ {1,2,3}` and `num_out ∈ {1,2}`, except that a 3-input
/// method must be error-only: the response message is either an input
/// or an output, not both.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct Signature {
    pub num_in: u8,
    pub num_out: u8,
}

impl Signature {
    #[must_use]
    pub const fn new(num_in: u8, num_out: u8) -> Self {
        Self { num_in, num_out }
    }

    /// Whether this signature is one the adapter can dispatch to.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        (1..=3).contains(&self.num_in)
            && (1..=2).contains(&self.num_out)
            && !(self.num_in == 3 && self.num_out == 2)
    }
}

impl std::fmt::Display for Signature {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({} in, {} out)", self.num_in, self.num_out)
    }
}

/// The supported calling conventions, declared at registration time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CallShape {
    /// `fn(&S, &RequestContext) -> Result<(), EndpointError>`
    ContextOnly,
    /// `fn(&S, &RequestContext) -> Result<R, EndpointError>`
    ContextReply,
    /// `fn(&S, &RequestContext, Q) -> Result<(), EndpointError>`
    Request,
    /// `fn(&S, &RequestContext, Q) -> Result<R, EndpointError>`
    RequestReply,
    /// A convention declared by raw signature rather than a typed
    /// constructor, such as the three-input output-parameter style.
    Declared(Signature),
}

impl CallShape {
    #[must_use]
    pub fn signature(&self) -> Signature {
        match self {
            CallShape::ContextOnly => Signature::new(1, 1),
            CallShape::ContextReply => Signature::new(1, 2),
            CallShape::Request => Signature::new(2, 1),
            CallShape::RequestReply => Signature::new(2, 2),
            CallShape::Declared(sig) => *sig,
        }
    }
}

/// Zero-field decode target for methods that take no request value.
///
/// The body is still read for these methods; an empty or `{}` body
/// decodes successfully, and unknown fields are ignored.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Empty {}

fn decode_body<Q: DeserializeOwned>(body: &[u8]) -> Result<Q, CallError> {
    // An absent body decodes as the empty object. Only no-request
    // methods accept that in practice; request types with required
    // fields still fail with a decode error.
    let bytes: &[u8] = if body.is_empty() { b"{}" } else { body };
    serde_json::from_slice(bytes).map_err(|err| CallError::Decode(DecodeError::from(&err)))
}

/// Uniform erased entry point stored in a [`MethodSpec`].
///
/// Takes the service, the per-call context, and the (already
/// truncated) raw body bytes; returns the serialized response value
/// when the convention carries one.
pub type Invoker<S> =
    Box<dyn Fn(&S, &RequestContext<'_>, &[u8]) -> Result<Option<Value>, CallError> + Send + Sync>;

/// A declared method: its calling convention plus the erased invoker
/// that decodes, calls, and serializes for that convention.
pub struct MethodSpec<S> {
    shape: CallShape,
    invoke: Invoker<S>,
}

impl<S> MethodSpec<S> {
    /// Error-only method taking no request value.
    pub fn context_only<F>(call: F) -> Self
    where
        F: Fn(&S, &RequestContext<'_>) -> Result<(), EndpointError> + Send + Sync + 'static,
    {
        Self {
            shape: CallShape::ContextOnly,
            invoke: Box::new(move |service, ctx, body| {
                let Empty {} = decode_body(body)?;
                call(service, ctx)?;
                Ok(None)
            }),
        }
    }

    /// Method taking no request value and returning a response.
    pub fn context_reply<R, F>(call: F) -> Self
    where
        R: Serialize,
        F: Fn(&S, &RequestContext<'_>) -> Result<R, EndpointError> + Send + Sync + 'static,
    {
        Self {
            shape: CallShape::ContextReply,
            invoke: Box::new(move |service, ctx, body| {
                let Empty {} = decode_body(body)?;
                let reply = call(service, ctx)?;
                Ok(Some(serde_json::to_value(reply).map_err(CallError::Encode)?))
            }),
        }
    }

    /// Error-only method taking a decoded request value.
    pub fn request<Q, F>(call: F) -> Self
    where
        Q: DeserializeOwned,
        F: Fn(&S, &RequestContext<'_>, Q) -> Result<(), EndpointError> + Send + Sync + 'static,
    {
        Self {
            shape: CallShape::Request,
            invoke: Box::new(move |service, ctx, body| {
                let request: Q = decode_body(body)?;
                call(service, ctx, request)?;
                Ok(None)
            }),
        }
    }

    /// Method taking a decoded request value and returning a response.
    pub fn request_reply<Q, R, F>(call: F) -> Self
    where
        Q: DeserializeOwned,
        R: Serialize,
        F: Fn(&S, &RequestContext<'_>, Q) -> Result<R, EndpointError> + Send + Sync + 'static,
    {
        Self {
            shape: CallShape::RequestReply,
            invoke: Box::new(move |service, ctx, body| {
                let request: Q = decode_body(body)?;
                let reply = call(service, ctx, request)?;
                Ok(Some(serde_json::to_value(reply).map_err(CallError::Encode)?))
            }),
        }
    }

    /// Declare a method by raw signature with a pre-erased invoker.
    ///
    /// This is the escape hatch for conventions the typed constructors
    /// do not model — notably the three-input output-parameter style,
    /// where the invoker allocates the output value itself before the
    /// target call. The signature is validated at bind time like any
    /// other; the adapter hands the invoker the context and body and
    /// nothing more.
    pub fn declared<F>(signature: Signature, invoke: F) -> Self
    where
        F: Fn(&S, &RequestContext<'_>, &[u8]) -> Result<Option<Value>, CallError>
            + Send
            + Sync
            + 'static,
    {
        Self {
            shape: CallShape::Declared(signature),
            invoke: Box::new(invoke),
        }
    }

    #[must_use]
    pub fn shape(&self) -> CallShape {
        self.shape
    }

    #[must_use]
    pub fn signature(&self) -> Signature {
        self.shape.signature()
    }

    pub(crate) fn call(
        &self,
        service: &S,
        ctx: &RequestContext<'_>,
        body: &[u8],
    ) -> Result<Option<Value>, CallError> {
        (self.invoke)(service, ctx, body)
    }
}

/// Ordered name → spec table a [`Service`] publishes.
pub struct MethodTable<S> {
    entries: Vec<(String, MethodSpec<S>)>,
}

impl<S> MethodTable<S> {
    #[must_use]
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Add a method under `name`. A later entry with the same name
    /// replaces the earlier one.
    #[must_use]
    pub fn with(mut self, name: &str, spec: MethodSpec<S>) -> Self {
        self.entries.retain(|(n, _)| n != name);
        self.entries.push((name.to_string(), spec));
        self
    }

    /// Declared names in registration order.
    #[must_use]
    pub fn names(&self) -> Vec<String> {
        self.entries.iter().map(|(n, _)| n.clone()).collect()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn take(&mut self, name: &str) -> Option<MethodSpec<S>> {
        let idx = self.entries.iter().position(|(n, _)| n == name)?;
        Some(self.entries.remove(idx).1)
    }
}

impl<S> Default for MethodTable<S> {
    fn default() -> Self {
        Self::new()
    }
}

/// A value whose methods can be exposed as POST JSON handlers.
///
/// `prefix` is the path prefix the registry mounts the table under;
/// `methods` declares each exposed method together with its calling
/// convention.
pub trait Service: Send + Sync + Sized + 'static {
    fn prefix() -> &'static str;
    fn methods() -> MethodTable<Self>;
}

/// A bound (service, method) pair: immutable after construction and
/// safely shared across concurrent invocations.
pub struct BoundHandler<S> {
    service: Arc<S>,
    method: String,
    spec: MethodSpec<S>,
    authenticator: Option<Arc<dyn Authenticator>>,
}

impl<S> BoundHandler<S> {
    /// Attach an authenticator carried on every request context this
    /// handler creates. The adapter never consults it; identifying the
    /// caller is the bound method's own business.
    #[must_use]
    pub fn with_authenticator(mut self, authenticator: Arc<dyn Authenticator>) -> Self {
        self.authenticator = Some(authenticator);
        self
    }

    #[must_use]
    pub fn method(&self) -> &str {
        &self.method
    }

    #[must_use]
    pub fn shape(&self) -> CallShape {
        self.spec.shape()
    }

    #[must_use]
    pub fn signature(&self) -> Signature {
        self.spec.signature()
    }

    pub(crate) fn spec(&self) -> &MethodSpec<S> {
        &self.spec
    }

    pub(crate) fn service(&self) -> &S {
        &self.service
    }

    pub(crate) fn authenticator(&self) -> Option<&dyn Authenticator> {
        self.authenticator.as_deref()
    }
}

/// Resolve `method` in the service's table and validate its signature.
///
/// A failure here is a fatal configuration error: surface it at
/// startup and abort, never fall back at runtime.
pub fn bind<S: Service>(service: &Arc<S>, method: &str) -> Result<BoundHandler<S>, BindError> {
    let mut table = S::methods();
    let spec = table
        .take(method)
        .ok_or_else(|| BindError::MethodNotFound {
            service: S::prefix(),
            method: method.to_string(),
        })?;

    let signature = spec.signature();
    if !signature.is_valid() {
        return Err(BindError::InvalidSignature {
            method: method.to_string(),
            signature,
        });
    }

    info!(service = S::prefix(), method, signature = %signature, "method bound");

    Ok(BoundHandler {
        service: Arc::clone(service),
        method: method.to_string(),
        spec,
        authenticator: None,
    })
}
