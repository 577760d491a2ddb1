//! # postwire
//!
//! Expose ordinary methods on a service object as HTTP POST JSON
//! handlers, powered by the `may` coroutine runtime and `may_minihttp`.
//!
//! A method's calling convention — does it take a request value, does
//! it return a response — is declared when its service registers it.
//! The adapter turns each declared method into a handler that reads
//! the request body (capped at 1 MiB, truncating), decodes it as JSON,
//! invokes the method with a fresh per-request context, and serializes
//! the result or error back to JSON.
//!
//! ## Architecture
//!
//! - **[`binding`]** — calling-convention declaration, method tables, [`bind`]
//! - **[`dispatch`]** — the per-request hot path from captured request to reply
//! - **[`context`]** — per-invocation request context
//! - **[`registry`]** — exact-path registration table consumed by the server
//! - **[`server`]** — HTTP glue built on `may_minihttp`
//! - **[`error`]** — binding and dispatch error taxonomy
//!
//! ## Wire contract
//!
//! POST only: any other method is a bodyless 400. Request and response
//! bodies are JSON, and replies always carry
//! `Content-Type: application/json; charset=UTF-8`. A body that fails
//! to decode is a 422 with the decode error as the body; a method
//! error is a 500 with the error value as the body. Bodies longer than
//! 1 MiB are truncated before decoding, not rejected.
//!
//! ## Quick start
//!
//! ```no_run
//! use std::sync::Arc;
//!
//! use postwire::server::{AppService, HttpServer};
//! use postwire::{EndpointError, MethodSpec, MethodTable, Registry, RequestContext, Service};
//! use serde::{Deserialize, Serialize};
//!
//! #[derive(Deserialize)]
//! struct SubmitRequest {
//!     name: String,
//! }
//!
//! #[derive(Serialize)]
//! struct SubmitReply {
//!     ok: bool,
//! }
//!
//! struct Orders;
//!
//! impl Orders {
//!     fn submit(
//!         &self,
//!         _ctx: &RequestContext<'_>,
//!         req: SubmitRequest,
//!     ) -> Result<SubmitReply, EndpointError> {
//!         Ok(SubmitReply {
//!             ok: !req.name.is_empty(),
//!         })
//!     }
//! }
//!
//! impl Service for Orders {
//!     fn prefix() -> &'static str {
//!         "/orders"
//!     }
//!
//!     fn methods() -> MethodTable<Self> {
//!         MethodTable::new().with("submit", MethodSpec::request_reply(Orders::submit))
//!     }
//! }
//!
//! fn main() -> anyhow::Result<()> {
//!     postwire::logging::init();
//!     postwire::RuntimeConfig::from_env().apply();
//!
//!     let mut registry = Registry::new();
//!     registry.mount(&Arc::new(Orders))?;
//!
//!     let server = HttpServer(AppService::new(Arc::new(registry)));
//!     let handle = server.start("0.0.0.0:8080")?;
//!     handle.join().ok();
//!     Ok(())
//! }
//! ```
//!
//! ## Runtime considerations
//!
//! postwire runs on the `may` coroutine runtime, not tokio. Each
//! request is handled synchronously in its own coroutine; bindings are
//! read-only after startup and shared across invocations without
//! locks. Stack size is configurable via `POSTWIRE_STACK_SIZE`; see
//! [`runtime_config`].

pub mod binding;
pub mod context;
pub mod dispatch;
pub mod error;
pub mod ids;
pub mod logging;
pub mod registry;
pub mod runtime_config;
pub mod server;

pub use binding::{bind, BoundHandler, CallShape, Empty, MethodSpec, MethodTable, Service, Signature};
pub use context::{Authenticator, RequestContext};
pub use dispatch::{CapturedRequest, HeaderVec, Reply, RequestHandler, MAX_BODY_BYTES};
pub use error::{BindError, CallError, DecodeError, EndpointError};
pub use ids::RequestId;
pub use registry::Registry;
pub use runtime_config::RuntimeConfig;
