//! Exact-path registration table.
//!
//! The registry is the host-facing registration mechanism: it binds
//! (service, method) pairs and routes externally-chosen URL paths to
//! the resulting handlers. Routing here is an exact string lookup —
//! no patterns, no prefixes, no content negotiation.

use std::collections::HashMap;
use std::sync::Arc;

use tracing::{info, warn};

use crate::binding::{bind, Service};
use crate::dispatch::{CapturedRequest, Reply, RequestHandler};
use crate::error::BindError;

/// Path → handler table, built once at startup and read-only while
/// serving.
#[derive(Default)]
pub struct Registry {
    routes: HashMap<String, Arc<dyn RequestHandler>>,
}

impl Registry {
    #[must_use]
    pub fn new() -> Self {
        Self {
            routes: HashMap::new(),
        }
    }

    /// Bind `method` on `service` and route `path` to it.
    ///
    /// A binding failure is a fatal configuration error; the host must
    /// abort startup rather than serve a partial table. Registering an
    /// existing path replaces the old handler.
    pub fn register<S: Service>(
        &mut self,
        path: &str,
        service: &Arc<S>,
        method: &str,
    ) -> Result<(), BindError> {
        let handler = bind(service, method)?;
        if self
            .routes
            .insert(path.to_string(), Arc::new(handler))
            .is_some()
        {
            warn!(path, "replaced existing handler");
        }
        info!(path, method, total_routes = self.routes.len(), "route registered");
        Ok(())
    }

    /// Register every method of `service` under `"{prefix}/{name}"`.
    pub fn mount<S: Service>(&mut self, service: &Arc<S>) -> Result<(), BindError> {
        let prefix = S::prefix().trim_end_matches('/');
        for name in S::methods().names() {
            let path = format!("{prefix}/{name}");
            self.register(&path, service, &name)?;
        }
        Ok(())
    }

    /// Dispatch by exact path. `None` when no handler is registered
    /// for the request's path.
    #[must_use]
    pub fn dispatch(&self, request: &CapturedRequest) -> Option<Reply> {
        let handler = self.routes.get(&request.path)?;
        Some(handler.handle(request))
    }

    /// Registered paths, in no particular order.
    #[must_use]
    pub fn paths(&self) -> Vec<&str> {
        self.routes.keys().map(String::as_str).collect()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.routes.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }
}
