use std::io;
use std::sync::Arc;

use may_minihttp::{HttpService, Request, Response};
use serde_json::json;
use tracing::{error, info};

use super::request::capture_request;
use super::response::{write_json_error, write_reply};
use crate::dispatch::Reply;
use crate::registry::Registry;

/// HTTP entry point: captures the request, dispatches through the
/// registry, writes the buffered reply.
///
/// The registry is read-only after startup, so cloning the service for
/// each connection just bumps the `Arc`.
#[derive(Clone)]
pub struct AppService {
    pub registry: Arc<Registry>,
}

impl AppService {
    #[must_use]
    pub fn new(registry: Arc<Registry>) -> Self {
        Self { registry }
    }
}

impl HttpService for AppService {
    fn call(&mut self, req: Request, res: &mut Response) -> io::Result<()> {
        let captured = match capture_request(req) {
            Ok(captured) => captured,
            Err(err) => {
                error!(error = %err, "request capture failed");
                write_reply(res, Reply::empty(500));
                return Ok(());
            }
        };

        info!(method = %captured.method, path = %captured.path, "request received");

        match self.registry.dispatch(&captured) {
            Some(reply) => write_reply(res, reply),
            None => write_json_error(
                res,
                404,
                json!({
                    "error": "Not Found",
                    "method": captured.method.as_str(),
                    "path": captured.path,
                }),
            ),
        }
        Ok(())
    }
}
