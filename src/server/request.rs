use std::io::{self, Read};
use std::sync::Arc;

use may_minihttp::Request;
use tracing::debug;

use crate::dispatch::{CapturedRequest, HeaderVec, MAX_BODY_BYTES};

/// Snapshot a raw HTTP request: method, path (query string stripped),
/// lowercased headers, and the body read up to
/// [`MAX_BODY_BYTES`](crate::dispatch::MAX_BODY_BYTES). Bytes past the
/// cap are silently dropped — truncation, not rejection.
pub fn capture_request(req: Request) -> io::Result<CapturedRequest> {
    let method = req
        .method()
        .parse()
        .map_err(|_| io::Error::new(io::ErrorKind::InvalidData, "unrecognized method"))?;
    let raw_path = req.path().to_string();
    let path = raw_path.split('?').next().unwrap_or("/").to_string();

    let headers: HeaderVec = req
        .headers()
        .iter()
        .map(|h| {
            (
                Arc::from(h.name.to_ascii_lowercase()),
                String::from_utf8_lossy(h.value).to_string(),
            )
        })
        .collect();

    let mut body = Vec::new();
    req.body().take(MAX_BODY_BYTES as u64).read_to_end(&mut body)?;

    debug!(
        path = %path,
        header_count = headers.len(),
        body_len = body.len(),
        "request captured"
    );

    Ok(CapturedRequest {
        method,
        path,
        headers,
        body,
    })
}
