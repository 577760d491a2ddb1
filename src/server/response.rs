use may_minihttp::Response;

use crate::dispatch::Reply;

/// Every reply is JSON, regardless of outcome; the header is written
/// before any status-dependent logic runs.
pub const CONTENT_TYPE_JSON: &str = "Content-Type: application/json; charset=UTF-8";

fn status_reason(status: u16) -> &'static str {
    match status {
        200 => "OK",
        400 => "Bad Request",
        404 => "Not Found",
        422 => "Unprocessable Entity",
        500 => "Internal Server Error",
        _ => "OK",
    }
}

/// Write a buffered reply to the wire.
pub fn write_reply(res: &mut Response, reply: Reply) {
    res.header(CONTENT_TYPE_JSON);
    res.status_code(reply.status as usize, status_reason(reply.status));
    res.body_vec(reply.body);
}

/// JSON error body shortcut for paths that never reach a handler.
pub fn write_json_error(res: &mut Response, status: u16, body: serde_json::Value) {
    write_reply(
        res,
        Reply {
            status,
            body: body.to_string().into_bytes(),
        },
    );
}
