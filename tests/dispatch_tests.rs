//! Tests for the dispatch adapter hot path.
//!
//! Requests are constructed directly against the bound handler — the
//! whole path from method gate to encoded reply runs synchronously, so
//! no server or coroutine runtime is needed here.

use std::sync::Arc;

use http::Method;
use postwire::{
    bind, BoundHandler, CapturedRequest, EndpointError, MethodSpec, MethodTable, RequestContext,
    Service, MAX_BODY_BYTES,
};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

#[derive(Debug, Deserialize, Serialize, PartialEq)]
struct SubmitRequest {
    #[serde(rename = "Name")]
    name: String,
}

#[derive(Debug, Deserialize, Serialize, PartialEq)]
struct SubmitReply {
    #[serde(rename = "OK")]
    ok: bool,
}

struct Orders;

impl Orders {
    fn submit(
        &self,
        _ctx: &RequestContext<'_>,
        req: SubmitRequest,
    ) -> Result<SubmitReply, EndpointError> {
        Ok(SubmitReply {
            ok: !req.name.is_empty(),
        })
    }

    fn reject(
        &self,
        _ctx: &RequestContext<'_>,
        _req: SubmitRequest,
    ) -> Result<SubmitReply, EndpointError> {
        Err(EndpointError::new("submission rejected"))
    }

    fn flush(&self, _ctx: &RequestContext<'_>) -> Result<(), EndpointError> {
        Ok(())
    }

    fn body_len(&self, ctx: &RequestContext<'_>) -> Result<usize, EndpointError> {
        Ok(ctx.body().len())
    }
}

impl Service for Orders {
    fn prefix() -> &'static str {
        "/orders"
    }

    fn methods() -> MethodTable<Self> {
        MethodTable::new()
            .with("submit", MethodSpec::request_reply(Orders::submit))
            .with("reject", MethodSpec::request_reply(Orders::reject))
            .with("flush", MethodSpec::context_only(Orders::flush))
            .with("body_len", MethodSpec::context_reply(Orders::body_len))
    }
}

fn handler(method: &str) -> BoundHandler<Orders> {
    bind(&Arc::new(Orders), method).unwrap()
}

fn post(path: &str, body: &[u8]) -> CapturedRequest {
    CapturedRequest::new(Method::POST, path, body.to_vec())
}

fn body_json(reply_body: &[u8]) -> Value {
    serde_json::from_slice(reply_body).expect("reply body must be JSON")
}

#[test]
fn submit_round_trips_request_and_reply() {
    let reply = handler("submit").handle(&post("/orders/submit", br#"{"Name":"x"}"#));
    assert_eq!(reply.status, 200);
    assert_eq!(body_json(&reply.body), json!({"OK": true}));
}

#[test]
fn non_post_is_rejected_with_empty_body() {
    let submit = handler("submit");
    for method in [Method::GET, Method::PUT, Method::DELETE, Method::HEAD] {
        let req = CapturedRequest::new(method.clone(), "/orders/submit", Vec::new());
        let reply = submit.handle(&req);
        assert_eq!(reply.status, 400, "method {method}");
        assert!(reply.body.is_empty(), "method {method}");
    }
}

#[test]
fn malformed_json_yields_422_with_parse_error_body() {
    let reply = handler("submit").handle(&post("/orders/submit", br#"{"Name":"#));
    assert_eq!(reply.status, 422);
    let body = body_json(&reply.body);
    assert!(body.get("message").is_some());
    assert!(body.get("line").is_some());
    // The decode error, never the reply type.
    assert!(body.get("OK").is_none());
}

#[test]
fn typed_request_rejects_empty_body() {
    // An empty body is only valid for methods that take no request
    // value; `Name` is required here.
    let reply = handler("submit").handle(&post("/orders/submit", b""));
    assert_eq!(reply.status, 422);
}

#[test]
fn context_only_method_accepts_empty_body() {
    let reply = handler("flush").handle(&post("/orders/flush", b""));
    assert_eq!(reply.status, 200);
    assert_eq!(reply.body, b"null");
}

#[test]
fn context_only_method_ignores_unknown_fields() {
    let reply = handler("flush").handle(&post("/orders/flush", br#"{"stray":"field"}"#));
    assert_eq!(reply.status, 200);
}

#[test]
fn oversized_body_truncates_then_decodes() {
    // ~2 MB of valid JSON; the 1 MiB truncation point lands inside the
    // string, so the prefix is unterminated JSON: a decode failure
    // (422), never a read/size failure (500).
    let mut body = br#"{"Name":""#.to_vec();
    body.resize(body.len() + 2_000_000, b'a');
    body.extend_from_slice(br#""}"#);
    assert!(body.len() > MAX_BODY_BYTES);

    let reply = handler("submit").handle(&post("/orders/submit", &body));
    assert_eq!(reply.status, 422);
    assert!(body_json(&reply.body).get("message").is_some());
}

#[test]
fn method_error_takes_precedence_over_response_value() {
    let reply = handler("reject").handle(&post("/orders/reject", br#"{"Name":"x"}"#));
    assert_eq!(reply.status, 500);
    // The error value is the body; no reply value is ever encoded.
    assert_eq!(body_json(&reply.body), json!({"message": "submission rejected"}));
}

#[test]
fn context_exposes_raw_body_after_decode() {
    let payload = br#"{"seen": true}"#;
    let reply = handler("body_len").handle(&post("/orders/body_len", payload));
    assert_eq!(reply.status, 200);
    assert_eq!(body_json(&reply.body), json!(payload.len()));
}

#[test]
fn encode_then_decode_is_identity() {
    let request = SubmitRequest {
        name: "carrier".to_string(),
    };
    let bytes = serde_json::to_vec(&request).unwrap();
    let back: SubmitRequest = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(request, back);

    let reply = SubmitReply { ok: true };
    let bytes = serde_json::to_vec(&reply).unwrap();
    let back: SubmitReply = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(reply, back);
}

#[test]
fn handler_is_shareable_across_invocations() {
    let submit = Arc::new(handler("submit"));
    let first = submit.handle(&post("/orders/submit", br#"{"Name":"a"}"#));
    let second = submit.handle(&post("/orders/submit", br#"{"Name":""}"#));
    assert_eq!(first.status, 200);
    assert_eq!(body_json(&first.body), json!({"OK": true}));
    assert_eq!(second.status, 200);
    assert_eq!(body_json(&second.body), json!({"OK": false}));
}
