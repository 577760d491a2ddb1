//! # Dispatch Module
//!
//! The per-request hot path: from an owned request snapshot to a
//! fully-buffered reply.
//!
//! [`BoundHandler::handle`](crate::binding::BoundHandler::handle) runs
//! the whole sequence synchronously inside the serving coroutine:
//! method gate → body truncation → JSON decode → fresh context →
//! method invocation → response encode. The handler itself is
//! read-only, so one binding is shared across all concurrent
//! invocations without locks.
//!
//! Replies are buffered before a status is chosen. That ordering is
//! deliberate: a response-encode failure downgrades to a clean 500
//! with an empty body, and a status that has been written is never
//! revised.

mod core;

pub use core::{
    CapturedRequest, HeaderVec, Reply, RequestHandler, MAX_BODY_BYTES, MAX_INLINE_HEADERS,
};
